use tyre_core_contact_impl::ContactFeatureServiceImpl;
use tyre_email_impl::EmailServiceImpl;
use tyre_persistence_sqlite::{contact::SqliteContactRepository, SqliteDatabase};
use tyre_shared_impl::time::TimeServiceImpl;

// API
pub type RestServer = tyre_api_rest::RestServer<ContactFeature>;

// Persistence
pub type Database = SqliteDatabase;
pub type ContactRepo = SqliteContactRepository;

// Email
pub type Email = EmailServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Database, Time, ContactRepo, Email>;
