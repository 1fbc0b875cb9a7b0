use std::future::Future;

use tyre_models::contact::{ContactMessage, ContactMessageId, NewContactMessage};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactRepository<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Inserts a new contact message. The id is assigned by the database.
    fn create(
        &self,
        txn: &mut Txn,
        message: &NewContactMessage,
    ) -> impl Future<Output = anyhow::Result<InsertedRow>> + Send;

    fn get(
        &self,
        txn: &mut Txn,
        id: ContactMessageId,
    ) -> impl Future<Output = anyhow::Result<Option<ContactMessage>>> + Send;

    /// Returns all contact messages ordered by id.
    fn list(&self, txn: &mut Txn) -> impl Future<Output = anyhow::Result<Vec<ContactMessage>>> + Send;

    fn count(&self, txn: &mut Txn) -> impl Future<Output = anyhow::Result<u64>> + Send;
}

/// Outcome of a single-row insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertedRow {
    pub id: ContactMessageId,
    pub rows_affected: u64,
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockContactRepository<Txn> {
    pub fn with_create(mut self, message: NewContactMessage, result: InsertedRow) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(message),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_create_error(mut self, message: NewContactMessage) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(message),
            )
            .return_once(|_, _| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!("database is locked"))))
            });
        self
    }
}
