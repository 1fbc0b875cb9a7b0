use std::sync::Arc;

use tracing::warn;
use tyre_api_rest::RestServerConfig;
use tyre_config::Config;
use tyre_core_contact_impl::ContactFeatureConfig;
use types::{ContactFeature, ContactRepo, Database, Email, RestServer, Time};

pub mod types;

/// Settings of all services that only depend on the configuration.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    rest_server_config: RestServerConfig,
    contact_feature_config: ContactFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        let rest_server_config = RestServerConfig {
            host: config.http.host,
            port: config.http.port,
            static_dir: config.http.static_dir.clone(),
            body_limit: config.http.body_limit,
        };

        let recipient = config.contact.recipient().unwrap_or_else(|err| {
            warn!("{err:#}, email notifications are disabled");
            None
        });
        let contact_feature_config = ContactFeatureConfig {
            recipient: recipient.map(Arc::new),
            notification_timeout: config.contact.notification_timeout.into(),
        };

        Self {
            rest_server_config,
            contact_feature_config,
        }
    }

    pub fn rest_server_config(&self) -> &RestServerConfig {
        &self.rest_server_config
    }

    pub fn contact_feature_config(&self) -> &ContactFeatureConfig {
        &self.contact_feature_config
    }
}

/// Builds the service graph on top of the external connections.
#[derive(Debug, Clone)]
pub struct Provider {
    database: Database,
    email: Option<Email>,
    config: ConfigProvider,
}

impl Provider {
    pub fn new(config: ConfigProvider, database: Database, email: Option<Email>) -> Self {
        Self {
            database,
            email,
            config,
        }
    }

    pub fn contact_feature(&self) -> ContactFeature {
        ContactFeature::new(
            self.database.clone(),
            Time::default(),
            ContactRepo::default(),
            self.email.clone(),
            self.config.contact_feature_config().clone(),
        )
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(
            self.config.rest_server_config().clone(),
            self.contact_feature(),
        )
    }
}
