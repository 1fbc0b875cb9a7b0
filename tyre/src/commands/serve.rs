use tracing::{info, warn};
use tyre_config::Config;
use tyre_email_contracts::EmailService;
use tyre_persistence_contracts::Database;

use crate::{
    database, email,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to database");
    let database = database::connect(&config.database).await?;
    database.ping().await?;

    info!("Applying pending migrations");
    let mut applied = false;
    for name in database.run_migrations(None).await? {
        info!("Applied {name}");
        applied = true;
    }
    if !applied {
        info!("No migrations pending");
    }

    let email = email::connect(&config.smtp, &config.contact)?;
    if let Some(email) = &email {
        info!("Connecting to smtp server");
        match email.ping().await {
            Ok(()) => info!("SMTP ready"),
            Err(err) => warn!("SMTP verify failed: {err:#}"),
        }
    }

    let provider = Provider::new(ConfigProvider::new(&config), database, email);
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    provider.rest_server().serve().await
}
