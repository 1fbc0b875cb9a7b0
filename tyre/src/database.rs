use tyre_config::DatabaseConfig;
use tyre_persistence_sqlite::{SqliteDatabase, SqliteDatabaseConfig};

pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<SqliteDatabase> {
    SqliteDatabase::connect(&SqliteDatabaseConfig {
        url: config.url.clone(),
        max_connections: config.max_connections,
        min_connections: config.min_connections,
        acquire_timeout: config.acquire_timeout.into(),
        busy_timeout: config.busy_timeout.into(),
        idle_timeout: config.idle_timeout.map(Into::into),
        max_lifetime: config.max_lifetime.map(Into::into),
    })
    .await
}
