use std::{collections::HashSet, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Connection, Sqlite, SqliteConnection, SqlitePool,
};
use tracing::trace;
use tyre_persistence_contracts::{Database, Transaction};
use tyre_utils::trace_instrument;

pub mod contact;

#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

#[derive(Debug)]
pub struct SqliteDatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    /// How long a statement waits for a lock held by another connection.
    pub busy_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl SqliteDatabaseConfig {
    /// A private in-memory database.
    ///
    /// Pinned to a single connection that never expires, since every sqlite
    /// connection to `:memory:` opens a separate database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(5),
            idle_timeout: None,
            max_lifetime: None,
        }
    }
}

impl SqliteDatabase {
    pub async fn connect(config: &SqliteDatabaseConfig) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .with_context(|| format!("Invalid sqlite url {:?}", config.url))?
            .create_if_missing(true)
            .busy_timeout(config.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub async fn list_migrations(&self) -> anyhow::Result<Vec<MigrationStatus>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire database connection")?;
        create_migrations_table(&mut conn)
            .await
            .context("Failed to create migrations table")?;
        list_migrations(&mut conn)
            .await
            .context("Failed to list migrations")
    }

    /// Applies up to `cnt` pending migrations (all if `None`) and returns the
    /// names of the applied ones. Already applied migrations are skipped, so
    /// this is safe to call on every startup.
    pub async fn run_migrations(&self, cnt: Option<usize>) -> anyhow::Result<Vec<&'static str>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire database connection")?;
        create_migrations_table(&mut conn)
            .await
            .context("Failed to create migrations table")?;

        let mut out = Vec::new();
        let pending = list_migrations(&mut conn)
            .await
            .context("Failed to list migrations")?
            .into_iter()
            .filter_map(|MigrationStatus { migration, applied }| (!applied).then_some(migration))
            .take(cnt.unwrap_or(usize::MAX));
        for migration in pending {
            let mut txn = conn.begin().await.context("Failed to begin transaction")?;
            sqlx::raw_sql(migration.up)
                .execute(&mut *txn)
                .await
                .with_context(|| format!("Failed to run migration {}", migration.name))?;
            sqlx::query("insert into _migrations (name) values (?1)")
                .bind(migration.name)
                .execute(&mut *txn)
                .await
                .with_context(|| format!("Failed to mark migration {} as run", migration.name))?;
            txn.commit().await.context("Failed to commit transaction")?;
            out.push(migration.name);
        }
        Ok(out)
    }

    pub async fn revert_migrations(&self, cnt: Option<usize>) -> anyhow::Result<Vec<&'static str>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire database connection")?;
        create_migrations_table(&mut conn)
            .await
            .context("Failed to create migrations table")?;

        let mut out = Vec::new();
        let applied = list_migrations(&mut conn)
            .await
            .context("Failed to list migrations")?
            .into_iter()
            .rev()
            .filter_map(|MigrationStatus { migration, applied }| applied.then_some(migration))
            .take(cnt.unwrap_or(usize::MAX));
        for migration in applied {
            let mut txn = conn.begin().await.context("Failed to begin transaction")?;
            sqlx::raw_sql(migration.down)
                .execute(&mut *txn)
                .await
                .with_context(|| format!("Failed to revert migration {}", migration.name))?;
            sqlx::query("delete from _migrations where name = ?1")
                .bind(migration.name)
                .execute(&mut *txn)
                .await
                .with_context(|| {
                    format!("Failed to mark migration {} as reverted", migration.name)
                })?;
            txn.commit().await.context("Failed to commit transaction")?;
            out.push(migration.name);
        }

        Ok(out)
    }
}

impl Database for SqliteDatabase {
    type Transaction = SqliteTransaction;

    async fn begin_transaction(&self) -> anyhow::Result<Self::Transaction> {
        trace!("begin transaction");

        self.pool
            .begin()
            .await
            .map(|txn| SqliteTransaction { txn })
            .context("Failed to begin transaction")
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire database connection")?;

        sqlx::query_scalar::<_, i64>("select 1")
            .fetch_one(&mut *conn)
            .await
            .map_err(Into::into)
            .and_then(|res| {
                (res == 1)
                    .then_some(())
                    .ok_or_else(|| anyhow!("Expected a result of 1, got {res} instead"))
            })
            .context("Failed to ping database")
    }
}

pub struct SqliteTransaction {
    txn: sqlx::Transaction<'static, Sqlite>,
}

impl SqliteTransaction {
    fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.txn
    }
}

impl Transaction for SqliteTransaction {
    async fn commit(self) -> anyhow::Result<()> {
        trace!("commit transaction");

        self.txn
            .commit()
            .await
            .context("Failed to commit transaction")
    }

    async fn rollback(self) -> anyhow::Result<()> {
        trace!("rollback transaction");

        self.txn
            .rollback()
            .await
            .context("Failed to rollback transaction")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct MigrationStatus {
    pub migration: Migration,
    pub applied: bool,
}

// generated by `build.rs` script
pub const MIGRATIONS: &[Migration] = include!(env!("MIGRATIONS"));

async fn create_migrations_table(conn: &mut SqliteConnection) -> anyhow::Result<()> {
    sqlx::query("create table if not exists _migrations (name text primary key)")
        .execute(conn)
        .await?;
    Ok(())
}

async fn list_migrations(conn: &mut SqliteConnection) -> anyhow::Result<Vec<MigrationStatus>> {
    let applied = sqlx::query_scalar::<_, String>("select name from _migrations")
        .fetch_all(conn)
        .await?
        .into_iter()
        .collect::<HashSet<String>>();

    Ok(MIGRATIONS
        .iter()
        .map(|&migration| MigrationStatus {
            migration,
            applied: applied.contains(migration.name),
        })
        .collect())
}
