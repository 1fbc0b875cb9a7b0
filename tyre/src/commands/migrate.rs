use anyhow::ensure;
use clap::Subcommand;
use tyre_config::Config;
use tyre_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use tyre_persistence_sqlite::{contact::SqliteContactRepository, MigrationStatus, SqliteDatabase};

use crate::database;

#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// List all pending and applied migrations
    #[command(aliases(["status", "s", "l"]))]
    List,
    /// Apply all pending migrations
    #[command(aliases(["up", "u"]))]
    Run {
        /// Only apply the next `n` migrations
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Revert the last migration
    #[command(aliases(["down", "d"]))]
    Revert {
        /// Revert the last `n` migrations
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
        #[arg(long, required = true)]
        force: bool,
    },
    /// Apply all pending migrations and fill an empty database with the demo
    /// messages
    Demo,
}

impl MigrateCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let db = database::connect(&config.database).await?;
        match self {
            Self::List => list(db).await,
            Self::Run { count } => run(db, count).await,
            Self::Revert { count, force: _ } => revert(db, Some(count)).await,
            Self::Demo => demo(db).await,
        }
    }
}

async fn list(db: SqliteDatabase) -> anyhow::Result<()> {
    for MigrationStatus { migration, applied } in db.list_migrations().await? {
        if applied {
            println!("[applied] {}", migration.name);
        } else {
            println!("[pending] {}", migration.name);
        }
    }

    Ok(())
}

async fn run(db: SqliteDatabase, cnt: Option<usize>) -> anyhow::Result<()> {
    migration_logs(&db.run_migrations(cnt).await?, "applied");
    Ok(())
}

async fn revert(db: SqliteDatabase, cnt: Option<usize>) -> anyhow::Result<()> {
    migration_logs(&db.revert_migrations(cnt).await?, "reverted");
    Ok(())
}

async fn demo(db: SqliteDatabase) -> anyhow::Result<()> {
    migration_logs(&db.run_migrations(None).await?, "applied");

    let mut txn = db.begin_transaction().await?;
    let existing = SqliteContactRepository.count(&mut txn).await?;
    ensure!(
        existing == 0,
        "Database already contains {existing} contact messages"
    );
    tyre_demo::create(&mut txn, SqliteContactRepository).await?;
    txn.commit().await?;
    println!("Demo dataset has been created");

    Ok(())
}

fn migration_logs(logs: &[&str], action: &str) {
    let mut none = true;
    for &name in logs {
        println!("[{action}] {name}");
        none = false;
    }
    if none {
        println!("No migrations have been {action}.");
    }
}
