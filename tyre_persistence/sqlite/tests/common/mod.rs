use tyre_persistence_contracts::{Database, Transaction};
use tyre_persistence_sqlite::{
    contact::SqliteContactRepository, SqliteDatabase, SqliteDatabaseConfig,
};

pub type Db = SqliteDatabase;

pub async fn setup() -> Db {
    let db = setup_clean().await;

    db.run_migrations(None).await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    tyre_demo::create(&mut txn, SqliteContactRepository)
        .await
        .unwrap();
    txn.commit().await.unwrap();

    db
}

pub async fn setup_clean() -> Db {
    Db::connect(&SqliteDatabaseConfig::in_memory())
        .await
        .unwrap()
}
