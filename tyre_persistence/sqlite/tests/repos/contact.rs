use pretty_assertions::assert_eq;
use tyre_demo::contact::{ALL_CONTACT_MESSAGES, JO, NEW_KARIM, SAMIRA};
use tyre_persistence_contracts::{
    contact::{ContactRepository, InsertedRow},
    Database, Transaction,
};
use tyre_persistence_sqlite::contact::SqliteContactRepository;

use crate::common::{setup, Db};

const REPO: SqliteContactRepository = SqliteContactRepository;

#[tokio::test]
async fn get() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let result = REPO.get(&mut txn, JO.id).await.unwrap();
    assert_eq!(result.as_ref(), Some(&*JO));

    let result = REPO.get(&mut txn, SAMIRA.id).await.unwrap();
    assert_eq!(result.as_ref(), Some(&*SAMIRA));

    let result = REPO.get(&mut txn, 42.into()).await.unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn list() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let result = REPO.list(&mut txn).await.unwrap();
    assert_eq!(result.iter().collect::<Vec<_>>(), *ALL_CONTACT_MESSAGES);
}

#[tokio::test]
async fn create() {
    let db = setup().await;

    let mut txn = db.begin_transaction().await.unwrap();
    let inserted = REPO.create(&mut txn, &NEW_KARIM).await.unwrap();
    txn.commit().await.unwrap();

    assert_eq!(
        inserted,
        InsertedRow {
            id: 3.into(),
            rows_affected: 1
        }
    );

    let mut txn = db.begin_transaction().await.unwrap();
    let result = REPO.get(&mut txn, inserted.id).await.unwrap();
    assert_eq!(result, Some(NEW_KARIM.clone().with_id(inserted.id)));
    assert_eq!(REPO.count(&mut txn).await.unwrap(), 3);
}

#[tokio::test]
async fn create_same_message_twice() {
    let db = setup().await;

    let mut txn = db.begin_transaction().await.unwrap();
    let first = REPO.create(&mut txn, &NEW_KARIM).await.unwrap();
    let second = REPO.create(&mut txn, &NEW_KARIM).await.unwrap();
    txn.commit().await.unwrap();

    assert_ne!(first.id, second.id);
    assert!(second.id > first.id);

    let mut txn = db.begin_transaction().await.unwrap();
    assert_eq!(REPO.count(&mut txn).await.unwrap(), 4);
}

#[tokio::test]
async fn create_rollback() {
    let db = setup().await;

    let mut txn = db.begin_transaction().await.unwrap();
    REPO.create(&mut txn, &NEW_KARIM).await.unwrap();
    txn.rollback().await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    assert_eq!(REPO.count(&mut txn).await.unwrap(), 2);
}

#[tokio::test]
async fn rolled_back_ids_are_handed_out_again() {
    let db: Db = setup().await;

    let mut txn = db.begin_transaction().await.unwrap();
    let inserted = REPO.create(&mut txn, &NEW_KARIM).await.unwrap();
    txn.rollback().await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    let next = REPO.create(&mut txn, &NEW_KARIM).await.unwrap();
    txn.commit().await.unwrap();

    assert_eq!(inserted.id, 3.into());
    assert_eq!(next.id, 3.into());
}

#[tokio::test]
async fn count_empty() {
    let db = crate::common::setup_clean().await;
    db.run_migrations(None).await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    assert_eq!(REPO.count(&mut txn).await.unwrap(), 0);
    assert_eq!(REPO.list(&mut txn).await.unwrap(), []);
}
