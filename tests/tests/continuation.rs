use idxsync::{bson::doc, CollectionIndexes, Index, IndexEnsurer};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tests::{descriptor, unique_descriptor, MemoryDatabase};

fn database() -> MemoryDatabase {
    MemoryDatabase::new()
        .with_descriptor("users", unique_descriptor(doc! { "email": 1 }, "email_unique"))
        .with_descriptor("users", descriptor(doc! { "name": 1, "age": -1 }, "name_1_age_-1"))
        .with_descriptor("orders", descriptor(doc! { "user_id": 1 }, "user_id_1"))
}

fn declared() -> Vec<CollectionIndexes> {
    vec![
        CollectionIndexes::new("users", [Index::ascending("email").unique(true)]),
        CollectionIndexes::new("orders", [Index::descending("total")]),
    ]
}

#[tokio::test]
async fn begin_drops_but_does_not_create() {
    let db = Arc::new(database());
    let log = db.exec_log();
    let ensurer = IndexEnsurer::new(db.clone());

    let continuation = ensurer.begin(&declared()).await.unwrap();

    assert_eq!(
        log.drops(),
        vec![
            ("users".to_string(), "name_1_age_-1".to_string()),
            ("orders".to_string(), "user_id_1".to_string()),
        ]
    );
    assert!(log.creates().is_empty());
    assert_eq!(
        continuation.missing(),
        &[CollectionIndexes::new("orders", [Index::descending("total")])][..]
    );
}

#[tokio::test]
async fn rollback_recreates_dropped_indexes() {
    let db = Arc::new(database());
    let log = db.exec_log();
    let ensurer = IndexEnsurer::new(db.clone());

    let continuation = ensurer.begin(&declared()).await.unwrap();
    continuation.rollback().await.unwrap();

    assert_eq!(
        log.creates(),
        vec![
            (
                "users".to_string(),
                vec![Index::ascending("name")
                    .key("age", idxsync::Direction::Descending)
                    .named("name_1_age_-1")]
            ),
            (
                "orders".to_string(),
                vec![Index::ascending("user_id").named("user_id_1")]
            ),
        ]
    );

    // Back to the observed state; the missing `total` index was never created.
    assert_eq!(db.indexes("users"), database().indexes("users"));
    assert_eq!(db.indexes("orders"), database().indexes("orders"));
}

#[tokio::test]
async fn rollback_after_partial_drop_failure_is_not_available() {
    let db = Arc::new(database().fail_drop("orders", "user_id_1"));
    let log = db.exec_log();

    let err = IndexEnsurer::new(db.clone())
        .begin(&declared())
        .await
        .unwrap_err();

    assert!(err.is_driver_operation_failed());
    assert!(err
        .to_string()
        .starts_with("dropping index `user_id_1` on collection `orders`"));

    // The first drop went through and is not compensated.
    assert_eq!(db.index_names("users"), vec!["_id_", "email_unique"]);
    assert!(log.creates().is_empty());
}

#[tokio::test]
async fn into_plan_discards_without_creating() {
    let db = Arc::new(database());
    let log = db.exec_log();
    let ensurer = IndexEnsurer::new(db.clone());

    let plan = ensurer.begin(&declared()).await.unwrap().into_plan();

    assert!(!plan.is_empty());
    assert_eq!(plan.extra().len(), 2);
    assert!(log.creates().is_empty());
}

#[tokio::test]
async fn proceed_on_up_to_date_database_issues_nothing() {
    let db = Arc::new(database());
    let ensurer = IndexEnsurer::new(db.clone());
    ensurer.ensure(&declared()).await.unwrap();

    let mut log = db.exec_log();
    log.clear();

    let continuation = ensurer.begin(&declared()).await.unwrap();
    assert!(continuation.plan().is_empty());
    continuation.proceed().await.unwrap();

    assert_eq!(log.writes(), 0);
}
