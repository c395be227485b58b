#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use lizardclick_core::{BatchedCounter, CounterStore, GLOBAL_KEY};
use lizardclick_server::infra::FileCounterStore;
use std::sync::Arc;

#[tokio::test]
async fn missing_file_is_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCounterStore::open(dir.path().join("clicks.json")).unwrap();

    assert!(store.find(GLOBAL_KEY).await.unwrap().is_none());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn create_then_increment_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("clicks.json");

    let store = FileCounterStore::open(&path).unwrap();
    let created = store.create(GLOBAL_KEY, 0).await.unwrap();
    assert_eq!(created.count, 0);
    store.increment(GLOBAL_KEY, 1000).await.unwrap();
    store.increment(GLOBAL_KEY, 1000).await.unwrap();
    drop(store);

    let reopened = FileCounterStore::open(&path).unwrap();
    let record = reopened.find(GLOBAL_KEY).await.unwrap().unwrap();
    assert_eq!(record.id, GLOBAL_KEY);
    assert_eq!(record.count, 2000);
}

#[tokio::test]
async fn increment_upserts_absent_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCounterStore::open(dir.path().join("clicks.json")).unwrap();

    store.increment("other", 7).await.unwrap();
    assert_eq!(store.find("other").await.unwrap().unwrap().count, 7);
    assert!(store.find(GLOBAL_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn create_existing_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCounterStore::open(dir.path().join("clicks.json")).unwrap();

    store.create(GLOBAL_KEY, 0).await.unwrap();
    let err = store.create(GLOBAL_KEY, 0).await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "ALREADY_EXISTS");
}

#[tokio::test]
async fn corrupt_document_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clicks.json");
    std::fs::write(&path, b"{ not json").unwrap();
    let store = FileCounterStore::open(&path).unwrap();

    let err = store.find(GLOBAL_KEY).await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "CORRUPT_RECORD");
}

#[tokio::test]
async fn directory_path_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = FileCounterStore::open(dir.path()).err().expect("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[tokio::test]
async fn counter_resumes_from_flushed_batches() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clicks.json");

    {
        let store = Arc::new(FileCounterStore::open(&path).unwrap());
        let counter = BatchedCounter::new(store, GLOBAL_KEY, 10);
        counter.initialize().await.unwrap();
        for _ in 0..25 {
            counter.record_click().await;
        }
        assert_eq!(counter.total(), 25);
    }

    // Unflushed clicks are gone after a restart.
    let store = Arc::new(FileCounterStore::open(&path).unwrap());
    let counter = BatchedCounter::new(store, GLOBAL_KEY, 10);
    assert_eq!(counter.initialize().await.unwrap(), 20);
    assert_eq!(counter.total(), 20);
}
