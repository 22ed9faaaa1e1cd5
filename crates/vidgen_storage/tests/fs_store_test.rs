//! Tests for the filesystem blob store.

use chrono::{Duration, TimeZone, Utc};
use vidgen_core::{AspectRatio, NewVideoRecord, VideoDetails};
use vidgen_error::StorageErrorKind;
use vidgen_storage::{BlobStore, CONTAINER_NAME, FsBlobStore};

fn create_test_record(prompt: &str, minutes: i64, payload: &[u8]) -> NewVideoRecord {
    let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    NewVideoRecord::new(
        VideoDetails::new(prompt, 5, AspectRatio::Portrait, base + Duration::minutes(minutes)),
        payload.to_vec(),
    )
}

#[tokio::test]
async fn test_open_creates_versioned_container() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(dir.path()).await.unwrap();

    assert!(store.container().is_dir());
    assert_eq!(
        store.container().file_name().unwrap().to_str().unwrap(),
        format!("{}-v1", CONTAINER_NAME)
    );
}

#[tokio::test]
async fn test_open_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let first = FsBlobStore::open(dir.path()).await.unwrap();
    first.put(create_test_record("kept", 0, b"abc")).await.unwrap();

    let second = FsBlobStore::open(dir.path()).await.unwrap();
    assert_eq!(second.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_open_fails_when_path_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();

    let err = FsBlobStore::open(&blocker).await.unwrap_err();
    assert!(matches!(err.kind, StorageErrorKind::Unavailable(_)));
}

#[tokio::test]
async fn test_put_then_list_contains_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(dir.path()).await.unwrap();

    let id = store
        .put(create_test_record("a heron at dawn", 0, b"\x00\x01video"))
        .await
        .unwrap();

    let records = store.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(*records[0].id(), id);
    assert_eq!(records[0].details().prompt(), "a heron at dawn");
    assert_eq!(*records[0].details().duration_secs(), 5);
    assert_eq!(*records[0].details().aspect_ratio(), AspectRatio::Portrait);
    assert_eq!(records[0].payload(), b"\x00\x01video");
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(dir.path()).await.unwrap();

    store.put(create_test_record("middle", 10, b"2")).await.unwrap();
    store.put(create_test_record("oldest", 0, b"1")).await.unwrap();
    store.put(create_test_record("newest", 20, b"3")).await.unwrap();

    let prompts: Vec<String> = store
        .list_all()
        .await
        .unwrap()
        .iter()
        .map(|r| r.details().prompt().clone())
        .collect();
    assert_eq!(prompts, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(dir.path()).await.unwrap();
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_clear_empties_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(dir.path()).await.unwrap();

    store.put(create_test_record("one", 0, b"1")).await.unwrap();
    store.put(create_test_record("two", 1, b"2")).await.unwrap();

    store.clear().await.unwrap();
    assert!(store.list_all().await.unwrap().is_empty());

    store.clear().await.unwrap();
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ids_unique_across_clear_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(dir.path()).await.unwrap();

    let first = store.put(create_test_record("a", 0, b"a")).await.unwrap();
    let second = store.put(create_test_record("b", 1, b"b")).await.unwrap();
    assert!(second > first);

    store.clear().await.unwrap();
    let third = store.put(create_test_record("c", 2, b"c")).await.unwrap();
    assert!(third > second);

    drop(store);
    let reopened = FsBlobStore::open(dir.path()).await.unwrap();
    let fourth = reopened.put(create_test_record("d", 3, b"d")).await.unwrap();
    assert!(fourth > third);
}

#[tokio::test]
async fn test_corrupt_metadata_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(dir.path()).await.unwrap();
    let id = store.put(create_test_record("x", 0, b"x")).await.unwrap();

    let meta = store.container().join("records").join(format!("{}.json", id));
    std::fs::write(&meta, b"{ not json").unwrap();

    let err = store.list_all().await.unwrap_err();
    assert!(matches!(err.kind, StorageErrorKind::Read(_)));
}

#[tokio::test]
async fn test_missing_payload_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(dir.path()).await.unwrap();
    let id = store.put(create_test_record("x", 0, b"x")).await.unwrap();

    let payload = store.container().join("records").join(format!("{}.mp4", id));
    std::fs::remove_file(payload).unwrap();

    let err = store.list_all().await.unwrap_err();
    assert!(matches!(err.kind, StorageErrorKind::Read(_)));
}

#[tokio::test]
async fn test_leftover_temp_files_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(dir.path()).await.unwrap();
    store.put(create_test_record("complete", 0, b"ok")).await.unwrap();

    let records_dir = store.container().join("records");
    std::fs::write(records_dir.join(".99.json.tmp"), b"partial").unwrap();
    std::fs::write(records_dir.join("99.mp4"), b"orphan payload").unwrap();

    let records = store.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].details().prompt(), "complete");
}

#[tokio::test]
async fn test_clear_leaves_no_cleared_records_behind() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(dir.path()).await.unwrap();
    store.put(create_test_record("one", 0, b"1")).await.unwrap();
    store.put(create_test_record("two", 1, b"2")).await.unwrap();

    store.clear().await.unwrap();

    let entries: Vec<_> = std::fs::read_dir(store.container())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert!(entries.contains(&"records".to_string()));
    assert!(
        entries.iter().all(|name| !name.starts_with(".records")),
        "unexpected leftovers: {:?}",
        entries
    );
    assert_eq!(
        std::fs::read_dir(store.container().join("records"))
            .unwrap()
            .count(),
        0
    );
}

#[tokio::test]
async fn test_interrupted_clear_is_finished_on_clear_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(dir.path()).await.unwrap();
    store.put(create_test_record("kept", 0, b"k")).await.unwrap();

    // Simulate a clear that moved records aside but never deleted them.
    let stale = store.container().join(".records.cleared");
    std::fs::create_dir(&stale).unwrap();
    std::fs::write(stale.join("7.json"), b"{}").unwrap();
    std::fs::write(stale.join("7.mp4"), b"old").unwrap();

    let records = store.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].details().prompt(), "kept");

    drop(store);
    let reopened = FsBlobStore::open(dir.path()).await.unwrap();
    assert!(!stale.exists());
    assert_eq!(reopened.list_all().await.unwrap().len(), 1);

    std::fs::create_dir(&stale).unwrap();
    std::fs::write(stale.join("8.mp4"), b"old").unwrap();
    reopened.clear().await.unwrap();
    assert!(!stale.exists());
    assert!(reopened.list_all().await.unwrap().is_empty());
}
