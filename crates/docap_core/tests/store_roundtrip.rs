use docap_core::db::open_store;
use docap_core::{
    BlobStore, MemoryBlobStore, SqliteBlobStore, TaskRepository, STORE_KEY,
};

#[test]
fn added_task_survives_a_fresh_initialize() {
    let store = MemoryBlobStore::new();

    let mut repo = TaskRepository::new(store.clone());
    repo.initialize();
    let original_id = repo.add_task("buy milk");

    let mut reloaded = TaskRepository::new(store);
    reloaded.initialize();

    let tasks = reloaded.all_tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].content, "buy milk");
    assert_eq!(tasks[0].id, original_id);
}

#[test]
fn initialize_on_empty_store_yields_empty_collection() {
    let mut repo = TaskRepository::new(MemoryBlobStore::new());
    repo.initialize();
    assert!(repo.all_tasks().is_empty());
}

#[test]
fn corrupt_blob_is_treated_as_no_tasks() {
    let mut seed = MemoryBlobStore::new();
    seed.set(STORE_KEY, "this is not json").unwrap();

    let mut repo = TaskRepository::new(seed);
    repo.initialize();

    assert!(repo.all_tasks().is_empty());
}

#[test]
fn initialize_again_discards_unsaved_memory() {
    let store = MemoryBlobStore::new();

    let mut repo = TaskRepository::new(store.clone());
    repo.initialize();
    repo.add_task("persisted");

    store.set_fail_writes(true);
    repo.add_task("memory only");
    assert_eq!(repo.all_tasks().len(), 2);

    repo.initialize();

    let tasks = repo.all_tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].content, "persisted");
}

#[test]
fn failed_write_leaves_memory_ahead_until_next_save_heals_it() {
    let store = MemoryBlobStore::new();

    let mut repo = TaskRepository::new(store.clone());
    repo.initialize();
    repo.add_task("first");

    store.set_fail_writes(true);
    repo.add_task("second");

    // Mirror trails behind memory after the failed write.
    let raw = store.get(STORE_KEY).unwrap().unwrap();
    assert!(raw.contains("first"));
    assert!(!raw.contains("second"));

    store.set_fail_writes(false);
    repo.add_task("third");

    // The next successful save rewrites the full collection.
    let raw = store.get(STORE_KEY).unwrap().unwrap();
    assert!(raw.contains("first"));
    assert!(raw.contains("second"));
    assert!(raw.contains("third"));
}

#[test]
fn sqlite_store_roundtrips_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docap.sqlite3");

    let conn = open_store(&path).unwrap();
    let mut repo = TaskRepository::new(SqliteBlobStore::new(conn));
    repo.initialize();
    let id = repo.add_task("buy milk");
    drop(repo);

    let conn = open_store(&path).unwrap();
    let mut reloaded = TaskRepository::new(SqliteBlobStore::new(conn));
    reloaded.initialize();

    let tasks = reloaded.all_tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].content, "buy milk");
}

#[test]
fn sqlite_store_get_returns_none_for_absent_key() {
    let conn = docap_core::db::open_store_in_memory().unwrap();
    let store = SqliteBlobStore::new(conn);

    assert_eq!(store.get("@docap_other").unwrap(), None);
}
