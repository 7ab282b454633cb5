use docap_core::{MemoryBlobStore, TaskRepository};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn counting_listener() -> (Arc<AtomicUsize>, Box<dyn FnMut() + Send>) {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&count);
    let listener = Box::new(move || {
        handle.fetch_add(1, Ordering::SeqCst);
    });
    (count, listener)
}

#[test]
fn listener_fires_exactly_once_per_mutation() {
    let mut repo = TaskRepository::new(MemoryBlobStore::new());
    repo.initialize();

    let (count, listener) = counting_listener();
    repo.add_listener(listener);

    let id = repo.add_task("notify me");
    assert_eq!(count.load(Ordering::SeqCst), 1);

    repo.update_task(&id, "notify me again");
    assert_eq!(count.load(Ordering::SeqCst), 2);

    repo.delete_task(&id);
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[test]
fn removed_listener_receives_no_further_notifications() {
    let mut repo = TaskRepository::new(MemoryBlobStore::new());
    repo.initialize();

    let (count, listener) = counting_listener();
    let handle = repo.add_listener(listener);

    repo.add_task("one");
    repo.remove_listener(handle);
    repo.add_task("two");

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn removing_a_listener_twice_is_a_no_op() {
    let mut repo = TaskRepository::new(MemoryBlobStore::new());
    repo.initialize();

    let (count, listener) = counting_listener();
    let handle = repo.add_listener(listener);

    repo.remove_listener(handle);
    repo.remove_listener(handle);
    repo.add_task("quiet");

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn listeners_run_in_registration_order() {
    let mut repo = TaskRepository::new(MemoryBlobStore::new());
    repo.initialize();

    let order = Arc::new(Mutex::new(Vec::new()));

    let first = Arc::clone(&order);
    repo.add_listener(Box::new(move || first.lock().unwrap().push("first")));
    let second = Arc::clone(&order);
    repo.add_listener(Box::new(move || second.lock().unwrap().push("second")));

    repo.add_task("ordered");

    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn update_with_absent_id_does_not_notify() {
    let mut repo = TaskRepository::new(MemoryBlobStore::new());
    repo.initialize();

    let (count, listener) = counting_listener();
    repo.add_listener(listener);

    repo.update_task("missing-id", "nobody home");

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn delete_with_absent_id_still_notifies() {
    let mut repo = TaskRepository::new(MemoryBlobStore::new());
    repo.initialize();

    let (count, listener) = counting_listener();
    repo.add_listener(listener);

    repo.delete_task("missing-id");

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn listener_fires_even_when_the_save_fails() {
    let store = MemoryBlobStore::new();
    store.set_fail_writes(true);

    let mut repo = TaskRepository::new(store);
    repo.initialize();

    let (count, listener) = counting_listener();
    repo.add_listener(listener);

    repo.add_task("memory only");

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(repo.all_tasks().len(), 1);
}
