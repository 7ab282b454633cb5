use docap_core::{generate_task_id, Task};
use std::collections::HashSet;

#[test]
fn new_task_sets_generated_id_and_creation_time() {
    let task = Task::new("hello");

    assert!(!task.id.is_empty());
    assert_eq!(task.content, "hello");
    assert!(task.created_at > 0);
}

#[test]
fn generated_ids_have_timestamp_prefix_and_base36_suffix() {
    let id = generate_task_id();
    let (prefix, suffix) = id.split_once('-').expect("id should contain a separator");

    prefix
        .parse::<i64>()
        .expect("prefix should be epoch milliseconds");
    assert_eq!(suffix.len(), 9);
    assert!(suffix
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

#[test]
fn generated_ids_are_unique_across_many_draws() {
    let ids: HashSet<_> = (0..1000).map(|_| generate_task_id()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn with_parts_preserves_identity_and_creation_time() {
    let task = Task::with_parts("1700000000000-abc123xyz", "fixed", 1_700_000_000_000);

    assert_eq!(task.id, "1700000000000-abc123xyz");
    assert_eq!(task.content, "fixed");
    assert_eq!(task.created_at, 1_700_000_000_000);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task = Task::with_parts("1700000000000-abc123xyz", "buy milk", 1_700_000_000_000);

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], "1700000000000-abc123xyz");
    assert_eq!(json["content"], "buy milk");
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    assert!(json.get("created_at").is_none());
}

#[test]
fn task_deserializes_from_historical_blob_shape() {
    let raw = r#"{"id":"1700000000000-q1w2e3r4t","content":"wash car","createdAt":1700000000000}"#;
    let task: Task = serde_json::from_str(raw).unwrap();

    assert_eq!(task.id, "1700000000000-q1w2e3r4t");
    assert_eq!(task.content, "wash car");
    assert_eq!(task.created_at, 1_700_000_000_000);
}
