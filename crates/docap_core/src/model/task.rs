//! Task domain model.
//!
//! # Responsibility
//! - Define the single entity of the system: a user-entered text item.
//! - Generate collision-resistant task identifiers.
//!
//! # Invariants
//! - `id` is stable for the task lifetime and unique within a collection.
//! - `content` is the only mutable field; `id` and `created_at` are fixed
//!   at construction.
//! - Serialized field names match the historical blob format (`createdAt`).

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// The format is `<epoch_millis>-<9 random base36 chars>`, so ids sort
/// roughly by creation time while staying opaque to callers.
pub type TaskId = String;

const ID_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// A single user-entered to-do item.
///
/// The collection holding these is an ordered sequence; insertion order
/// doubles as creation order and is preserved across persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable opaque id, generated once at creation.
    pub id: TaskId,
    /// Free-form user text. Callers validate non-emptiness before
    /// constructing a task.
    pub content: String,
    /// Creation time in Unix epoch milliseconds. Serialized as
    /// `createdAt` to match the existing blob schema.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Task {
    /// Creates a task with a freshly generated id and the current time.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: generate_task_id(),
            content: content.into(),
            created_at: now_epoch_millis(),
        }
    }

    /// Creates a task from already-known parts.
    ///
    /// Used by load paths and tests where identity and creation time
    /// exist externally.
    ///
    /// # Invariants
    /// - The provided `id` must remain stable for this task's lifetime.
    pub fn with_parts(id: impl Into<TaskId>, content: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            created_at,
        }
    }
}

/// Generates a new unique task id.
///
/// Timestamp prefix plus a random base36 suffix. Collisions would require
/// two ids drawn in the same millisecond with the same 9-character suffix.
pub fn generate_task_id() -> TaskId {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_SUFFIX_ALPHABET[rng.gen_range(0..ID_SUFFIX_ALPHABET.len())] as char)
        .collect();
    format!("{}-{suffix}", now_epoch_millis())
}

/// Returns the current time as Unix epoch milliseconds.
pub fn now_epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
