//! Core domain logic for docap, the draw-a-random-task to-do list.
//! This crate is the single source of truth for collection state and
//! persistence behavior.

pub mod db;
pub mod logging;
pub mod model;
pub mod reminder;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging};
pub use model::task::{generate_task_id, Task, TaskId};
pub use reminder::{
    Reminder, ReminderScheduler, ThreadReminderScheduler, REMINDER_BODY, REMINDER_DELAY,
    REMINDER_TITLE,
};
pub use repo::blob_store::{BlobStore, MemoryBlobStore, SqliteBlobStore, StoreError, StoreResult};
pub use repo::task_repo::{ChangeListener, ListenerId, TaskRepository, STORE_KEY};
pub use service::task_service::{TaskInputError, TaskService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
