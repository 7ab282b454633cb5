//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the repository operations to Dart via FRB.
//! - Hold the one process-wide service instance the mobile UI talks to.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - `init_store` must succeed before any task operation; operations on
//!   an uninitialized store return failure envelopes, never crash.
//! - The UI observes changes by polling `change_sequence`; the counter
//!   bumps on every mutating operation.

use docap_core::db::open_store;
use docap_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    SqliteBlobStore, Task, TaskRepository, TaskService, ThreadReminderScheduler,
};
use log::info;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

const STORE_DB_FILE_NAME: &str = "docap.sqlite3";

type SharedService = Mutex<TaskService<SqliteBlobStore, ThreadReminderScheduler>>;

static SERVICE: OnceLock<SharedService> = OnceLock::new();
static CHANGE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task record shape shared with Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable opaque task id.
    pub id: String,
    /// User-entered text.
    pub content: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

/// Generic action response envelope for mutating calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Optional created task id.
    pub task_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: Option<String>) -> Self {
        Self {
            ok: true,
            task_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Tasks in creation order (empty on failure).
    pub items: Vec<TaskItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Draw response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawTaskResponse {
    /// The drawn task, absent when the collection is empty.
    pub task: Option<TaskItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Opens the persistent store and initializes the process-wide service.
///
/// Resolves the database path from `db_path` when given, then the
/// `DOCAP_DB_PATH` environment variable, then a file in the system temp
/// directory.
///
/// # FFI contract
/// - Sync call; performs store open + initial load.
/// - Calling again after a successful init is a no-op returning success.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_store(db_path: Option<String>) -> String {
    if SERVICE.get().is_some() {
        return String::new();
    }

    let path = resolve_db_path(db_path);
    let conn = match open_store(&path) {
        Ok(conn) => conn,
        Err(err) => return format!("store open failed: {err}"),
    };

    let repo = TaskRepository::new(SqliteBlobStore::new(conn));
    let scheduler = ThreadReminderScheduler::new();
    let mut service = TaskService::new(repo, scheduler);
    service.initialize();
    service.add_listener(Box::new(|| {
        CHANGE_SEQUENCE.fetch_add(1, Ordering::SeqCst);
    }));

    if SERVICE.set(Mutex::new(service)).is_err() {
        // Another caller won the race; its instance is the live one.
        return String::new();
    }

    info!("event=ffi_init module=ffi status=ok");
    String::new()
}

/// Monotonic change counter for UI refresh polling.
///
/// # FFI contract
/// - Sync call, non-blocking, never panics.
/// - Increases by one for every mutating operation since process start.
#[flutter_rust_bridge::frb(sync)]
pub fn change_sequence() -> u64 {
    CHANGE_SEQUENCE.load(Ordering::SeqCst)
}

/// Adds a task from UI input.
///
/// # FFI contract
/// - Sync call; persists best-effort before returning.
/// - Empty/whitespace-only content is rejected with a failure envelope.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(content: String) -> TaskActionResponse {
    with_service(|service| match service.create_task(&content) {
        Ok(task_id) => TaskActionResponse::success("Task added.", Some(task_id)),
        Err(err) => TaskActionResponse::failure(format!("add_task failed: {err}")),
    })
}

/// Replaces a task's content by id.
///
/// # FFI contract
/// - Sync call; absent id is a silent no-op reported as success.
/// - Empty/whitespace-only content is rejected with a failure envelope.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn update_task(id: String, content: String) -> TaskActionResponse {
    with_service(|service| match service.update_task(&id, &content) {
        Ok(()) => TaskActionResponse::success("Task updated.", None),
        Err(err) => TaskActionResponse::failure(format!("update_task failed: {err}")),
    })
}

/// Deletes a task by id.
///
/// # FFI contract
/// - Sync call; deleting an absent id succeeds (idempotent).
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(id: String) -> TaskActionResponse {
    with_service(|service| {
        service.delete_task(&id);
        TaskActionResponse::success("Task deleted.", None)
    })
}

/// Lists all tasks in creation order.
///
/// # FFI contract
/// - Sync call, read-only snapshot.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks() -> TaskListResponse {
    match SERVICE.get() {
        Some(service) => {
            let items = lock_service(service)
                .tasks()
                .into_iter()
                .map(to_task_item)
                .collect::<Vec<_>>();
            let message = format!("{} task(s).", items.len());
            TaskListResponse { items, message }
        }
        None => TaskListResponse {
            items: Vec::new(),
            message: uninitialized_message(),
        },
    }
}

/// Draws one random task and requests its follow-up reminder.
///
/// # FFI contract
/// - Sync call; the reminder request is fire-and-forget.
/// - Returns an empty envelope (no task) on an empty collection.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn draw_task() -> DrawTaskResponse {
    match SERVICE.get() {
        Some(service) => match lock_service(service).draw_task() {
            Some(task) => DrawTaskResponse {
                task: Some(to_task_item(task)),
                message: "Task drawn.".to_string(),
            },
            None => DrawTaskResponse {
                task: None,
                message: "No tasks.".to_string(),
            },
        },
        None => DrawTaskResponse {
            task: None,
            message: uninitialized_message(),
        },
    }
}

fn resolve_db_path(db_path: Option<String>) -> PathBuf {
    if let Some(raw) = db_path {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    if let Ok(raw) = std::env::var("DOCAP_DB_PATH") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(STORE_DB_FILE_NAME)
}

fn with_service(
    f: impl FnOnce(&mut TaskService<SqliteBlobStore, ThreadReminderScheduler>) -> TaskActionResponse,
) -> TaskActionResponse {
    match SERVICE.get() {
        Some(service) => f(&mut lock_service(service)),
        None => TaskActionResponse::failure(uninitialized_message()),
    }
}

fn lock_service(
    service: &SharedService,
) -> std::sync::MutexGuard<'_, TaskService<SqliteBlobStore, ThreadReminderScheduler>> {
    service
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn to_task_item(task: Task) -> TaskItem {
    TaskItem {
        id: task.id,
        content: task.content,
        created_at: task.created_at,
    }
}

fn uninitialized_message() -> String {
    "store not initialized; call init_store first".to_string()
}
