//! Task repository: the single authoritative owner of the task collection.
//!
//! # Responsibility
//! - Own the in-memory task collection and mirror every mutation to the
//!   blob store under the fixed key.
//! - Fan out change notifications to registered listeners.
//!
//! # Invariants
//! - Memory is the source of truth for the running process; the persisted
//!   blob is a best-effort mirror that may trail behind after a failed
//!   write until the next successful save rewrites it.
//! - Listeners run synchronously, in registration order, after every
//!   mutating operation's save attempt resolves.
//! - Task ids are unique within the collection.
//! - Log lines carry ids and counts only, never task content.

use crate::model::task::{Task, TaskId};
use crate::repo::blob_store::{BlobStore, StoreError, StoreResult};
use log::{error, info, warn};
use rand::Rng;

/// Fixed key under which the whole serialized collection is stored.
pub const STORE_KEY: &str = "@docap_tasks";

/// Opaque handle identifying a registered change listener.
///
/// Removal is by handle identity; the repository never compares the
/// callbacks themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Zero-argument callback invoked after each mutating operation.
pub type ChangeListener = Box<dyn FnMut() + Send>;

/// Authoritative owner of the task collection.
///
/// All operations are expected to be invoked sequentially from a single
/// logical thread; the repository does no internal locking. Persistence
/// is whole-blob last-write-wins: every save serializes the entire
/// collection, so a failed write is healed by the next successful one.
pub struct TaskRepository<S: BlobStore> {
    store: S,
    tasks: Vec<Task>,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener_id: u64,
}

impl<S: BlobStore> TaskRepository<S> {
    /// Creates a repository over the given store with an empty collection.
    ///
    /// Call [`initialize`](Self::initialize) exactly once before any other
    /// operation to load persisted state.
    pub fn new(store: S) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Loads the collection from the store.
    ///
    /// An absent blob leaves the collection empty. An unreadable or
    /// unparseable blob is logged and treated as "no tasks", never as a
    /// fatal error. Calling again reloads from the store, discarding any
    /// unsaved in-memory changes.
    pub fn initialize(&mut self) {
        self.tasks = match self.store.get(STORE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) => tasks,
                Err(err) => {
                    warn!(
                        "event=store_load module=repo status=error error_code=blob_parse_failed error={err}"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(
                    "event=store_load module=repo status=error error_code=store_read_failed error={err}"
                );
                Vec::new()
            }
        };
        info!(
            "event=store_load module=repo status=ok count={}",
            self.tasks.len()
        );
    }

    /// Appends a freshly constructed task, persists, and notifies.
    ///
    /// Content validation is the caller's concern; the repository accepts
    /// whatever it is given. Returns the generated task id.
    pub fn add_task(&mut self, content: impl Into<String>) -> TaskId {
        let task = Task::new(content);
        let id = task.id.clone();
        self.tasks.push(task);
        info!(
            "event=task_add module=repo status=ok id={id} count={}",
            self.tasks.len()
        );
        self.save_and_notify();
        id
    }

    /// Removes the task with the matching id, persists, and notifies.
    ///
    /// An absent id is a silent no-op on the collection; the save and the
    /// notification still happen.
    pub fn delete_task(&mut self, id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        info!(
            "event=task_delete module=repo status=ok id={id} matched={} count={}",
            before != self.tasks.len(),
            self.tasks.len()
        );
        self.save_and_notify();
    }

    /// Replaces the content of the task with the matching id, preserving
    /// its identity and creation time, then persists and notifies.
    ///
    /// A silent no-op when the id is absent: nothing is saved and no
    /// listener fires.
    pub fn update_task(&mut self, id: &str, content: impl Into<String>) {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            info!("event=task_update module=repo status=ok id={id} matched=false");
            return;
        };
        task.content = content.into();
        info!("event=task_update module=repo status=ok id={id} matched=true");
        self.save_and_notify();
    }

    /// Returns a snapshot copy of the collection in insertion order.
    ///
    /// Mutating the returned vector does not affect repository state.
    pub fn all_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Returns one uniformly drawn task, or `None` on an empty collection.
    ///
    /// Each call is independent: no memory of prior picks, repeats
    /// allowed.
    pub fn random_task(&self) -> Option<Task> {
        if self.tasks.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..self.tasks.len());
        self.tasks.get(index).cloned()
    }

    /// Registers a change listener and returns its removal handle.
    ///
    /// Listeners are invoked in registration order.
    pub fn add_listener(&mut self, listener: ChangeListener) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Unregisters the listener with the given handle.
    ///
    /// Removing a handle that is not registered is a no-op.
    pub fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|(handle, _)| *handle != id);
    }

    fn save_and_notify(&mut self) {
        if let Err(err) = self.save() {
            // Accepted divergence: memory keeps the mutation and the
            // mirror catches up on the next successful save.
            error!(
                "event=store_save module=repo status=error error_code=store_write_failed error={err}"
            );
        }
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }

    fn save(&mut self) -> StoreResult<()> {
        let raw = serde_json::to_string(&self.tasks)
            .map_err(|err| StoreError::Write(err.to_string()))?;
        self.store.set(STORE_KEY, &raw)
    }
}
