//! Task use-case service.
//!
//! # Responsibility
//! - Provide the entry points the presentation layer calls: validated
//!   task creation/editing, the random draw with its follow-up reminder,
//!   and listener registration pass-throughs.
//! - Host the input validation that must happen before content reaches
//!   the repository.
//!
//! # Invariants
//! - Content is trimmed and non-empty by the time the repository sees it.
//! - Drawing a task requests exactly one reminder per successful draw.

use crate::model::task::{Task, TaskId};
use crate::reminder::{ReminderScheduler, REMINDER_BODY, REMINDER_DELAY, REMINDER_TITLE};
use crate::repo::blob_store::BlobStore;
use crate::repo::task_repo::{ChangeListener, ListenerId, TaskRepository};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input validation failure for content-carrying calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskInputError {
    /// Content was empty or whitespace-only after trimming.
    EmptyContent,
}

impl Display for TaskInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "task content is empty after trimming"),
        }
    }
}

impl Error for TaskInputError {}

/// Use-case wrapper over the task repository and reminder scheduler.
pub struct TaskService<S: BlobStore, R: ReminderScheduler> {
    repo: TaskRepository<S>,
    scheduler: R,
}

impl<S: BlobStore, R: ReminderScheduler> TaskService<S, R> {
    /// Creates a service over the provided repository and scheduler.
    pub fn new(repo: TaskRepository<S>, scheduler: R) -> Self {
        Self { repo, scheduler }
    }

    /// Loads persisted tasks. Call exactly once at startup.
    pub fn initialize(&mut self) {
        self.repo.initialize();
    }

    /// Validates, trims, and adds a new task.
    ///
    /// # Errors
    /// - `TaskInputError::EmptyContent` when the trimmed content is empty;
    ///   the repository is not touched in that case.
    pub fn create_task(&mut self, content: &str) -> Result<TaskId, TaskInputError> {
        let trimmed = validated_content(content)?;
        Ok(self.repo.add_task(trimmed))
    }

    /// Validates, trims, and applies a content edit to an existing task.
    ///
    /// An absent id is a silent no-op, matching repository semantics.
    ///
    /// # Errors
    /// - `TaskInputError::EmptyContent` when the trimmed content is empty.
    pub fn update_task(&mut self, id: &str, content: &str) -> Result<(), TaskInputError> {
        let trimmed = validated_content(content)?;
        self.repo.update_task(id, trimmed);
        Ok(())
    }

    /// Deletes a task by id. Idempotent.
    pub fn delete_task(&mut self, id: &str) {
        self.repo.delete_task(id);
    }

    /// Returns a snapshot of all tasks in creation order.
    pub fn tasks(&self) -> Vec<Task> {
        self.repo.all_tasks()
    }

    /// Draws one random task for display.
    ///
    /// When a task comes back, a one-shot reminder is requested with the
    /// fixed delay and message. The reminder is not tied to the task's
    /// lifecycle: completing or deleting the task later does not cancel
    /// it.
    pub fn draw_task(&self) -> Option<Task> {
        let picked = self.repo.random_task();
        if picked.is_some() {
            self.scheduler
                .schedule_one_shot(REMINDER_DELAY, REMINDER_TITLE, REMINDER_BODY);
        }
        picked
    }

    /// Registers a change listener; see
    /// [`TaskRepository::add_listener`](crate::repo::task_repo::TaskRepository::add_listener).
    pub fn add_listener(&mut self, listener: ChangeListener) -> ListenerId {
        self.repo.add_listener(listener)
    }

    /// Unregisters a change listener by handle.
    pub fn remove_listener(&mut self, id: ListenerId) {
        self.repo.remove_listener(id);
    }
}

fn validated_content(content: &str) -> Result<&str, TaskInputError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(TaskInputError::EmptyContent);
    }
    Ok(trimmed)
}
