//! One-shot reminder scheduling.
//!
//! # Responsibility
//! - Request "notify the user later" from a platform notification
//!   facility, without tracking the request afterwards.
//!
//! # Invariants
//! - Scheduling is fire-and-forget: no cancellation handle is retained,
//!   so a pending reminder outlives the task that triggered it.
//! - Failures never reach the caller; they are logged only.

use log::info;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Delay between drawing a task and the follow-up reminder.
pub const REMINDER_DELAY: Duration = Duration::from_secs(30 * 60);

/// Notification title shown when the reminder fires.
pub const REMINDER_TITLE: &str = "できた？";

/// Notification body shown when the reminder fires.
pub const REMINDER_BODY: &str = "30分経過しました。タスクは完了しましたか？";

/// A reminder ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Short notification title.
    pub title: String,
    /// Longer descriptive message.
    pub body: String,
}

/// One-shot reminder scheduling boundary.
pub trait ReminderScheduler {
    /// Requests a single reminder after `delay`.
    ///
    /// Fire-and-forget: the caller gets no handle and no visibility into
    /// whether the reminder is ever displayed.
    fn schedule_one_shot(&self, delay: Duration, title: &str, body: &str);
}

/// Timer-thread scheduler.
///
/// Each request spawns a detached thread that sleeps for the delay and
/// then hands the reminder to the configured deliverer, where a platform
/// notification display hooks in. With no deliverer configured, due
/// reminders are only logged.
#[derive(Default)]
pub struct ThreadReminderScheduler {
    deliverer: Option<Arc<dyn Fn(&Reminder) + Send + Sync>>,
}

impl ThreadReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback that receives due reminders.
    pub fn with_deliverer(
        mut self,
        deliverer: impl Fn(&Reminder) + Send + Sync + 'static,
    ) -> Self {
        self.deliverer = Some(Arc::new(deliverer));
        self
    }
}

impl ReminderScheduler for ThreadReminderScheduler {
    fn schedule_one_shot(&self, delay: Duration, title: &str, body: &str) {
        let reminder = Reminder {
            title: title.to_string(),
            body: body.to_string(),
        };
        let deliverer = self.deliverer.clone();
        info!(
            "event=reminder_schedule module=reminder status=ok delay_secs={}",
            delay.as_secs()
        );

        thread::spawn(move || {
            thread::sleep(delay);
            info!("event=reminder_fire module=reminder status=ok");
            if let Some(deliver) = deliverer {
                deliver(&reminder);
            }
        });
    }
}
