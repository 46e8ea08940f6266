//! To-do session: the single screen's state and event handlers.
//!
//! # Responsibility
//! - Route add/remove through the task store, then notify the scheduler.
//! - Turn scheduler fires into popup state.
//!
//! # Invariants
//! - The scheduler sees every list revision produced by the store.
//! - Dismissing the popup is independent from timer and cursor state.

use crate::config::CoreConfig;
use crate::model::task::{Task, TaskId};
use crate::reminder::interval::IntervalOutcome;
use crate::reminder::popup::{PopupView, ReminderPopup};
use crate::reminder::scheduler::{Reminder, ReminderScheduler};
use crate::storage::KeyValueStore;
use crate::store::task_store::{LoadOutcome, TaskStore};
use log::info;
use std::time::{Duration, Instant};

pub struct TodoSession<S: KeyValueStore> {
    store: TaskStore<S>,
    scheduler: ReminderScheduler,
    popup: ReminderPopup,
}

impl<S: KeyValueStore> TodoSession<S> {
    /// Loads persisted tasks and arms the reminder timer at `now`.
    pub fn open(storage: S, config: &CoreConfig, now: Instant) -> Self {
        let mut store = TaskStore::new(storage, config.storage_key.clone());
        let outcome = store.load();
        if let LoadOutcome::Discarded(reason) = &outcome {
            info!("event=session_open module=service status=degraded reason={reason}");
        }

        let mut scheduler = ReminderScheduler::new(&config.reminder);
        scheduler.on_list_changed(now, store.revision(), store.len());
        scheduler.arm(now);

        Self {
            store,
            scheduler,
            popup: ReminderPopup::default(),
        }
    }

    /// Adds a task; `None` when the text is blank.
    pub fn add_task(&mut self, text: &str, now: Instant) -> Option<TaskId> {
        let id = self.store.add(text)?;
        self.sync_scheduler(now);
        Some(id)
    }

    /// Removes a task by id; `false` when no task matched.
    pub fn remove_task(&mut self, id: &str, now: Instant) -> bool {
        let removed = self.store.remove(id);
        self.sync_scheduler(now);
        removed
    }

    pub fn set_pending_interval(&mut self, text: impl Into<String>) {
        self.scheduler.set_pending_interval(text);
    }

    pub fn confirm_interval(&mut self, now: Instant) -> IntervalOutcome {
        self.scheduler.confirm_interval(now)
    }

    /// Advances the timer to `now` and shows the popup when it fires.
    pub fn tick(&mut self, now: Instant) -> Option<Reminder> {
        let reminder = self.scheduler.poll(now, self.store.tasks())?;
        self.popup.show(reminder.task.text.clone());
        Some(reminder)
    }

    pub fn dismiss_reminder(&mut self) {
        self.popup.dismiss();
    }

    pub fn popup(&self) -> PopupView {
        self.popup.view()
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn next_reminder_in(&self, now: Instant) -> Option<Duration> {
        self.scheduler.next_due_in(now)
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore<S> {
        &mut self.store
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    fn sync_scheduler(&mut self, now: Instant) {
        self.scheduler
            .on_list_changed(now, self.store.revision(), self.store.len());
    }
}
