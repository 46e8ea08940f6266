//! Core domain logic for NudgeList.
//! This crate is the single source of truth for task and reminder invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod reminder;
pub mod service;
pub mod storage;
pub mod store;

pub use config::{CoreConfig, ReminderConfig, DEFAULT_REMINDER_INTERVAL_SECS, STORAGE_KEY_TODOS};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use reminder::interval::{parse_interval_secs, IntervalOutcome, ReminderInterval};
pub use reminder::popup::{PopupView, ReminderPopup, POPUP_HEADER};
pub use reminder::scheduler::{Reminder, ReminderScheduler, TimerHandle};
pub use service::session::TodoSession;
pub use storage::{KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult};
pub use store::codec::TaskListDecodeError;
pub use store::task_store::{LoadOutcome, TaskStore};

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
