//! Core runtime configuration.
//!
//! Hosts start from `CoreConfig::default()` and override fields in code;
//! there are no config files or environment lookups in core.

/// Storage key holding the whole serialized task list.
pub const STORAGE_KEY_TODOS: &str = "todos";

/// Reminder period used until the user confirms another one.
pub const DEFAULT_REMINDER_INTERVAL_SECS: u32 = 5;

/// Reminder scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderConfig {
    /// Initial active interval in seconds; zero is treated as one.
    pub default_interval_secs: u32,
    /// Re-arm the timer (resetting its phase) on every list change.
    ///
    /// Enabled by default to keep the long-standing behavior where adding or
    /// deleting a task restarts the countdown to the next reminder.
    pub rearm_on_list_change: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            default_interval_secs: DEFAULT_REMINDER_INTERVAL_SECS,
            rearm_on_list_change: true,
        }
    }
}

/// Top-level core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub storage_key: String,
    pub reminder: ReminderConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY_TODOS.to_string(),
            reminder: ReminderConfig::default(),
        }
    }
}
