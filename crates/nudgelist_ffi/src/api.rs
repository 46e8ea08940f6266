//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the single to-do screen's operations to Dart via FRB.
//! - Hold the one process-wide session and its SQLite-backed storage.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Calls are serialized through one mutex; there is no parallel access to
//!   the session.
//! - Calls made before `init_session` degrade to empty/no-op results.

use log::{error, warn};
use nudgelist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CoreConfig, IntervalOutcome, SqliteKvStore, Task, TodoSession,
};
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Instant;

type Session = TodoSession<SqliteKvStore>;

static SESSION: OnceLock<Mutex<Option<Session>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the task database at `db_path` and starts the reminder timer.
///
/// # FFI contract
/// - Returns an empty string on success, an error message otherwise.
/// - Calling again replaces the current session (tasks are reloaded from
///   the new path and the timer restarts).
#[flutter_rust_bridge::frb(sync)]
pub fn init_session(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }

    let storage = match SqliteKvStore::open(trimmed) {
        Ok(storage) => storage,
        Err(err) => {
            error!("event=session_init module=ffi status=error error={err}");
            return format!("init_session failed: {err}");
        }
    };

    let session = TodoSession::open(storage, &CoreConfig::default(), Instant::now());
    *lock_session() = Some(session);
    String::new()
}

/// Task row for the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub text: String,
}

/// Result envelope for add/remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the list changed.
    pub ok: bool,
    /// Affected task id, when known.
    pub task_id: Option<String>,
    /// Current list after the call.
    pub tasks: Vec<TaskItem>,
}

/// Interval field state after a confirm attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalResponse {
    pub applied: bool,
    pub active_secs: u32,
    /// Text the interval field should now display.
    pub field_text: String,
}

/// Popup state for the reminder modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPopupView {
    pub visible: bool,
    pub header: String,
    pub title: String,
    /// Milliseconds until the next reminder boundary; `None` when idle.
    pub next_in_ms: Option<u64>,
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks() -> Vec<TaskItem> {
    lock_session()
        .as_ref()
        .map(|session| to_items(session.tasks()))
        .unwrap_or_default()
}

/// Adds a task. Blank text is ignored and reported as `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(text: String) -> TaskActionResponse {
    with_session(
        |session| {
            let id = session.add_task(&text, Instant::now());
            TaskActionResponse {
                ok: id.is_some(),
                task_id: id,
                tasks: to_items(session.tasks()),
            }
        },
        empty_action,
    )
}

/// Deletes a task. Unknown ids leave the list unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_task(id: String) -> TaskActionResponse {
    with_session(
        |session| {
            let removed = session.remove_task(&id, Instant::now());
            TaskActionResponse {
                ok: removed,
                task_id: Some(id.clone()),
                tasks: to_items(session.tasks()),
            }
        },
        empty_action,
    )
}

/// Stores the raw interval field text without validation.
#[flutter_rust_bridge::frb(sync)]
pub fn set_reminder_interval_text(text: String) {
    with_session(|session| session.set_pending_interval(text), || ());
}

/// Confirms the interval field. Invalid text is replaced by the active value.
#[flutter_rust_bridge::frb(sync)]
pub fn confirm_reminder_interval() -> IntervalResponse {
    with_session(
        |session| {
            let applied = matches!(
                session.confirm_interval(Instant::now()),
                IntervalOutcome::Applied(_)
            );
            IntervalResponse {
                applied,
                active_secs: session.scheduler().active_interval_secs().get(),
                field_text: session.scheduler().pending_text().to_string(),
            }
        },
        || IntervalResponse {
            applied: false,
            active_secs: nudgelist_core::DEFAULT_REMINDER_INTERVAL_SECS,
            field_text: nudgelist_core::DEFAULT_REMINDER_INTERVAL_SECS.to_string(),
        },
    )
}

/// Advances the reminder timer to the current time and returns popup state.
///
/// The host calls this from a periodic UI ticker; sub-second polling is fine.
#[flutter_rust_bridge::frb(sync)]
pub fn poll_reminder() -> ReminderPopupView {
    with_session(
        |session| {
            let now = Instant::now();
            session.tick(now);
            popup_view(session, now)
        },
        hidden_popup,
    )
}

/// Hides the reminder popup; the rotation and timer are unaffected.
#[flutter_rust_bridge::frb(sync)]
pub fn dismiss_reminder() -> ReminderPopupView {
    with_session(
        |session| {
            session.dismiss_reminder();
            popup_view(session, Instant::now())
        },
        hidden_popup,
    )
}

fn lock_session() -> MutexGuard<'static, Option<Session>> {
    let cell = SESSION.get_or_init(|| Mutex::new(None));
    // A panic while holding the lock must not brick the UI; the session state
    // itself is always consistent between calls.
    cell.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> T, fallback: impl FnOnce() -> T) -> T {
    let mut guard = lock_session();
    match guard.as_mut() {
        Some(session) => f(session),
        None => {
            warn!("event=ffi_call module=ffi status=error error_code=session_not_initialized");
            fallback()
        }
    }
}

fn popup_view(session: &Session, now: Instant) -> ReminderPopupView {
    let popup = session.popup();
    ReminderPopupView {
        visible: popup.visible,
        header: popup.header,
        title: popup.title,
        next_in_ms: session
            .next_reminder_in(now)
            .map(|left| u64::try_from(left.as_millis()).unwrap_or(u64::MAX)),
    }
}

fn hidden_popup() -> ReminderPopupView {
    ReminderPopupView {
        visible: false,
        header: nudgelist_core::POPUP_HEADER.to_string(),
        title: String::new(),
        next_in_ms: None,
    }
}

fn empty_action() -> TaskActionResponse {
    TaskActionResponse {
        ok: false,
        task_id: None,
        tasks: Vec::new(),
    }
}

fn to_items(tasks: &[Task]) -> Vec<TaskItem> {
    tasks
        .iter()
        .map(|task| TaskItem {
            id: task.id.clone(),
            text: task.text.clone(),
        })
        .collect()
}
