//! Round-robin reminder timer.
//!
//! # Responsibility
//! - Own the single timer handle and its re-arm procedure.
//! - Pick the next task to remind about and advance the rotation cursor.
//!
//! # Invariants
//! - `arm` tears the previous handle down before creating the next one, so
//!   there is never more than one live handle.
//! - A tick over an empty list emits nothing and leaves the cursor alone.
//! - After every list change the cursor points into the new list, and a task
//!   the rotation had not reached yet is never skipped.
//!
//! The scheduler never reads the clock itself. Hosts pass `Instant`s into
//! `poll` from their event loop, which keeps the timer deterministic in tests.

use crate::config::ReminderConfig;
use crate::model::task::Task;
use crate::reminder::interval::{IntervalOutcome, ReminderInterval};
use log::debug;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

/// Live timer registration. Replaced wholesale on every re-arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    pub generation: u64,
    pub period: Duration,
    pub next_due: Instant,
}

/// One fired reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub task: Task,
    /// Position of `task` in the list when it fired.
    pub index: usize,
}

#[derive(Debug)]
pub struct ReminderScheduler {
    rearm_on_list_change: bool,
    interval: ReminderInterval,
    timer: Option<TimerHandle>,
    generation: u64,
    // Next index to show. Right after a wrap it equals the length it fired
    // against, so an appended task is shown next; see `rebase_cursor`.
    cursor: usize,
    list_len: usize,
    list_revision: Option<u64>,
}

impl ReminderScheduler {
    /// Creates an idle scheduler. Call [`ReminderScheduler::arm`] to start it.
    pub fn new(config: &ReminderConfig) -> Self {
        let secs = NonZeroU32::new(config.default_interval_secs).unwrap_or(NonZeroU32::MIN);
        Self {
            rearm_on_list_change: config.rearm_on_list_change,
            interval: ReminderInterval::new(secs),
            timer: None,
            generation: 0,
            cursor: 0,
            list_len: 0,
            list_revision: None,
        }
    }

    /// Replaces any live timer with a fresh one due one period after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.disarm();
        self.generation += 1;
        let period = self.interval.active();
        self.timer = Some(TimerHandle {
            generation: self.generation,
            period,
            next_due: now + period,
        });
        debug!(
            "event=timer_arm module=reminder status=ok generation={} period_secs={}",
            self.generation,
            period.as_secs()
        );
    }

    pub fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(
                "event=timer_teardown module=reminder status=ok generation={}",
                timer.generation
            );
        }
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn timer(&self) -> Option<&TimerHandle> {
        self.timer.as_ref()
    }

    /// Number of handles created so far; grows by one per re-arm.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_pending_interval(&mut self, text: impl Into<String>) {
        self.interval.set_pending(text);
    }

    pub fn pending_text(&self) -> &str {
        self.interval.pending_text()
    }

    pub fn active_interval(&self) -> Duration {
        self.interval.active()
    }

    pub fn active_interval_secs(&self) -> NonZeroU32 {
        self.interval.active_secs()
    }

    /// Applies the pending interval text.
    ///
    /// A changed active value re-arms the timer at `now`; invalid text is
    /// silently reset to the active value.
    pub fn confirm_interval(&mut self, now: Instant) -> IntervalOutcome {
        let previous = self.interval.active_secs();
        let outcome = self.interval.confirm();
        match outcome {
            IntervalOutcome::Applied(secs) => {
                if secs != previous || !self.is_armed() {
                    self.arm(now);
                }
            }
            IntervalOutcome::Rejected => {
                debug!(
                    "event=interval_confirm module=reminder status=rejected active_secs={}",
                    previous
                );
            }
        }
        outcome
    }

    /// Reacts to a new list snapshot identified by `revision`.
    ///
    /// Repeated notifications for the same revision are ignored.
    pub fn on_list_changed(&mut self, now: Instant, revision: u64, len: usize) {
        if self.list_revision == Some(revision) {
            return;
        }
        self.list_revision = Some(revision);
        self.cursor = rebase_cursor(self.cursor, self.list_len, len);
        self.list_len = len;

        if self.rearm_on_list_change && self.is_armed() {
            self.arm(now);
        }
    }

    /// Fires at most once if the current period has elapsed.
    ///
    /// Missed periods collapse into a single fire; the next deadline is one
    /// period after `now`.
    pub fn poll(&mut self, now: Instant, tasks: &[Task]) -> Option<Reminder> {
        let timer = self.timer.as_mut()?;
        if now < timer.next_due {
            return None;
        }
        timer.next_due = now + timer.period;

        self.list_len = tasks.len();
        if tasks.is_empty() {
            return None;
        }

        let index = self.cursor % tasks.len();
        self.cursor = index + 1;
        Some(Reminder {
            task: tasks[index].clone(),
            index,
        })
    }

    /// Time left until the next period boundary, `None` when idle.
    pub fn next_due_in(&self, now: Instant) -> Option<Duration> {
        self.timer
            .as_ref()
            .map(|timer| timer.next_due.saturating_duration_since(now))
    }

    /// Index the next fire will show, in `[0, len)`; `0` for an empty list.
    pub fn cursor(&self) -> usize {
        if self.list_len == 0 {
            0
        } else {
            self.cursor % self.list_len
        }
    }
}

/// Carries the cursor across a list change from `old_len` to `new_len`.
///
/// An in-range cursor is kept, which lets a task appended right after a wrap
/// be the next one shown. Anything else is first wrapped by the length it was
/// computed against, then clamped into the new list.
fn rebase_cursor(cursor: usize, old_len: usize, new_len: usize) -> usize {
    if new_len == 0 {
        return 0;
    }
    if cursor < new_len {
        return cursor;
    }
    (cursor % old_len.max(1)) % new_len
}

#[cfg(test)]
mod tests {
    use super::{rebase_cursor, ReminderScheduler};
    use crate::config::ReminderConfig;
    use crate::model::task::Task;
    use std::time::{Duration, Instant};

    fn tasks(texts: &[&str]) -> Vec<Task> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Task::with_id(i.to_string(), text).unwrap())
            .collect()
    }

    #[test]
    fn idle_scheduler_never_fires() {
        let mut scheduler = ReminderScheduler::new(&ReminderConfig::default());
        let now = Instant::now();
        assert!(scheduler
            .poll(now + Duration::from_secs(60), &tasks(&["a"]))
            .is_none());
        assert_eq!(scheduler.next_due_in(now), None);
    }

    #[test]
    fn fires_only_after_full_period() {
        let start = Instant::now();
        let list = tasks(&["a"]);
        let mut scheduler = ReminderScheduler::new(&ReminderConfig::default());
        scheduler.arm(start);

        assert!(scheduler.poll(start + Duration::from_secs(4), &list).is_none());
        let fired = scheduler.poll(start + Duration::from_secs(5), &list).unwrap();
        assert_eq!(fired.task.text, "a");
        assert_eq!(
            scheduler.next_due_in(start + Duration::from_secs(5)),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn missed_periods_collapse_into_one_fire() {
        let start = Instant::now();
        let list = tasks(&["a", "b"]);
        let mut scheduler = ReminderScheduler::new(&ReminderConfig::default());
        scheduler.arm(start);

        let late = start + Duration::from_secs(23);
        assert_eq!(scheduler.poll(late, &list).unwrap().index, 0);
        assert!(scheduler.poll(late, &list).is_none());
        assert_eq!(scheduler.cursor(), 1);
    }

    #[test]
    fn empty_tick_keeps_cursor_and_phase_moves_on() {
        let start = Instant::now();
        let mut scheduler = ReminderScheduler::new(&ReminderConfig::default());
        scheduler.arm(start);
        let tick = start + Duration::from_secs(5);
        assert!(scheduler.poll(tick, &[]).is_none());
        assert_eq!(scheduler.cursor(), 0);
        assert_eq!(scheduler.next_due_in(tick), Some(Duration::from_secs(5)));
    }

    #[test]
    fn same_revision_does_not_rearm_twice() {
        let start = Instant::now();
        let mut scheduler = ReminderScheduler::new(&ReminderConfig::default());
        scheduler.arm(start);
        scheduler.on_list_changed(start, 7, 1);
        let generation = scheduler.generation();
        scheduler.on_list_changed(start + Duration::from_secs(1), 7, 1);
        assert_eq!(scheduler.generation(), generation);
    }

    #[test]
    fn rebase_cursor_wraps_by_old_length_first() {
        assert_eq!(rebase_cursor(1, 1, 2), 1);
        assert_eq!(rebase_cursor(3, 3, 2), 0);
        assert_eq!(rebase_cursor(2, 3, 2), 0);
        assert_eq!(rebase_cursor(4, 5, 3), 1);
        assert_eq!(rebase_cursor(2, 3, 0), 0);
    }

    #[test]
    fn zero_default_interval_is_clamped_to_one_second() {
        let config = ReminderConfig {
            default_interval_secs: 0,
            ..ReminderConfig::default()
        };
        let scheduler = ReminderScheduler::new(&config);
        assert_eq!(scheduler.active_interval(), Duration::from_secs(1));
    }
}
