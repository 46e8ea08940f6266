//! Reminder interval: raw pending edit plus the confirmed active value.

use std::num::NonZeroU32;
use std::time::Duration;

/// Result of confirming the pending interval text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalOutcome {
    /// Pending text parsed; the active interval is now this many seconds.
    Applied(NonZeroU32),
    /// Pending text was invalid and has been reset to the active value.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderInterval {
    active: NonZeroU32,
    pending: String,
}

impl ReminderInterval {
    pub fn new(active: NonZeroU32) -> Self {
        Self {
            active,
            pending: active.to_string(),
        }
    }

    /// Seconds currently driving the timer.
    pub fn active_secs(&self) -> NonZeroU32 {
        self.active
    }

    pub fn active(&self) -> Duration {
        Duration::from_secs(u64::from(self.active.get()))
    }

    /// Raw text as last typed by the user, or the mirrored active value.
    pub fn pending_text(&self) -> &str {
        &self.pending
    }

    /// Stores raw field content without validation.
    pub fn set_pending(&mut self, text: impl Into<String>) {
        self.pending = text.into();
    }

    /// Promotes the pending text when it is a positive integer; otherwise
    /// rewrites it to mirror the active value.
    pub fn confirm(&mut self) -> IntervalOutcome {
        match parse_interval_secs(&self.pending) {
            Some(secs) => {
                self.active = secs;
                self.pending = secs.to_string();
                IntervalOutcome::Applied(secs)
            }
            None => {
                self.pending = self.active.to_string();
                IntervalOutcome::Rejected
            }
        }
    }
}

/// Parses a base-10 positive integer of seconds, ignoring outer whitespace.
///
/// Zero, signs, fractions, exponents and values above `u32::MAX` are invalid.
pub fn parse_interval_secs(raw: &str) -> Option<NonZeroU32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<u32>().ok().and_then(NonZeroU32::new)
}

#[cfg(test)]
mod tests {
    use super::{parse_interval_secs, IntervalOutcome, ReminderInterval};
    use std::num::NonZeroU32;

    fn secs(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap()
    }

    #[test]
    fn parse_accepts_only_positive_integers() {
        assert_eq!(parse_interval_secs("7"), Some(secs(7)));
        assert_eq!(parse_interval_secs(" 12 "), Some(secs(12)));
        assert_eq!(parse_interval_secs("007"), Some(secs(7)));
        for bad in ["", "abc", "0", "-3", "+3", "2.5", "1e3", "NaN", "inf", "99999999999"] {
            assert_eq!(parse_interval_secs(bad), None, "`{bad}` should be invalid");
        }
    }

    #[test]
    fn invalid_confirm_resets_pending_to_active() {
        let mut interval = ReminderInterval::new(secs(5));
        interval.set_pending("abc");
        assert_eq!(interval.pending_text(), "abc");
        assert_eq!(interval.confirm(), IntervalOutcome::Rejected);
        assert_eq!(interval.active_secs(), secs(5));
        assert_eq!(interval.pending_text(), "5");
    }

    #[test]
    fn valid_confirm_becomes_active() {
        let mut interval = ReminderInterval::new(secs(5));
        interval.set_pending(" 7");
        assert_eq!(interval.confirm(), IntervalOutcome::Applied(secs(7)));
        assert_eq!(interval.active().as_secs(), 7);
        assert_eq!(interval.pending_text(), "7");
    }
}
