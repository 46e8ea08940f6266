//! Periodic reminder: interval editing, round-robin timer, popup state.
//!
//! # Invariants
//! - At most one live timer handle exists at a time.
//! - The active interval is always a positive number of seconds.
//! - Dismissing the popup never touches the cursor or the timer phase.

pub mod interval;
pub mod popup;
pub mod scheduler;
