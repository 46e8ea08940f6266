//! Domain model for the to-do list.
//!
//! # Invariants
//! - Every task carries a non-empty, trimmed text.
//! - Task ids are opaque strings and unique within one list.

pub mod task;
