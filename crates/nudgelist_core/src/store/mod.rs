//! Task list state and its persistence.
//!
//! # Responsibility
//! - Own the ordered in-memory task list.
//! - Mirror every mutation to the key-value backend as one full-list write.
//!
//! # Invariants
//! - Storage is read only by `TaskStore::load`.
//! - Storage failures never roll back in-memory state.

pub mod codec;
pub mod task_store;
