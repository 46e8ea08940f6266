//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted `{id, text}` record.
//! - Enforce the non-empty text rule at construction.
//!
//! # Invariants
//! - `text` is trimmed and never empty.
//! - `id` never changes after creation and is never reused in one list.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Freshly created tasks get a UUID v4 string. Ids read back from storage are
/// kept verbatim, so older timestamp-shaped ids keep working.
pub type TaskId = String;

/// Validation errors for task construction and decoded records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text is empty after trimming.
    EmptyText,
    /// Id is empty after trimming.
    EmptyId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be empty"),
            Self::EmptyId => write!(f, "task id must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do entry, serialized as `{ "id": ..., "text": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
}

impl Task {
    /// Creates a task with a fresh id from user input.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is empty or whitespace only.
    pub fn new(text: &str) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4().to_string(), text)
    }

    /// Creates a task with a caller-provided id.
    pub fn with_id(id: impl Into<TaskId>, text: &str) -> Result<Self, TaskValidationError> {
        let task = Self {
            id: id.into(),
            text: text.trim().to_string(),
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks invariants on an already-built record, e.g. one decoded from JSON.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskValidationError};

    #[test]
    fn new_trims_text_and_assigns_distinct_ids() {
        let first = Task::new("  Buy milk \n").unwrap();
        let second = Task::new("Buy milk").unwrap();
        assert_eq!(first.text, "Buy milk");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        assert_eq!(Task::new("").unwrap_err(), TaskValidationError::EmptyText);
        assert_eq!(Task::new(" \t ").unwrap_err(), TaskValidationError::EmptyText);
    }

    #[test]
    fn serializes_as_id_and_text_only() {
        let task = Task::with_id("1700000000000", "Walk dog").unwrap();
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":"1700000000000","text":"Walk dog"}"#);
    }

    #[test]
    fn validate_flags_decoded_blank_id() {
        let task = Task {
            id: " ".to_string(),
            text: "x".to_string(),
        };
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyId));
    }
}
