//! JSON encoding of the persisted task list.
//!
//! The blob is a bare JSON array of `{id, text}` objects with no version field.

use crate::model::task::{Task, TaskValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a stored blob cannot be turned back into a task list.
#[derive(Debug)]
pub enum TaskListDecodeError {
    Json(serde_json::Error),
    InvalidTask {
        index: usize,
        source: TaskValidationError,
    },
    DuplicateId(String),
}

impl Display for TaskListDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed task list json: {err}"),
            Self::InvalidTask { index, source } => {
                write!(f, "invalid task at index {index}: {source}")
            }
            Self::DuplicateId(id) => write!(f, "duplicate task id `{id}`"),
        }
    }
}

impl Error for TaskListDecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidTask { source, .. } => Some(source),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for TaskListDecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tasks)
}

/// Parses a stored blob and checks per-task and list invariants.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, TaskListDecodeError> {
    let tasks: Vec<Task> = serde_json::from_str(raw)?;
    check_tasks(&tasks)?;
    Ok(tasks)
}

fn check_tasks(tasks: &[Task]) -> Result<(), TaskListDecodeError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        task.validate()
            .map_err(|source| TaskListDecodeError::InvalidTask { index, source })?;
        if !seen.insert(task.id.as_str()) {
            return Err(TaskListDecodeError::DuplicateId(task.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode_tasks, encode_tasks, TaskListDecodeError};
    use crate::model::task::Task;

    #[test]
    fn decodes_records_written_by_older_builds() {
        let raw = r#"[{"id":"1712345678901","text":"Buy milk"},{"id":"1712345678999","text":"Walk dog"}]"#;
        let tasks = decode_tasks(raw).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "1712345678901");
        assert_eq!(tasks[1].text, "Walk dog");
    }

    #[test]
    fn encode_keeps_insertion_order() {
        let tasks = vec![
            Task::with_id("b", "second id first").unwrap(),
            Task::with_id("a", "first id second").unwrap(),
        ];
        let encoded = encode_tasks(&tasks).unwrap();
        assert!(encoded.find("\"b\"").unwrap() < encoded.find("\"a\"").unwrap());
        assert_eq!(decode_tasks(&encoded).unwrap(), tasks);
    }

    #[test]
    fn rejects_non_array_and_garbage() {
        assert!(matches!(
            decode_tasks(r#"{"id":"1"}"#),
            Err(TaskListDecodeError::Json(_))
        ));
        assert!(matches!(decode_tasks("not json"), Err(TaskListDecodeError::Json(_))));
    }

    #[test]
    fn rejects_blank_text_and_duplicate_ids() {
        assert!(matches!(
            decode_tasks(r#"[{"id":"1","text":"ok"},{"id":"2","text":"  "}]"#),
            Err(TaskListDecodeError::InvalidTask { index: 1, .. })
        ));
        assert!(matches!(
            decode_tasks(r#"[{"id":"1","text":"a"},{"id":"1","text":"b"}]"#),
            Err(TaskListDecodeError::DuplicateId(id)) if id == "1"
        ));
    }
}
