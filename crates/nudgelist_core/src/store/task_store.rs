//! Task store: in-memory list plus whole-document persistence.
//!
//! # Responsibility
//! - Hydrate the list once from storage.
//! - Apply add/remove to memory first, then write the full list back.
//!
//! # Invariants
//! - Insertion order is display order and rotation order.
//! - No two tasks share an id.
//! - Each add/remove that reaches persistence performs exactly one `set`.
//! - `revision` grows by one per snapshot (load, add, remove).

use crate::model::task::{Task, TaskId};
use crate::storage::KeyValueStore;
use crate::store::codec::{decode_tasks, encode_tasks};
use log::{debug, error, info, warn};

/// What `TaskStore::load` found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No record under the key; the list starts empty.
    Missing,
    /// Record parsed into this many tasks.
    Loaded(usize),
    /// Record was unreadable or corrupt and has been dropped.
    Discarded(String),
}

pub struct TaskStore<S: KeyValueStore> {
    storage: S,
    key: String,
    tasks: Vec<Task>,
    revision: u64,
    last_persist_error: Option<String>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Creates an empty store bound to `key`. Call [`TaskStore::load`] next.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            tasks: Vec::new(),
            revision: 0,
            last_persist_error: None,
        }
    }

    /// Replaces the in-memory list with the persisted one.
    ///
    /// Never fails: read errors and corrupt blobs are logged and leave the
    /// list empty. The corrupt record is not rewritten until the next mutation.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = match self.storage.get(&self.key) {
            Ok(None) => {
                self.tasks = Vec::new();
                LoadOutcome::Missing
            }
            Ok(Some(raw)) => match decode_tasks(&raw) {
                Ok(tasks) => {
                    self.tasks = tasks;
                    LoadOutcome::Loaded(self.tasks.len())
                }
                Err(err) => {
                    error!(
                        "event=tasks_load module=store status=error error_code=decode_failed key={} error={}",
                        self.key, err
                    );
                    self.tasks = Vec::new();
                    LoadOutcome::Discarded(err.to_string())
                }
            },
            Err(err) => {
                error!(
                    "event=tasks_load module=store status=error error_code=read_failed key={} error={}",
                    self.key, err
                );
                self.tasks = Vec::new();
                LoadOutcome::Discarded(err.to_string())
            }
        };

        self.revision += 1;
        info!(
            "event=tasks_load module=store status=ok count={} revision={}",
            self.tasks.len(),
            self.revision
        );
        outcome
    }

    /// Appends a task built from `text` and persists the list.
    ///
    /// Returns the new id, or `None` when the trimmed text is empty. Rejected
    /// input changes nothing and writes nothing.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        let mut task = match Task::new(text) {
            Ok(task) => task,
            Err(err) => {
                debug!("event=task_add module=store status=rejected reason={err}");
                return None;
            }
        };
        while self.contains(&task.id) {
            task.id = Task::new(&task.text).ok()?.id;
        }

        let id = task.id.clone();
        self.tasks.push(task);
        self.commit("task_add");
        Some(id)
    }

    /// Drops the task with `id` and persists the list.
    ///
    /// Returns whether a task was removed. An unknown id leaves the list as is
    /// but still goes through the single write.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        self.commit("task_remove");
        removed
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Snapshot counter; changes whenever the list is replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Message of the latest failed write, cleared by the next good one.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    fn commit(&mut self, event: &'static str) {
        self.revision += 1;
        match self.persist() {
            Ok(()) => {
                self.last_persist_error = None;
                info!(
                    "event={event} module=store status=ok count={} revision={}",
                    self.tasks.len(),
                    self.revision
                );
            }
            Err(message) => {
                warn!(
                    "event={event} module=store status=error error_code=persist_failed count={} revision={} error={}",
                    self.tasks.len(),
                    self.revision,
                    message
                );
                self.last_persist_error = Some(message);
            }
        }
    }

    fn persist(&mut self) -> Result<(), String> {
        let blob = encode_tasks(&self.tasks).map_err(|err| err.to_string())?;
        self.storage
            .set(&self.key, &blob)
            .map_err(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadOutcome, TaskStore};
    use crate::config::STORAGE_KEY_TODOS;
    use crate::storage::MemoryKvStore;

    fn empty_store() -> TaskStore<MemoryKvStore> {
        let mut store = TaskStore::new(MemoryKvStore::new(), STORAGE_KEY_TODOS);
        assert_eq!(store.load(), LoadOutcome::Missing);
        store
    }

    #[test]
    fn add_trims_and_appends_in_order() {
        let mut store = empty_store();
        store.add("  first ").unwrap();
        store.add("second").unwrap();
        let texts: Vec<_> = store.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[test]
    fn rejected_add_does_not_bump_revision_or_write() {
        let mut store = empty_store();
        let revision = store.revision();
        assert!(store.add("").is_none());
        assert!(store.add("   ").is_none());
        assert_eq!(store.revision(), revision);
        assert_eq!(store.storage().write_count(), 0);
    }

    #[test]
    fn remove_reports_whether_anything_was_dropped() {
        let mut store = empty_store();
        let id = store.add("x").unwrap();
        assert!(!store.remove("nope"));
        assert!(store.remove(&id));
        assert!(store.is_empty());
        assert_eq!(store.storage().write_count(), 3);
    }
}
