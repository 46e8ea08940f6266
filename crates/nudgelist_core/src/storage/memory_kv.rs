//! In-process key-value store with fault injection.
//!
//! Used by tests and the CLI demo mode; nothing survives the process.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-seeded with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Makes every subsequent `get` fail.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Makes every subsequent `set` fail. Failed writes still count.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of `set` calls attempted so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Raw stored value, bypassing fault injection.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads {
            return Err(StorageError::Unavailable(format!("read of `{key}` refused")));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.writes += 1;
        if self.fail_writes {
            return Err(StorageError::Unavailable(format!("write of `{key}` refused")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
