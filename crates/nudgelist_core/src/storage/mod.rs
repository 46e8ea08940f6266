//! Key-value persistence backend contract.
//!
//! # Responsibility
//! - Define the string get/set contract the task store persists through.
//! - Keep backend details (SQLite, in-process map) behind one trait.
//!
//! # Invariants
//! - `get` of a key that was never written returns `Ok(None)`, not an error.
//! - `set` replaces the whole value for the key.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_kv;
pub mod schema;
mod sqlite_kv;

pub use memory_kv::MemoryKvStore;
pub use sqlite_kv::SqliteKvStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend failure for key-value reads and writes.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// The database file was written by a build with a newer schema.
    SchemaTooNew { found: u32, supported: u32 },
    /// Backend refused the operation without a lower-level cause.
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "key-value schema v{found} is newer than this build understands (v{supported})"
            ),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String key-value storage, addressed by fixed keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
