//! SQLite-backed key-value store over the `kv_entries` table.

use super::schema::ensure_schema;
use super::{KeyValueStore, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Key-value store that owns one schema-checked SQLite connection.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Opens the database file at `path`, creating and migrating it if needed.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::connect("file", || Connection::open(path))
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        Self::connect("memory", Connection::open_in_memory)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn connect(
        mode: &'static str,
        open: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> StorageResult<Self> {
        let started_at = Instant::now();
        let result = open()
            .map_err(StorageError::from)
            .and_then(|mut conn| -> StorageResult<Self> {
                conn.busy_timeout(Duration::from_secs(2))?;
                ensure_schema(&mut conn)?;
                Ok(Self { conn })
            });

        match &result {
            Ok(_) => info!(
                "event=kv_open module=storage status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=kv_open module=storage status=error mode={mode} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKvStore;
    use crate::storage::KeyValueStore;

    #[test]
    fn missing_key_reads_as_none() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        assert_eq!(store.get("todos").unwrap(), None);
    }

    #[test]
    fn set_overwrites_existing_value() {
        let mut store = SqliteKvStore::open_in_memory().unwrap();
        store.set("todos", "[]").unwrap();
        store.set("todos", r#"[{"id":"1","text":"a"}]"#).unwrap();
        assert_eq!(
            store.get("todos").unwrap().as_deref(),
            Some(r#"[{"id":"1","text":"a"}]"#)
        );

        let rows: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
