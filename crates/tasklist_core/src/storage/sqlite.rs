//! SQLite-file storage slots.
//!
//! # Invariants
//! - One row per key in `storage_slots`; writes are single-statement upserts.

use super::{StorageResult, StorageSlot};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Slot backend persisted in a SQLite database file.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the database at `path` with migrations applied.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }
}

impl StorageSlot for SqliteStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO storage_slots (key, value) VALUES (?1, ?2)
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
    use super::SqliteStorage;
    use crate::storage::StorageSlot;

    #[test]
    fn upsert_replaces_value_in_place() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(storage.get("todos").unwrap(), None);

        storage.set("todos", "[]").unwrap();
        storage.set("todos", "[{\"id\":\"1\"}]").unwrap();
        assert_eq!(
            storage.get("todos").unwrap().as_deref(),
            Some("[{\"id\":\"1\"}]")
        );
    }
}
