//! Key-value storage slots.
//!
//! # Responsibility
//! - Define the minimal get/set contract the persistence adapter writes to.
//! - Provide an in-process backend and a SQLite-file backend.
//!
//! # Invariants
//! - `set` replaces the whole value under a key; there is no partial write.
//! - A failed `set` leaves the previously stored value untouched.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend failure while reading or writing a slot.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Backend refused the operation (read-only, injected fault).
    Unavailable(String),
    QuotaExceeded {
        key: String,
        attempted_bytes: usize,
        quota_bytes: usize,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::QuotaExceeded {
                key,
                attempted_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded for `{key}`: {attempted_bytes} bytes > {quota_bytes} bytes"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) | Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named text slots, the local-storage analogue.
pub trait StorageSlot {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
