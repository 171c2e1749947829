//! Task persistence adapter over a storage slot.
//!
//! # Responsibility
//! - Serialize the whole task collection to one slot and read it back.
//! - Degrade every read/write failure to a logged diagnostic.
//!
//! # Invariants
//! - `load` never fails: absent, unreadable or malformed data yields `[]`.
//! - `save` always overwrites the full slot value; order is preserved.
//! - This adapter is the only writer of its storage key.

use crate::model::task::Task;
use crate::storage::{StorageError, StorageSlot};
use log::{debug, error, warn};
use std::fmt::{Display, Formatter};

/// Slot key used when no other key is configured.
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Result of the most recent save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved { task_count: usize },
    Failed { reason: String },
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Why a stored value was discarded during `load`.
#[derive(Debug)]
pub enum LoadDiagnostic {
    Read(StorageError),
    InvalidJson(serde_json::Error),
    NotAnArray,
    InvalidItems(serde_json::Error),
}

impl Display for LoadDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "read failed: {err}"),
            Self::InvalidJson(err) => write!(f, "invalid json: {err}"),
            Self::NotAnArray => write!(f, "stored value is not an array"),
            Self::InvalidItems(err) => write!(f, "array items are not tasks: {err}"),
        }
    }
}

/// Persistence contract used by the task store.
pub trait TaskRepository {
    fn load(&mut self) -> Vec<Task>;
    fn save(&mut self, tasks: &[Task]) -> PersistOutcome;
}

/// JSON-in-a-slot repository.
pub struct SlotTaskRepository<S: StorageSlot> {
    storage: S,
    key: String,
}

impl<S: StorageSlot> SlotTaskRepository<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Reads the slot, reporting exactly why data was discarded.
    ///
    /// `Ok(None)` means the slot has never been written.
    pub fn try_load(&self) -> Result<Option<Vec<Task>>, LoadDiagnostic> {
        let raw = match self.storage.get(&self.key).map_err(LoadDiagnostic::Read)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        parse_tasks(&raw).map(Some)
    }
}

impl<S: StorageSlot> TaskRepository for SlotTaskRepository<S> {
    fn load(&mut self) -> Vec<Task> {
        match self.try_load() {
            Ok(Some(tasks)) => {
                debug!(
                    "event=tasks_load module=repo status=ok key={} task_count={}",
                    self.key,
                    tasks.len()
                );
                tasks
            }
            Ok(None) => {
                debug!(
                    "event=tasks_load module=repo status=empty key={}",
                    self.key
                );
                Vec::new()
            }
            Err(diagnostic) => {
                warn!(
                    "event=tasks_load module=repo status=reset key={} error={}",
                    self.key, diagnostic
                );
                Vec::new()
            }
        }
    }

    fn save(&mut self, tasks: &[Task]) -> PersistOutcome {
        let payload = match serde_json::to_string(tasks) {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    "event=tasks_save module=repo status=error key={} error_code=serialize_failed error={}",
                    self.key, err
                );
                return PersistOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        match self.storage.set(&self.key, &payload) {
            Ok(()) => {
                debug!(
                    "event=tasks_save module=repo status=ok key={} task_count={} bytes={}",
                    self.key,
                    tasks.len(),
                    payload.len()
                );
                PersistOutcome::Saved {
                    task_count: tasks.len(),
                }
            }
            Err(err) => {
                error!(
                    "event=tasks_save module=repo status=error key={} error_code=write_failed error={}",
                    self.key, err
                );
                PersistOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}

fn parse_tasks(raw: &str) -> Result<Vec<Task>, LoadDiagnostic> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(LoadDiagnostic::InvalidJson)?;
    if !value.is_array() {
        return Err(LoadDiagnostic::NotAnArray);
    }
    serde_json::from_value(value).map_err(LoadDiagnostic::InvalidItems)
}

#[cfg(test)]
mod tests {
    use super::{parse_tasks, LoadDiagnostic};

    #[test]
    fn parse_distinguishes_failure_kinds() {
        assert!(matches!(
            parse_tasks("{oops").unwrap_err(),
            LoadDiagnostic::InvalidJson(_)
        ));
        assert!(matches!(
            parse_tasks("\"not an array\"").unwrap_err(),
            LoadDiagnostic::NotAnArray
        ));
        assert!(matches!(
            parse_tasks("[{\"id\":\"1\"}]").unwrap_err(),
            LoadDiagnostic::InvalidItems(_)
        ));
        assert!(parse_tasks("[]").unwrap().is_empty());
    }
}
