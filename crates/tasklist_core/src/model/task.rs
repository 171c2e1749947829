//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record persisted in the storage slot.
//! - Guard creation-time invariants (non-empty id and text).
//!
//! # Invariants
//! - `id` and `text` never change after construction.
//! - `completed` is the only mutable field and only flips via `toggle()`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of one task inside the live collection.
///
/// Serialized transparently as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Creation-time validation failures for [`Task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be blank"),
            Self::EmptyText => write!(f, "task text must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do entry.
///
/// Wire shape is `{ "id": string, "text": string, "completed": bool }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    text: String,
    /// Absent in older stored data; read as not completed.
    #[serde(default)]
    completed: bool,
}

impl Task {
    /// Creates an incomplete task from raw user input.
    ///
    /// # Invariants
    /// - `text` is stored trimmed.
    /// - `completed` starts as `false`.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is blank.
    /// - `EmptyText` when `text` is blank after trimming.
    pub fn new(id: TaskId, text: &str) -> Result<Self, TaskValidationError> {
        if id.as_str().trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskValidationError::EmptyText);
        }

        Ok(Self {
            id,
            text: text.to_string(),
            completed: false,
        })
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
