//! Core domain logic for the tasklist to-do manager.
//! Store, persistence, rendering and event handling all live here; hosts only
//! translate their input into [`UiEvent`]s and paint [`ListView`]s.

pub mod config;
pub mod db;
pub mod id;
pub mod interaction;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod view;

pub use config::AppConfig;
pub use id::{IdGenerator, SequentialIdGenerator, TimestampIdGenerator, UuidIdGenerator};
pub use interaction::{EventEffect, Key, TodoApp, UiEvent};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::Filter;
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::task_repo::{
    LoadDiagnostic, PersistOutcome, SlotTaskRepository, TaskRepository, DEFAULT_STORAGE_KEY,
};
pub use service::task_store::{TaskCounts, TaskStore};
pub use storage::{MemoryStorage, SqliteStorage, StorageError, StorageResult, StorageSlot};
pub use view::render::{render, FilterControl, ListView, RowView, UiAction};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
