//! Runtime configuration for hosts embedding the to-do core.
//!
//! # Invariants
//! - `data_dir` and `log_dir` are absolute once resolved.

use crate::logging::default_log_level;
use crate::repo::task_repo::DEFAULT_STORAGE_KEY;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "tasklist";
const DB_FILE_NAME: &str = "tasklist.sqlite3";

/// Resolved host settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Settings rooted at `data_dir`, other fields at their defaults.
    pub fn rooted_at(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = absolutize(data_dir.into());
        Self {
            log_dir: data_dir.join("logs"),
            data_dir,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level().to_string(),
        }
    }

    /// Platform data directory (`dirs::data_dir`), falling back to the
    /// working directory when the platform reports none.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| absolutize(PathBuf::from(format!(".{APP_DIR_NAME}"))))
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !key.trim().is_empty() {
            self.storage_key = key;
        }
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = absolutize(log_dir.into());
        self
    }

    /// SQLite file holding the storage slots.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::rooted_at(Self::default_data_dir())
    }
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}
