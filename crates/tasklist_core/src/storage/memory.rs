use super::{StorageError, StorageResult, StorageSlot};
use std::collections::HashMap;

/// In-process slot map with an optional byte quota.
///
/// `fail_reads` / `fail_writes` simulate a backend that rejects every
/// read or write.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    quota_bytes: Option<usize>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes whose total stored bytes would exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Seeds a raw slot value, bypassing quota and fault settings.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_fail_reads(&mut self, fail_reads: bool) {
        self.fail_reads = fail_reads;
    }

    pub fn set_fail_writes(&mut self, fail_writes: bool) {
        self.fail_writes = fail_writes;
    }

    /// Raw slot value for assertions.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.slots
            .iter()
            .filter(|(slot_key, _)| slot_key.as_str() != key)
            .map(|(slot_key, value)| slot_key.len() + value.len())
            .sum()
    }
}

impl StorageSlot for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        if let Some(quota_bytes) = self.quota_bytes {
            let attempted_bytes = self.used_bytes_excluding(key) + key.len() + value.len();
            if attempted_bytes > quota_bytes {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    attempted_bytes,
                    quota_bytes,
                });
            }
        }

        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
