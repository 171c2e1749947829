//! Injectable task id sources.
//!
//! # Responsibility
//! - Produce ids for newly added tasks without hidden global state.
//!
//! # Invariants
//! - A single generator never returns the same id twice.

use crate::model::task::TaskId;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Source of fresh task ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> TaskId;
}

/// Millisecond-timestamp ids, bumped forward when the clock has not moved.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    last_issued: u128,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self, now_ms: u128) -> TaskId {
        let next = if now_ms > self.last_issued {
            now_ms
        } else {
            self.last_issued + 1
        };
        self.last_issued = next;
        TaskId::new(next.to_string())
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&mut self) -> TaskId {
        // A clock before the epoch degrades to pure counting from zero.
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or(0);
        self.issue(now_ms)
    }
}

/// Deterministic `prefix` + counter ids.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> TaskId {
        let id = TaskId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Random v4 UUID ids.
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> TaskId {
        TaskId::new(Uuid::new_v4().to_string())
    }
}
