//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the task record and the view filter used by store and renderer.
//!
//! # Invariants
//! - Task ids are unique within the live collection.
//! - Deletion is a hard removal; there are no tombstones.

pub mod filter;
pub mod task;
