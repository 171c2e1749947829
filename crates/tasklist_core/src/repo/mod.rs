//! Persistence adapter between the task store and storage slots.
//!
//! # Responsibility
//! - Own the storage key holding the serialized task collection.
//! - Keep JSON wire details out of the store.
//!
//! # Invariants
//! - Repository APIs never return errors to the store; failures degrade
//!   to an empty load or a `PersistOutcome::Failed`.

pub mod task_repo;
