//! Core use-case services.
//!
//! # Responsibility
//! - Hold process state behind explicit objects instead of globals.
//! - Keep interaction/view layers decoupled from storage details.

pub mod task_store;
