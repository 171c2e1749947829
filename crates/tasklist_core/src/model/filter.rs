//! View-level visibility filter.
//!
//! # Invariants
//! - Exactly three values exist and `All` is the startup default.
//! - Filters are never persisted.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Predicate selecting which tasks are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Filter controls in display order.
    pub const ALL_VALUES: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Parses a control value; anything but the three labels is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Returns whether `task` is visible under this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.is_completed(),
            Self::Completed => task.is_completed(),
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Filter;
    use crate::model::task::{Task, TaskId};

    #[test]
    fn parse_accepts_only_known_labels() {
        assert_eq!(Filter::parse("active"), Some(Filter::Active));
        assert_eq!(Filter::parse("Active"), None);
        assert_eq!(Filter::parse("done"), None);
        assert_eq!(Filter::parse(""), None);
    }

    #[test]
    fn matches_follows_completion_state() {
        let open = Task::new(TaskId::from("1"), "open").unwrap();
        let mut done = Task::new(TaskId::from("2"), "done").unwrap();
        done.toggle();

        assert!(Filter::All.matches(&open) && Filter::All.matches(&done));
        assert!(Filter::Active.matches(&open) && !Filter::Active.matches(&done));
        assert!(!Filter::Completed.matches(&open) && Filter::Completed.matches(&done));
    }
}
