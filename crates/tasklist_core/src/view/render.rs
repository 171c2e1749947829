//! Pure projection of task state into a list view.
//!
//! # Invariants
//! - Output depends only on `(tasks, filter)`; every call builds a fresh view.
//! - Row order follows collection order.
//! - Exactly one filter control is marked active.

use crate::model::filter::Filter;
use crate::model::task::{Task, TaskId};
use crate::service::task_store::TaskCounts;
use std::fmt::Write as _;

const DONE_MARK: &str = "[x]";
const OPEN_MARK: &str = "[ ]";
const DELETE_MARK: &str = "✕";

/// Store operation a rendered control triggers when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    ToggleComplete(TaskId),
    Delete(TaskId),
    SetFilter(Filter),
}

/// One visible task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub toggle: UiAction,
    pub delete: UiAction,
}

/// One filter-selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    pub filter: Filter,
    pub label: &'static str,
    pub active: bool,
    pub action: UiAction,
}

/// Complete visual output for one paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<RowView>,
    pub filters: Vec<FilterControl>,
    pub counts: TaskCounts,
}

impl ListView {
    pub fn visible_texts(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.text.as_str()).collect()
    }

    pub fn active_filter(&self) -> Option<Filter> {
        self.filters
            .iter()
            .find(|control| control.active)
            .map(|control| control.filter)
    }

    /// Row at 1-based display position.
    pub fn row(&self, position: usize) -> Option<&RowView> {
        position.checked_sub(1).and_then(|index| self.rows.get(index))
    }

    /// Deterministic text paint for terminal hosts.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if self.rows.is_empty() {
            out.push_str("  (nothing to show)\n");
        }
        for (index, row) in self.rows.iter().enumerate() {
            let mark = if row.completed { DONE_MARK } else { OPEN_MARK };
            let _ = writeln!(out, "{:>3}. {} {}  {}", index + 1, mark, row.text, DELETE_MARK);
        }

        let labels: Vec<String> = self
            .filters
            .iter()
            .map(|control| {
                if control.active {
                    format!("[{}]", control.label)
                } else {
                    control.label.to_string()
                }
            })
            .collect();
        let _ = writeln!(
            out,
            "{}  ({} active, {} completed)",
            labels.join(" "),
            self.counts.active,
            self.counts.completed
        );
        out
    }
}

/// Builds the full view for `tasks` under `filter`.
pub fn render(tasks: &[Task], filter: Filter) -> ListView {
    let rows = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .map(|task| RowView {
            id: task.id().clone(),
            text: task.text().to_string(),
            completed: task.is_completed(),
            toggle: UiAction::ToggleComplete(task.id().clone()),
            delete: UiAction::Delete(task.id().clone()),
        })
        .collect();

    let filters = Filter::ALL_VALUES
        .iter()
        .map(|&value| FilterControl {
            filter: value,
            label: value.as_str(),
            active: value == filter,
            action: UiAction::SetFilter(value),
        })
        .collect();

    ListView {
        rows,
        filters,
        counts: TaskCounts::of(tasks),
    }
}
