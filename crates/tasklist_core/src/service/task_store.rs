//! Task state store.
//!
//! # Responsibility
//! - Own the live task collection and the current view filter.
//! - Apply add/toggle/delete/set-filter and persist after each mutation.
//!
//! # Invariants
//! - Task ids are unique among tasks added through this store.
//! - Collection order is insertion order.
//! - Invalid input (blank text, unknown id, unknown filter) is a silent no-op.
//! - The filter is never persisted and starts as `Filter::All`.

use crate::id::IdGenerator;
use crate::model::filter::Filter;
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{PersistOutcome, TaskRepository};
use log::{debug, info};

/// Per-filter task totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.is_completed()).count();
        Self {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }
}

/// Explicitly constructed owner of to-do state.
pub struct TaskStore<R: TaskRepository, G: IdGenerator> {
    tasks: Vec<Task>,
    filter: Filter,
    repo: R,
    ids: G,
    last_persist: Option<PersistOutcome>,
}

impl<R: TaskRepository, G: IdGenerator> TaskStore<R, G> {
    /// Loads persisted tasks through `repo`.
    pub fn open(mut repo: R, ids: G) -> Self {
        let tasks = repo.load();
        info!(
            "event=store_open module=store status=ok task_count={}",
            tasks.len()
        );
        Self {
            tasks,
            filter: Filter::default(),
            repo,
            ids,
            last_persist: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Tasks passing the current filter, in collection order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::of(&self.tasks)
    }

    /// Outcome of the latest save, `None` before the first mutation.
    pub fn last_persist(&self) -> Option<&PersistOutcome> {
        self.last_persist.as_ref()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    /// Appends a task built from trimmed `text`.
    ///
    /// Returns the new id, or `None` when the trimmed text is empty.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        if text.trim().is_empty() {
            return None;
        }

        let mut id = self.ids.next_id();
        // Stored data may already hold an id the generator just produced.
        while self.get(&id).is_some() {
            id = self.ids.next_id();
        }

        let task = Task::new(id.clone(), text).ok()?;
        self.tasks.push(task);
        debug!("event=task_add module=store status=ok task_id={id}");
        self.persist();
        Some(id)
    }

    /// Flips completion of the first task with `id`.
    ///
    /// Returns `false` when no such task exists.
    pub fn toggle_complete(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) else {
            return false;
        };
        task.toggle();
        debug!(
            "event=task_toggle module=store status=ok task_id={} completed={}",
            id,
            task.is_completed()
        );
        self.persist();
        true
    }

    /// Removes exactly one task with `id`, keeping the others in order.
    ///
    /// Returns `false` when no such task exists.
    pub fn delete(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.tasks.iter().position(|task| task.id() == id) else {
            return false;
        };
        self.tasks.remove(index);
        debug!("event=task_delete module=store status=ok task_id={id}");
        self.persist();
        true
    }

    /// Switches the view filter when `value` is a known filter label.
    pub fn set_filter(&mut self, value: &str) -> bool {
        match Filter::parse(value) {
            Some(filter) => {
                self.filter = filter;
                true
            }
            None => false,
        }
    }

    fn persist(&mut self) {
        self.last_persist = Some(self.repo.save(&self.tasks));
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskCounts, TaskStore};
    use crate::id::SequentialIdGenerator;
    use crate::model::filter::Filter;
    use crate::model::task::TaskId;
    use crate::repo::task_repo::SlotTaskRepository;
    use crate::storage::MemoryStorage;

    fn empty_store() -> TaskStore<SlotTaskRepository<MemoryStorage>, SequentialIdGenerator> {
        TaskStore::open(
            SlotTaskRepository::new(MemoryStorage::new()),
            SequentialIdGenerator::new("t"),
        )
    }

    #[test]
    fn add_assigns_injected_ids() {
        let mut store = empty_store();
        assert_eq!(store.add("a"), Some(TaskId::from("t1")));
        assert_eq!(store.add("b"), Some(TaskId::from("t2")));
    }

    #[test]
    fn add_skips_ids_already_present_in_stored_data() {
        let storage = MemoryStorage::new()
            .with_value("todos", r#"[{"id":"t1","text":"old","completed":false}]"#);
        let mut store = TaskStore::open(
            SlotTaskRepository::new(storage),
            SequentialIdGenerator::new("t"),
        );

        assert_eq!(store.add("new"), Some(TaskId::from("t2")));
        assert_eq!(store.tasks().len(), 2);
    }

    #[test]
    fn counts_split_by_completion() {
        let mut store = empty_store();
        let first = store.add("a").unwrap();
        store.add("b");
        store.add("c");
        store.toggle_complete(&first);

        assert_eq!(
            store.counts(),
            TaskCounts {
                total: 3,
                active: 2,
                completed: 1,
            }
        );
    }

    #[test]
    fn set_filter_rejects_unknown_values() {
        let mut store = empty_store();
        assert!(store.set_filter("completed"));
        assert!(!store.set_filter("bogus"));
        assert_eq!(store.filter(), Filter::Completed);
    }

    #[test]
    fn no_op_operations_do_not_save() {
        let mut store = empty_store();
        store.add("   ");
        store.toggle_complete(&TaskId::from("missing"));
        store.delete(&TaskId::from("missing"));
        store.set_filter("active");

        assert!(store.last_persist().is_none());
        assert_eq!(store.repository().storage().raw("todos"), None);
    }
}
