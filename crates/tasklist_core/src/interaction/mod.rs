//! Interaction layer binding UI events to store operations.
//!
//! # Responsibility
//! - Hold the text-input buffer and the last painted view.
//! - Run each event to completion: mutate, persist, repaint.
//!
//! # Invariants
//! - Every handled event leaves `view()` equal to `render(tasks, filter)`.
//! - Button submit and Enter submit behave identically.

use crate::id::IdGenerator;
use crate::model::task::TaskId;
use crate::repo::task_repo::TaskRepository;
use crate::service::task_store::TaskStore;
use crate::view::render::{render, ListView, UiAction};
use log::trace;

/// Keys the input field reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Backspace,
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Replaces the input field contents.
    InputChanged(String),
    AddClicked,
    KeyPressed(Key),
    RowToggleClicked(TaskId),
    RowDeleteClicked(TaskId),
    /// Raw filter value from a control; unknown values are ignored.
    FilterClicked(String),
}

impl From<UiAction> for UiEvent {
    fn from(action: UiAction) -> Self {
        match action {
            UiAction::ToggleComplete(id) => Self::RowToggleClicked(id),
            UiAction::Delete(id) => Self::RowDeleteClicked(id),
            UiAction::SetFilter(filter) => Self::FilterClicked(filter.as_str().to_string()),
        }
    }
}

/// What a handled event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventEffect {
    /// State changed and the view was repainted.
    Repainted,
    /// Only the input buffer changed.
    InputEdited,
    Ignored,
}

/// Event-driven to-do application.
pub struct TodoApp<R: TaskRepository, G: IdGenerator> {
    store: TaskStore<R, G>,
    input: String,
    view: ListView,
}

impl<R: TaskRepository, G: IdGenerator> TodoApp<R, G> {
    /// Wraps a loaded store and paints the initial view.
    pub fn new(store: TaskStore<R, G>) -> Self {
        let view = render(store.tasks(), store.filter());
        Self {
            store,
            input: String::new(),
            view,
        }
    }

    pub fn store(&self) -> &TaskStore<R, G> {
        &self.store
    }

    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    /// Most recent full paint.
    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// Dispatches the store operation bound to a rendered control.
    pub fn activate(&mut self, action: UiAction) -> EventEffect {
        self.handle(action.into())
    }

    pub fn handle(&mut self, event: UiEvent) -> EventEffect {
        trace!("event=ui_event module=interaction event={event:?}");
        match event {
            UiEvent::InputChanged(value) => {
                self.input = value;
                EventEffect::InputEdited
            }
            UiEvent::KeyPressed(Key::Char(ch)) => {
                self.input.push(ch);
                EventEffect::InputEdited
            }
            UiEvent::KeyPressed(Key::Backspace) => {
                self.input.pop();
                EventEffect::InputEdited
            }
            UiEvent::AddClicked | UiEvent::KeyPressed(Key::Enter) => self.submit(),
            UiEvent::RowToggleClicked(id) => {
                let changed = self.store.toggle_complete(&id);
                self.repaint_if(changed)
            }
            UiEvent::RowDeleteClicked(id) => {
                let changed = self.store.delete(&id);
                self.repaint_if(changed)
            }
            UiEvent::FilterClicked(value) => {
                let changed = self.store.set_filter(&value);
                self.repaint_if(changed)
            }
        }
    }

    fn submit(&mut self) -> EventEffect {
        if self.store.add(&self.input).is_none() {
            return EventEffect::Ignored;
        }
        self.input.clear();
        self.repaint()
    }

    fn repaint_if(&mut self, changed: bool) -> EventEffect {
        if changed {
            self.repaint()
        } else {
            EventEffect::Ignored
        }
    }

    fn repaint(&mut self) -> EventEffect {
        self.view = render(self.store.tasks(), self.store.filter());
        EventEffect::Repainted
    }
}

#[cfg(test)]
mod tests {
    use super::{EventEffect, Key, TodoApp, UiEvent};
    use crate::id::SequentialIdGenerator;
    use crate::repo::task_repo::SlotTaskRepository;
    use crate::service::task_store::TaskStore;
    use crate::storage::MemoryStorage;

    fn app() -> TodoApp<SlotTaskRepository<MemoryStorage>, SequentialIdGenerator> {
        TodoApp::new(TaskStore::open(
            SlotTaskRepository::new(MemoryStorage::new()),
            SequentialIdGenerator::new("t"),
        ))
    }

    #[test]
    fn typing_then_enter_adds_and_clears_input() {
        let mut app = app();
        for ch in "milkk".chars() {
            app.handle(UiEvent::KeyPressed(Key::Char(ch)));
        }
        app.handle(UiEvent::KeyPressed(Key::Backspace));
        assert_eq!(app.input(), "milk");

        assert_eq!(
            app.handle(UiEvent::KeyPressed(Key::Enter)),
            EventEffect::Repainted
        );
        assert_eq!(app.input(), "");
        assert_eq!(app.view().visible_texts(), vec!["milk"]);
    }

    #[test]
    fn blank_submit_is_ignored_and_keeps_input() {
        let mut app = app();
        app.handle(UiEvent::InputChanged("   ".to_string()));
        assert_eq!(app.handle(UiEvent::AddClicked), EventEffect::Ignored);
        assert_eq!(app.input(), "   ");
        assert!(app.view().rows.is_empty());
    }

    #[test]
    fn rendered_actions_drive_the_store() {
        let mut app = app();
        app.handle(UiEvent::InputChanged("a".to_string()));
        app.handle(UiEvent::AddClicked);

        let toggle = app.view().row(1).unwrap().toggle.clone();
        app.activate(toggle);
        assert!(app.view().row(1).unwrap().completed);

        let active = app.view().filters[1].action.clone();
        app.activate(active);
        assert!(app.view().rows.is_empty());
    }

    #[test]
    fn unknown_filter_value_is_ignored() {
        let mut app = app();
        assert_eq!(
            app.handle(UiEvent::FilterClicked("done".to_string())),
            EventEffect::Ignored
        );
    }
}
