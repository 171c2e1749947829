use tasklist_core::{
    render, EventEffect, Filter, Key, MemoryStorage, SequentialIdGenerator, SlotTaskRepository,
    TaskId, TaskStore, TodoApp, UiEvent,
};

fn new_app() -> TodoApp<SlotTaskRepository<MemoryStorage>, SequentialIdGenerator> {
    TodoApp::new(TaskStore::open(
        SlotTaskRepository::new(MemoryStorage::new()),
        SequentialIdGenerator::new("t"),
    ))
}

fn submit(app: &mut TodoApp<SlotTaskRepository<MemoryStorage>, SequentialIdGenerator>, text: &str) {
    app.handle(UiEvent::InputChanged(text.to_string()));
    app.handle(UiEvent::AddClicked);
}

#[test]
fn delete_first_of_two_leaves_second_visible() {
    let mut app = new_app();
    submit(&mut app, "a");
    submit(&mut app, "b");

    let effect = app.handle(UiEvent::RowDeleteClicked(TaskId::from("t1")));
    assert_eq!(effect, EventEffect::Repainted);
    assert_eq!(app.view().active_filter(), Some(Filter::All));
    assert_eq!(app.view().visible_texts(), vec!["b"]);
}

#[test]
fn view_always_matches_fresh_render_after_events() {
    let mut app = new_app();
    let events = vec![
        UiEvent::InputChanged("x".to_string()),
        UiEvent::KeyPressed(Key::Enter),
        UiEvent::InputChanged("y".to_string()),
        UiEvent::AddClicked,
        UiEvent::RowToggleClicked(TaskId::from("t2")),
        UiEvent::FilterClicked("completed".to_string()),
        UiEvent::RowDeleteClicked(TaskId::from("missing")),
        UiEvent::FilterClicked("nonsense".to_string()),
    ];

    for event in events {
        app.handle(event);
        let store = app.store();
        assert_eq!(app.view(), &render(store.tasks(), store.filter()));
    }
    assert_eq!(app.view().visible_texts(), vec!["y"]);
    assert_eq!(app.view().counts.completed, 1);
}

#[test]
fn mutations_are_persisted_before_the_next_event() {
    let mut app = new_app();
    submit(&mut app, "persist me");
    app.handle(UiEvent::RowToggleClicked(TaskId::from("t1")));

    let raw = app.store().repository().storage().raw("todos").unwrap();
    assert_eq!(raw, r#"[{"id":"t1","text":"persist me","completed":true}]"#);
}

#[test]
fn filter_changes_repaint_without_saving() {
    let mut app = new_app();
    app.handle(UiEvent::FilterClicked("active".to_string()));

    assert!(app.store().last_persist().is_none());
    assert_eq!(app.view().active_filter(), Some(Filter::Active));
}
