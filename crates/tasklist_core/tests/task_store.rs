use std::collections::HashSet;
use tasklist_core::{
    Filter, MemoryStorage, PersistOutcome, SequentialIdGenerator, SlotTaskRepository, TaskId,
    TaskStore, TimestampIdGenerator,
};

type MemoryStore<G> = TaskStore<SlotTaskRepository<MemoryStorage>, G>;

fn open_store() -> MemoryStore<SequentialIdGenerator> {
    TaskStore::open(
        SlotTaskRepository::new(MemoryStorage::new()),
        SequentialIdGenerator::new("t"),
    )
}

fn visible_texts<G: tasklist_core::IdGenerator>(store: &MemoryStore<G>) -> Vec<String> {
    store
        .visible_tasks()
        .into_iter()
        .map(|task| task.text().to_string())
        .collect()
}

#[test]
fn non_empty_adds_grow_collection_with_unique_ids() {
    let mut store = TaskStore::open(
        SlotTaskRepository::new(MemoryStorage::new()),
        TimestampIdGenerator::new(),
    );
    let inputs = ["a", "  ", "b", "", " c ", "\t", "d"];
    for input in inputs {
        store.add(input);
    }

    assert_eq!(store.tasks().len(), 4);
    let ids: HashSet<_> = store.tasks().iter().map(|task| task.id().clone()).collect();
    assert_eq!(ids.len(), 4);
    assert_eq!(visible_texts(&store), vec!["a", "b", "c", "d"]);
}

#[test]
fn blank_adds_leave_collection_unchanged() {
    let mut store = open_store();
    store.add("keep");

    assert_eq!(store.add(""), None);
    assert_eq!(store.add("   "), None);
    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn toggling_twice_restores_original_flag() {
    let mut store = open_store();
    let id = store.add("flip").unwrap();

    assert!(store.toggle_complete(&id));
    assert!(store.get(&id).unwrap().is_completed());
    assert!(store.toggle_complete(&id));
    assert!(!store.get(&id).unwrap().is_completed());
}

#[test]
fn toggling_unknown_id_is_a_no_op() {
    let mut store = open_store();
    store.add("a");
    let before = store.tasks().to_vec();

    assert!(!store.toggle_complete(&TaskId::from("nope")));
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn repeated_delete_is_safe() {
    let mut store = open_store();
    let a = store.add("a").unwrap();
    store.add("b");

    assert!(store.delete(&a));
    let after_first = store.tasks().to_vec();
    assert!(!store.delete(&a));
    assert_eq!(store.tasks(), after_first.as_slice());
}

#[test]
fn delete_keeps_remaining_order() {
    let mut store = open_store();
    let a = store.add("a").unwrap();
    store.add("b");
    store.add("c");

    store.delete(&a);
    assert_eq!(visible_texts(&store), vec!["b", "c"]);
}

#[test]
fn buy_milk_scenario_moves_between_filters() {
    let mut store = open_store();
    let id = store.add("buy milk").unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].text(), "buy milk");
    assert!(!store.tasks()[0].is_completed());

    store.toggle_complete(&id);
    assert!(store.tasks()[0].is_completed());

    assert!(store.set_filter("active"));
    assert!(store.visible_tasks().is_empty());

    assert!(store.set_filter("completed"));
    assert_eq!(visible_texts(&store), vec!["buy milk"]);
}

#[test]
fn filter_is_not_persisted_and_resets_on_reopen() {
    let mut store = open_store();
    store.add("a");
    store.set_filter("completed");

    let storage = MemoryStorage::new().with_value(
        "todos",
        store.repository().storage().raw("todos").unwrap(),
    );
    let reopened = TaskStore::open(
        SlotTaskRepository::new(storage),
        SequentialIdGenerator::new("t"),
    );
    assert_eq!(reopened.filter(), Filter::All);
    assert_eq!(reopened.tasks().len(), 1);
}

#[test]
fn failed_save_keeps_in_memory_mutation() {
    let mut store = open_store();
    store.add("saved");
    assert_eq!(
        store.last_persist(),
        Some(&PersistOutcome::Saved { task_count: 1 })
    );

    store.repository_mut().storage_mut().set_fail_writes(true);
    store.add("unsaved");

    assert_eq!(store.tasks().len(), 2);
    assert!(matches!(
        store.last_persist(),
        Some(PersistOutcome::Failed { .. })
    ));
    let raw = store.repository().storage().raw("todos").unwrap();
    assert!(raw.contains("saved"));
    assert!(!raw.contains("unsaved"));
}

#[test]
fn quota_exceeded_is_recovered_locally() {
    let mut store = TaskStore::open(
        SlotTaskRepository::new(MemoryStorage::with_quota(64)),
        SequentialIdGenerator::new("t"),
    );
    store.add("short");
    store.add("this text pushes the serialized collection past the quota");

    assert_eq!(store.tasks().len(), 2);
    assert!(!store.last_persist().unwrap().is_saved());
}
