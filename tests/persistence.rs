//! Tests of the task store, over real files and over failing storages

use std::sync::{Arc, Mutex};

use tickoff::mock_behaviour::MockBehaviour;
use tickoff::storage::{FileStorage, MemoryStorage};
use tickoff::traits::KeyValueStorage;
use tickoff::{Store, Task, TaskId};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new_with_parameters(TaskId::random(), "2024-01-01".into(), "09:00".into(), "Write report".into(), false),
        Task::new_with_parameters(TaskId::random(), "2024-01-01".into(), "14:00".into(), "Review pull requests".into(), true),
        Task::new_with_parameters(TaskId::random(), "2024-01-02".into(), "08:30".into(), "Buy milk".into(), false),
    ]
}

#[test]
fn tasks_survive_a_restart() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let tasks = sample_tasks();

    {
        let mut store = Store::open(FileStorage::new(dir.path()), "tasks").unwrap();
        assert!(store.load_all().is_empty());
        store.save_all(&tasks).unwrap();
    }

    let store = Store::open(FileStorage::new(dir.path()), "tasks").unwrap();
    assert_eq!(store.load_all(), tasks);
}

#[test]
fn persisted_layout_is_a_json_array() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::new(FileStorage::new(dir.path()));
    let task = Task::new_with_parameters(TaskId::from("t-1"), "2024-01-01".into(), "09:00".into(), "Write report".into(), false);
    store.save_all(&[task]).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!([
        {"id": "t-1", "date": "2024-01-01", "time": "09:00", "text": "Write report", "completed": false}
    ]));
}

#[test]
fn save_all_replaces_everything() {
    init_logs();
    let mut store = Store::new(MemoryStorage::new());
    let tasks = sample_tasks();
    store.save_all(&tasks).unwrap();
    store.save_all(&tasks[1..2]).unwrap();
    assert_eq!(store.load_all(), &tasks[1..2]);

    store.save_all(&[]).unwrap();
    assert!(store.load_all().is_empty());
}

#[test]
fn remove_leaves_other_tasks_untouched() {
    init_logs();
    let mut store = Store::new(MemoryStorage::new());
    let tasks = sample_tasks();
    store.save_all(&tasks).unwrap();

    store.remove(&tasks[1]).unwrap();
    assert_eq!(store.load_all(), vec![tasks[0].clone(), tasks[2].clone()]);
}

#[test]
fn duplicates_are_told_apart() {
    init_logs();
    let mut store = Store::new(MemoryStorage::new());
    let first = Task::new("2024-01-01", "09:00", "Stand-up").unwrap();
    let second = Task::new("2024-01-01", "09:00", "Stand-up").unwrap();
    store.save_all(&[first.clone(), second.clone()]).unwrap();

    let mut done = second.clone();
    done.toggle();
    store.update(&done).unwrap();
    let loaded = store.load_all();
    assert!(loaded[0].completed() == false);
    assert!(loaded[1].completed());

    store.remove(&first).unwrap();
    assert_eq!(store.load_all(), vec![done]);
}

#[test]
fn garbage_on_disk_loads_as_empty() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tasks.json"), "{ this is not json").unwrap();

    let store = Store::open(FileStorage::new(dir.path()), "tasks").unwrap();
    assert!(store.load_all().is_empty());
    // The bad value is left as is until the next write
    assert!(dir.path().join("tasks.json").exists());
}

#[test]
fn legacy_records_keep_stable_ids_after_open() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let legacy = r#"[
        {"date": "2024-01-01", "time": "09:00", "text": "Write report", "completed": false},
        {"date": "2024-01-01", "time": "09:00", "text": "Write report", "completed": true}
    ]"#;
    std::fs::write(dir.path().join("tasks.json"), legacy).unwrap();

    let store = Store::open(FileStorage::new(dir.path()), "tasks").unwrap();
    let loaded = store.load_all();
    assert_eq!(loaded.len(), 2);
    assert_ne!(loaded[0].id(), loaded[1].id());
    assert!(loaded[0].same_tuple_as(&loaded[1]));

    let reopened = Store::open(FileStorage::new(dir.path()), "tasks").unwrap();
    assert_eq!(reopened.load_all(), loaded);
}

#[test]
fn unreadable_storage_loads_as_empty() {
    init_logs();
    let behaviour = Arc::new(Mutex::new(MockBehaviour::new()));
    let mut store = Store::new(MemoryStorage::new_with_mock_behaviour(Arc::clone(&behaviour)));
    store.save_all(&sample_tasks()).unwrap();

    *behaviour.lock().unwrap() = MockBehaviour {
        get_item_behaviour: (0, 1),
        ..MockBehaviour::default()
    };
    assert!(store.load_all().is_empty());
    assert_eq!(store.load_all().len(), 3);
}

#[test]
fn changes_are_refused_when_storage_is_unreadable() {
    init_logs();
    let behaviour = Arc::new(Mutex::new(MockBehaviour::new()));
    let mut store = Store::new(MemoryStorage::new_with_mock_behaviour(Arc::clone(&behaviour)));
    let tasks = sample_tasks();
    store.save_all(&tasks).unwrap();

    *behaviour.lock().unwrap() = MockBehaviour {
        get_item_behaviour: (0, 3),
        ..MockBehaviour::default()
    };
    assert!(store.try_load_all().is_err());
    let mut done = tasks[0].clone();
    done.toggle();
    assert!(store.update(&done).is_err());
    assert!(store.remove(&tasks[1]).is_err());

    assert_eq!(store.try_load_all().unwrap(), tasks);
}

#[test]
fn failed_writes_are_reported() {
    init_logs();
    let behaviour = Arc::new(Mutex::new(MockBehaviour::new()));
    let mut store = Store::new(MemoryStorage::new_with_mock_behaviour(Arc::clone(&behaviour)));
    let tasks = sample_tasks();
    store.save_all(&tasks).unwrap();

    *behaviour.lock().unwrap() = MockBehaviour {
        set_item_behaviour: (0, 1),
        ..MockBehaviour::default()
    };
    assert!(store.remove(&tasks[0]).is_err());
    assert_eq!(store.load_all(), tasks);
}

#[test]
fn custom_keys_are_independent() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let mut work = Store::new_with_key(FileStorage::new(dir.path()), "work");
    work.save_all(&sample_tasks()).unwrap();

    let home = Store::new_with_key(FileStorage::new(dir.path()), "home");
    assert!(home.load_all().is_empty());
    assert_eq!(home.storage().get_item("work").unwrap().is_some(), true);
}
