//! This module provides the persistence boundary of the task collection
//!
//! The whole collection lives in a single key of a [`KeyValueStorage`], encoded as a JSON array. \
//! Every write replaces the whole collection: there is no merge, the last writer wins.

use std::error::Error;

use crate::config::DEFAULT_TASKS_KEY;
use crate::traits::KeyValueStorage;
use crate::Task;


/// Owns the canonical task collection
#[derive(Debug)]
pub struct Store<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> Store<S> {
    /// Create a store that keeps its tasks under the default key.
    ///
    /// This does not touch the storage. See [`Store::open`] to also write identifiers into older records.
    pub fn new(storage: S) -> Self {
        Self::new_with_key(storage, DEFAULT_TASKS_KEY)
    }

    /// Create a store that keeps its tasks under a custom key
    pub fn new_with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    /// Create a store, and write the identifiers of every persisted record that was stored without one.
    ///
    /// Such records are identified by their position until the collection is written again, this makes that write happen now.
    pub fn open(storage: S, key: &str) -> Result<Self, Box<dyn Error>> {
        let mut store = Self::new_with_key(storage, key);

        if let Some(raw) = store.storage.get_item(&store.key)? {
            if let Ok((tasks, n_legacy)) = parse_tasks(&raw) {
                if n_legacy > 0 {
                    log::info!("Writing identifiers of {} task(s) stored without one", n_legacy);
                    store.save_all(&tasks)?;
                }
            }
        }

        Ok(store)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Returns the persisted collection, for display.
    ///
    /// This never fails: a missing, unreadable or malformed value is logged, and an empty collection is returned instead.
    pub fn load_all(&self) -> Vec<Task> {
        match self.try_load_all() {
            Ok(tasks) => tasks,
            Err(err) => {
                log::warn!("Unable to read stored tasks under {:?}: {}. Using an empty list", self.key, err);
                Vec::new()
            },
        }
    }

    /// Returns the persisted collection, before it gets modified.
    ///
    /// A missing or malformed value is an empty collection, as in [`load_all`](Self::load_all).
    /// A storage that cannot be read is an error: writing back a collection built on it would erase what it holds.
    pub fn try_load_all(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        let raw = match self.storage.get_item(&self.key)? {
            None => return Ok(Vec::new()),
            Some(raw) => raw,
        };

        match parse_tasks(&raw) {
            Ok((tasks, _)) => {
                log::debug!("Loaded {} task(s)", tasks.len());
                Ok(tasks)
            },
            Err(err) => {
                log::error!("Loaded tasks are not a valid task list ({}). Using an empty list", err);
                Ok(Vec::new())
            },
        }
    }

    /// Serializes and overwrites the whole persisted collection
    pub fn save_all(&mut self, tasks: &[Task]) -> Result<(), Box<dyn Error>> {
        let serialized = serde_json::to_string(tasks)?;
        self.storage.set_item(&self.key, &serialized)?;
        log::debug!("Saved {} task(s)", tasks.len());
        Ok(())
    }

    /// Replace the persisted task that has the same ID as `task`.
    ///
    /// Fails if no such task is persisted.
    pub fn update(&mut self, task: &Task) -> Result<(), Box<dyn Error>> {
        let mut tasks = self.try_load_all()?;
        match tasks.iter_mut().find(|t| t.id() == task.id()) {
            None => Err(format!("Task {} is not stored", task.id()).into()),
            Some(stored) => {
                *stored = task.clone();
                self.save_all(&tasks)
            },
        }
    }

    /// Remove the persisted task that has the same ID as `task`.
    ///
    /// Fails if no such task is persisted.
    pub fn remove(&mut self, task: &Task) -> Result<(), Box<dyn Error>> {
        let mut tasks = self.try_load_all()?;
        let n_before = tasks.len();
        tasks.retain(|t| t.id() != task.id());
        if tasks.len() == n_before {
            return Err(format!("Task {} is not stored", task.id()).into());
        }
        self.save_all(&tasks)
    }
}

/// Parse a raw JSON array of tasks, and identify the records stored without an ID by their position.
///
/// Also returns how many records had no ID
fn parse_tasks(raw: &str) -> Result<(Vec<Task>, usize), serde_json::Error> {
    let mut tasks: Vec<Task> = serde_json::from_str(raw)?;
    let mut n_legacy = 0;
    for (position, task) in tasks.iter_mut().enumerate() {
        if task.fill_missing_id(position) {
            n_legacy += 1;
        }
    }
    Ok((tasks, n_legacy))
}
