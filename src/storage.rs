//! Key-value storage backends
//!
//! [`FileStorage`] keeps every key in its own JSON file inside a folder, so that data survives between runs. \
//! [`MemoryStorage`] keeps everything in memory, and can be told to fail on purpose in tests.

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::mock_behaviour::MockBehaviour;
use crate::traits::KeyValueStorage;

const FILE_EXTENSION: &str = "json";


/// A storage that keeps each key in a file of a local folder
#[derive(Clone, Debug, PartialEq)]
pub struct FileStorage {
    backing_folder: PathBuf,
}

impl FileStorage {
    /// Use the given folder. It is created on the first write if it does not exist yet
    pub fn new(folder: &Path) -> Self {
        Self {
            backing_folder: PathBuf::from(folder),
        }
    }

    /// The file that backs a given key
    pub fn path_for_key(&self, key: &str) -> PathBuf {
        let file_name = format!("{}.{}", sanitize_filename::sanitize(key), FILE_EXTENSION);
        self.backing_folder.join(file_name)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let path = self.path_for_key(key);
        if path.exists() == false {
            return Ok(None);
        }
        match std::fs::read_to_string(&path) {
            Err(err) => Err(format!("Unable to read file {:?}: {}", path, err).into()),
            Ok(content) => Ok(Some(content)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        std::fs::create_dir_all(&self.backing_folder)?;

        let path = self.path_for_key(key);
        if let Err(err) = std::fs::write(&path, value) {
            return Err(format!("Unable to save file {:?}: {}", path, err).into());
        }
        log::trace!("Saved key {:?} to {:?}", key, path);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        let path = self.path_for_key(key);
        if path.exists() == false {
            return Ok(());
        }
        std::fs::remove_file(&path)?;
        Ok(())
    }
}



/// A storage that lives in memory only
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,

    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage whose operations may fail, as decided by `mock_behaviour`
    pub fn new_with_mock_behaviour(mock_behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        Self {
            items: HashMap::new(),
            mock_behaviour: Some(mock_behaviour),
        }
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check(&self, action: fn(&mut MockBehaviour) -> Result<(), Box<dyn Error>>) -> Result<(), Box<dyn Error>> {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => match behaviour.lock() {
                Err(_) => Err("mock behaviour lock is poisoned".into()),
                Ok(mut behaviour) => action(&mut *behaviour),
            },
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.check(MockBehaviour::can_get_item)?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        self.check(MockBehaviour::can_set_item)?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        self.check(MockBehaviour::can_remove_item)?;
        self.items.remove(key);
        Ok(())
    }
}
