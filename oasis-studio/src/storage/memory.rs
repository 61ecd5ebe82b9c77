use std::collections::HashMap;

use parking_lot::Mutex;

use super::{Storage, StorageKey, StorageResult};

/// Keeps everything in memory, nothing survives a restart
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<StorageKey, String>>,
    preserved: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage already holding the given values
    pub fn with_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (StorageKey, String)>,
    {
        Self {
            values: Mutex::new(values.into_iter().collect()),
            ..Default::default()
        }
    }

    /// The copy kept by [Storage::preserve], if any
    pub fn preserved(&self, key: StorageKey) -> Option<String> {
        self.preserved.lock().get(&key).cloned()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: StorageKey) -> StorageResult<Option<String>> {
        Ok(self.values.lock().get(&key).cloned())
    }

    fn write(&self, key: StorageKey, value: &str) -> StorageResult<()> {
        self.values.lock().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> StorageResult<()> {
        self.values.lock().remove(&key);
        Ok(())
    }

    fn preserve(&self, key: StorageKey, value: &str) -> StorageResult<()> {
        self.preserved.lock().insert(key, value.to_string());
        Ok(())
    }
}
