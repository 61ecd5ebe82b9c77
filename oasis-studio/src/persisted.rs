use std::sync::Arc;

use log::warn;
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};

use crate::{Storage, StorageError, StorageKey};

/// A collection that lives under one storage key.
///
/// Every mutation derives an updated copy of the whole collection, writes it to
/// storage, and only then replaces the in-memory value. If the write fails the
/// collection is left untouched.
pub struct Persisted<T> {
    key: StorageKey,
    storage: Arc<dyn Storage>,
    value: Mutex<T>,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Loads the stored value, or uses `default` if nothing valid is stored.
    /// Values that fail to decode are preserved before being replaced.
    pub fn load(
        storage: &Arc<dyn Storage>,
        key: StorageKey,
        default: T,
    ) -> Result<Self, StorageError> {
        Self::load_merged(storage, key, default, |_, stored| stored)
    }

    /// Loads the stored value and merges it into `default`
    pub fn load_merged<F>(
        storage: &Arc<dyn Storage>,
        key: StorageKey,
        default: T,
        merge: F,
    ) -> Result<Self, StorageError>
    where
        F: FnOnce(T, T) -> T,
    {
        let value = match storage.read(key)? {
            Some(data) => match serde_json::from_str(&data) {
                Ok(stored) => merge(default, stored),
                Err(e) => {
                    warn!("Stored {} is corrupt, falling back to defaults: {}", key, e);
                    // The next write replaces the key, keep what could not be read
                    storage.preserve(key, &data)?;
                    default
                }
            },
            None => default,
        };

        Ok(Self {
            key,
            storage: storage.clone(),
            value: Mutex::new(value),
        })
    }

    /// Runs `f` with the current value
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.lock())
    }

    /// Returns a copy of the current value
    pub fn get(&self) -> T {
        self.value.lock().clone()
    }

    /// Mutates the collection and persists it
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, StorageError> {
        let mut current = self.value.lock();
        let mut next = current.clone();

        let result = f(&mut next);
        self.commit(&mut current, next)?;

        Ok(result)
    }

    /// Mutates the collection and persists it, unless `f` returns [None]
    pub fn update_if<R>(
        &self,
        f: impl FnOnce(&mut T) -> Option<R>,
    ) -> Result<Option<R>, StorageError> {
        let mut current = self.value.lock();
        let mut next = current.clone();

        let Some(result) = f(&mut next) else {
            return Ok(None);
        };

        self.commit(&mut current, next)?;

        Ok(Some(result))
    }

    fn commit(&self, current: &mut T, next: T) -> Result<(), StorageError> {
        let data = serde_json::to_string(&next).map_err(|source| StorageError::Serialization {
            key: self.key,
            source,
        })?;

        self.storage.write(self.key, &data)?;
        *current = next;

        Ok(())
    }
}
