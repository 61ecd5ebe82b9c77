use std::{collections::BTreeMap, sync::Arc};

use lazy_static::lazy_static;
use log::info;
use oasis_core::default_content;
use regex::Regex;

use crate::{Persisted, Storage, StorageError, StorageKey, StoreError, UserData};

lazy_static! {
    static ref KEY_REGEX: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
}

pub type ContentMap = BTreeMap<String, String>;

/// Editable text, image and price fields of the site
pub struct ContentManager {
    content: Persisted<ContentMap>,
}

impl ContentManager {
    pub fn new(storage: &Arc<dyn Storage>) -> Result<Self, StorageError> {
        // Stored edits are laid over the defaults, so new fields show up after upgrades
        let content = Persisted::load_merged(
            storage,
            StorageKey::Content,
            default_content(),
            |mut defaults: ContentMap, stored| {
                defaults.extend(stored);
                defaults
            },
        )?;

        Ok(Self { content })
    }

    pub fn get_all(&self) -> ContentMap {
        self.content.get()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.content.read(|content| content.get(key).cloned())
    }

    /// Changes a field. Returns false without changing anything if the actor is not an administrator.
    pub fn update(&self, actor: &UserData, key: &str, value: String) -> Result<bool, StoreError> {
        if !actor.is_admin {
            return Ok(false);
        }

        if !KEY_REGEX.is_match(key) {
            return Err(StoreError::Validation(format!("Invalid content key {}", key)));
        }

        self.content.update(|content| {
            content.insert(key.to_string(), value);
        })?;

        info!("{} changed content {}", actor.username, key);
        Ok(true)
    }
}
