use std::fmt::Display;

use thiserror::Error;

mod data;
pub use data::*;

mod file;
pub use file::*;

mod memory;
pub use memory::*;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying medium could not be read or written
    #[error("Could not access {key}: {source}")]
    Io {
        key: StorageKey,
        source: std::io::Error,
    },
    /// A value could not be turned into JSON
    #[error("Could not serialize {key}: {source}")]
    Serialization {
        key: StorageKey,
        source: serde_json::Error,
    },
}

/// The keys of the durable key-value store.
/// Each key holds one whole collection, encoded as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Content,
    Posts,
    Templates,
    Users,
    Sessions,
    /// Flag written by older versions of the site, no longer used
    LegacyAdminSession,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Content => "siteContent",
            StorageKey::Posts => "blogPosts",
            StorageKey::Templates => "workoutTemplates",
            StorageKey::Users => "registeredUsers",
            StorageKey::Sessions => "sessions",
            StorageKey::LegacyAdminSession => "adminSession",
        }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a durable key-value medium oasis keeps its data in.
///
/// Writes always replace the whole value of a key.
pub trait Storage: Send + Sync {
    fn read(&self, key: StorageKey) -> StorageResult<Option<String>>;
    fn write(&self, key: StorageKey, value: &str) -> StorageResult<()>;
    fn remove(&self, key: StorageKey) -> StorageResult<()>;

    /// Keeps a copy of a value that could not be decoded, so a later write
    /// to the same key does not lose it. Repeated calls replace the copy.
    fn preserve(&self, key: StorageKey, value: &str) -> StorageResult<()>;
}
