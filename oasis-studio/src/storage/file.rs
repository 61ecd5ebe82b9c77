use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::info;

use super::{Storage, StorageError, StorageKey, StorageResult};

/// Stores every key as a JSON file in a directory
pub struct FileStorage {
    folder: PathBuf,
}

impl FileStorage {
    const EXTENSION: &'static str = "json";

    /// Opens the storage folder, creating it if needed
    pub fn open(folder: impl AsRef<Path>) -> std::io::Result<Self> {
        let folder = folder.as_ref().to_path_buf();
        fs::create_dir_all(&folder)?;

        info!("Using data folder {}", folder.display());

        Ok(Self { folder })
    }

    fn path(&self, key: StorageKey) -> PathBuf {
        let mut path = self.folder.join(key.as_str());
        path.set_extension(Self::EXTENSION);
        path
    }
}

impl Storage for FileStorage {
    fn read(&self, key: StorageKey) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }

    fn write(&self, key: StorageKey, value: &str) -> StorageResult<()> {
        let path = self.path(key);
        let temporary = path.with_extension("json.tmp");

        // Rename is atomic, so readers never see a half-written file
        fs::write(&temporary, value)
            .and_then(|_| fs::rename(&temporary, &path))
            .map_err(|source| StorageError::Io { key, source })
    }

    fn remove(&self, key: StorageKey) -> StorageResult<()> {
        match fs::remove_file(self.path(key)) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }

    fn preserve(&self, key: StorageKey, value: &str) -> StorageResult<()> {
        let path = self.path(key).with_extension("corrupt.json");

        fs::write(&path, value).map_err(|source| StorageError::Io { key, source })?;
        info!("Kept a copy of {} at {}", key, path.display());

        Ok(())
    }
}
