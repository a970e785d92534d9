use super::{validate_key, StorageBackend};
use crate::error::{NotemasterError, Result};
use crate::model::Collection;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.dir_name())
    }

    fn blob_path(&self, collection: Collection, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.collection_dir(collection).join(collection.file_name(key)))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(NotemasterError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, collection: Collection, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(collection, key)?;
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(NotemasterError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, collection: Collection, key: &str, content: &str) -> Result<()> {
        let target_path = self.blob_path(collection, key)?;
        let dir = self.collection_dir(collection);
        self.ensure_dir(&dir)?;

        // Atomic Write
        let tmp_path = dir.join(format!(".{}-{}.tmp", collection.dir_name(), Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(NotemasterError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, &target_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(NotemasterError::Io(e));
        }

        Ok(())
    }

    fn delete(&self, collection: Collection, key: &str) -> Result<bool> {
        let path = self.blob_path(collection, key)?;
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(path).map_err(NotemasterError::Io)?;
        Ok(true)
    }

    fn list_keys(&self, collection: Collection) -> Result<Vec<String>> {
        let dir = self.collection_dir(collection);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        let entries = fs::read_dir(&dir).map_err(NotemasterError::Io)?;

        for entry in entries {
            let entry = entry.map_err(NotemasterError::Io)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                if name.starts_with('.') && name.ends_with(".tmp") {
                    continue;
                }
                if let Some(key) = collection.key_from_file_name(name) {
                    keys.push(key.to_string());
                }
            }
        }
        Ok(keys)
    }

    fn location(&self, collection: Collection, key: &str) -> Result<PathBuf> {
        self.blob_path(collection, key)
    }
}
