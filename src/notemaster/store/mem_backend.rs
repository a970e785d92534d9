use super::{validate_key, StorageBackend};
use crate::error::{NotemasterError, Result};
use crate::model::Collection;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since NoteMaster is single-threaded.
/// Keys are listed in sorted order.
#[derive(Default)]
pub struct MemBackend {
    blobs: RefCell<BTreeMap<(Collection, String), String>>,
    simulate_write_error: RefCell<bool>,
    simulate_delete_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Enable delete error simulation for testing error handling.
    pub fn set_simulate_delete_error(&self, simulate: bool) {
        *self.simulate_delete_error.borrow_mut() = simulate;
    }

    /// Number of blobs stored in a collection.
    pub fn count(&self, collection: Collection) -> usize {
        self.blobs
            .borrow()
            .keys()
            .filter(|(c, _)| *c == collection)
            .count()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, collection: Collection, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let blobs = self.blobs.borrow();
        Ok(blobs.get(&(collection, key.to_string())).cloned())
    }

    fn write(&self, collection: Collection, key: &str, content: &str) -> Result<()> {
        validate_key(key)?;
        if *self.simulate_write_error.borrow() {
            return Err(NotemasterError::Store("Simulated write error".to_string()));
        }
        self.blobs
            .borrow_mut()
            .insert((collection, key.to_string()), content.to_string());
        Ok(())
    }

    fn delete(&self, collection: Collection, key: &str) -> Result<bool> {
        validate_key(key)?;
        if *self.simulate_delete_error.borrow() {
            return Err(NotemasterError::Store("Simulated delete error".to_string()));
        }
        Ok(self
            .blobs
            .borrow_mut()
            .remove(&(collection, key.to_string()))
            .is_some())
    }

    fn list_keys(&self, collection: Collection) -> Result<Vec<String>> {
        let blobs = self.blobs.borrow();
        Ok(blobs
            .keys()
            .filter(|(c, _)| *c == collection)
            .map(|(_, key)| key.clone())
            .collect())
    }

    fn location(&self, collection: Collection, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(PathBuf::from(format!(
            "memory://{}/{}",
            collection.dir_name(),
            collection.file_name(key)
        )))
    }
}
