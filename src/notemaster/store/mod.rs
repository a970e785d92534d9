//! # Storage Layer
//!
//! Everything NoteMaster persists is a whole blob of text addressed by a
//! [`Collection`] and a key (the note title). The [`StorageBackend`] trait
//! captures exactly that: read, write, delete and list. Typed stores sit on
//! top of it:
//!
//! - [`notes`]: one plain-text file per note
//! - [`questions`]: one JSON array per note, written by the generator
//! - [`stats`]: one append-only attempt log per note
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production storage rooted at a data directory.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── config.json
//! ├── .env                        # DEEPSEEK_KEY="..."
//! ├── notes/<title>.txt
//! ├── questions/<title>.json
//! └── stats/<title>_stats.json
//! ```
//!
//! ## Consistency
//!
//! Stores hold no state between calls; every operation re-reads the blob.
//! Writes replace the whole blob atomically (temp file + rename), so a reader
//! never observes a half-written file. There is no locking: two writers on
//! the same key race and the last one wins.
//!
//! Nothing ties a question or stats file to the existence of its note.
//! Deleting a note leaves the other two behind.

use crate::error::{NotemasterError, Result};
use crate::model::Collection;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::PathBuf;

pub mod fs_backend;
pub mod mem_backend;
pub mod notes;
pub mod questions;
pub mod stats;

/// Abstract interface for keyed blob storage.
///
/// All methods take `&self`; backends that keep state use interior
/// mutability.
pub trait StorageBackend {
    /// Returns Ok(None) if the key does not exist.
    fn read(&self, collection: Collection, key: &str) -> Result<Option<String>>;

    /// Create or fully replace the blob. MUST be atomic.
    fn write(&self, collection: Collection, key: &str, content: &str) -> Result<()>;

    /// Returns whether anything was removed. Absent keys are not an error.
    fn delete(&self, collection: Collection, key: &str) -> Result<bool>;

    /// All keys present in the collection, in the backend's listing order.
    fn list_keys(&self, collection: Collection) -> Result<Vec<String>>;

    /// Where the blob lives (a real path for FsBackend, a virtual one otherwise).
    fn location(&self, collection: Collection, key: &str) -> Result<PathBuf>;
}

/// Titles double as file names, so reject the ones that would escape their directory.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(NotemasterError::Store("Title cannot be empty".to_string()));
    }
    if key == "." || key == ".." {
        return Err(NotemasterError::Store(format!(
            "Title cannot be '{}'",
            key
        )));
    }
    if key.contains(['/', '\\', '\0']) {
        return Err(NotemasterError::Store(format!(
            "Title cannot contain path separators: {}",
            key
        )));
    }
    Ok(())
}

/// Pretty JSON with four-space indentation, non-ASCII left as is.
pub(crate) fn to_json_blob<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(NotemasterError::Serialization)?;
    String::from_utf8(buf).map_err(|e| NotemasterError::Store(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_blob_uses_four_spaces_and_keeps_accents() {
        let value = serde_json::json!({ "text": "Qu'est-ce qu'une cellule ?" });
        let blob = to_json_blob(&value).unwrap();
        assert_eq!(blob, "{\n    \"text\": \"Qu'est-ce qu'une cellule ?\"\n}");
    }

    #[test]
    fn accepts_ordinary_titles() {
        assert!(validate_key("Photosynthesis").is_ok());
        assert!(validate_key("Chapitre 2 : la cellule").is_ok());
        assert!(validate_key("..notes").is_ok());
    }

    #[test]
    fn rejects_path_unsafe_titles() {
        for key in ["", ".", "..", "a/b", "../escape", "a\\b", "nul\0byte"] {
            assert!(
                matches!(validate_key(key), Err(NotemasterError::Store(_))),
                "expected {:?} to be rejected",
                key
            );
        }
    }
}
