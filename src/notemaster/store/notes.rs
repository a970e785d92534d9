//! Note Store: one plain-text blob per note, keyed by title.

use super::StorageBackend;
use crate::error::Result;
use crate::model::{Collection, Note};

/// All persisted notes, in the backend's listing order.
pub fn load_notes<B: StorageBackend + ?Sized>(backend: &B) -> Result<Vec<Note>> {
    let mut notes = Vec::new();
    for title in backend.list_keys(Collection::Notes)? {
        // A note removed between listing and reading is simply skipped.
        if let Some(content) = backend.read(Collection::Notes, &title)? {
            notes.push(Note { title, content });
        }
    }
    Ok(notes)
}

pub fn get_note<B: StorageBackend + ?Sized>(backend: &B, title: &str) -> Result<Option<Note>> {
    Ok(backend
        .read(Collection::Notes, title)?
        .map(|content| Note::new(title, content)))
}

/// Create or fully overwrite the note.
pub fn save_note<B: StorageBackend + ?Sized>(
    backend: &B,
    title: &str,
    content: &str,
) -> Result<()> {
    backend.write(Collection::Notes, title, content)
}

/// Overwrite the note only if it already exists. Never creates.
pub fn update_note<B: StorageBackend + ?Sized>(
    backend: &B,
    title: &str,
    new_content: &str,
) -> Result<bool> {
    if backend.read(Collection::Notes, title)?.is_none() {
        return Ok(false);
    }
    backend.write(Collection::Notes, title, new_content)?;
    Ok(true)
}

/// Remove the note if present. Its question and stats files are left alone.
pub fn delete_note<B: StorageBackend + ?Sized>(backend: &B, title: &str) -> Result<()> {
    backend.delete(Collection::Notes, title)?;
    Ok(())
}
