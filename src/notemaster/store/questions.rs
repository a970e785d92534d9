//! Question Store: the per-note question file written by the generator.

use super::{to_json_blob, StorageBackend};
use crate::error::Result;
use crate::model::{Collection, QuestionSet};
use tracing::info;

/// The stored question set, or an empty one when the note has none.
pub fn load_questions<B: StorageBackend + ?Sized>(
    backend: &B,
    note_title: &str,
) -> Result<QuestionSet> {
    match backend.read(Collection::Questions, note_title)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(QuestionSet::default()),
    }
}

/// Replace the note's question file with `questions`. The old set is discarded.
pub fn save_questions<B: StorageBackend + ?Sized>(
    backend: &B,
    note_title: &str,
    questions: &QuestionSet,
) -> Result<()> {
    backend.write(Collection::Questions, note_title, &to_json_blob(questions)?)?;
    info!(
        "Questions saved to {}",
        backend
            .location(Collection::Questions, note_title)?
            .display()
    );
    Ok(())
}

pub fn delete_questions<B: StorageBackend + ?Sized>(backend: &B, note_title: &str) -> Result<bool> {
    backend.delete(Collection::Questions, note_title)
}
