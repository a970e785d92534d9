//! Stats Store: an append-only attempt log per note.
//!
//! Each append is a read-modify-write of the whole file. The deletion helpers
//! report success as a boolean and log failures instead of returning them.

use super::{to_json_blob, StorageBackend};
use crate::error::Result;
use crate::model::{Attempt, Collection, Score, Stats};
use std::collections::BTreeMap;
use tracing::error;

/// Append one attempt, stamped with the current local time.
pub fn save_quiz_result<B: StorageBackend + ?Sized>(
    backend: &B,
    note_title: &str,
    question: &str,
    user_answer: &str,
    correct_answer: &str,
    score: Score,
) -> Result<Attempt> {
    let mut stats = get_note_stats(backend, note_title)?;
    let attempt = Attempt::now(question, user_answer, correct_answer, score);
    stats.attempts.push(attempt.clone());
    backend.write(Collection::Stats, note_title, &to_json_blob(&stats)?)?;
    Ok(attempt)
}

/// The note's attempt log, empty when nothing was recorded yet.
pub fn get_note_stats<B: StorageBackend + ?Sized>(backend: &B, note_title: &str) -> Result<Stats> {
    match backend.read(Collection::Stats, note_title)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Stats::default()),
    }
}

pub fn get_all_stats<B: StorageBackend + ?Sized>(backend: &B) -> Result<BTreeMap<String, Stats>> {
    let mut all = BTreeMap::new();
    for title in backend.list_keys(Collection::Stats)? {
        let stats = get_note_stats(backend, &title)?;
        all.insert(title, stats);
    }
    Ok(all)
}

/// Returns `true` only when a stats file was actually removed.
pub fn delete_note_stats<B: StorageBackend + ?Sized>(backend: &B, note_title: &str) -> bool {
    match backend.delete(Collection::Stats, note_title) {
        Ok(removed) => removed,
        Err(e) => {
            error!("Failed to delete stats for {}: {}", note_title, e);
            false
        }
    }
}

/// Returns `true` when every stats file was removed (or there were none).
pub fn delete_all_stats<B: StorageBackend + ?Sized>(backend: &B) -> bool {
    let sweep = || -> Result<()> {
        for title in backend.list_keys(Collection::Stats)? {
            backend.delete(Collection::Stats, &title)?;
        }
        Ok(())
    };
    match sweep() {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to delete all stats: {}", e);
            false
        }
    }
}
