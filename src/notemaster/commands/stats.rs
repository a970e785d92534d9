use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::stats::{delete_all_stats, delete_note_stats, get_all_stats, get_note_stats};
use crate::store::StorageBackend;
use std::collections::BTreeMap;

/// Attempt history for one note, or for every note with a stats file.
pub fn show<B: StorageBackend + ?Sized>(backend: &B, title: Option<&str>) -> Result<CmdResult> {
    let stats = match title {
        Some(title) => {
            let mut one = BTreeMap::new();
            one.insert(title.to_string(), get_note_stats(backend, title)?);
            one
        }
        None => get_all_stats(backend)?,
    };

    let mut result = CmdResult::default();
    if stats.values().all(|s| s.attempts.is_empty()) {
        result.add_message(CmdMessage::info("No quiz attempts recorded yet."));
    }
    Ok(result.with_stats(stats))
}

pub fn clear<B: StorageBackend + ?Sized>(backend: &B, title: Option<&str>) -> Result<CmdResult> {
    let message = match title {
        Some(title) if delete_note_stats(backend, title) => {
            CmdMessage::success(format!("Statistics for '{}' deleted.", title))
        }
        Some(title) => CmdMessage::warning(format!("No statistics were deleted for '{}'.", title)),
        None if delete_all_stats(backend) => CmdMessage::success("All statistics deleted."),
        None => CmdMessage::error("Could not delete all statistics, see the log for details."),
    };
    Ok(CmdResult::default().with_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::{Collection, Score};
    use crate::store::mem_backend::MemBackend;
    use crate::store::stats::save_quiz_result;

    fn record(backend: &MemBackend, title: &str, score: i64) {
        save_quiz_result(backend, title, "q", "a", "c", Score::clamped(score)).unwrap();
    }

    #[test]
    fn show_one_note_includes_empty_history() {
        let backend = MemBackend::new();
        let result = show(&backend, Some("Bio")).unwrap();
        assert!(result.stats["Bio"].attempts.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn show_all_lists_every_note_with_history() {
        let backend = MemBackend::new();
        record(&backend, "Bio", 3);
        record(&backend, "Bio", 5);
        record(&backend, "Chem", 1);

        let result = show(&backend, None).unwrap();
        assert_eq!(result.stats.len(), 2);
        assert_eq!(result.stats["Bio"].attempts.len(), 2);
        assert_eq!(result.stats["Bio"].summary().average_score, Some(4.0));
        assert!(result.messages.is_empty());
    }

    #[test]
    fn clear_one_note() {
        let backend = MemBackend::new();
        record(&backend, "Bio", 3);
        record(&backend, "Chem", 3);

        let result = clear(&backend, Some("Bio")).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(backend.count(Collection::Stats), 1);

        let again = clear(&backend, Some("Bio")).unwrap();
        assert_eq!(again.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn clear_all_succeeds_on_empty_store() {
        let backend = MemBackend::new();
        let result = clear(&backend, None).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn clear_all_reports_failure() {
        let backend = MemBackend::new();
        record(&backend, "Bio", 3);
        backend.set_simulate_delete_error(true);

        let result = clear(&backend, None).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert_eq!(backend.count(Collection::Stats), 1);
    }
}
