use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotemasterError, Result};
use crate::store::notes::{delete_note, get_note, load_notes, save_note, update_note};
use crate::store::StorageBackend;

pub fn create<B: StorageBackend + ?Sized>(
    backend: &B,
    title: &str,
    content: &str,
) -> Result<CmdResult> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::warning(
            "Please provide a title and content for your note.",
        )));
    }

    save_note(backend, title, content)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Note '{}' saved.",
        title
    ))))
}

/// Notes sorted by title, for stable display.
pub fn list<B: StorageBackend + ?Sized>(backend: &B) -> Result<CmdResult> {
    let mut notes = load_notes(backend)?;
    notes.sort_by(|a, b| a.title.cmp(&b.title));

    let mut result = CmdResult::default();
    if notes.is_empty() {
        result.add_message(CmdMessage::info("No notes available yet."));
    }
    Ok(result.with_notes(notes))
}

pub fn view<B: StorageBackend + ?Sized>(backend: &B, title: &str) -> Result<CmdResult> {
    let note = get_note(backend, title)?
        .ok_or_else(|| NotemasterError::NoteNotFound(title.to_string()))?;
    Ok(CmdResult::default().with_notes(vec![note]))
}

pub fn update<B: StorageBackend + ?Sized>(
    backend: &B,
    title: &str,
    content: &str,
) -> Result<CmdResult> {
    if content.trim().is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::warning(
            "Please provide the new content for the note.",
        )));
    }

    let message = if update_note(backend, title, content)? {
        CmdMessage::success(format!("Note '{}' updated.", title))
    } else {
        CmdMessage::error(format!("No note named '{}'.", title))
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn delete<B: StorageBackend + ?Sized>(backend: &B, title: &str) -> Result<CmdResult> {
    let existed = get_note(backend, title)?.is_some();
    delete_note(backend, title)?;

    let message = if existed {
        CmdMessage::success(format!("Note '{}' deleted.", title))
    } else {
        CmdMessage::info(format!("No note named '{}', nothing to delete.", title))
    };
    Ok(CmdResult::default().with_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::Collection;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn create_requires_title_and_content() {
        let backend = MemBackend::new();
        for (title, content) in [("", "body"), ("  ", "body"), ("Title", ""), ("Title", " \n ")] {
            let result = create(&backend, title, content).unwrap();
            assert_eq!(result.messages[0].level, MessageLevel::Warning);
        }
        assert_eq!(backend.count(Collection::Notes), 0);
    }

    #[test]
    fn create_with_unsafe_title_is_an_error() {
        let backend = MemBackend::new();
        assert!(matches!(
            create(&backend, "a/b", "body"),
            Err(NotemasterError::Store(_))
        ));
    }

    #[test]
    fn list_is_sorted_by_title() {
        let backend = MemBackend::new();
        create(&backend, "b", "2").unwrap();
        create(&backend, "a", "1").unwrap();
        let titles: Vec<_> = list(&backend)
            .unwrap()
            .notes
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn list_empty_store_says_so() {
        let backend = MemBackend::new();
        let result = list(&backend).unwrap();
        assert!(result.notes.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn view_missing_note_is_not_found() {
        let backend = MemBackend::new();
        assert!(matches!(
            view(&backend, "Ghost"),
            Err(NotemasterError::NoteNotFound(t)) if t == "Ghost"
        ));
    }

    #[test]
    fn update_missing_note_reports_error_and_creates_nothing() {
        let backend = MemBackend::new();
        let result = update(&backend, "missing", "x").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert_eq!(backend.count(Collection::Notes), 0);
    }

    #[test]
    fn delete_reports_absent_note_without_failing() {
        let backend = MemBackend::new();
        let result = delete(&backend, "Ghost").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);

        create(&backend, "Real", "x").unwrap();
        let result = delete(&backend, "Real").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(backend.count(Collection::Notes), 0);
    }
}
