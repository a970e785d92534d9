//! # API Facade
//!
//! Single entry point for every NoteMaster operation, whatever the UI. It
//! dispatches to [`crate::commands`] and returns [`CmdResult`]; it does no
//! business logic and no printing.
//!
//! Titles are normalized here, once for every command: surrounding
//! whitespace is trimmed, so `" Bio"` and `"Bio"` name the same note.
//!
//! `NotemasterApi<B, C>` is generic over the storage backend and the
//! completion client:
//! - Production: `NotemasterApi<FsBackend, ChatCompletionClient>`
//! - Testing: `NotemasterApi<MemBackend, StubClient>`

use crate::commands::{self, CmdResult};
use crate::config::Credential;
use crate::error::Result;
use crate::llm::CompletionClient;
use crate::store::StorageBackend;
use std::path::PathBuf;

pub struct NotemasterApi<B: StorageBackend, C: CompletionClient> {
    backend: B,
    client: C,
    dotfile: PathBuf,
    credential: Option<Credential>,
}

impl<B: StorageBackend, C: CompletionClient> NotemasterApi<B, C> {
    pub fn new(backend: B, client: C, dotfile: PathBuf, credential: Option<Credential>) -> Self {
        Self {
            backend,
            client,
            dotfile,
            credential,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn create_note(&self, title: &str, content: &str) -> Result<CmdResult> {
        commands::notes::create(&self.backend, title.trim(), content)
    }

    pub fn list_notes(&self) -> Result<CmdResult> {
        commands::notes::list(&self.backend)
    }

    pub fn view_note(&self, title: &str) -> Result<CmdResult> {
        commands::notes::view(&self.backend, title.trim())
    }

    pub fn update_note(&self, title: &str, content: &str) -> Result<CmdResult> {
        commands::notes::update(&self.backend, title.trim(), content)
    }

    pub fn delete_note(&self, title: &str) -> Result<CmdResult> {
        commands::notes::delete(&self.backend, title.trim())
    }

    pub fn generate_questions(&self, title: &str) -> Result<CmdResult> {
        commands::quiz::generate(&self.backend, &self.client, title.trim())
    }

    pub fn list_questions(&self, title: &str) -> Result<CmdResult> {
        commands::quiz::list(&self.backend, title.trim())
    }

    pub fn delete_questions(&self, title: &str) -> Result<CmdResult> {
        commands::quiz::clear(&self.backend, title.trim())
    }

    pub fn answer_question(&self, title: &str, number: usize, answer: &str) -> Result<CmdResult> {
        let title = title.trim();
        commands::quiz::answer(&self.backend, &self.client, title, number, answer)
    }

    pub fn note_stats(&self, title: &str) -> Result<CmdResult> {
        commands::stats::show(&self.backend, Some(title.trim()))
    }

    pub fn all_stats(&self) -> Result<CmdResult> {
        commands::stats::show(&self.backend, None)
    }

    pub fn clear_stats(&self, title: Option<&str>) -> Result<CmdResult> {
        commands::stats::clear(&self.backend, title.map(str::trim))
    }

    pub fn set_api_key(&self, key: &str) -> Result<CmdResult> {
        commands::key::set(&self.dotfile, key)
    }

    pub fn reset_api_key(&self) -> Result<CmdResult> {
        commands::key::reset(&self.dotfile)
    }

    pub fn key_status(&self) -> CmdResult {
        commands::key::status(self.credential.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::llm::stub::StubClient;
    use crate::model::Collection;
    use crate::store::mem_backend::MemBackend;
    use tempfile::TempDir;

    fn make_api(stub: StubClient) -> (NotemasterApi<MemBackend, StubClient>, TempDir) {
        let dir = TempDir::new().unwrap();
        let dotfile = dir.path().join(".env");
        (NotemasterApi::new(MemBackend::new(), stub, dotfile, None), dir)
    }

    #[test]
    fn note_calls_reach_the_backend() {
        let (api, _dir) = make_api(StubClient::reply("[]"));
        api.create_note("Bio", "cells").unwrap();
        assert_eq!(api.backend().count(Collection::Notes), 1);

        api.update_note("Bio", "more cells").unwrap();
        assert_eq!(api.view_note("Bio").unwrap().notes[0].content, "more cells");
        assert_eq!(api.list_notes().unwrap().notes.len(), 1);

        api.delete_note("Bio").unwrap();
        assert_eq!(api.backend().count(Collection::Notes), 0);
    }

    #[test]
    fn quiz_calls_use_the_client() {
        let (api, _dir) = make_api(StubClient::replies([
            r#"[{"text":"Q1","reponse":"A1"}]"#,
            r#"{"score": 3}"#,
        ]));
        api.create_note("Bio", "cells").unwrap();

        assert_eq!(api.generate_questions("Bio").unwrap().questions.len(), 1);
        assert_eq!(api.list_questions("Bio").unwrap().questions.len(), 1);

        let result = api.answer_question("Bio", 1, "A1").unwrap();
        assert_eq!(result.evaluation.unwrap().score.value(), 3);
        assert_eq!(api.note_stats("Bio").unwrap().stats["Bio"].attempts.len(), 1);
        assert_eq!(api.all_stats().unwrap().stats.len(), 1);

        api.clear_stats(Some("Bio")).unwrap();
        assert_eq!(api.backend().count(Collection::Stats), 0);
        api.delete_questions("Bio").unwrap();
        assert_eq!(api.backend().count(Collection::Questions), 0);
    }

    #[test]
    fn titles_are_trimmed_for_every_command() {
        let (api, _dir) = make_api(StubClient::replies([
            r#"[{"text":"Q1","reponse":"A1"}]"#,
            r#"{"score": 5}"#,
        ]));
        api.create_note("  Bio  ", "cells").unwrap();
        assert_eq!(api.list_notes().unwrap().notes[0].title, "Bio");
        assert_eq!(api.view_note(" Bio").unwrap().notes[0].content, "cells");

        api.update_note("Bio ", "more cells").unwrap();
        assert_eq!(api.view_note("Bio").unwrap().notes[0].content, "more cells");

        api.generate_questions(" Bio").unwrap();
        assert_eq!(api.list_questions("Bio ").unwrap().questions.len(), 1);
        api.answer_question(" Bio ", 1, "A1").unwrap();
        assert_eq!(api.note_stats("Bio\t").unwrap().stats["Bio"].attempts.len(), 1);

        api.clear_stats(Some(" Bio")).unwrap();
        assert_eq!(api.backend().count(Collection::Stats), 0);
        api.delete_questions(" Bio").unwrap();
        assert_eq!(api.backend().count(Collection::Questions), 0);
        let deleted = api.delete_note(" Bio").unwrap();
        assert_eq!(deleted.messages[0].level, MessageLevel::Success);
        assert_eq!(api.backend().count(Collection::Notes), 0);
    }

    #[test]
    fn key_calls_use_the_dotfile() {
        let (api, dir) = make_api(StubClient::reply(""));
        let result = api.set_api_key("too short").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join(".env").exists());

        assert_eq!(api.reset_api_key().unwrap().messages[0].level, MessageLevel::Info);
        assert_eq!(api.key_status().messages[0].level, MessageLevel::Warning);
    }
}
