//! # Command Layer
//!
//! The study workflow: what a user does with notes, questions and scores,
//! expressed as pure functions over a [`crate::store::StorageBackend`] and a
//! [`crate::llm::CompletionClient`].
//!
//! Commands return [`CmdResult`], not strings. It carries the data to show
//! (notes, questions, stats, an evaluation) and leveled messages. The UI
//! layer decides how to render it.
//!
//! Validation problems with user input (a missing title, an empty answer, a
//! malformed API key) are reported as warning/error messages, not `Err`.
//! `Err` is kept for failures the caller cannot fix by retyping: storage
//! errors and unknown notes.
//!
//! Commands use the `try_*` generator and evaluator entry points, so "the
//! service failed" is reported as such instead of as zero questions or a
//! score of zero. A failed evaluation records no attempt.
//!
//! ## Command Modules
//!
//! - [`notes`]: create, list, view, update, delete notes
//! - [`quiz`]: generate, list and clear questions, answer a question
//! - [`stats`]: score history and its deletion
//! - [`key`]: API key management

use crate::model::{Evaluation, Note, Question, Stats};
use serde::Serialize;
use std::collections::BTreeMap;

pub mod key;
pub mod notes;
pub mod quiz;
pub mod stats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub notes: Vec<Note>,
    pub questions: Vec<Question>,
    pub stats: BTreeMap<String, Stats>,
    pub evaluation: Option<Evaluation>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }

    pub fn with_stats(mut self, stats: BTreeMap<String, Stats>) -> Self {
        self.stats = stats;
        self
    }
}
