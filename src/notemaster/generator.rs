//! # Question Generator
//!
//! Turns note text into question/answer pairs by asking the model for a JSON
//! array of `{text, reponse}` objects. The generator only builds the prompt,
//! unwraps the reply and persists it: the model decides how many questions
//! there are and nothing checks their shape or quality.
//!
//! Two entry points:
//! - [`try_generate_questions`] returns a distinguishable error
//!   (`EmptyResponse`, `InvalidJson`, transport errors).
//! - [`generate_questions`] logs any failure and returns an empty set, so an
//!   empty result there means "generation failed".

use crate::error::{NotemasterError, Result};
use crate::llm::{strip_code_fence, CompletionClient};
use crate::model::QuestionSet;
use crate::store::questions::save_questions;
use crate::store::StorageBackend;
use serde_json::Value;
use tracing::{error, info};

pub fn question_prompt(note_content: &str) -> String {
    format!(
        "From the following text, write fairly open questions that support active learning. \
         Choose a number of questions suited to the length of the text.\n\
         For each question, return a JSON object with two keys: \
         'text' for the question and 'reponse' for the correct answer.\n\
         Text: {}\n\
         Return only a JSON array, nothing else.",
        note_content
    )
}

/// Decode a raw model reply into a question set without persisting it.
pub fn parse_questions(raw: &str) -> Result<QuestionSet> {
    let cleaned = strip_code_fence(raw);
    if cleaned.is_empty() {
        return Err(NotemasterError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(cleaned).map_err(|e| {
        error!("Failed to parse question JSON: {}", e);
        NotemasterError::InvalidJson(e.to_string())
    })?;

    match value {
        Value::Array(entries) => Ok(QuestionSet::new(entries)),
        other => Err(NotemasterError::InvalidJson(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Generate and persist the note's questions, replacing any previous set.
pub fn try_generate_questions<B, C>(
    backend: &B,
    client: &C,
    note_title: &str,
    note_content: &str,
) -> Result<QuestionSet>
where
    B: StorageBackend + ?Sized,
    C: CompletionClient + ?Sized,
{
    let reply = client.complete(&question_prompt(note_content))?;
    info!("Raw API reply: {}", reply);

    let questions = parse_questions(&reply)?;
    save_questions(backend, note_title, &questions)?;
    Ok(questions)
}

/// Like [`try_generate_questions`], but every failure becomes an empty set.
pub fn generate_questions<B, C>(
    backend: &B,
    client: &C,
    note_title: &str,
    note_content: &str,
) -> QuestionSet
where
    B: StorageBackend + ?Sized,
    C: CompletionClient + ?Sized,
{
    match try_generate_questions(backend, client, note_title, note_content) {
        Ok(questions) => questions,
        Err(e) => {
            error!("Question generation failed for {}: {}", note_title, e);
            QuestionSet::default()
        }
    }
}
