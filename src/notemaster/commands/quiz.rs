use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotemasterError, Result};
use crate::evaluator::try_evaluate_answer;
use crate::generator::try_generate_questions;
use crate::llm::CompletionClient;
use crate::store::notes::get_note;
use crate::store::questions::{delete_questions, load_questions};
use crate::store::stats::save_quiz_result;
use crate::store::StorageBackend;
use tracing::warn;

pub fn generate<B, C>(backend: &B, client: &C, title: &str) -> Result<CmdResult>
where
    B: StorageBackend + ?Sized,
    C: CompletionClient + ?Sized,
{
    let note = get_note(backend, title)?
        .ok_or_else(|| NotemasterError::NoteNotFound(title.to_string()))?;

    let set = match try_generate_questions(backend, client, &note.title, &note.content) {
        Ok(set) => set,
        Err(e @ NotemasterError::Io(_)) | Err(e @ NotemasterError::Store(_)) => return Err(e),
        Err(e) => {
            return Ok(CmdResult::default().with_message(CmdMessage::error(format!(
                "The API returned no questions. Check the note content or the API settings. ({})",
                e
            ))))
        }
    };

    let questions = set.questions();
    let mut result = CmdResult::default();
    if set.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "The model returned an empty question list for '{}'.",
            note.title
        )));
    } else {
        if questions.len() < set.len() {
            warn!(
                "{} of {} generated entries are not question/answer objects",
                set.len() - questions.len(),
                set.len()
            );
            result.add_message(CmdMessage::warning(format!(
                "{} generated entries are not question/answer pairs and will be skipped.",
                set.len() - questions.len()
            )));
        }
        result.add_message(CmdMessage::success(format!(
            "{} questions generated and saved for '{}'.",
            set.len(),
            note.title
        )));
    }
    Ok(result.with_questions(questions))
}

pub fn list<B: StorageBackend + ?Sized>(backend: &B, title: &str) -> Result<CmdResult> {
    let questions = load_questions(backend, title)?.questions();
    let mut result = CmdResult::default();
    if questions.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No questions for '{}'. Generate some first.",
            title
        )));
    }
    Ok(result.with_questions(questions))
}

pub fn clear<B: StorageBackend + ?Sized>(backend: &B, title: &str) -> Result<CmdResult> {
    let message = if delete_questions(backend, title)? {
        CmdMessage::success(format!("Questions for '{}' deleted.", title))
    } else {
        CmdMessage::info(format!("No questions for '{}', nothing to delete.", title))
    };
    Ok(CmdResult::default().with_message(message))
}

/// Grade `answer` against question `number` (1-based) and record the attempt.
pub fn answer<B, C>(
    backend: &B,
    client: &C,
    title: &str,
    number: usize,
    answer: &str,
) -> Result<CmdResult>
where
    B: StorageBackend + ?Sized,
    C: CompletionClient + ?Sized,
{
    let questions = load_questions(backend, title)?.questions();
    let question = number
        .checked_sub(1)
        .and_then(|i| questions.get(i))
        .ok_or_else(|| {
            NotemasterError::Api(format!(
                "No question {} for '{}' ({} available)",
                number,
                title,
                questions.len()
            ))
        })?;

    if answer.trim().is_empty() {
        return Ok(CmdResult::default()
            .with_message(CmdMessage::warning("Please type an answer first.")));
    }

    let mut result = CmdResult::default();
    match try_evaluate_answer(client, &question.text, answer, &question.reponse) {
        Ok(evaluation) => {
            save_quiz_result(
                backend,
                title,
                &question.text,
                answer,
                &question.reponse,
                evaluation.score,
            )?;
            result.add_message(CmdMessage::success(format!("Score: {}", evaluation.score)));
            result.evaluation = Some(evaluation);
        }
        Err(e) => {
            result.add_message(CmdMessage::error(format!(
                "Could not evaluate the answer, nothing recorded: {}",
                e
            )));
        }
    }
    result.add_message(CmdMessage::info(format!("Correct answer: {}", question.reponse)));
    Ok(result.with_questions(vec![question.clone()]))
}
