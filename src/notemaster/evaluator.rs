//! # Answer Evaluator
//!
//! Grades a free-text answer against the reference answer on a 0–5 scale by
//! asking the model for `{"score": X}`.
//!
//! Model replies are only loosely structured, so [`parse_score`] decodes in
//! stages:
//! 1. remove code fences, turn single quotes into double quotes
//! 2. strict JSON parse of the whole reply
//! 3. strict parse of the first `{...}` span embedded in prose
//! 4. regex scan for `score` followed by a number
//!
//! Worst case, stage 4 picks a number out of conversational filler. Scores
//! outside 0–5 are clamped.

use crate::error::{NotemasterError, Result};
use crate::llm::{strip_code_fence, CompletionClient};
use crate::model::{Evaluation, Score};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{error, info, warn};

static SCORE_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)"?score"?\s*[:=]\s*"?(-?\d+(?:\.\d+)?)"#).expect("valid regex")
});

pub fn grading_prompt(question: &str, user_answer: &str, correct_answer: &str) -> String {
    format!(
        "You are grading a student's answer to a study question.\n\
         Question: {}\n\
         Reference answer: {}\n\
         Student answer: {}\n\
         Give a score from 0 to 5. Reward an answer that contains the key concepts \
         of the reference answer, even if it is short or worded differently; \
         length alone earns nothing.\n\
         Reply strictly with JSON of the form {{\"score\": X}} where X is an integer, \
         nothing else.",
        question, correct_answer, user_answer
    )
}

fn normalize(raw: &str) -> String {
    strip_code_fence(raw).replace("```", "").replace('\'', "\"")
}

fn score_from_value(value: &Value) -> Option<Score> {
    let number = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    }?;
    Some(clamp_logged(number))
}

fn clamp_logged(number: i64) -> Score {
    let score = Score::clamped(number);
    if score.value() as i64 != number {
        warn!("Score {} out of range, clamped to {}", number, score.value());
    }
    score
}

fn strict(text: &str) -> Option<Score> {
    let value: Value = serde_json::from_str(text.trim()).ok()?;
    score_from_value(value.get("score")?)
}

fn embedded(text: &str) -> Option<Score> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    strict(&text[start..=end])
}

fn fallback(text: &str) -> Option<Score> {
    let captured = SCORE_FIELD.captures(text)?.get(1)?;
    let number = captured.as_str().parse::<f64>().ok()?.round() as i64;
    Some(clamp_logged(number))
}

/// Recover a score from a raw model reply.
pub fn parse_score(raw: &str) -> Result<Score> {
    let text = normalize(raw);
    if text.trim().is_empty() {
        return Err(NotemasterError::EmptyResponse);
    }
    strict(&text)
        .or_else(|| embedded(&text))
        .or_else(|| {
            let score = fallback(&text);
            if score.is_some() {
                info!("Score recovered by pattern fallback from: {}", raw);
            }
            score
        })
        .ok_or_else(|| NotemasterError::UnparseableScore(raw.to_string()))
}

pub fn try_evaluate_answer<C: CompletionClient + ?Sized>(
    client: &C,
    question: &str,
    user_answer: &str,
    correct_answer: &str,
) -> Result<Evaluation> {
    let reply = client.complete(&grading_prompt(question, user_answer, correct_answer))?;
    info!("Raw API reply: {}", reply);
    Ok(Evaluation {
        score: parse_score(&reply)?,
    })
}

/// Like [`try_evaluate_answer`], but every failure becomes a score of 0.
pub fn evaluate_answer<C: CompletionClient + ?Sized>(
    client: &C,
    question: &str,
    user_answer: &str,
    correct_answer: &str,
) -> Evaluation {
    match try_evaluate_answer(client, question, user_answer, correct_answer) {
        Ok(evaluation) => evaluation,
        Err(e) => {
            error!("Answer evaluation failed: {}", e);
            Evaluation::default()
        }
    }
}
