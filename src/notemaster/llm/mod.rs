//! # Language-model collaborator
//!
//! The core only ever needs one capability from the hosted model: send a
//! single prompt, get a single text reply back. [`CompletionClient`] is that
//! seam. [`chat::ChatCompletionClient`] talks to an OpenAI-compatible
//! `/chat/completions` endpoint; [`stub::StubClient`] returns canned replies.

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;

pub mod chat;
pub mod stub;

pub trait CompletionClient {
    /// Send one user-role prompt and return the reply text, possibly empty.
    fn complete(&self, prompt: &str) -> Result<String>;
}

impl<T: CompletionClient + ?Sized> CompletionClient for &T {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }
}

impl<T: CompletionClient + ?Sized> CompletionClient for Box<T> {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }
}

static FENCED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)\s*```$").expect("valid regex")
});

/// Unwrap a reply wrapped in a fenced code block (```` ```json ... ``` ````).
/// Anything else is returned trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match FENCED.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        assert_eq!(strip_code_fence("```json\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn strips_bare_fence_and_whitespace() {
        assert_eq!(strip_code_fence("  ```\n{\"score\": 3}\n```  \n"), "{\"score\": 3}");
    }

    #[test]
    fn strips_single_line_fence() {
        assert_eq!(strip_code_fence("```json [1]```"), "[1]");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fence(" [1] "), "[1]");
        assert_eq!(strip_code_fence("```json\n[1]"), "```json\n[1]");
    }
}
