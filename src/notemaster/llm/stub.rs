use super::CompletionClient;
use crate::error::{NotemasterError, Result};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Canned-reply client for tests and offline use.
///
/// Replies are served in order; the last one repeats once the queue is down
/// to a single entry. Every prompt received is recorded.
pub struct StubClient {
    replies: RefCell<VecDeque<std::result::Result<String, String>>>,
    prompts: RefCell<Vec<String>>,
}

impl StubClient {
    pub fn replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: RefCell::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn reply(text: impl Into<String>) -> Self {
        let text: String = text.into();
        Self::replies([text])
    }

    /// A client whose every call fails like a transport error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            replies: RefCell::new(VecDeque::from([Err(message.into())])),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl CompletionClient for StubClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        let mut replies = self.replies.borrow_mut();
        let next = if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        };
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(NotemasterError::Http(message)),
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_replies_in_order_then_repeats_last() {
        let stub = StubClient::replies(["one", "two"]);
        assert_eq!(stub.complete("a").unwrap(), "one");
        assert_eq!(stub.complete("b").unwrap(), "two");
        assert_eq!(stub.complete("c").unwrap(), "two");
        assert_eq!(stub.prompts(), vec!["a", "b", "c"]);
    }

    #[test]
    fn failing_stub_errors() {
        let stub = StubClient::failing("connection refused");
        assert!(matches!(stub.complete("x"), Err(NotemasterError::Http(_))));
    }

    #[test]
    fn empty_queue_replies_empty() {
        let stub = StubClient::replies(Vec::<String>::new());
        assert_eq!(stub.complete("x").unwrap(), "");
    }
}
