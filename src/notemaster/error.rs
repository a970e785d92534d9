use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotemasterError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("The API returned an empty response")]
    EmptyResponse,

    #[error("The API response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("No score found in the API response: {0}")]
    UnparseableScore(String),

    #[error("No API key configured (set DEEPSEEK_KEY or run `notemaster key set`)")]
    MissingCredential,

    #[error("Invalid API key: expected exactly {expected} characters, got {actual}")]
    InvalidCredential { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, NotemasterError>;
