//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::evaluate::ParseAnswerError;
use storage::repository::StorageError;

/// Errors emitted while loading one of the static JSON feeds.
///
/// Each feed loads independently; a failure here disables one catalog while
/// the others keep working.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedError {
    #[error("feed request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("feed endpoint is not a valid URL: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("feed payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no quiz questions match the selected topic and difficulty")]
    EmptySelection,
    #[error(transparent)]
    InvalidAnswer(#[from] ParseAnswerError),
    #[error("the current question has already been answered")]
    Locked,
    #[error("no quiz session is active")]
    NoSession,
    #[error("the session is already completed")]
    Completed,
    #[error("could not serialize session state: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
