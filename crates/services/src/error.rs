//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{AnswerError, QuestionError};

/// Errors surfaced by history stores.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Errors emitted while loading quiz files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("could not read quiz file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse quiz file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question {position} is invalid: {source}")]
    InvalidQuestion {
        position: usize,
        #[source]
        source: QuestionError,
    },
    #[error("quiz file contains no questions")]
    Empty,
}
