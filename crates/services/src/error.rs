//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by the quiz session state machine.
///
/// All of these are contract violations by the caller: a front end that
/// respects the `answered` and `is_complete` flags never triggers them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot start a quiz with an empty question bank")]
    EmptyBank,
    #[error("session already finished")]
    Finished,
    #[error("current question was already answered")]
    AlreadyAnswered,
    #[error("current question has not been answered yet")]
    NotAnswered,
    #[error("choice {choice} is out of range for {choices} choices")]
    InvalidChoice { choice: usize, choices: usize },
}

/// Errors emitted by `HighScoreService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HighScoreServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
