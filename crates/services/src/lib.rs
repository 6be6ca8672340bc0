#![forbid(unsafe_code)]

pub mod error;
pub mod high_score_service;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::{HighScoreServiceError, SessionError};
pub use high_score_service::{HighScoreService, HighScoreUpdate};

pub use sessions::{
    AdvanceOutcome, AnswerOutcome, QuizLoopService, QuizSession, SessionAdvanceResult,
    SessionAnswerResult, SessionCompletion, SessionProgress,
};
