mod bank;
mod ids;
mod question;
mod score;
mod seed;

pub use bank::QuestionBank;
pub use ids::{ParseIdError, SessionId};
pub use question::{Question, QuestionDraft, QuestionError};
pub use score::{FinalScore, HighScore, ScoreError};
pub use seed::Seed;
