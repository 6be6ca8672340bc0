mod plan;
mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::{random_source_for, shuffled_order};
pub use progress::SessionProgress;
pub use service::{AdvanceOutcome, AnswerOutcome, QuizSession};
pub use view::{
    ChoiceFocus, ChoiceMark, ChoiceView, QuestionView, announce_answer, announce_final,
    choice_label, feedback_marks, parse_choice_input,
};
pub use workflow::{QuizLoopService, SessionAdvanceResult, SessionAnswerResult, SessionCompletion};
