use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("a question needs at least two choices, got {count}")]
    TooFewChoices { count: usize },

    #[error("choice {index} has empty text")]
    EmptyChoice { index: usize },

    #[error("correct answer index {index} is out of range for {count} choices")]
    AnswerOutOfRange { index: usize, count: usize },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question as it appears in a bank file.
///
/// Field names follow the bank's JSON shape: `q`, `choices`, `answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub q: String,
    pub choices: Vec<String>,
    pub answer: usize,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(q: impl Into<String>, choices: &[&str], answer: usize) -> Self {
        Self {
            q: q.into(),
            choices: choices.iter().map(|c| (*c).to_owned()).collect(),
            answer,
        }
    }

    /// Validate the draft into an immutable [`Question`].
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, there are fewer than two
    /// choices, a choice is blank, or `answer` does not index a choice.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.q.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.choices.len() < 2 {
            return Err(QuestionError::TooFewChoices {
                count: self.choices.len(),
            });
        }
        if let Some(index) = self.choices.iter().position(|c| c.trim().is_empty()) {
            return Err(QuestionError::EmptyChoice { index });
        }
        if self.answer >= self.choices.len() {
            return Err(QuestionError::AnswerOutOfRange {
                index: self.answer,
                count: self.choices.len(),
            });
        }

        Ok(Question {
            text: self.q,
            choices: self.choices,
            correct_index: self.answer,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
///
/// Always has at least two choices and a `correct_index` inside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    choices: Vec<String>,
    correct_index: usize,
}

impl Question {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_choice(&self) -> &str {
        &self.choices[self.correct_index]
    }

    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}
