use std::fmt;
use std::sync::Arc;

use quiz_core::model::{FinalScore, Question, QuestionBank, Seed, SessionId};
use quiz_core::rng::RandomSource;

use super::plan::{random_source_for, shuffled_order};
use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of locking in an answer for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub choice: usize,
    pub correct: bool,
    pub correct_index: usize,
}

/// Result of moving past an answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceOutcome {
    pub finished: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through a shuffled question bank.
///
/// Each question takes exactly one scored answer (`submit_answer`) and is then
/// left with `advance`. Splitting the two lets a front end show feedback between
/// them. The session is finished once `position` reaches the end of `order`.
pub struct QuizSession {
    id: SessionId,
    bank: Arc<QuestionBank>,
    order: Vec<usize>,
    position: usize,
    score: u32,
    answer: Option<AnswerOutcome>,
}

impl QuizSession {
    /// Start a session, ordering the bank with the given random source.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` if the bank has no questions.
    pub fn start(
        bank: Arc<QuestionBank>,
        source: &mut dyn RandomSource,
    ) -> Result<Self, SessionError> {
        if bank.is_empty() {
            return Err(SessionError::EmptyBank);
        }
        let order = shuffled_order(bank.len(), source);

        Ok(Self {
            id: SessionId::new_random(),
            bank,
            order,
            position: 0,
            score: 0,
            answer: None,
        })
    }

    /// Start a session from an optional seed; `None` gives a fresh random order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` if the bank has no questions.
    pub fn start_seeded(bank: Arc<QuestionBank>, seed: Option<&Seed>) -> Result<Self, SessionError> {
        let mut source = random_source_for(seed);
        Self::start(bank, source.as_mut())
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Bank indices in the order they are asked.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.order.len()
    }

    /// Whether the current question has been locked by an answer.
    #[must_use]
    pub fn answered(&self) -> bool {
        self.answer.is_some()
    }

    /// The outcome recorded for the current question, if answered.
    #[must_use]
    pub fn last_answer(&self) -> Option<&AnswerOutcome> {
        self.answer.as_ref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position >= self.order.len()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            position: self.position,
            total: self.total(),
            score: self.score,
            answered: self.answered(),
            is_complete: self.is_finished(),
        }
    }

    /// The final score, once every question has been passed.
    #[must_use]
    pub fn final_score(&self) -> Option<FinalScore> {
        if !self.is_finished() {
            return None;
        }
        let total = u32::try_from(self.total()).ok()?;
        FinalScore::new(self.score, total).ok()
    }

    /// The question at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` once the order is exhausted.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        let &index = self
            .order
            .get(self.position)
            .ok_or(SessionError::Finished)?;
        self.bank.get(index).ok_or(SessionError::Finished)
    }

    /// Score the current question with the chosen index and lock it.
    ///
    /// No state changes on error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` if the session is over,
    /// `SessionError::AlreadyAnswered` if the question is locked, and
    /// `SessionError::InvalidChoice` if `choice` is not one of its choices.
    pub fn submit_answer(&mut self, choice: usize) -> Result<AnswerOutcome, SessionError> {
        let question = self.current_question()?;
        if self.answer.is_some() {
            return Err(SessionError::AlreadyAnswered);
        }
        if choice >= question.choice_count() {
            return Err(SessionError::InvalidChoice {
                choice,
                choices: question.choice_count(),
            });
        }

        let outcome = AnswerOutcome {
            choice,
            correct: question.is_correct(choice),
            correct_index: question.correct_index(),
        };
        if outcome.correct {
            self.score = self.score.saturating_add(1);
        }
        self.answer = Some(outcome);
        Ok(outcome)
    }

    /// Move past the answered question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` if the session is over and
    /// `SessionError::NotAnswered` if the current question is still open.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        if self.answer.is_none() {
            return Err(SessionError::NotAnswered);
        }

        self.position += 1;
        self.answer = None;
        Ok(AdvanceOutcome {
            finished: self.is_finished(),
        })
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("order", &self.order)
            .field("position", &self.position)
            .field("score", &self.score)
            .field("answer", &self.answer)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
