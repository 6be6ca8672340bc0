use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{FinalScore, HighScore, QuestionBank, Seed};
use quiz_core::rng::RandomSource;
use storage::repository::HighScoreRepository;
use tracing::{debug, info, warn};

use super::plan::random_source_for;
use super::progress::SessionProgress;
use super::service::{AnswerOutcome, QuizSession};
use crate::error::SessionError;
use crate::high_score_service::{HighScoreService, HighScoreUpdate};

/// Result of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionAnswerResult {
    pub outcome: AnswerOutcome,
    pub progress: SessionProgress,
}

/// Details reported once a session finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCompletion {
    pub final_score: FinalScore,
    /// `None` when the high score could not be read or written.
    pub high_score: Option<HighScoreUpdate>,
}

/// Result of moving to the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionAdvanceResult {
    pub progress: SessionProgress,
    pub completion: Option<SessionCompletion>,
}

impl SessionAdvanceResult {
    #[must_use]
    pub fn finished(&self) -> bool {
        self.completion.is_some()
    }
}

/// Runs quiz sessions over a shared bank and reports finished ones to the
/// high-score store.
///
/// Storage failures never surface from here: they are logged and the quiz
/// carries on without a high score.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    high_scores: HighScoreService,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        bank: Arc<QuestionBank>,
        high_scores: Arc<dyn HighScoreRepository>,
    ) -> Self {
        Self {
            clock,
            bank,
            high_scores: HighScoreService::new(high_scores),
        }
    }

    /// Start a fresh session. Any previous session is simply dropped by the caller.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` if the bank has no questions.
    pub fn start_session(&self, seed: Option<&Seed>) -> Result<QuizSession, SessionError> {
        let mut source = random_source_for(seed);
        let session = QuizSession::start(Arc::clone(&self.bank), source.as_mut())?;
        info!(
            session_id = %session.id(),
            seed_kind = seed.map_or("none", Seed::kind),
            questions = session.total(),
            "quiz session started"
        );
        Ok(session)
    }

    /// Start a fresh session with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` if the bank has no questions.
    pub fn start_session_with(
        &self,
        source: &mut dyn RandomSource,
    ) -> Result<QuizSession, SessionError> {
        let session = QuizSession::start(Arc::clone(&self.bank), source)?;
        info!(
            session_id = %session.id(),
            seed_kind = "injected",
            questions = session.total(),
            "quiz session started"
        );
        Ok(session)
    }

    /// Answer the current question.
    ///
    /// # Errors
    ///
    /// Propagates the state machine's `SessionError`.
    pub fn answer_current(
        &self,
        session: &mut QuizSession,
        choice: usize,
    ) -> Result<SessionAnswerResult, SessionError> {
        let outcome = session.submit_answer(choice)?;
        debug!(
            session_id = %session.id(),
            position = session.position(),
            choice,
            correct = outcome.correct,
            "answer recorded"
        );
        Ok(SessionAnswerResult {
            outcome,
            progress: session.progress(),
        })
    }

    /// Move past the answered question; on the last one, record the high score.
    ///
    /// # Errors
    ///
    /// Propagates the state machine's `SessionError`. Storage failures are not errors.
    pub async fn advance(
        &self,
        session: &mut QuizSession,
    ) -> Result<SessionAdvanceResult, SessionError> {
        let advanced = session.advance()?;
        let progress = session.progress();
        if !advanced.finished {
            return Ok(SessionAdvanceResult {
                progress,
                completion: None,
            });
        }

        let final_score = session.final_score().ok_or(SessionError::Finished)?;
        info!(
            session_id = %session.id(),
            score = final_score.score(),
            total = final_score.total(),
            "quiz session finished"
        );

        let high_score = match self.high_scores.record(final_score, self.clock.now()).await {
            Ok(update) => Some(update),
            Err(err) => {
                warn!(session_id = %session.id(), error = %err, "could not save high score");
                None
            }
        };

        Ok(SessionAdvanceResult {
            progress,
            completion: Some(SessionCompletion {
                final_score,
                high_score,
            }),
        })
    }

    /// Best-effort read of the stored high score.
    pub async fn high_score(&self) -> Option<HighScore> {
        match self.high_scores.load().await {
            Ok(high) => high,
            Err(err) => {
                warn!(error = %err, "could not read high score");
                None
            }
        }
    }
}
