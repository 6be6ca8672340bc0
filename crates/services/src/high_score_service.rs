use std::sync::Arc;

use chrono::{DateTime, Utc};
use quiz_core::model::{FinalScore, HighScore};
use storage::repository::HighScoreRepository;

use crate::error::HighScoreServiceError;

/// What happened to the stored high score after a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScoreUpdate {
    pub previous: Option<u32>,
    pub best: u32,
    pub is_new_record: bool,
}

#[derive(Clone)]
pub struct HighScoreService {
    repo: Arc<dyn HighScoreRepository>,
}

impl HighScoreService {
    #[must_use]
    pub fn new(repo: Arc<dyn HighScoreRepository>) -> Self {
        Self { repo }
    }

    /// Load the stored high score, if any.
    ///
    /// # Errors
    ///
    /// Returns `HighScoreServiceError` on storage failures.
    pub async fn load(&self) -> Result<Option<HighScore>, HighScoreServiceError> {
        Ok(self.repo.get_high_score().await?)
    }

    /// Compare a finished quiz against the stored record and overwrite it only
    /// when the new score is strictly greater. A missing record counts as 0.
    ///
    /// # Errors
    ///
    /// Returns `HighScoreServiceError` if reading or writing the record fails.
    pub async fn record(
        &self,
        final_score: FinalScore,
        recorded_at: DateTime<Utc>,
    ) -> Result<HighScoreUpdate, HighScoreServiceError> {
        let previous = self.repo.get_high_score().await?;
        let previous_score = previous.as_ref().map(HighScore::score);
        let beaten = previous
            .as_ref()
            .map_or(final_score.score() > 0, |high| high.is_beaten_by(final_score));

        if !beaten {
            return Ok(HighScoreUpdate {
                previous: previous_score,
                best: previous_score.unwrap_or(0),
                is_new_record: false,
            });
        }

        let high_score = HighScore::from_final(final_score, recorded_at);
        self.repo.save_high_score(&high_score).await?;
        Ok(HighScoreUpdate {
            previous: previous_score,
            best: final_score.score(),
            is_new_record: true,
        })
    }
}
