use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("score {score} exceeds question count {total}")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("a quiz must have at least one question")]
    EmptyQuiz,
}

/// Result of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    score: u32,
    total: u32,
}

impl FinalScore {
    /// # Errors
    ///
    /// Returns `ScoreError` if `total` is zero or `score > total`.
    pub fn new(score: u32, total: u32) -> Result<Self, ScoreError> {
        if total == 0 {
            return Err(ScoreError::EmptyQuiz);
        }
        if score > total {
            return Err(ScoreError::ScoreExceedsTotal { score, total });
        }
        Ok(Self { score, total })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }
}

impl fmt::Display for FinalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.score, self.total)
    }
}

/// Best score seen so far, as kept by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    score: u32,
    total: u32,
    recorded_at: DateTime<Utc>,
}

impl HighScore {
    #[must_use]
    pub fn from_final(final_score: FinalScore, recorded_at: DateTime<Utc>) -> Self {
        Self {
            score: final_score.score(),
            total: final_score.total(),
            recorded_at,
        }
    }

    /// Rehydrate a high score from storage.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::ScoreExceedsTotal` if the stored values are inconsistent.
    pub fn from_persisted(
        score: u32,
        total: u32,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, ScoreError> {
        if score > total {
            return Err(ScoreError::ScoreExceedsTotal { score, total });
        }
        Ok(Self {
            score,
            total,
            recorded_at,
        })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Only a strictly greater score replaces the current record.
    #[must_use]
    pub fn is_beaten_by(&self, candidate: FinalScore) -> bool {
        candidate.score() > self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn final_score_formats_as_fraction() {
        let score = FinalScore::new(1, 2).unwrap();
        assert_eq!(score.to_string(), "1 / 2");
        assert!(!score.is_perfect());
    }

    #[test]
    fn final_score_rejects_overflow_and_empty() {
        assert_eq!(
            FinalScore::new(3, 2).unwrap_err(),
            ScoreError::ScoreExceedsTotal { score: 3, total: 2 }
        );
        assert_eq!(FinalScore::new(0, 0).unwrap_err(), ScoreError::EmptyQuiz);
    }

    #[test]
    fn high_score_requires_strictly_greater() {
        let high = HighScore::from_persisted(2, 5, fixed_now()).unwrap();
        assert!(high.is_beaten_by(FinalScore::new(4, 5).unwrap()));
        assert!(!high.is_beaten_by(FinalScore::new(2, 5).unwrap()));
        assert!(!high.is_beaten_by(FinalScore::new(1, 5).unwrap()));
    }
}
