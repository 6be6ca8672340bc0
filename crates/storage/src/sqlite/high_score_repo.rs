use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::HighScore;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{HighScoreRepository, StorageError};

/// Row key for the quiz high score.
pub const HIGH_SCORE_KEY: &str = "quiz_highscore_v1";

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

#[async_trait]
impl HighScoreRepository for SqliteRepository {
    async fn get_high_score(&self) -> Result<Option<HighScore>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT score, total, recorded_at
            FROM high_scores
            WHERE key = ?1
            ",
        )
        .bind(HIGH_SCORE_KEY)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
        let total = u32_from_i64("total", row.try_get::<i64, _>("total").map_err(ser)?)?;
        let recorded_at: DateTime<Utc> = row.try_get("recorded_at").map_err(ser)?;

        HighScore::from_persisted(score, total, recorded_at)
            .map(Some)
            .map_err(ser)
    }

    async fn save_high_score(&self, high_score: &HighScore) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO high_scores (key, score, total, recorded_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(key) DO UPDATE SET
                score = excluded.score,
                total = excluded.total,
                recorded_at = excluded.recorded_at
            ",
        )
        .bind(HIGH_SCORE_KEY)
        .bind(i64::from(high_score.score()))
        .bind(i64::from(high_score.total()))
        .bind(high_score.recorded_at())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
