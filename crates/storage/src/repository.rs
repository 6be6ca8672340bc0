use async_trait::async_trait;
use quiz_core::model::HighScore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the persisted high score.
#[async_trait]
pub trait HighScoreRepository: Send + Sync {
    /// Fetch the stored high score, if any was ever recorded.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_high_score(&self) -> Result<Option<HighScore>, StorageError>;

    /// Overwrite the stored high score.
    ///
    /// The caller decides whether the new value beats the old one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn save_high_score(&self, high_score: &HighScore) -> Result<(), StorageError>;
}

/// In-memory repository for tests and sessions that opt out of persistence.
///
/// `set_unavailable(true)` makes every call fail, mimicking a storage backend
/// that is switched off or full.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    high_score: Arc<Mutex<Option<HighScore>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously recorded high score.
    #[must_use]
    pub fn with_high_score(high_score: HighScore) -> Self {
        let repo = Self::new();
        if let Ok(mut guard) = repo.high_score.lock() {
            *guard = Some(high_score);
        }
        repo
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("in-memory store disabled".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl HighScoreRepository for InMemoryRepository {
    async fn get_high_score(&self) -> Result<Option<HighScore>, StorageError> {
        self.check_available()?;
        let guard = self
            .high_score
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_high_score(&self, high_score: &HighScore) -> Result<(), StorageError> {
        self.check_available()?;
        let mut guard = self
            .high_score
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(high_score.clone());
        Ok(())
    }
}

/// Repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub high_scores: Arc<dyn HighScoreRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let high_scores: Arc<dyn HighScoreRepository> = Arc::new(InMemoryRepository::new());
        Self { high_scores }
    }
}
