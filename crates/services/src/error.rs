//! Shared error types for the services crate.

use thiserror::Error;

use spelling_core::PracticeProgress;
use storage::repository::StorageError;

use crate::quiz::EmptyPoolReason;

/// Errors emitted by `WordProgressTracker`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("{0}")]
    EmptyPool(EmptyPoolReason),
    #[error("{progress}")]
    PracticeLocked { progress: PracticeProgress },
    #[error("no word has been picked yet")]
    NoCurrentWord,
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

impl From<StorageError> for QuizError {
    fn from(err: StorageError) -> Self {
        Self::Tracker(TrackerError::Storage(err))
    }
}
