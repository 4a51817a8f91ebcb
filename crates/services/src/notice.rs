use std::sync::Arc;

use storage::repository::{KeyValueStore, NOTICE_DISMISSED_KEY, StorageError};

/// Remembers whether the learner dismissed the informational notice.
#[derive(Clone)]
pub struct NoticeService {
    store: Arc<dyn KeyValueStore>,
}

impl NoticeService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the flag cannot be read.
    pub async fn is_dismissed(&self) -> Result<bool, StorageError> {
        let value = self.store.get(NOTICE_DISMISSED_KEY).await?;
        Ok(value.as_deref() == Some("true"))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the flag cannot be written.
    pub async fn dismiss(&self) -> Result<(), StorageError> {
        self.store.set(NOTICE_DISMISSED_KEY, "true").await
    }
}
