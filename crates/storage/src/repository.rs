use async_trait::async_trait;
use spelling_core::model::WordStats;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key holding the serialized word → stat mapping.
pub const WORD_STATS_KEY: &str = "spellingBeeWordStats";
/// Key recording that the learner dismissed the informational notice.
pub const NOTICE_DISMISSED_KEY: &str = "spellingBeePopupDismissed";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// String key/value persistence, the only thing the tracker needs from a
/// backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Reads and writes the whole `WordStats` mapping under `WORD_STATS_KEY`.
#[derive(Clone)]
pub struct StatsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl StatsRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load persisted stats.
    ///
    /// A missing key or an unparseable value yields empty stats; only backend
    /// failures are reported.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load(&self) -> Result<WordStats, StorageError> {
        let Some(raw) = self.store.get(WORD_STATS_KEY).await? else {
            tracing::debug!("no persisted word stats, starting empty");
            return Ok(WordStats::new());
        };

        match decode_stats(&raw) {
            Ok(stats) => {
                tracing::debug!(words = stats.len(), "loaded word stats");
                Ok(stats)
            }
            Err(err) => {
                tracing::warn!(error = %err, "persisted word stats are corrupt, starting empty");
                Ok(WordStats::new())
            }
        }
    }

    /// Persist the full mapping.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the backend write fails.
    pub async fn save(&self, stats: &WordStats) -> Result<(), StorageError> {
        let raw = encode_stats(stats)?;
        self.store.set(WORD_STATS_KEY, &raw).await?;
        tracing::debug!(words = stats.len(), "saved word stats");
        Ok(())
    }
}

/// Decode the persisted JSON object. `null` decodes to empty stats.
///
/// # Errors
///
/// Returns `serde_json::Error` if `raw` is not a word → stat object.
pub fn decode_stats(raw: &str) -> Result<WordStats, serde_json::Error> {
    let stats: Option<WordStats> = serde_json::from_str(raw)?;
    Ok(stats.unwrap_or_default())
}

/// Encode stats as the persisted JSON object.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_stats(stats: &WordStats) -> Result<String, StorageError> {
    serde_json::to_string(stats).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Aggregates the backing store behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub kv: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let kv: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        Self { kv }
    }

    #[must_use]
    pub fn stats(&self) -> StatsRepository {
        StatsRepository::new(Arc::clone(&self.kv))
    }
}
