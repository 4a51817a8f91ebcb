use spelling_core::model::{Mode, WordEntry, WordStat, WordStats};
use spelling_core::policy::should_relock;
use spelling_core::{PoolSelection, PracticeProgress, TrackerConfig, select_pool};
use storage::repository::StatsRepository;

use crate::error::TrackerError;

/// Owns the per-word counters and keeps them in sync with storage.
///
/// Every mutation rewrites the full mapping before returning. Queries read the
/// in-memory copy only.
#[derive(Clone)]
pub struct WordProgressTracker {
    config: TrackerConfig,
    stats: WordStats,
    repo: StatsRepository,
}

impl WordProgressTracker {
    /// Load persisted stats (missing or corrupt state loads as empty).
    ///
    /// # Errors
    ///
    /// Returns `TrackerError` if the backend cannot be read.
    pub async fn load(repo: StatsRepository, config: TrackerConfig) -> Result<Self, TrackerError> {
        let stats = repo.load().await?;
        tracing::debug!(words = stats.len(), policy = %config.unlock, "tracker loaded");
        Ok(Self {
            config,
            stats,
            repo,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> &WordStats {
        &self.stats
    }

    #[must_use]
    pub fn stat(&self, word: &str) -> Option<WordStat> {
        self.stats.get(word).copied()
    }

    /// Record a failed attempt and persist.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError` if the stats cannot be saved.
    pub async fn record_failure(&mut self, word: &str) -> Result<WordStat, TrackerError> {
        let stat = self.stats.record_failure(word);
        tracing::debug!(word, failures = stat.failures, "recorded failure");
        self.save().await?;
        Ok(stat)
    }

    /// Record a successful attempt and persist.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError` if the stats cannot be saved.
    pub async fn record_success(&mut self, word: &str) -> Result<WordStat, TrackerError> {
        let stat = self.stats.record_success(word);
        tracing::debug!(word, successes = stat.successes, "recorded success");
        self.save().await?;
        Ok(stat)
    }

    #[must_use]
    pub fn is_struggling(&self, word: &str) -> bool {
        self.stats.is_struggling(word, &self.config.struggle)
    }

    #[must_use]
    pub fn count_words_with_any_failure(&self) -> usize {
        self.stats.count_words_with_any_failure()
    }

    #[must_use]
    pub fn count_attempted_words(&self) -> usize {
        self.stats.count_attempted_words()
    }

    #[must_use]
    pub fn count_struggling_words(&self) -> usize {
        self.stats.count_struggling_words(&self.config.struggle)
    }

    #[must_use]
    pub fn is_practice_unlocked(&self) -> bool {
        self.config.unlock.is_unlocked(&self.stats)
    }

    #[must_use]
    pub fn should_relock(&self, current_mode: Mode) -> bool {
        should_relock(current_mode, &self.stats, &self.config)
    }

    #[must_use]
    pub fn progress(&self) -> PracticeProgress {
        PracticeProgress::measure(&self.stats, self.config.unlock, &self.config.struggle)
    }

    /// Put a never-attempted word on the practice list with a single failure.
    ///
    /// Returns `false` (and writes nothing) if the word already has a record.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError` if the stats cannot be saved.
    pub async fn manually_add_to_practice(&mut self, word: &str) -> Result<bool, TrackerError> {
        if !self.stats.manually_add(word) {
            tracing::debug!(word, "word already tracked, not added to practice");
            return Ok(false);
        }
        tracing::info!(word, "added word to practice");
        self.save().await?;
        Ok(true)
    }

    /// Forget every recorded result.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError` if the cleared stats cannot be saved.
    pub async fn reset_all(&mut self) -> Result<(), TrackerError> {
        let cleared = self.stats.len();
        self.stats.clear();
        self.save().await?;
        tracing::info!(cleared, "reset all word stats");
        Ok(())
    }

    #[must_use]
    pub fn select_pool<'a>(&self, mode: Mode, all_words: &'a [WordEntry]) -> PoolSelection<'a> {
        select_pool(mode, all_words, &self.stats, &self.config)
    }

    async fn save(&self) -> Result<(), TrackerError> {
        self.repo.save(&self.stats).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spelling_core::UnlockPolicy;
    use storage::repository::Storage;

    async fn tracker(storage: &Storage) -> WordProgressTracker {
        WordProgressTracker::load(storage.stats(), TrackerConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn every_record_is_persisted() {
        let storage = Storage::in_memory();
        let mut t = tracker(&storage).await;

        t.record_failure("rhythm").await.unwrap();
        t.record_success("cat").await.unwrap();

        let reloaded = tracker(&storage).await;
        assert_eq!(reloaded.stat("rhythm"), Some(WordStat::new(1, 0)));
        assert_eq!(reloaded.stat("cat"), Some(WordStat::new(0, 1)));
    }

    #[tokio::test]
    async fn unlock_boundary_fourteen_to_fifteen() {
        let storage = Storage::in_memory();
        let mut t = tracker(&storage).await;
        for i in 0..14 {
            t.record_failure(&format!("word{i}")).await.unwrap();
        }
        assert!(!t.is_practice_unlocked());
        assert_eq!(t.progress().remaining(), 1);

        t.record_failure("word14").await.unwrap();
        assert!(t.is_practice_unlocked());
    }

    #[tokio::test]
    async fn attempted_words_policy_is_configurable() {
        let storage = Storage::in_memory();
        let config = TrackerConfig::default().with_unlock_policy(UnlockPolicy::attempted_words());
        let mut t = WordProgressTracker::load(storage.stats(), config)
            .await
            .unwrap();
        for i in 0..50 {
            t.record_success(&format!("word{i}")).await.unwrap();
        }
        assert!(t.is_practice_unlocked());
        assert_eq!(t.count_words_with_any_failure(), 0);
        assert_eq!(t.count_attempted_words(), 50);
    }

    #[tokio::test]
    async fn manual_add_is_idempotent_and_persisted() {
        let storage = Storage::in_memory();
        let mut t = tracker(&storage).await;

        assert!(t.manually_add_to_practice("queue").await.unwrap());
        assert!(!t.manually_add_to_practice("queue").await.unwrap());
        assert!(t.is_struggling("queue"));

        let reloaded = tracker(&storage).await;
        assert_eq!(reloaded.stat("queue"), Some(WordStat::new(1, 0)));
    }

    #[tokio::test]
    async fn reset_clears_memory_and_storage() {
        let storage = Storage::in_memory();
        let mut t = tracker(&storage).await;
        t.record_failure("rhythm").await.unwrap();

        t.reset_all().await.unwrap();

        assert!(t.stats().is_empty());
        assert!(tracker(&storage).await.stats().is_empty());
    }

    #[tokio::test]
    async fn relock_fires_when_mastering_drops_below_ten() {
        let storage = Storage::in_memory();
        let mut t = tracker(&storage).await;
        for i in 0..10 {
            let word = format!("word{i}");
            t.record_failure(&word).await.unwrap();
            t.record_failure(&word).await.unwrap();
        }
        assert!(!t.should_relock(Mode::Practice));

        t.record_success("word0").await.unwrap();
        assert!(!t.should_relock(Mode::Practice));
        t.record_success("word0").await.unwrap();
        assert!(t.should_relock(Mode::Practice));
        assert!(!t.should_relock(Mode::Easy));
    }
}
