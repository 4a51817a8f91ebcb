use crate::config::TrackerConfig;
use crate::model::{Difficulty, Mode, WordEntry, WordStats};

/// Words eligible for selection under a mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSelection<'a> {
    /// Mode the caller asked for.
    pub requested: Mode,
    /// Mode actually used. Differs from `requested` only when practice is
    /// locked and the selection fell back to the easy pool.
    pub effective: Mode,
    pub words: Vec<&'a WordEntry>,
}

impl PoolSelection<'_> {
    #[must_use]
    pub fn fell_back(&self) -> bool {
        self.requested != self.effective
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }
}

/// Filters `all_words` down to the pool for `mode`.
///
/// Practice mode yields the currently struggling words when the unlock policy
/// allows it, and silently degrades to the easy pool otherwise.
#[must_use]
pub fn select_pool<'a>(
    mode: Mode,
    all_words: &'a [WordEntry],
    stats: &WordStats,
    config: &TrackerConfig,
) -> PoolSelection<'a> {
    let effective = match mode {
        Mode::Practice if !config.unlock.is_unlocked(stats) => Mode::Easy,
        other => other,
    };

    let words = all_words
        .iter()
        .filter(|entry| match effective {
            Mode::Easy => entry.difficulty(config.easy_max_len) == Difficulty::Easy,
            Mode::Hard => entry.difficulty(config.easy_max_len) == Difficulty::Hard,
            Mode::Practice => stats.is_struggling(&entry.word, &config.struggle),
        })
        .collect();

    PoolSelection {
        requested: mode,
        effective,
        words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Vec<WordEntry> {
        ["cat", "balloon", "elephant", "necessary", "dog", "rhythm"]
            .into_iter()
            .map(|w| WordEntry::new(w, format!("Spell {w}."), format!("The word {w}.")))
            .collect()
    }

    fn names(selection: &PoolSelection<'_>) -> Vec<String> {
        selection.words.iter().map(|w| w.word.clone()).collect()
    }

    fn unlocked_stats() -> WordStats {
        let mut stats = WordStats::new();
        for i in 0..15 {
            stats.record_failure(&format!("filler{i}"));
        }
        stats
    }

    #[test]
    fn easy_and_hard_partition_by_length() {
        let all = words();
        let stats = WordStats::new();
        let config = TrackerConfig::default();

        let easy = select_pool(Mode::Easy, &all, &stats, &config);
        let hard = select_pool(Mode::Hard, &all, &stats, &config);

        assert_eq!(names(&easy), ["cat", "balloon", "dog", "rhythm"]);
        assert_eq!(names(&hard), ["elephant", "necessary"]);
        assert_eq!(easy.len() + hard.len(), all.len());
    }

    #[test]
    fn locked_practice_matches_easy_pool() {
        let all = words();
        let mut stats = WordStats::new();
        stats.record_failure("elephant");
        stats.record_failure("elephant");
        let config = TrackerConfig::default();

        let practice = select_pool(Mode::Practice, &all, &stats, &config);
        let easy = select_pool(Mode::Easy, &all, &stats, &config);

        assert!(practice.fell_back());
        assert_eq!(practice.effective, Mode::Easy);
        assert_eq!(practice.words, easy.words);
    }

    #[test]
    fn unlocked_practice_selects_struggling_words_of_any_length() {
        let all = words();
        let mut stats = unlocked_stats();
        stats.record_failure("necessary");
        stats.record_failure("cat");
        stats.record_success("cat");
        stats.record_failure("dog");
        let config = TrackerConfig::default();

        let practice = select_pool(Mode::Practice, &all, &stats, &config);

        assert!(!practice.fell_back());
        assert_eq!(names(&practice), ["necessary", "dog"]);
    }

    #[test]
    fn unlocked_practice_can_be_empty() {
        let all = words();
        let stats = unlocked_stats();
        let practice = select_pool(Mode::Practice, &all, &stats, &TrackerConfig::default());
        assert_eq!(practice.effective, Mode::Practice);
        assert!(practice.is_empty());
    }
}
