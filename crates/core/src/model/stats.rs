use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::StruggleRules;

//
// ─── WORD STAT ─────────────────────────────────────────────────────────────────
//

/// Success/failure counters for a single word.
///
/// A stat with both counters at zero is treated exactly like a missing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStat {
    #[serde(default)]
    pub failures: u32,
    #[serde(default)]
    pub successes: u32,
}

impl WordStat {
    #[must_use]
    pub fn new(failures: u32, successes: u32) -> Self {
        Self {
            failures,
            successes,
        }
    }

    /// True if any result (success or failure) has been recorded.
    #[must_use]
    pub fn is_attempted(&self) -> bool {
        self.failures > 0 || self.successes > 0
    }

    #[must_use]
    pub fn is_mastered(&self, rules: &StruggleRules) -> bool {
        self.successes >= rules.mastery_successes
    }

    /// Struggle predicate.
    ///
    /// Mastery wins over any number of failures. Otherwise a word struggles
    /// once it has enough failures, or when it has failed more often than it
    /// has succeeded.
    #[must_use]
    pub fn is_struggling(&self, rules: &StruggleRules) -> bool {
        if self.is_mastered(rules) {
            return false;
        }
        self.failures >= rules.struggle_failures
            || (self.failures > 0 && self.failures > self.successes)
    }
}

//
// ─── WORD STATS ────────────────────────────────────────────────────────────────
//

/// Per-word counters keyed by the exact word text.
///
/// Serializes as a flat JSON object: `{"word": {"failures": 1, "successes": 0}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordStats {
    entries: BTreeMap<String, WordStat>,
}

impl WordStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stat for `word`, if one was ever created.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&WordStat> {
        self.entries.get(word)
    }

    /// True if `word` has a stat with at least one recorded result.
    #[must_use]
    pub fn has_record(&self, word: &str) -> bool {
        self.get(word).is_some_and(WordStat::is_attempted)
    }

    pub fn record_failure(&mut self, word: &str) -> WordStat {
        let stat = self.entry(word);
        stat.failures = stat.failures.saturating_add(1);
        *stat
    }

    pub fn record_success(&mut self, word: &str) -> WordStat {
        let stat = self.entry(word);
        stat.successes = stat.successes.saturating_add(1);
        *stat
    }

    /// Seeds `word` with a single failure if it has no prior record.
    ///
    /// Returns true if the stat was created.
    pub fn manually_add(&mut self, word: &str) -> bool {
        if self.has_record(word) {
            return false;
        }
        self.entries.insert(word.to_string(), WordStat::new(1, 0));
        true
    }

    #[must_use]
    pub fn is_struggling(&self, word: &str, rules: &StruggleRules) -> bool {
        self.get(word).is_some_and(|stat| stat.is_struggling(rules))
    }

    #[must_use]
    pub fn count_words_with_any_failure(&self) -> usize {
        self.entries.values().filter(|s| s.failures > 0).count()
    }

    #[must_use]
    pub fn count_attempted_words(&self) -> usize {
        self.entries.values().filter(|s| s.is_attempted()).count()
    }

    #[must_use]
    pub fn count_struggling_words(&self, rules: &StruggleRules) -> usize {
        self.entries
            .values()
            .filter(|s| s.is_struggling(rules))
            .count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WordStat)> {
        self.entries.iter().map(|(word, stat)| (word.as_str(), stat))
    }

    fn entry(&mut self, word: &str) -> &mut WordStat {
        self.entries.entry(word.to_string()).or_default()
    }
}

impl FromIterator<(String, WordStat)> for WordStats {
    fn from_iter<I: IntoIterator<Item = (String, WordStat)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> StruggleRules {
        StruggleRules::default()
    }

    fn record(stats: &mut WordStats, word: &str, pattern: &str) {
        for c in pattern.chars() {
            match c {
                'F' => {
                    stats.record_failure(word);
                }
                'S' => {
                    stats.record_success(word);
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn never_recorded_word_is_not_struggling() {
        let stats = WordStats::new();
        assert!(!stats.is_struggling("ghost", &rules()));
    }

    #[test]
    fn zero_zero_stat_behaves_like_missing() {
        let stats: WordStats = [("ghost".to_string(), WordStat::new(0, 0))]
            .into_iter()
            .collect();
        assert!(!stats.is_struggling("ghost", &rules()));
        assert!(!stats.has_record("ghost"));
        assert_eq!(stats.count_words_with_any_failure(), 0);
        assert_eq!(stats.count_attempted_words(), 0);
    }

    #[test]
    fn two_failures_without_success_is_struggling() {
        let mut stats = WordStats::new();
        record(&mut stats, "rhythm", "FF");
        assert!(stats.is_struggling("rhythm", &rules()));
    }

    #[test]
    fn single_failure_struggles_until_matched_by_success() {
        let mut stats = WordStats::new();
        record(&mut stats, "rhythm", "F");
        assert!(stats.is_struggling("rhythm", &rules()));
        record(&mut stats, "rhythm", "S");
        assert!(!stats.is_struggling("rhythm", &rules()));
    }

    #[test]
    fn failures_at_threshold_struggle_even_with_one_success() {
        let mut stats = WordStats::new();
        record(&mut stats, "rhythm", "SFF");
        assert!(stats.is_struggling("rhythm", &rules()));
    }

    #[test]
    fn mastery_is_sticky_after_two_successes() {
        let mut stats = WordStats::new();
        record(&mut stats, "rhythm", "SS");
        assert!(!stats.is_struggling("rhythm", &rules()));
        record(&mut stats, "rhythm", "FFFFF");
        assert!(!stats.is_struggling("rhythm", &rules()));
    }

    #[test]
    fn mastery_overrides_prior_failures() {
        let mut stats = WordStats::new();
        record(&mut stats, "rhythm", "FFFF");
        assert!(stats.is_struggling("rhythm", &rules()));
        record(&mut stats, "rhythm", "SS");
        assert!(!stats.is_struggling("rhythm", &rules()));
    }

    #[test]
    fn failure_count_is_per_distinct_word() {
        let mut stats = WordStats::new();
        record(&mut stats, "one", "FFFF");
        record(&mut stats, "two", "F");
        record(&mut stats, "three", "SS");
        assert_eq!(stats.count_words_with_any_failure(), 2);
        assert_eq!(stats.count_attempted_words(), 3);
        assert_eq!(stats.count_struggling_words(&rules()), 2);
    }

    #[test]
    fn manual_add_only_seeds_unrecorded_words() {
        let mut stats = WordStats::new();
        assert!(stats.manually_add("fresh"));
        assert_eq!(stats.get("fresh"), Some(&WordStat::new(1, 0)));
        assert!(!stats.manually_add("fresh"));
        assert_eq!(stats.get("fresh"), Some(&WordStat::new(1, 0)));

        record(&mut stats, "known", "S");
        assert!(!stats.manually_add("known"));
        assert_eq!(stats.get("known"), Some(&WordStat::new(0, 1)));
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut stats = WordStats::new();
        record(&mut stats, "cat", "FS");
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"cat":{"failures":1,"successes":1}}"#);

        let back: WordStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn counters_saturate() {
        let mut stats: WordStats = [("max".to_string(), WordStat::new(u32::MAX, 0))]
            .into_iter()
            .collect();
        assert_eq!(stats.record_failure("max").failures, u32::MAX);
    }
}
