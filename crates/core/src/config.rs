use crate::policy::UnlockPolicy;

/// Word length (in characters) up to which a word counts as easy.
pub const DEFAULT_EASY_MAX_LEN: usize = 7;
/// Successes after which a word is mastered and never struggling again.
pub const DEFAULT_MASTERY_SUCCESSES: u32 = 2;
/// Failures that mark a not-yet-mastered word as struggling on their own.
pub const DEFAULT_STRUGGLE_FAILURES: u32 = 2;
/// Practice mode relocks when fewer than this many words are struggling.
pub const DEFAULT_RELOCK_BELOW: usize = 10;

/// Thresholds for the struggling/mastered classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StruggleRules {
    pub mastery_successes: u32,
    pub struggle_failures: u32,
}

impl Default for StruggleRules {
    fn default() -> Self {
        Self {
            mastery_successes: DEFAULT_MASTERY_SUCCESSES,
            struggle_failures: DEFAULT_STRUGGLE_FAILURES,
        }
    }
}

/// All knobs of the progress tracker.
///
/// `TrackerConfig::default()` reproduces the stock quiz: 7-letter easy words,
/// mastery after 2 successes, practice unlocked by 15 missed words and
/// relocked below 10 struggling words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    pub easy_max_len: usize,
    pub struggle: StruggleRules,
    pub relock_below: usize,
    pub unlock: UnlockPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            easy_max_len: DEFAULT_EASY_MAX_LEN,
            struggle: StruggleRules::default(),
            relock_below: DEFAULT_RELOCK_BELOW,
            unlock: UnlockPolicy::default(),
        }
    }
}

impl TrackerConfig {
    #[must_use]
    pub fn with_unlock_policy(mut self, unlock: UnlockPolicy) -> Self {
        self.unlock = unlock;
        self
    }

    #[must_use]
    pub fn with_relock_below(mut self, relock_below: usize) -> Self {
        self.relock_below = relock_below;
        self
    }
}
