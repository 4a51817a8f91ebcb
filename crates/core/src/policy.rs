use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::{StruggleRules, TrackerConfig};
use crate::model::{Mode, WordStats};

pub const DEFAULT_FAILED_WORDS_TO_UNLOCK: usize = 15;
pub const DEFAULT_ATTEMPTED_WORDS_TO_UNLOCK: usize = 50;

//
// ─── UNLOCK POLICY ─────────────────────────────────────────────────────────────
//

/// Rule deciding when practice mode becomes available.
///
/// The two policies are alternatives, never combined:
/// - `FailedWords`: enough distinct words have at least one failure.
/// - `AttemptedWords`: enough distinct words have been attempted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockPolicy {
    FailedWords { min: usize },
    AttemptedWords { min: usize },
}

impl Default for UnlockPolicy {
    fn default() -> Self {
        Self::failed_words()
    }
}

impl UnlockPolicy {
    #[must_use]
    pub fn failed_words() -> Self {
        Self::FailedWords {
            min: DEFAULT_FAILED_WORDS_TO_UNLOCK,
        }
    }

    #[must_use]
    pub fn attempted_words() -> Self {
        Self::AttemptedWords {
            min: DEFAULT_ATTEMPTED_WORDS_TO_UNLOCK,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::FailedWords { .. } => "failed-words",
            Self::AttemptedWords { .. } => "attempted-words",
        }
    }

    /// Number of distinct words required to unlock.
    #[must_use]
    pub fn required(&self) -> usize {
        match *self {
            Self::FailedWords { min } | Self::AttemptedWords { min } => min,
        }
    }

    /// The count this policy compares against `required()`.
    #[must_use]
    pub fn counted(&self, stats: &WordStats) -> usize {
        match self {
            Self::FailedWords { .. } => stats.count_words_with_any_failure(),
            Self::AttemptedWords { .. } => stats.count_attempted_words(),
        }
    }

    #[must_use]
    pub fn is_unlocked(&self, stats: &WordStats) -> bool {
        self.counted(stats) >= self.required()
    }
}

impl fmt::Display for UnlockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (>= {})", self.name(), self.required())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown unlock policy: {raw} (expected failed-words or attempted-words)")]
pub struct PolicyParseError {
    raw: String,
}

impl FromStr for UnlockPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "failed-words" | "failed" => Ok(Self::failed_words()),
            "attempted-words" | "attempted" => Ok(Self::attempted_words()),
            _ => Err(PolicyParseError { raw: s.to_string() }),
        }
    }
}

//
// ─── PRACTICE PROGRESS ─────────────────────────────────────────────────────────
//

/// Snapshot of how close the learner is to unlocking practice mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeProgress {
    pub policy: UnlockPolicy,
    pub counted: usize,
    pub required: usize,
    pub struggling: usize,
    pub unlocked: bool,
}

impl PracticeProgress {
    #[must_use]
    pub fn measure(stats: &WordStats, policy: UnlockPolicy, rules: &StruggleRules) -> Self {
        let counted = policy.counted(stats);
        let required = policy.required();
        Self {
            policy,
            counted,
            required,
            struggling: stats.count_struggling_words(rules),
            unlocked: counted >= required,
        }
    }

    /// Words still missing before practice unlocks.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.required.saturating_sub(self.counted)
    }
}

impl fmt::Display for PracticeProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = match self.policy {
            UnlockPolicy::FailedWords { .. } => "missed",
            UnlockPolicy::AttemptedWords { .. } => "attempted",
        };
        if self.unlocked {
            write!(
                f,
                "practice unlocked: {} {noun} words, {} struggling",
                self.counted, self.struggling
            )
        } else {
            write!(
                f,
                "practice locked: {}/{} {noun} words ({} more needed)",
                self.counted,
                self.required,
                self.remaining()
            )
        }
    }
}

//
// ─── RELOCK ────────────────────────────────────────────────────────────────────
//

/// True when practice mode should fall back to easy because too few words are
/// still struggling.
#[must_use]
pub fn should_relock(mode: Mode, stats: &WordStats, config: &TrackerConfig) -> bool {
    mode.is_practice() && stats.count_struggling_words(&config.struggle) < config.relock_below
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
