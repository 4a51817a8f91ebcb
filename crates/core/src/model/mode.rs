use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Quiz mode selected by the learner.
///
/// `Easy` and `Hard` partition the word list by length. `Practice` drills the
/// words the learner is struggling with and is only reachable once unlocked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Easy,
    Hard,
    Practice,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Easy, Mode::Hard, Mode::Practice];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Easy => "easy",
            Mode::Hard => "hard",
            Mode::Practice => "practice",
        }
    }

    #[must_use]
    pub fn is_practice(self) -> bool {
        matches!(self, Mode::Practice)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown mode: {raw} (expected easy, hard or practice)")]
pub struct ModeParseError {
    raw: String,
}

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Mode::Easy),
            "hard" => Ok(Mode::Hard),
            "practice" => Ok(Mode::Practice),
            _ => Err(ModeParseError { raw: s.to_string() }),
        }
    }
}
