mod mode;
mod stats;
mod word;

pub use mode::{Mode, ModeParseError};
pub use stats::{WordStat, WordStats};
pub use word::{Difficulty, WordEntry};
