#![forbid(unsafe_code)]

pub mod error;
pub mod notice;
pub mod quiz;
pub mod speech;
pub mod tracker;

pub use error::{QuizError, TrackerError};
pub use notice::NoticeService;
pub use quiz::{AnswerOutcome, EmptyPoolReason, QuizSession};
pub use speech::{SilentSpeaker, SpeechCue, SpeechRequest, Speaker};
pub use tracker::WordProgressTracker;
