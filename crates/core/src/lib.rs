#![forbid(unsafe_code)]

//! Domain types for the spelling quiz: word entries, per-word progress
//! counters, quiz modes, practice unlock policies and pool selection.

pub mod config;
pub mod model;
pub mod policy;
pub mod pool;

pub use config::{StruggleRules, TrackerConfig};
pub use policy::{PracticeProgress, UnlockPolicy};
pub use pool::{PoolSelection, select_pool};
