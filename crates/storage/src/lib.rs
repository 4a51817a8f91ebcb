#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;
pub mod word_list;

pub use repository::{
    InMemoryStore, KeyValueStore, NOTICE_DISMISSED_KEY, StatsRepository, Storage, StorageError,
    WORD_STATS_KEY,
};
pub use word_list::{WordListError, load_word_list, parse_word_list};
