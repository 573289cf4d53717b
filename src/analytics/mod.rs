//! Analytics Module
//!
//! Deterministic text analytics over film opening crawls and the cached
//! service that exposes them.

mod names;
mod service;
mod words;

pub use names::{
    most_frequent_character_name, normalize_name, CharacterNameTally, NameMatcher,
    RegexNameMatcher,
};
pub use service::{AnalyticsService, CHARACTER_NAME_KEY, WORD_OCCURRENCES_KEY};
pub use words::{unique_word_occurrences, WordCount, WordFrequencyTable};
