//! Cached text analytics over the films' opening crawls.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::{most_frequent_character_name, NameMatcher, RegexNameMatcher, WordCount, WordFrequencyTable};
use crate::cache::CacheAside;
use crate::error::{Result, ServiceError};
use crate::upstream::UpstreamClient;

/// Cache key for the word frequency table.
pub const WORD_OCCURRENCES_KEY: &str = "uniqueWordOccurrences";
/// Cache key for the winning character name.
pub const CHARACTER_NAME_KEY: &str = "mostFrequentCharacterName";

const FILMS: &str = "films";
const PEOPLE: &str = "people";
const OPENING_CRAWL: &str = "opening_crawl";

// == Analytics Service ==
#[derive(Clone)]
pub struct AnalyticsService {
    upstream: Arc<dyn UpstreamClient>,
    cache: CacheAside,
    ttl: Duration,
    matcher: Arc<dyn NameMatcher>,
}

impl AnalyticsService {
    pub fn new(upstream: Arc<dyn UpstreamClient>, cache: CacheAside, ttl: Duration) -> Self {
        Self::with_matcher(upstream, cache, ttl, Arc::new(RegexNameMatcher))
    }

    pub fn with_matcher(
        upstream: Arc<dyn UpstreamClient>,
        cache: CacheAside,
        ttl: Duration,
        matcher: Arc<dyn NameMatcher>,
    ) -> Self {
        Self {
            upstream,
            cache,
            ttl,
            matcher,
        }
    }

    /// Opening crawls of every film that has one, in upstream order.
    async fn opening_crawls(&self) -> Result<Vec<String>> {
        let films = self.upstream.fetch_collection(FILMS).await?;
        Ok(films
            .iter()
            .filter_map(|film| film.str_field(OPENING_CRAWL))
            .map(str::to_string)
            .collect())
    }

    // == Unique Word Occurrences ==
    /// Word counts across all opening crawls, most frequent first.
    ///
    /// The unsorted table is what gets cached; sorting happens per call.
    pub async fn unique_word_occurrences(&self) -> Result<Vec<WordCount>> {
        let table: WordFrequencyTable = self
            .cache
            .get_or_compute(WORD_OCCURRENCES_KEY, self.ttl, || async move {
                let crawls = self.opening_crawls().await?;
                let table = WordFrequencyTable::from_crawls(&crawls);
                debug!("Counted {} distinct words in {} crawls", table.len(), crawls.len());
                Ok::<_, ServiceError>(table)
            })
            .await?;

        Ok(table.sorted())
    }

    // == Most Frequent Character Name ==
    /// The `people` roster name mentioned most often across all opening
    /// crawls. None when the roster is empty.
    pub async fn most_frequent_character_name(&self) -> Result<Option<String>> {
        self.cache
            .get_or_compute(CHARACTER_NAME_KEY, self.ttl, || async move {
                let crawls = self.opening_crawls().await?;
                let people = self.upstream.fetch_collection(PEOPLE).await?;
                let roster: Vec<&str> = people.iter().filter_map(|p| p.str_field("name")).collect();

                let winner = most_frequent_character_name(&crawls, &roster, self.matcher.as_ref());
                debug!("Most frequent of {} names: {:?}", roster.len(), winner);
                Ok::<_, ServiceError>(winner)
            })
            .await
    }
}
