//! Word frequency over opening crawls.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One `(word, count)` pair of the sorted view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

// == Word Frequency Table ==
/// Occurrence count per whitespace-delimited token, in first-seen order.
///
/// Tokens are case-sensitive. Serialized as a single JSON object whose keys
/// keep first-seen order, so the stable sort in [`sorted`](Self::sorted)
/// gives the same tie order before and after a trip through the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencyTable {
    counts: Vec<(String, u64)>,
}

impl WordFrequencyTable {
    /// Counts tokens across all crawls joined by a single space.
    pub fn from_crawls<S: AsRef<str>>(crawls: &[S]) -> Self {
        let text = crawls
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");

        let mut table = Self::default();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for token in text.split_whitespace().map(str::trim).filter(|t| !t.is_empty()) {
            match index.get(token) {
                Some(&i) => table.counts[i].1 += 1,
                None => {
                    index.insert(token, table.counts.len());
                    table.counts.push((token.to_string(), 1));
                }
            }
        }
        table
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, count)| *count)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Pairs sorted by descending count. Ties keep first-seen order.
    pub fn sorted(&self) -> Vec<WordCount> {
        let mut pairs: Vec<WordCount> = self
            .counts
            .iter()
            .map(|(word, count)| WordCount {
                word: word.clone(),
                count: *count,
            })
            .collect();
        pairs.sort_by(|a, b| b.count.cmp(&a.count));
        pairs
    }
}

impl Serialize for WordFrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (word, count) in &self.counts {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WordFrequencyTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = WordFrequencyTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of word to occurrence count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let capacity = access.size_hint().unwrap_or(0);
                let mut counts: Vec<(String, u64)> = Vec::with_capacity(capacity);
                let mut index: HashMap<String, usize> = HashMap::with_capacity(capacity);
                // Repeated keys keep their first position and the last count.
                while let Some((word, count)) = access.next_entry::<String, u64>()? {
                    match index.get(&word) {
                        Some(&i) => counts[i].1 = count,
                        None => {
                            index.insert(word.clone(), counts.len());
                            counts.push((word, count));
                        }
                    }
                }
                Ok(WordFrequencyTable { counts })
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Word occurrences across `crawls`, most frequent first.
pub fn unique_word_occurrences<S: AsRef<str>>(crawls: &[S]) -> Vec<WordCount> {
    WordFrequencyTable::from_crawls(crawls).sorted()
}
