//! Character-name tally over opening crawls.

use regex::Regex;
use tracing::warn;

// == Name Matcher ==
/// Counts whole-word, case-insensitive occurrences of a name in a text.
pub trait NameMatcher: Send + Sync {
    fn count_occurrences(&self, text: &str, name: &str) -> usize;
}

/// Scans the full text once per name with a word-boundary regex.
///
/// Cost is O(roster size x text length).
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexNameMatcher;

impl NameMatcher for RegexNameMatcher {
    fn count_occurrences(&self, text: &str, name: &str) -> usize {
        let pattern = format!(r"(?i)\b{}\b", regex::escape(name));
        match Regex::new(&pattern) {
            Ok(re) => re.find_iter(text).count(),
            Err(e) => {
                warn!("Skipping name '{}': {}", name, e);
                0
            }
        }
    }
}

/// Collapses internal whitespace runs to one space and trims the ends.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

// == Character Name Tally ==
/// Match count per distinct roster name, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterNameTally {
    counts: Vec<(String, usize)>,
}

impl CharacterNameTally {
    /// Normalizes and de-duplicates `roster`, then counts each name in `text`.
    /// Names that normalize to the empty string are skipped.
    pub fn build<'a, I>(text: &str, roster: I, matcher: &dyn NameMatcher) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for raw in roster {
            let name = normalize_name(raw);
            if name.is_empty() || counts.iter().any(|(seen, _)| *seen == name) {
                continue;
            }
            let count = matcher.count_occurrences(text, &name);
            counts.push((name, count));
        }
        Self { counts }
    }

    pub fn count(&self, name: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Name with the highest count. The earliest name wins ties, so an
    /// all-zero tally still yields the first roster name.
    pub fn winner(&self) -> Option<&str> {
        self.counts
            .iter()
            .fold(None, |best: Option<&(String, usize)>, candidate| match best {
                Some(current) if current.1 >= candidate.1 => Some(current),
                _ => Some(candidate),
            })
            .map(|(name, _)| name.as_str())
    }
}

/// The roster name mentioned most often across `crawls` joined by a space.
/// Returns None only for an empty roster.
pub fn most_frequent_character_name<S, N>(
    crawls: &[S],
    roster: &[N],
    matcher: &dyn NameMatcher,
) -> Option<String>
where
    S: AsRef<str>,
    N: AsRef<str>,
{
    let text = crawls
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");

    CharacterNameTally::build(&text, roster.iter().map(AsRef::as_ref), matcher)
        .winner()
        .map(str::to_string)
}
