//! Cache-aside counters.
//!
//! Every lookup ends in exactly one [`LookupOutcome`]. Write failures are
//! counted separately since they happen after the lookup has been decided.

use serde::Serialize;

/// How a single cache lookup was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Fresh entry that decoded
    Hit,
    /// No entry, or an entry past its TTL
    Miss,
    /// Fresh entry whose value could not be decoded
    Invalid,
    /// Backend read error, treated as a miss
    ReadFailure,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalid: u64,
    pub read_failures: u64,
    /// Writes that were logged and swallowed
    pub write_failures: u64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: LookupOutcome) {
        let counter = match outcome {
            LookupOutcome::Hit => &mut self.hits,
            LookupOutcome::Miss => &mut self.misses,
            LookupOutcome::Invalid => &mut self.invalid,
            LookupOutcome::ReadFailure => &mut self.read_failures,
        };
        *counter += 1;
    }

    pub fn record_write_failure(&mut self) {
        self.write_failures += 1;
    }

    /// Lookups of any outcome.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses + self.invalid + self.read_failures
    }

    /// Share of lookups answered from cache, 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }
}
