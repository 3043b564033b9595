//! Sliding-window frequency engine.
//!
//! Two structures kept in lock-step:
//! - `window`: FIFO of the most recent tokens, at most `capacity` long.
//! - `frequencies`: token → tally, where the tally's count equals the number
//!   of copies of that token currently in `window`.
//!
//! A tally that drops to zero is removed on the spot, so the table never
//! holds tokens that have left the window.
//!
//! Ranking ties are broken by insertion sequence: every time a token enters
//! the table (first push, or first push after being evicted to zero) it gets
//! the next sequence number, and among equal counts the lower number ranks
//! first. This is the order a "most common" query over an insertion-ordered
//! counter would produce, and it is independent of hash iteration order.

use std::collections::{HashMap, VecDeque};

use crate::config::EngineConfig;
use crate::error::{CoreError, Result};
use crate::snapshot::Snapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Tally {
    count: usize,
    seq: u64,
}

/// Exact word counts over the most recent `capacity` tokens.
///
/// Mutated only through [`push`](Self::push) and the [`process`](Self::process)
/// / [`process_batched`](Self::process_batched) iterators built on it.
#[derive(Clone, Debug)]
pub struct TimeCloud {
    capacity: usize,
    display_limit: usize,
    window: VecDeque<String>,
    frequencies: HashMap<String, Tally>,
    total_processed: u64,
    latest_token: Option<String>,
    next_seq: u64,
}

impl TimeCloud {
    /// Build an empty engine. Both limits must be positive.
    pub fn new(capacity: usize, display_limit: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CoreError::Configuration(
                "window capacity must be a positive integer".to_string(),
            ));
        }
        if display_limit == 0 {
            return Err(CoreError::Configuration(
                "display limit must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            display_limit,
            window: VecDeque::new(),
            frequencies: HashMap::new(),
            total_processed: 0,
            latest_token: None,
            next_seq: 0,
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Self::new(config.max_queue_size, config.max_display_words)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit
    }

    /// Tokens currently in the window.
    pub fn window_size(&self) -> usize {
        self.window.len()
    }

    pub fn total_processed(&self) -> u64 {
        self.total_processed
    }

    pub fn latest_token(&self) -> Option<&str> {
        self.latest_token.as_deref()
    }

    /// Distinct tokens currently in the window.
    pub fn distinct_tokens(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Window contents, oldest first.
    pub fn window(&self) -> impl Iterator<Item = &str> + '_ {
        self.window.iter().map(String::as_str)
    }

    /// Add one token, evicting the oldest if the window is full, and return
    /// the resulting state.
    pub fn push(&mut self, token: impl Into<String>) -> Snapshot {
        self.admit(token.into());
        self.snapshot()
    }

    fn admit(&mut self, token: String) {
        if self.window.len() == self.capacity {
            self.evict_oldest();
        }

        match self.frequencies.get_mut(&token) {
            Some(tally) => tally.count += 1,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.frequencies
                    .insert(token.clone(), Tally { count: 1, seq });
            }
        }

        self.window.push_back(token.clone());
        self.total_processed += 1;
        self.latest_token = Some(token);
    }

    fn evict_oldest(&mut self) {
        let Some(evicted) = self.window.pop_front() else {
            return;
        };
        let Some(tally) = self.frequencies.get_mut(&evicted) else {
            debug_assert!(false, "window token {evicted:?} missing from table");
            return;
        };
        tally.count -= 1;
        if tally.count == 0 {
            self.frequencies.remove(&evicted);
        }
    }

    /// Current state as an owned snapshot. Does not mutate.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frequencies: self
                .frequencies
                .iter()
                .map(|(token, tally)| (token.clone(), tally.count))
                .collect(),
            top: self.top(),
            total_processed: self.total_processed,
            window_size: self.window.len(),
            latest_token: self.latest_token.clone(),
        }
    }

    /// Independent copy of the frequency table.
    pub fn current_frequencies(&self) -> HashMap<String, usize> {
        self.frequencies
            .iter()
            .map(|(token, tally)| (token.clone(), tally.count))
            .collect()
    }

    /// Top entries up to the configured display limit.
    pub fn top(&self) -> Vec<(String, usize)> {
        self.top_n(self.display_limit)
    }

    /// The `n` highest counts, descending; ties go to the token that entered
    /// the table first.
    pub fn top_n(&self, n: usize) -> Vec<(String, usize)> {
        if n == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(&String, &Tally)> = self.frequencies.iter().collect();
        let by_rank = |a: &(&String, &Tally), b: &(&String, &Tally)| {
            b.1.count.cmp(&a.1.count).then(a.1.seq.cmp(&b.1.seq))
        };

        if n < ranked.len() {
            ranked.select_nth_unstable_by(n - 1, by_rank);
            ranked.truncate(n);
        }
        ranked.sort_unstable_by(by_rank);

        ranked
            .into_iter()
            .map(|(token, tally)| (token.clone(), tally.count))
            .collect()
    }

    /// Back to the freshly constructed state. Limits are kept.
    pub fn reset(&mut self) {
        self.window.clear();
        self.frequencies.clear();
        self.total_processed = 0;
        self.latest_token = None;
        self.next_seq = 0;
    }

    /// Lazily push every token, yielding one snapshot per token.
    ///
    /// Nothing is pushed until the iterator is pulled; dropping it early
    /// leaves the engine reflecting exactly the tokens consumed.
    pub fn process<I>(&mut self, tokens: I) -> Process<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Process {
            engine: self,
            tokens: tokens.into_iter(),
        }
    }

    /// Like [`process`](Self::process), but yields only after every
    /// `batch_size`-th token and once more after the last token if it did not
    /// close a batch.
    pub fn process_batched<I>(
        &mut self,
        tokens: I,
        batch_size: usize,
    ) -> Result<ProcessBatched<'_, I::IntoIter>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        if batch_size == 0 {
            return Err(CoreError::InvalidArgument(
                "batch_size must be >= 1".to_string(),
            ));
        }
        Ok(ProcessBatched {
            engine: self,
            tokens: tokens.into_iter(),
            batch_size,
        })
    }
}

/// Pull-driven per-token snapshot stream. See [`TimeCloud::process`].
pub struct Process<'a, I> {
    engine: &'a mut TimeCloud,
    tokens: I,
}

impl<I> Iterator for Process<'_, I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        let token = self.tokens.next()?;
        Some(self.engine.push(token))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tokens.size_hint()
    }
}

/// Pull-driven per-batch snapshot stream. See [`TimeCloud::process_batched`].
pub struct ProcessBatched<'a, I> {
    engine: &'a mut TimeCloud,
    tokens: I,
    batch_size: usize,
}

impl<I> Iterator for ProcessBatched<'_, I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        let mut pushed = 0;
        for token in self.tokens.by_ref() {
            self.engine.admit(token.into());
            pushed += 1;
            if pushed == self.batch_size {
                break;
            }
        }
        (pushed > 0).then(|| self.engine.snapshot())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.tokens.size_hint();
        (
            lo.div_ceil(self.batch_size),
            hi.map(|h| h.div_ceil(self.batch_size)),
        )
    }
}
