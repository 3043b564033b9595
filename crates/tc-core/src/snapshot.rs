use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Point-in-time view of the engine, handed to renderers by value.
///
/// Owns copies of everything it reports; later pushes never show through.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Every token in the window with its count.
    pub frequencies: BTreeMap<String, usize>,
    /// Highest counts first, at most the display limit long.
    pub top: Vec<(String, usize)>,
    /// Tokens pushed since construction or the last reset.
    pub total_processed: u64,
    /// Tokens currently held in the window.
    pub window_size: usize,
    pub latest_token: Option<String>,
}

impl Snapshot {
    /// Number of distinct tokens in the window.
    pub fn distinct_tokens(&self) -> usize {
        self.frequencies.len()
    }

    /// Count of `token` in the window, 0 if absent.
    pub fn count(&self, token: &str) -> usize {
        self.frequencies.get(token).copied().unwrap_or(0)
    }
}

/// Serialize a snapshot as one line of JSON (no trailing newline).
pub fn export_jsonl_line(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(snapshot)
}
