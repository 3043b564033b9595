//! TimeCloud sliding-window frequency engine.
//!
//! Keeps exact word counts over the most recent N tokens of a stream.
//! Each push evicts at most one old token, so updates are O(1) amortized and
//! memory is bounded by the window capacity. After every update (or every
//! batch of updates) the engine produces an immutable [`Snapshot`] for a
//! renderer to draw.
//!
//! Zero I/O — tokens in, snapshots out. Reading articles and drawing frames
//! belong to the callers.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod tokenizer;

pub use config::{Config, EngineConfig, RenderConfig, TokenizerConfig};
pub use constants::{
    DEFAULT_DEBUG_EVERY, DEFAULT_DISPLAY_LIMIT, DEFAULT_MIN_WORD_LENGTH, DEFAULT_WINDOW_CAPACITY,
    DEFAULT_WORDS_PER_FRAME,
};
pub use engine::{Process, ProcessBatched, TimeCloud};
pub use error::{CoreError, Result};
pub use snapshot::{Snapshot, export_jsonl_line};
pub use tokenizer::{Tokenizer, parse_stopwords};
