//! Configuration for the engine, tokenizer and snapshot cadence.
//!
//! Every section is `#[serde(default)]`, so a config file only needs the keys
//! it overrides. Parsing files is the corpus crate's job; this module only
//! defines the shape and the validation rules.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DEBUG_EVERY, DEFAULT_DISPLAY_LIMIT, DEFAULT_MIN_WORD_LENGTH, DEFAULT_STOPWORDS_FILE,
    DEFAULT_WINDOW_CAPACITY, DEFAULT_WORDS_PER_FRAME,
};
use crate::error::{CoreError, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub tokenizer: TokenizerConfig,
    pub render: RenderConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sliding window size.
    pub max_queue_size: usize,
    /// Entries in each snapshot's top list.
    pub max_display_words: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_queue_size: DEFAULT_WINDOW_CAPACITY,
            max_display_words: DEFAULT_DISPLAY_LIMIT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub lowercase: bool,
    pub filter_stopwords: bool,
    /// One stopword per line. Missing file means no filtering.
    pub stopwords_file: PathBuf,
    pub min_word_length: usize,
    /// Reduce surviving words to their English (Snowball) stems.
    pub enable_stemming: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            filter_stopwords: true,
            stopwords_file: PathBuf::from(DEFAULT_STOPWORDS_FILE),
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            enable_stemming: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Tokens pushed between emitted snapshots.
    pub words_per_frame: usize,
    /// Debug renderer prints one snapshot out of this many.
    pub debug_every: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            words_per_frame: DEFAULT_WORDS_PER_FRAME,
            debug_every: DEFAULT_DEBUG_EVERY,
        }
    }
}

impl Config {
    /// Reject values the engine and renderers cannot run with.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("engine.max_queue_size", self.engine.max_queue_size),
            ("engine.max_display_words", self.engine.max_display_words),
            ("render.words_per_frame", self.render.words_per_frame),
            ("render.debug_every", self.render.debug_every),
        ];
        for (key, value) in checks {
            if value == 0 {
                return Err(CoreError::Configuration(format!(
                    "{key} must be a positive integer, got 0"
                )));
            }
        }
        Ok(())
    }
}
