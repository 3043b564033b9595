//! TOML config files.
//!
//! ```toml
//! [engine]
//! max_queue_size = 1000
//! max_display_words = 75
//!
//! [tokenizer]
//! filter_stopwords = false
//!
//! [render]
//! words_per_frame = 10
//! ```
//!
//! Missing sections and keys fall back to the built-in defaults.

use std::fs;
use std::path::Path;

use tc_core::Config;

use crate::error::{CorpusError, Result};

/// Parse and validate config text.
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
    let config = parse_config(&text)?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}
