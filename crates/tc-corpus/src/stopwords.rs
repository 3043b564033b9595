use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tc_core::parse_stopwords;

use crate::error::{CorpusError, Result};

/// Load a stopword list from disk.
///
/// A missing file is not an error: the run continues without stopword
/// filtering and a warning is logged.
pub fn load_stopwords(path: &Path) -> Result<HashSet<String>> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let words = parse_stopwords(&text);
            tracing::info!("loaded {} stopwords from {}", words.len(), path.display());
            Ok(words)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("stopwords file not found at {}", path.display());
            Ok(HashSet::new())
        }
        Err(e) => Err(CorpusError::io(path, e)),
    }
}
