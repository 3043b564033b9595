use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

use crate::config::TokenizerConfig;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-zA-Z]+\b").unwrap());

/// Turns raw article text into the token stream the engine consumes.
///
/// Words are maximal ASCII letter runs; digits, apostrophes and other
/// punctuation split words and are dropped. Stemming, when enabled, runs
/// last, so stopwords and the length limit see the surface form.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    lowercase: bool,
    filter_stopwords: bool,
    min_word_length: usize,
    stem: bool,
    stopwords: HashSet<String>,
}

impl Tokenizer {
    /// `stopwords` must already be lowercase (see [`parse_stopwords`]).
    pub fn new(config: &TokenizerConfig, stopwords: HashSet<String>) -> Self {
        Self {
            lowercase: config.lowercase,
            filter_stopwords: config.filter_stopwords,
            min_word_length: config.min_word_length,
            stem: config.enable_stemming,
            stopwords,
        }
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered;
        let text = if self.lowercase {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };

        let stemmer = self.stem.then(|| Stemmer::create(Algorithm::English));

        WORD.find_iter(text)
            .map(|m| m.as_str())
            .filter(|w| w.len() >= self.min_word_length)
            .filter(|w| !self.filter_stopwords || !self.is_stopword(w))
            .map(|w| match &stemmer {
                Some(stemmer) => stemmer.stem(w).into_owned(),
                None => w.to_string(),
            })
            .collect()
    }

    fn is_stopword(&self, word: &str) -> bool {
        if word.bytes().any(|b| b.is_ascii_uppercase()) {
            self.stopwords.contains(&word.to_ascii_lowercase())
        } else {
            self.stopwords.contains(word)
        }
    }
}

/// Parse a stopword list: one word per line, trimmed and lowercased, blank
/// lines skipped.
pub fn parse_stopwords(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}
