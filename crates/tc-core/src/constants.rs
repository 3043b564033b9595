/// Sliding window size: number of raw tokens kept in memory.
pub const DEFAULT_WINDOW_CAPACITY: usize = 500;

/// Maximum number of (token, count) pairs in a snapshot's top list.
pub const DEFAULT_DISPLAY_LIMIT: usize = 50;

/// Shortest word the tokenizer keeps.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 2;

/// Tokens pushed per emitted snapshot (1 = one snapshot per token).
pub const DEFAULT_WORDS_PER_FRAME: usize = 1;

/// Debug renderer prints every Nth snapshot.
pub const DEFAULT_DEBUG_EVERY: usize = 100;

/// Default stopword list location, relative to the working directory.
pub const DEFAULT_STOPWORDS_FILE: &str = "stopwords.txt";
