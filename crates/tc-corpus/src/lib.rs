pub mod articles;
pub mod config_file;
pub mod error;
pub mod stopwords;

pub use articles::{discover_articles, tokenize_file, tokenize_files};
pub use config_file::{load_config, parse_config};
pub use error::{CorpusError, Result};
pub use stopwords::load_stopwords;
