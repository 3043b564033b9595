use std::fmt;
use std::io;
use std::path::PathBuf;

use tc_core::CoreError;

#[derive(Debug)]
pub enum CorpusError {
    Io { path: PathBuf, source: io::Error },
    Config(toml::de::Error),
    Core(CoreError),
    InvalidData(String),
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CorpusError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            CorpusError::Config(e) => write!(f, "config parse error: {e}"),
            CorpusError::Core(e) => write!(f, "{e}"),
            CorpusError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for CorpusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CorpusError::Io { source, .. } => Some(source),
            CorpusError::Config(e) => Some(e),
            CorpusError::Core(e) => Some(e),
            CorpusError::InvalidData(_) => None,
        }
    }
}

impl From<toml::de::Error> for CorpusError {
    fn from(e: toml::de::Error) -> Self {
        CorpusError::Config(e)
    }
}

impl From<CoreError> for CorpusError {
    fn from(e: CoreError) -> Self {
        CorpusError::Core(e)
    }
}

pub type Result<T> = std::result::Result<T, CorpusError>;
