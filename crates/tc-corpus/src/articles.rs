use std::fs;
use std::path::{Path, PathBuf};

use tc_core::Tokenizer;

use crate::error::{CorpusError, Result};

/// Every `*.txt` file directly inside `dir`, sorted by name.
///
/// Article files are expected to carry a sortable prefix (e.g. a date), so
/// name order is stream order.
pub fn discover_articles(dir: &Path) -> Result<Vec<PathBuf>> {
    let meta = fs::metadata(dir).map_err(|e| CorpusError::io(dir, e))?;
    if !meta.is_dir() {
        return Err(CorpusError::InvalidData(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let entries = fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))?;
    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    tracing::debug!("found {} article files in {}", paths.len(), dir.display());
    Ok(paths)
}

/// Read one UTF-8 article and tokenize it.
pub fn tokenize_file(tokenizer: &Tokenizer, path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
    Ok(tokenizer.tokenize(&text))
}

/// Tokenize every file in order and concatenate the token streams.
pub fn tokenize_files(tokenizer: &Tokenizer, paths: &[PathBuf]) -> Result<Vec<String>> {
    let mut all = Vec::new();
    for path in paths {
        let tokens = tokenize_file(tokenizer, path)?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed");
        tracing::info!("tokenized {name}: {} words", tokens.len());
        all.extend(tokens);
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tc_core::TokenizerConfig;
    use tempfile::TempDir;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(&TokenizerConfig::default(), HashSet::new())
    }

    #[test]
    fn test_discover_sorts_and_filters() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2024-02-01_b.txt"), "b").unwrap();
        fs::write(dir.path().join("2024-01-01_a.txt"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "skip").unwrap();
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let found = discover_articles(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["2024-01-01_a.txt", "2024-02-01_b.txt"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = discover_articles(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }

    #[test]
    fn test_discover_file_is_not_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        let err = discover_articles(&file).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidData(_)));
    }

    #[test]
    fn test_discover_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(discover_articles(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_files_concatenates_in_order() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("1.txt");
        let second = dir.path().join("2.txt");
        fs::write(&first, "Alpha beta.").unwrap();
        fs::write(&second, "Gamma, delta!").unwrap();

        let tokens = tokenize_files(&tokenizer(), &[first, second]).unwrap();
        assert_eq!(tokens, vec!["alpha", "beta", "gamma", "delta"]);
    }

    #[test]
    fn test_tokenize_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone.txt");
        let err = tokenize_files(&tokenizer(), &[missing]).unwrap_err();
        assert!(err.to_string().contains("gone.txt"));
    }
}
