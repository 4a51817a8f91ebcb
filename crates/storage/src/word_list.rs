//! Loading the quiz word list from JSON.

use std::path::Path;

use spelling_core::model::WordEntry;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WordListError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid word list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a JSON array of `{word, sentence, definition}` records.
///
/// Entries with a blank `word` are dropped; order is preserved.
///
/// # Errors
///
/// Returns `WordListError::Parse` if `raw` is not such an array.
pub fn parse_word_list(raw: &str) -> Result<Vec<WordEntry>, WordListError> {
    let entries: Vec<WordEntry> = serde_json::from_str(raw)?;
    let total = entries.len();
    let words: Vec<WordEntry> = entries
        .into_iter()
        .filter(|entry| !entry.word.trim().is_empty())
        .collect();
    if words.len() != total {
        tracing::warn!(skipped = total - words.len(), "skipped blank word list entries");
    }
    Ok(words)
}

/// Read and parse the word list at `path`.
///
/// # Errors
///
/// Returns `WordListError` if the file cannot be read or parsed.
pub fn load_word_list(path: impl AsRef<Path>) -> Result<Vec<WordEntry>, WordListError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| WordListError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let words = parse_word_list(&raw)?;
    tracing::info!(count = words.len(), path = %path.display(), "loaded word list");
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {"word": "cat", "sentence": "The cat sat.", "definition": "A small pet."},
        {"word": "  ", "sentence": "", "definition": ""},
        {"word": "necessary", "sentence": "Sleep is necessary.", "definition": "Required."}
    ]"#;

    #[test]
    fn parses_in_order_and_drops_blank_words() {
        let words = parse_word_list(SAMPLE).unwrap();
        let names: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(names, ["cat", "necessary"]);
        assert_eq!(words[1].sentence, "Sleep is necessary.");
    }

    #[test]
    fn rejects_non_array_input() {
        let err = parse_word_list(r#"{"word": "cat"}"#).unwrap_err();
        assert!(matches!(err, WordListError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let words = load_word_list(file.path()).unwrap();
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_word_list("/definitely/not/here/words.json").unwrap_err();
        assert!(matches!(err, WordListError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here/words.json"));
    }
}
