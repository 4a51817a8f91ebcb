use serde::Deserialize;

//
// ─── WORD ENTRY ────────────────────────────────────────────────────────────────
//

/// A quiz word as supplied by the word list.
///
/// The `word` text is the identity used for progress tracking. Answers are
/// compared case-insensitively, but the stats map keys on the exact text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub sentence: String,
    #[serde(default)]
    pub definition: String,
}

impl WordEntry {
    #[must_use]
    pub fn new(
        word: impl Into<String>,
        sentence: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            sentence: sentence.into(),
            definition: definition.into(),
        }
    }

    /// Number of characters in the word (not bytes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Classifies the word as easy (at most `easy_max_len` characters) or hard.
    #[must_use]
    pub fn difficulty(&self, easy_max_len: usize) -> Difficulty {
        if self.len() <= easy_max_len {
            Difficulty::Easy
        } else {
            Difficulty::Hard
        }
    }

    /// Returns true if the typed guess spells this word.
    ///
    /// Surrounding whitespace is ignored and the comparison is case-insensitive.
    #[must_use]
    pub fn matches_answer(&self, guess: &str) -> bool {
        guess.trim().to_lowercase() == self.word.to_lowercase()
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Length-based partition of the word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Hard,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_letters_is_still_easy() {
        let word = WordEntry::new("balloon", "", "");
        assert_eq!(word.len(), 7);
        assert_eq!(word.difficulty(7), Difficulty::Easy);
        assert_eq!(WordEntry::new("elephant", "", "").difficulty(7), Difficulty::Hard);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let word = WordEntry::new("café", "", "");
        assert_eq!(word.len(), 4);
    }

    #[test]
    fn answer_check_trims_and_ignores_case() {
        let word = WordEntry::new("Necessary", "", "");
        assert!(word.matches_answer("  necessary \n"));
        assert!(word.matches_answer("NECESSARY"));
        assert!(!word.matches_answer("neccessary"));
    }

    #[test]
    fn deserializes_word_list_record() {
        let raw = r#"{"word":"rhythm","sentence":"Keep the rhythm.","definition":"A pattern of beats."}"#;
        let entry: WordEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.word, "rhythm");
        assert_eq!(entry.definition, "A pattern of beats.");
    }

    #[test]
    fn missing_sentence_and_definition_default_to_empty() {
        let entry: WordEntry = serde_json::from_str(r#"{"word":"cat"}"#).unwrap();
        assert!(entry.sentence.is_empty());
        assert!(entry.definition.is_empty());
    }
}
