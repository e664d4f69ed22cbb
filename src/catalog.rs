use crate::error::LoadError;
use crate::types::word::{Word, WordType};
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use std::ops::Index;
use std::path::Path;

/// The word list, loaded once and never mutated. A word's position here is its
/// catalog index, the identity used by decks and seen-sets.
#[derive(Debug, Clone, Default)]
pub struct WordCatalog {
    words: Vec<Word>,
}

impl WordCatalog {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Loads the catalog from a JSON array of word records.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let words: Vec<Word> = serde_json::from_reader(BufReader::new(file))?;
        let catalog = Self::checked(words);
        info!("Loaded {} words from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let words: Vec<Word> = serde_json::from_str(json)?;
        Ok(Self::checked(words))
    }

    // Incomplete records are kept; they render with empty fields.
    fn checked(words: Vec<Word>) -> Self {
        for (index, word) in words.iter().enumerate() {
            let missing = word.missing_fields();
            if !missing.is_empty() {
                warn!(
                    "Word #{} ('{}', {}) is missing: {}",
                    index,
                    word.en,
                    word.kind,
                    missing.join(", ")
                );
            }
            if word.kind == WordType::Other {
                warn!("Word #{} ('{}') has an unrecognized type", index, word.en);
            }
        }
        Self { words }
    }

    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }
}

impl Index<usize> for WordCatalog {
    type Output = Word;

    fn index(&self, index: usize) -> &Word {
        &self.words[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_array_in_order() {
        let catalog = WordCatalog::from_json_str(
            r#"[
                {"type": "verb", "en": "to eat", "fr": "manger", "es": "comer", "it": "mangiare"},
                {"type": "noun", "en": "the book", "fr": "livre", "fr_art": "le"}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].en, "to eat");
        assert_eq!(catalog[1].kind, WordType::Noun);
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn null_root_loads_and_renders_empty() {
        let catalog = WordCatalog::from_json_str(
            r#"[{"type": "noun", "en": "the book", "fr": "livre", "fr_art": "le", "es": "libro", "es_art": "el", "it": "libro", "it_art": null, "lat": null}]"#,
        )
        .unwrap();
        let card = crate::card::resolve(&catalog[0], crate::session::state::GenderMode::Both);
        let root = card.rows.last().unwrap();
        assert_eq!(root.display, crate::card::TranslationDisplay::Text(String::new()));
        assert_eq!(card.rows[2].display, crate::card::TranslationDisplay::Text("libro".into()));
    }

    #[test]
    fn rejects_non_array() {
        let err = WordCatalog::from_json_str(r#"{"type": "noun"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = WordCatalog::load(Path::new("definitely/not/here/words.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
