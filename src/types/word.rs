use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum WordType {
    Noun,
    Adj,
    Verb,
    #[default]
    Phrase,
    // Anything the data file calls something else. Still loads, renders like a phrase.
    #[serde(other)]
    Other,
}

impl WordType {
    pub fn as_str(self) -> &'static str {
        match self {
            WordType::Noun => "noun",
            WordType::Adj => "adj",
            WordType::Verb => "verb",
            WordType::Phrase => "phrase",
            WordType::Other => "other",
        }
    }
}

impl fmt::Display for WordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The spoken languages every card carries a row for, in display order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    French,
    Spanish,
    Italian,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::French, Language::Spanish, Language::Italian];

    pub fn label(self) -> &'static str {
        match self {
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
        }
    }

    /// Field prefix used in the word list (`fr`, `fr_art`, `fr_m`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Italian => "it",
        }
    }

    /// Locale tag handed to the speech collaborator.
    pub fn locale_tag(self) -> &'static str {
        match self {
            Language::French => "fr-FR",
            Language::Spanish => "es-ES",
            Language::Italian => "it-IT",
        }
    }
}

// `null` in the word list reads the same as a missing field.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One record of the word list. Fields not used by `kind` stay empty.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Word {
    #[serde(rename = "type")]
    pub kind: WordType,
    pub en: String,

    // Nouns, verbs and phrases.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fr: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub es: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub it: String,

    // Noun articles.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fr_art: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub es_art: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub it_art: String,

    // Adjective example phrases, masculine and feminine.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fr_m: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fr_f: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub es_m: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub es_f: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub it_m: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub it_f: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub lat: String,
}

impl Word {
    pub fn translation(&self, lang: Language) -> &str {
        match lang {
            Language::French => &self.fr,
            Language::Spanish => &self.es,
            Language::Italian => &self.it,
        }
    }

    pub fn article(&self, lang: Language) -> &str {
        match lang {
            Language::French => &self.fr_art,
            Language::Spanish => &self.es_art,
            Language::Italian => &self.it_art,
        }
    }

    pub fn masculine(&self, lang: Language) -> &str {
        match lang {
            Language::French => &self.fr_m,
            Language::Spanish => &self.es_m,
            Language::Italian => &self.it_m,
        }
    }

    pub fn feminine(&self, lang: Language) -> &str {
        match lang {
            Language::French => &self.fr_f,
            Language::Spanish => &self.es_f,
            Language::Italian => &self.it_f,
        }
    }

    /// Names of the fields `kind` requires that are empty in this record.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.en.trim().is_empty() {
            missing.push("en".to_string());
        }
        for lang in Language::ALL {
            let key = lang.key();
            match self.kind {
                WordType::Noun => {
                    if self.translation(lang).trim().is_empty() {
                        missing.push(key.to_string());
                    }
                    if self.article(lang).trim().is_empty() {
                        missing.push(format!("{}_art", key));
                    }
                }
                WordType::Adj => {
                    if self.masculine(lang).trim().is_empty() {
                        missing.push(format!("{}_m", key));
                    }
                    if self.feminine(lang).trim().is_empty() {
                        missing.push(format!("{}_f", key));
                    }
                }
                WordType::Verb | WordType::Phrase | WordType::Other => {
                    if self.translation(lang).trim().is_empty() {
                        missing.push(key.to_string());
                    }
                }
            }
        }
        missing
    }
}
