use crate::session::state::GenderMode;
use crate::types::word::{Language, Word, WordType};
use log::warn;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// A single request for the speech collaborator.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Speakable {
    pub text: String,
    pub locale_tag: String,
}

impl Speakable {
    fn new(text: &str, lang: Language) -> Self {
        Self {
            text: text.to_string(),
            locale_tag: lang.locale_tag().to_string(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TranslationDisplay {
    Text(String),
    Gendered { masculine: String, feminine: String },
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LanguageRow {
    pub label: String,
    /// `None` for the Latin/root row.
    pub language: Option<Language>,
    pub display: TranslationDisplay,
    pub speakable: Vec<Speakable>,
}

/// Everything a renderer needs to draw both faces of one card.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CardContent {
    pub kind: WordType,
    /// Front of the card.
    pub headline: String,
    /// English line repeated on the back.
    pub english: String,
    pub rows: Vec<LanguageRow>,
}

impl CardContent {
    /// All speech requests on the card, rows in order, entries in order.
    /// `speak(index)` commands index into this sequence.
    pub fn speakables(&self) -> impl Iterator<Item = &Speakable> {
        self.rows.iter().flat_map(|row| row.speakable.iter())
    }
}

fn leading_article() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^the\s+").expect("leading article pattern is valid"))
}

pub fn headline(word: &Word) -> String {
    match word.kind {
        WordType::Noun => leading_article().replace(&word.en, "").into_owned(),
        _ => word.en.clone(),
    }
}

pub fn resolve(word: &Word, mode: GenderMode) -> CardContent {
    let rows = match word.kind {
        WordType::Noun => noun_rows(word),
        WordType::Adj => adjective_rows(word, mode),
        WordType::Verb | WordType::Phrase => phrase_rows(word),
        WordType::Other => {
            warn!("Rendering '{}' of unrecognized type as a phrase", word.en);
            phrase_rows(word)
        }
    };
    CardContent {
        kind: word.kind,
        headline: headline(word),
        english: word.en.clone(),
        rows,
    }
}

fn root_row(label: &str, word: &Word) -> LanguageRow {
    LanguageRow {
        label: label.to_string(),
        language: None,
        display: TranslationDisplay::Text(word.lat.clone()),
        speakable: Vec::new(),
    }
}

// Joins the non-empty parts so a missing article never leaves a stray space.
fn join_nonempty(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn noun_rows(word: &Word) -> Vec<LanguageRow> {
    let mut rows: Vec<LanguageRow> = Language::ALL
        .iter()
        .map(|&lang| {
            let text = join_nonempty(&[word.article(lang), word.translation(lang)]);
            LanguageRow {
                label: lang.label().to_string(),
                language: Some(lang),
                speakable: vec![Speakable::new(&text, lang)],
                display: TranslationDisplay::Text(text),
            }
        })
        .collect();
    rows.push(root_row("Latin", word));
    rows
}

fn adjective_rows(word: &Word, mode: GenderMode) -> Vec<LanguageRow> {
    let mut rows: Vec<LanguageRow> = Language::ALL
        .iter()
        .map(|&lang| {
            let masculine = word.masculine(lang);
            let feminine = word.feminine(lang);
            let (display, speakable) = match mode {
                GenderMode::M => (
                    TranslationDisplay::Text(masculine.to_string()),
                    vec![Speakable::new(masculine, lang)],
                ),
                GenderMode::F => (
                    TranslationDisplay::Text(feminine.to_string()),
                    vec![Speakable::new(feminine, lang)],
                ),
                GenderMode::Both => (
                    TranslationDisplay::Gendered {
                        masculine: masculine.to_string(),
                        feminine: feminine.to_string(),
                    },
                    vec![Speakable::new(masculine, lang), Speakable::new(feminine, lang)],
                ),
            };
            LanguageRow {
                label: lang.label().to_string(),
                language: Some(lang),
                display,
                speakable,
            }
        })
        .collect();
    rows.push(root_row("Root", word));
    rows
}

fn phrase_rows(word: &Word) -> Vec<LanguageRow> {
    let mut rows: Vec<LanguageRow> = Language::ALL
        .iter()
        .map(|&lang| {
            let text = word.translation(lang);
            LanguageRow {
                label: lang.label().to_string(),
                language: Some(lang),
                display: TranslationDisplay::Text(text.to_string()),
                speakable: vec![Speakable::new(text, lang)],
            }
        })
        .collect();
    rows.push(root_row("Latin", word));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Word {
        Word {
            kind: WordType::Noun,
            en: "the book".into(),
            fr: "livre".into(),
            fr_art: "le".into(),
            es: "libro".into(),
            es_art: "el".into(),
            it: "libro".into(),
            it_art: "il".into(),
            lat: "liber".into(),
            ..Default::default()
        }
    }

    fn big() -> Word {
        Word {
            kind: WordType::Adj,
            en: "big".into(),
            fr_m: "grand".into(),
            fr_f: "grande".into(),
            es_m: "grande".into(),
            es_f: "grande".into(),
            it_m: "grande".into(),
            it_f: "grande".into(),
            ..Default::default()
        }
    }

    #[test]
    fn noun_headline_drops_leading_article() {
        let card = resolve(&book(), GenderMode::Both);
        assert_eq!(card.headline, "book");
        assert_eq!(card.english, "the book");

        let french = &card.rows[0];
        assert_eq!(french.label, "French");
        assert_eq!(french.display, TranslationDisplay::Text("le livre".into()));
        assert_eq!(
            french.speakable,
            vec![Speakable { text: "le livre".into(), locale_tag: "fr-FR".into() }]
        );

        let latin = card.rows.last().unwrap();
        assert_eq!(latin.label, "Latin");
        assert_eq!(latin.display, TranslationDisplay::Text("liber".into()));
        assert!(latin.speakable.is_empty());
    }

    #[test]
    fn article_strip_is_case_insensitive_and_noun_only() {
        let mut word = book();
        word.en = "THE   Station".into();
        assert_eq!(headline(&word), "Station");

        word.en = "theatre".into();
        assert_eq!(headline(&word), "theatre");

        word.kind = WordType::Phrase;
        word.en = "the bill, please".into();
        assert_eq!(headline(&word), "the bill, please");
    }

    #[test]
    fn noun_without_article_has_no_stray_space() {
        let mut word = book();
        word.it_art.clear();
        let card = resolve(&word, GenderMode::Both);
        assert_eq!(card.rows[2].display, TranslationDisplay::Text("libro".into()));
    }

    #[test]
    fn adjective_single_gender_shows_one_form() {
        let card = resolve(&big(), GenderMode::F);
        let french = &card.rows[0];
        assert_eq!(french.display, TranslationDisplay::Text("grande".into()));
        assert_eq!(
            french.speakable,
            vec![Speakable { text: "grande".into(), locale_tag: "fr-FR".into() }]
        );

        let card = resolve(&big(), GenderMode::M);
        assert_eq!(card.rows[0].display, TranslationDisplay::Text("grand".into()));
    }

    #[test]
    fn adjective_both_genders_speaks_twice_per_language() {
        let card = resolve(&big(), GenderMode::Both);
        assert_eq!(card.rows.len(), 4);
        for row in &card.rows[..3] {
            assert_eq!(row.speakable.len(), 2);
        }
        assert_eq!(
            card.rows[0].display,
            TranslationDisplay::Gendered { masculine: "grand".into(), feminine: "grande".into() }
        );
        assert_eq!(card.rows[3].label, "Root");
        assert_eq!(card.speakables().count(), 6);
    }

    #[test]
    fn verbs_and_unknown_types_resolve_as_phrases() {
        let verb = Word {
            kind: WordType::Verb,
            en: "to eat".into(),
            fr: "manger".into(),
            es: "comer".into(),
            it: "mangiare".into(),
            ..Default::default()
        };
        let card = resolve(&verb, GenderMode::Both);
        assert_eq!(card.headline, "to eat");
        let texts: Vec<_> = card.speakables().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["manger", "comer", "mangiare"]);

        let other = Word { kind: WordType::Other, ..verb };
        assert_eq!(resolve(&other, GenderMode::M).rows, card.rows);
    }

    #[test]
    fn absent_root_renders_empty() {
        let card = resolve(&big(), GenderMode::Both);
        assert_eq!(card.rows[3].display, TranslationDisplay::Text(String::new()));
    }
}
