use crate::error::CommandError;
use crate::types::word::WordType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Which word types the deck is built from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Noun,
    Adj,
    Verb,
    Phrase,
}

impl TypeFilter {
    pub const ALL: [TypeFilter; 5] = [
        TypeFilter::All,
        TypeFilter::Noun,
        TypeFilter::Adj,
        TypeFilter::Verb,
        TypeFilter::Phrase,
    ];

    pub fn matches(self, kind: WordType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Noun => kind == WordType::Noun,
            TypeFilter::Adj => kind == WordType::Adj,
            TypeFilter::Verb => kind == WordType::Verb,
            TypeFilter::Phrase => kind == WordType::Phrase,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Noun => "noun",
            TypeFilter::Adj => "adj",
            TypeFilter::Verb => "verb",
            TypeFilter::Phrase => "phrase",
        }
    }
}

impl FromStr for TypeFilter {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeFilter::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CommandError::InvalidFilter(s.to_string()))
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How adjective cards show their gendered forms.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenderMode {
    #[default]
    Both,
    M,
    F,
}

impl GenderMode {
    pub const ALL: [GenderMode; 3] = [GenderMode::Both, GenderMode::M, GenderMode::F];

    pub fn as_str(self) -> &'static str {
        match self {
            GenderMode::Both => "both",
            GenderMode::M => "m",
            GenderMode::F => "f",
        }
    }
}

impl FromStr for GenderMode {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GenderMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CommandError::InvalidGenderMode(s.to_string()))
    }
}

impl fmt::Display for GenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation and progress state of one viewing session.
///
/// `seen` is lifetime progress and only ever grows. `deck_seen` is the part of
/// it collected while the current deck has been active; rebuilding the deck
/// for a new filter clears it, reshuffling does not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub type_filter: TypeFilter,
    pub gender_mode: GenderMode,
    pub deck: Vec<usize>,
    pub cursor: usize,
    pub seen: BTreeSet<usize>,
    pub deck_seen: BTreeSet<usize>,
    pub flipped: bool,
}

impl SessionState {
    pub fn new(type_filter: TypeFilter, gender_mode: GenderMode) -> Self {
        Self {
            type_filter,
            gender_mode,
            ..Self::default()
        }
    }

    /// Catalog index under the cursor, `None` while the deck is empty.
    pub fn current_index(&self) -> Option<usize> {
        self.deck.get(self.cursor).copied()
    }

    pub fn advance(&mut self) -> bool {
        if self.deck.is_empty() {
            return false;
        }
        self.cursor = (self.cursor + 1) % self.deck.len();
        true
    }

    pub fn retreat(&mut self) -> bool {
        if self.deck.is_empty() {
            return false;
        }
        self.cursor = (self.cursor + self.deck.len() - 1) % self.deck.len();
        true
    }

    /// Records the card under the cursor as seen and turns it face up.
    pub fn mark_current_seen(&mut self) {
        if let Some(index) = self.current_index() {
            self.seen.insert(index);
            self.deck_seen.insert(index);
            self.flipped = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_vocabulary_parses() {
        assert_eq!("adj".parse::<TypeFilter>(), Ok(TypeFilter::Adj));
        assert_eq!("all".parse::<TypeFilter>(), Ok(TypeFilter::All));
        assert_eq!(
            "adverb".parse::<TypeFilter>(),
            Err(CommandError::InvalidFilter("adverb".into()))
        );
        assert_eq!(
            "Noun".parse::<TypeFilter>(),
            Err(CommandError::InvalidFilter("Noun".into()))
        );
    }

    #[test]
    fn gender_vocabulary_parses() {
        assert_eq!("f".parse::<GenderMode>(), Ok(GenderMode::F));
        assert_eq!(
            "x".parse::<GenderMode>(),
            Err(CommandError::InvalidGenderMode("x".into()))
        );
    }

    #[test]
    fn filter_never_matches_unknown_types_except_all() {
        assert!(TypeFilter::All.matches(WordType::Other));
        for filter in &TypeFilter::ALL[1..] {
            assert!(!filter.matches(WordType::Other));
        }
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut state = SessionState { deck: vec![4, 2, 9], ..Default::default() };
        assert!(state.retreat());
        assert_eq!(state.cursor, 2);
        assert!(state.advance());
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn empty_deck_has_no_current_card() {
        let mut state = SessionState::default();
        assert!(!state.advance());
        assert!(!state.retreat());
        assert_eq!(state.current_index(), None);
        state.mark_current_seen();
        assert!(state.seen.is_empty());
    }
}
