use super::state::{GenderMode, SessionState, TypeFilter};
use crate::card::{self, CardContent, Speakable};
use crate::catalog::WordCatalog;
use crate::deck;
use crate::error::CommandError;
use crate::speech::SpeechSink;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::str::FromStr;

/// A user intent coming from whatever front end drives the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Flip,
    Next,
    Prev,
    Reshuffle,
    SetFilter(TypeFilter),
    SetGenderMode(GenderMode),
    Speak(usize),
}

impl FromStr for Command {
    type Err = CommandError;

    /// Accepts `flip`, `next`, `prev`, `shuffle`, `filter:<type>`, `gender:<mode>`
    /// and `speak:<n>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            None => match s {
                "flip" => Ok(Command::Flip),
                "next" => Ok(Command::Next),
                "prev" => Ok(Command::Prev),
                "shuffle" | "reshuffle" => Ok(Command::Reshuffle),
                _ => Err(CommandError::UnknownCommand(s.to_string())),
            },
            Some(("filter", value)) => value.parse().map(Command::SetFilter),
            Some(("gender", value)) => value.parse().map(Command::SetGenderMode),
            Some(("speak", value)) => value
                .parse()
                .map(Command::Speak)
                .map_err(|_| CommandError::UnknownCommand(s.to_string())),
            Some(_) => Err(CommandError::UnknownCommand(s.to_string())),
        }
    }
}

/// Session metadata the renderer shows next to the card.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SessionView {
    /// 1-based, `None` for an empty deck.
    pub position: Option<usize>,
    pub deck_len: usize,
    pub seen: usize,
    pub deck_seen: usize,
    pub catalog_len: usize,
    pub flipped: bool,
    pub type_filter: TypeFilter,
    pub gender_mode: GenderMode,
}

impl SessionView {
    /// Lifetime progress through the whole catalog, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.catalog_len == 0 {
            0.0
        } else {
            self.seen as f32 / self.catalog_len as f32
        }
    }
}

/// Owns one session: the catalog, its navigation state and the random source
/// used for shuffling. Every command runs to completion before the next.
pub struct NavigationController<R = SmallRng> {
    catalog: WordCatalog,
    state: SessionState,
    rng: R,
    current: Option<CardContent>,
}

impl NavigationController<SmallRng> {
    /// Seeded from `seed` when given, otherwise from OS entropy.
    pub fn with_seed(
        catalog: WordCatalog,
        type_filter: TypeFilter,
        gender_mode: GenderMode,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::new(catalog, type_filter, gender_mode, rng)
    }
}

impl<R: Rng> NavigationController<R> {
    /// Builds the first deck and resolves its first card.
    pub fn new(catalog: WordCatalog, type_filter: TypeFilter, gender_mode: GenderMode, rng: R) -> Self {
        let mut controller = Self {
            catalog,
            state: SessionState::new(type_filter, gender_mode),
            rng,
            current: None,
        };
        controller.rebuild_deck();
        controller
    }

    pub fn apply(&mut self, command: Command, speech: &mut dyn SpeechSink) {
        match command {
            Command::Flip => self.flip(),
            Command::Next => self.next(),
            Command::Prev => self.prev(),
            Command::Reshuffle => self.reshuffle(),
            Command::SetFilter(filter) => self.set_filter(filter),
            Command::SetGenderMode(mode) => self.set_gender_mode(mode),
            Command::Speak(index) => {
                self.speak(index, speech);
            }
        }
    }

    /// Replaces the deck with a new permutation of the words matching `filter`.
    pub fn set_filter(&mut self, filter: TypeFilter) {
        self.state.type_filter = filter;
        self.rebuild_deck();
    }

    /// Affects resolution only; deck, cursor and seen-sets are untouched.
    pub fn set_gender_mode(&mut self, mode: GenderMode) {
        self.state.gender_mode = mode;
        self.refresh();
    }

    pub fn next(&mut self) {
        if self.state.advance() {
            self.render();
        }
    }

    pub fn prev(&mut self) {
        if self.state.retreat() {
            self.render();
        }
    }

    /// New random order over the same indices, back to the first card.
    pub fn reshuffle(&mut self) {
        if self.state.deck.is_empty() {
            return;
        }
        deck::shuffle(&mut self.state.deck, &mut self.rng);
        self.state.cursor = 0;
        self.render();
    }

    pub fn flip(&mut self) {
        if self.current.is_some() {
            self.state.flipped = !self.state.flipped;
        }
    }

    /// Sends the `index`-th speakable entry of the current card to `speech`.
    /// Returns whether anything was requested.
    pub fn speak(&self, index: usize, speech: &mut dyn SpeechSink) -> bool {
        match self.speakable(index) {
            Some(request) => {
                speech.speak(request);
                true
            }
            None => false,
        }
    }

    pub fn speakable(&self, index: usize) -> Option<&Speakable> {
        self.current.as_ref()?.speakables().nth(index)
    }

    pub fn current_card(&self) -> Option<&CardContent> {
        self.current.as_ref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            position: self.state.current_index().map(|_| self.state.cursor + 1),
            deck_len: self.state.deck.len(),
            seen: self.state.seen.len(),
            deck_seen: self.state.deck_seen.len(),
            catalog_len: self.catalog.len(),
            flipped: self.state.flipped,
            type_filter: self.state.type_filter,
            gender_mode: self.state.gender_mode,
        }
    }

    fn rebuild_deck(&mut self) {
        self.state.deck = deck::build(&self.catalog, self.state.type_filter, &mut self.rng);
        self.state.cursor = 0;
        self.state.deck_seen.clear();
        debug!(
            "deck rebuilt for filter '{}': {} cards",
            self.state.type_filter,
            self.state.deck.len()
        );
        self.render();
    }

    // Called after every cursor move.
    fn render(&mut self) {
        self.state.mark_current_seen();
        self.refresh();
        if let Some(position) = self.view().position {
            debug!("card {}/{} (seen {})", position, self.state.deck.len(), self.state.seen.len());
        }
    }

    fn refresh(&mut self) {
        self.current = self
            .state
            .current_index()
            .and_then(|index| self.catalog.get(index))
            .map(|word| card::resolve(word, self.state.gender_mode));
    }
}
