// Core of the flashcard viewer: word catalog, deck shuffling, session
// navigation and card content resolution. The desktop front end lives in main.rs.
pub mod card;
pub mod catalog;
pub mod config;
pub mod deck;
pub mod error;
pub mod speech;
pub mod types {
    pub mod word;
}
pub mod session {
    pub mod controller;
    pub mod state;

    pub use controller::{Command, NavigationController, SessionView};
    pub use state::{GenderMode, SessionState, TypeFilter};
}

pub use card::{CardContent, LanguageRow, Speakable, TranslationDisplay};
pub use catalog::WordCatalog;
pub use config::Config;
pub use error::{CommandError, ConfigError, LoadError};
pub use types::word::{Language, Word, WordType};
