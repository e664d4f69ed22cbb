use crate::error::ConfigError;
use crate::session::state::{GenderMode, TypeFilter};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_SPEECH_RATE: f32 = 0.85;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub words_path: PathBuf,
    pub default_filter: TypeFilter,
    pub default_gender_mode: GenderMode,
    /// Fixed seed for reproducible shuffles; OS entropy when absent.
    pub shuffle_seed: Option<u64>,
    pub speech: SpeechConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words_path: PathBuf::from("words.json"),
            default_filter: TypeFilter::All,
            default_gender_mode: GenderMode::Both,
            shuffle_seed: None,
            speech: SpeechConfig::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpeechConfig {
    pub command: Option<String>,
    pub args: Vec<String>,
    pub rate: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: vec!["-v".into(), "{lang}".into(), "-s".into(), "{wpm}".into(), "{text}".into()],
            rate: DEFAULT_SPEECH_RATE,
        }
    }
}

pub fn load_config_from_file(file_path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(file_path).map_err(|source| ConfigError::Read {
        path: file_path.to_path_buf(),
        source,
    })?;
    toml::from_str::<Config>(&contents).map_err(|source| ConfigError::Parse {
        path: file_path.to_path_buf(),
        source,
    })
}

/// Like [`load_config_from_file`], but a missing file yields the defaults.
pub fn load_config_or_default(file_path: &Path) -> Result<Config, ConfigError> {
    match load_config_from_file(file_path) {
        Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
            log::info!("No {} found, using defaults", file_path.display());
            Ok(Config::default())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str("default_filter = \"adj\"\n[speech]\ncommand = \"say\"\n").unwrap();
        assert_eq!(config.default_filter, TypeFilter::Adj);
        assert_eq!(config.default_gender_mode, GenderMode::Both);
        assert_eq!(config.words_path, PathBuf::from("words.json"));
        assert_eq!(config.speech.command.as_deref(), Some("say"));
        assert_eq!(config.speech.rate, DEFAULT_SPEECH_RATE);
    }

    #[test]
    fn unknown_filter_is_rejected() {
        assert!(toml::from_str::<Config>("default_filter = \"adverb\"").is_err());
    }
}
