use crate::card::Speakable;
use crate::config::SpeechConfig;
use log::{debug, info, warn};
use std::process::{Child, Command, Stdio};

/// espeak-ng's default speed in words per minute, the `{wpm}` value at rate 1.0.
pub const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// Best-effort audio playback. Requests are fire-and-forget; a new request
/// replaces whatever is still playing.
pub trait SpeechSink {
    fn speak(&mut self, request: &Speakable);
}

/// Only logs the request. Used when no speech program is configured.
#[derive(Debug, Default)]
pub struct LogSpeech;

impl SpeechSink for LogSpeech {
    fn speak(&mut self, request: &Speakable) {
        info!("speak [{}] {}", request.locale_tag, request.text);
    }
}

/// Runs an external text-to-speech program once per request.
///
/// Argument templates may contain `{text}`, `{lang}`, `{rate}` (the configured
/// multiplier, passed through as is) and `{wpm}` (the multiplier scaled to
/// words per minute, for programs like `espeak-ng -s`).
#[derive(Debug)]
pub struct CommandSpeech {
    program: String,
    args: Vec<String>,
    rate: f32,
    playing: Option<Child>,
}

impl CommandSpeech {
    pub fn new(program: impl Into<String>, args: Vec<String>, rate: f32) -> Self {
        Self {
            program: program.into(),
            args,
            rate,
            playing: None,
        }
    }

    pub fn expand_args(&self, request: &Speakable) -> Vec<String> {
        let rate = self.rate.to_string();
        let wpm = (BASE_WORDS_PER_MINUTE * self.rate).round().to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{text}", &request.text)
                    .replace("{lang}", &request.locale_tag)
                    .replace("{rate}", &rate)
                    .replace("{wpm}", &wpm)
            })
            .collect()
    }

    /// Process id of the utterance still running, if any.
    pub fn playing_id(&self) -> Option<u32> {
        self.playing.as_ref().map(Child::id)
    }

    /// Stops the running utterance and reaps it.
    pub fn cancel(&mut self) {
        if let Some(mut child) = self.playing.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl SpeechSink for CommandSpeech {
    fn speak(&mut self, request: &Speakable) {
        self.cancel();
        if request.text.trim().is_empty() {
            debug!("nothing to say for [{}]", request.locale_tag);
            return;
        }
        let args = self.expand_args(request);
        debug!("spawning {} {:?}", self.program, args);
        match Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => self.playing = Some(child),
            Err(e) => warn!("Failed to start speech program '{}': {}", self.program, e),
        }
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Picks the sink described by the config.
pub fn from_config(config: &SpeechConfig) -> Box<dyn SpeechSink> {
    match &config.command {
        Some(program) => Box::new(CommandSpeech::new(program.clone(), config.args.clone(), config.rate)),
        None => Box::new(LogSpeech),
    }
}
