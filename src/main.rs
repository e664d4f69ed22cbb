#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use eframe::{egui, App, NativeOptions};
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use polyglot_cards::config::{self, Config};
use polyglot_cards::session::{Command, GenderMode, NavigationController, SessionView, TypeFilter};
use polyglot_cards::speech::{self, SpeechSink};
use polyglot_cards::{CardContent, TranslationDisplay, WordCatalog};

#[derive(Parser, Debug)]
#[command(name = "polyglot_cards", about = "French / Spanish / Italian vocabulary flashcards")]
struct Cli {
    /// Settings file; missing means defaults.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
    /// Word list (JSON array), overrides `words_path`.
    #[arg(long)]
    words: Option<PathBuf>,
    /// all, noun, adj, verb or phrase.
    #[arg(long)]
    filter: Option<TypeFilter>,
    /// both, m or f.
    #[arg(long)]
    gender: Option<GenderMode>,
    /// Seed for reproducible shuffles.
    #[arg(long)]
    seed: Option<u64>,
    /// Print every card of the deck as JSON lines instead of opening a window.
    #[arg(long)]
    dump: bool,
}

impl Cli {
    fn apply_to(&self, config: &mut Config) {
        if let Some(words) = &self.words {
            config.words_path = words.clone();
        }
        if let Some(filter) = self.filter {
            config.default_filter = filter;
        }
        if let Some(gender) = self.gender {
            config.default_gender_mode = gender;
        }
        if self.seed.is_some() {
            config.shuffle_seed = self.seed;
        }
    }
}

fn open_session(config: &Config) -> Result<NavigationController, String> {
    match WordCatalog::load(&config.words_path) {
        Ok(catalog) => Ok(NavigationController::with_seed(
            catalog,
            config.default_filter,
            config.default_gender_mode,
            config.shuffle_seed,
        )),
        Err(e) => {
            error!("{}", e);
            Err(format!("Failed to load {}", config.words_path.display()))
        }
    }
}

#[derive(Serialize)]
struct DumpLine<'a> {
    position: usize,
    card: &'a CardContent,
}

fn dump_deck(mut session: NavigationController) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for position in 1..=session.view().deck_len {
        if let Some(card) = session.current_card() {
            serde_json::to_writer(&mut out, &DumpLine { position, card })?;
            writeln!(out)?;
        }
        session.next();
    }
    Ok(())
}

struct FlashcardApp {
    session: Option<NavigationController>,
    load_error: Option<String>,
    speech: Box<dyn SpeechSink>,
}

impl FlashcardApp {
    fn new(_cc: &eframe::CreationContext<'_>, config: &Config) -> Self {
        let (session, load_error) = match open_session(config) {
            Ok(session) => (Some(session), None),
            Err(msg) => (None, Some(msg)),
        };
        Self {
            session,
            load_error,
            speech: speech::from_config(&config.speech),
        }
    }

    fn keyboard_commands(ctx: &egui::Context, commands: &mut Vec<Command>) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowRight) {
                commands.push(Command::Next);
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                commands.push(Command::Prev);
            }
            if i.key_pressed(egui::Key::Space) {
                commands.push(Command::Flip);
            }
            if i.key_pressed(egui::Key::S) {
                commands.push(Command::Reshuffle);
            }
        });
    }
}

fn filter_bar(ui: &mut egui::Ui, view: &SessionView, commands: &mut Vec<Command>) {
    ui.horizontal(|ui| {
        for filter in TypeFilter::ALL {
            if ui.selectable_label(view.type_filter == filter, filter.as_str()).clicked() {
                commands.push(Command::SetFilter(filter));
            }
        }
        ui.separator();
        ui.label("Adjectives:");
        for mode in GenderMode::ALL {
            if ui.selectable_label(view.gender_mode == mode, mode.as_str()).clicked() {
                commands.push(Command::SetGenderMode(mode));
            }
        }
    });
}

fn card_face(ui: &mut egui::Ui, card: &CardContent, flipped: bool, commands: &mut Vec<Command>) {
    if !flipped {
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(card.kind.as_str()).small().weak());
            ui.add_space(24.0);
            ui.label(egui::RichText::new(&card.headline).size(40.0).strong());
            ui.add_space(24.0);
        });
        return;
    }

    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(&card.english).size(20.0).italics());
    });
    ui.add_space(8.0);

    let mut speak_index = 0;
    egui::Grid::new("translation_rows").num_columns(3).spacing([16.0, 8.0]).show(ui, |ui| {
        for row in &card.rows {
            ui.label(egui::RichText::new(&row.label).strong());
            match &row.display {
                TranslationDisplay::Text(text) => {
                    ui.label(text);
                }
                TranslationDisplay::Gendered { masculine, feminine } => {
                    ui.vertical(|ui| {
                        ui.label(format!("M  {}", masculine));
                        ui.label(format!("F  {}", feminine));
                    });
                }
            }
            ui.horizontal(|ui| {
                for _ in &row.speakable {
                    if ui.small_button("🔊").clicked() {
                        commands.push(Command::Speak(speak_index));
                    }
                    speak_index += 1;
                }
            });
            ui.end_row();
        }
    });
}

impl App for FlashcardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut commands: Vec<Command> = Vec::new();
        Self::keyboard_commands(ctx, &mut commands);

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = &self.session else {
                let msg = self.load_error.as_deref().unwrap_or("No word list loaded.");
                ui.colored_label(egui::Color32::RED, msg);
                return;
            };
            let view = session.view();

            filter_bar(ui, &view, &mut commands);
            ui.separator();

            match session.current_card() {
                Some(card) => {
                    let face = egui::Frame::group(ui.style())
                        .inner_margin(16.0)
                        .show(ui, |ui| {
                            ui.set_min_width(ui.available_width());
                            card_face(ui, card, view.flipped, &mut commands);
                        });
                    // The back carries its own buttons, so only the front flips on click.
                    if !view.flipped && face.response.interact(egui::Sense::click()).clicked() {
                        commands.push(Command::Flip);
                    }
                }
                None => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label(format!("No cards match the '{}' filter.", view.type_filter));
                        ui.add_space(40.0);
                    });
                }
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("◀ Prev").clicked() {
                    commands.push(Command::Prev);
                }
                if ui.button("Flip").clicked() {
                    commands.push(Command::Flip);
                }
                if ui.button("Shuffle").clicked() {
                    commands.push(Command::Reshuffle);
                }
                if ui.button("Next ▶").clicked() {
                    commands.push(Command::Next);
                }
                ui.separator();
                match view.position {
                    Some(position) => ui.label(format!("{} / {}", position, view.deck_len)),
                    None => ui.label(format!("0 / {}", view.deck_len)),
                };
            });

            ui.add_space(4.0);
            ui.label(format!(
                "Seen {} of {} words ({} in this deck)",
                view.seen, view.catalog_len, view.deck_seen
            ));
            ui.add(egui::ProgressBar::new(view.progress()).show_percentage());
        });

        if let Some(session) = self.session.as_mut() {
            for command in commands {
                session.apply(command, self.speech.as_mut());
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = config::load_config_or_default(&cli.config)?;
    cli.apply_to(&mut config);
    info!("Using word list {}", config.words_path.display());

    if cli.dump {
        let session = open_session(&config)?;
        dump_deck(session)?;
        return Ok(());
    }

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 620.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Polyglot Cards",
        options,
        Box::new(move |cc| Box::new(FlashcardApp::new(cc, &config))),
    )?;
    Ok(())
}
