//! Interactive studio shell
//!
//! Reads commands with the reedline editor (or plain stdin when the terminal
//! cannot host it), parses them with [`parse_command`] and applies them to
//! the [`Studio`].

use anyhow::Result;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{error, warn};

use crate::api::query::{blueprint_query, exterior_query};
use crate::design::{catalog_feature, HomeStyle, AVAILABLE_FEATURES};
use crate::download::{DownloadTarget, Downloader};
use crate::errors::GenerationError;
use crate::input::command_registry::SET_FIELDS;
use crate::input::{InputConfig, ReadlineResult, SharedIds, StudioEditor};
use crate::observability::telemetry::redact_secrets;
use crate::orchestrator::{GenerationKind, GenerationOutcome};
use crate::output;
use crate::studio::{Studio, View};
use crate::ui::render;
use crate::ui::spinner::GenerationSpinner;
use crate::ui::style::{Glyphs, StudioStyle};

/// A parameter edit from `set`.
#[derive(Debug, Clone, PartialEq)]
pub enum SetField {
    Style(HomeStyle),
    Bedrooms(i64),
    Bathrooms(f64),
    Levels(i64),
    LotSize(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Home,
    Template(HomeStyle),
    Generate(GenerationKind),
    Set(SetField),
    /// Catalog spelling of the feature to toggle
    Feature(&'static str),
    /// `None` clears the notes
    Notes(Option<String>),
    Show,
    Save,
    Library,
    Edit(String),
    Delete(String),
    Compare,
    /// `id` picks a saved design; `None` downloads from the workspace.
    Download {
        target: DownloadTarget,
        id: Option<String>,
    },
    Help,
    Exit,
    Empty,
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("Usage: {}", usage))
    } else {
        Ok(arg)
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("'{}' is not a valid number for {}", value, field))
}

fn parse_set(args: &str) -> Result<SetField, String> {
    let usage = "set <field> <value>";
    let (field, value) = args
        .split_once(char::is_whitespace)
        .map(|(f, v)| (f, v.trim()))
        .ok_or_else(|| format!("Usage: {} (fields: {})", usage, SET_FIELDS.join(", ")))?;

    match field.to_lowercase().as_str() {
        "style" => value.parse().map(SetField::Style),
        "bedrooms" | "beds" => parse_number(field, value).map(SetField::Bedrooms),
        "bathrooms" | "baths" => parse_number(field, value).map(SetField::Bathrooms),
        "levels" | "floors" => parse_number(field, value).map(SetField::Levels),
        "lot-size" | "lot_size" | "lot" => parse_number(field, value).map(SetField::LotSize),
        other => Err(format!(
            "Unknown field '{}' (fields: {})",
            other,
            SET_FIELDS.join(", ")
        )),
    }
}

/// Parse one line of shell input.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Command::Empty);
    }
    let (word, args) = match input.split_once(char::is_whitespace) {
        Some((w, rest)) => (w, rest.trim()),
        None => (input, ""),
    };

    match word.to_lowercase().as_str() {
        "home" => Ok(Command::Home),
        "template" | "new" => {
            let style = required(args, "template <style>")?;
            style.parse().map(Command::Template)
        }
        "generate" | "gen" => args.parse().map(Command::Generate),
        "set" => parse_set(args).map(Command::Set),
        "feature" => {
            let name = required(args, "feature <name>")?;
            catalog_feature(name).map(Command::Feature).ok_or_else(|| {
                format!(
                    "Unknown feature '{}'. Available: {}",
                    name,
                    AVAILABLE_FEATURES.join(", ")
                )
            })
        }
        "notes" => match required(args, "notes <text|clear>")? {
            "clear" => Ok(Command::Notes(None)),
            text => Ok(Command::Notes(Some(text.to_string()))),
        },
        "show" | "workspace" => Ok(Command::Show),
        "save" => Ok(Command::Save),
        "library" | "lib" => Ok(Command::Library),
        "edit" => required(args, "edit <id>").map(|id| Command::Edit(id.to_string())),
        "delete" | "rm" => required(args, "delete <id>").map(|id| Command::Delete(id.to_string())),
        "compare" => Ok(Command::Compare),
        "download" => {
            let args = required(args, "download <blueprint|exterior|both> [id]")?;
            let (target, id) = match args.split_once(char::is_whitespace) {
                Some((target, id)) => (target, Some(id.trim().to_string())),
                None => (args, None),
            };
            let target: DownloadTarget = target.parse()?;
            Ok(Command::Download { target, id })
        }
        "help" | "?" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        other => Err(format!(
            "Unknown command '{}'. Type help for commands.",
            other
        )),
    }
}

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell {
    studio: Studio,
    downloader: Downloader,
    design_ids: SharedIds,
}

impl Shell {
    pub fn new(studio: Studio, downloader: Downloader) -> Self {
        Self {
            studio,
            downloader,
            design_ids: Arc::default(),
        }
    }

    pub fn studio(&self) -> &Studio {
        &self.studio
    }

    /// Apply one command. User-facing failures of a generation are printed
    /// here; everything else is returned to the caller.
    pub async fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Empty => {}
            Command::Exit => return Ok(Flow::Exit),
            Command::Help => println!("{}", render::render_help()),
            Command::Home => {
                self.studio.navigate(View::Home);
                println!("{}", render::render_home());
            }
            Command::Template(style) => {
                self.studio.select_template(style);
                println!("{}", render::render_workspace(&self.studio));
                self.open_workspace().await;
            }
            Command::Generate(kind) => {
                self.studio.navigate(View::Generate);
                self.generate(kind).await;
            }
            Command::Set(field) => {
                let config = self.studio.config_mut();
                let shown = match field {
                    SetField::Style(style) => {
                        config.set_style(style);
                        format!("style = {}", config.style())
                    }
                    SetField::Bedrooms(n) => {
                        config.set_bedrooms(n);
                        format!("bedrooms = {}", config.bedrooms())
                    }
                    SetField::Bathrooms(n) => {
                        config.set_bathrooms(n);
                        format!("bathrooms = {}", config.bathrooms())
                    }
                    SetField::Levels(n) => {
                        config.set_levels(n);
                        format!("levels = {}", config.levels())
                    }
                    SetField::LotSize(n) => {
                        config.set_lot_size(n);
                        format!("lot size = {} m²", config.lot_size())
                    }
                };
                println!("  {} {}", Glyphs::check().success(), shown);
            }
            Command::Feature(name) => {
                let added = self.studio.config_mut().toggle_feature(name);
                let verb = if added == Some(true) { "added" } else { "removed" };
                println!("  {} {} {}", Glyphs::check().success(), name, verb);
            }
            Command::Notes(text) => {
                let config = self.studio.config_mut();
                match text {
                    Some(text) => {
                        config.set_custom_instructions(text);
                        println!("  {} Notes updated", Glyphs::check().success());
                    }
                    None => {
                        config.set_custom_instructions("");
                        println!("  {} Notes cleared", Glyphs::check().success());
                    }
                }
            }
            Command::Show => {
                self.studio.navigate(View::Generate);
                println!("{}", render::render_workspace(&self.studio));
            }
            Command::Save => {
                let saved = self.studio.save_workspace()?;
                println!(
                    "  {} Saved design {}",
                    Glyphs::check().success(),
                    saved.short_id().accent()
                );
                println!("{}", render::render_library(self.studio.library()));
            }
            Command::Library => {
                self.studio.navigate(View::Library);
                println!("{}", render::render_library(self.studio.library()));
            }
            Command::Edit(id) => {
                self.studio.edit_design(&id)?;
                println!("{}", render::render_workspace(&self.studio));
            }
            Command::Delete(id) => {
                let removed = self.studio.delete_design(&id)?;
                println!("  {} Deleted design {}", Glyphs::check().success(), removed);
                if self.studio.view() == View::Library {
                    println!("{}", render::render_library(self.studio.library()));
                }
            }
            Command::Compare => {
                self.studio.navigate(View::Compare);
                println!("{}", render::render_compare(self.studio.library()));
            }
            Command::Download { target, id } => {
                let paths = match id {
                    Some(id) => {
                        let design = self.studio.library().resolve(&id)?.clone();
                        self.downloader.download_design(&design, target).await?
                    }
                    None => {
                        self.downloader
                            .download_workspace(self.studio.workspace(), target)
                            .await?
                    }
                };
                for path in paths {
                    println!("  {} Saved {}", Glyphs::check().success(), path.display());
                }
            }
        }
        self.refresh_ids();
        Ok(Flow::Continue)
    }

    /// Parse and execute one line, printing any error.
    pub async fn handle_line(&mut self, line: &str) -> Flow {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(message) => {
                println!("  {} {}", Glyphs::cross().failure(), message);
                return Flow::Continue;
            }
        };
        match self.execute(command).await {
            Ok(flow) => flow,
            Err(e) => {
                println!("  {} {:#}", Glyphs::cross().failure(), e);
                Flow::Continue
            }
        }
    }

    async fn generate(&mut self, kind: GenerationKind) {
        let config = &self.studio.workspace().config;
        if matches!(kind, GenerationKind::Blueprint | GenerationKind::Both) {
            output::verbose(&format!("blueprint query: {}", blueprint_query(config)));
        }
        if matches!(kind, GenerationKind::Exterior | GenerationKind::Both) {
            output::verbose(&format!("exterior query: {}", exterior_query(config)));
        }

        let spinner = GenerationSpinner::start(self.studio.subscribe());
        let result = self.studio.generate(kind).await;
        self.report(spinner, result);
    }

    /// Run the generation queued by template selection, if any.
    async fn open_workspace(&mut self) {
        if !self.studio.workspace().is_auto_generate_armed() {
            return;
        }
        let spinner = GenerationSpinner::start(self.studio.subscribe());
        if let Some(result) = self.studio.open_workspace().await {
            self.report(spinner, result);
        }
    }

    fn report(
        &self,
        spinner: GenerationSpinner,
        result: std::result::Result<GenerationOutcome, GenerationError>,
    ) {
        match result {
            Ok(outcome) => {
                spinner.stop_success("Renderings ready", outcome.generation_time);
                println!("{}", render::render_workspace(&self.studio));
            }
            Err(e) => {
                if let GenerationError::GenerationFailed { ref cause } = e {
                    error!(
                        "Generation failed: {}",
                        redact_secrets(&format!("{:#}", cause))
                    );
                }
                spinner.stop_error(&e.to_string(), self.studio.progress().elapsed_secs());
            }
        }
    }

    fn refresh_ids(&self) {
        *self.design_ids.write() = self
            .studio
            .library()
            .iter()
            .map(|d| d.short_id().to_string())
            .collect();
    }

    /// Interactive loop with line editing, history and completion.
    pub async fn run(&mut self) -> Result<()> {
        let mut editor = match StudioEditor::new(InputConfig::default(), self.design_ids.clone()) {
            Ok(editor) => editor,
            Err(e) => {
                eprintln!("Note: Advanced input unavailable ({}), using basic mode", e);
                return self.run_basic().await;
            }
        };

        println!("{}", render::render_home());

        let mut consecutive_errors = 0;
        const MAX_CONSECUTIVE_ERRORS: u32 = 3;

        loop {
            if crate::is_shutdown_requested() {
                break;
            }
            editor.set_prompt_context(self.studio.view().label(), self.studio.library().len());

            let line = match editor.read_line() {
                Ok(ReadlineResult::Line(line)) => {
                    consecutive_errors = 0;
                    line
                }
                Ok(ReadlineResult::Interrupt) => {
                    consecutive_errors = 0;
                    println!("{}", "Interrupted. Type 'exit' to leave.".muted());
                    continue;
                }
                Ok(ReadlineResult::Eof) => break,
                Err(e) => {
                    consecutive_errors += 1;
                    if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                        warn!("Terminal input failing repeatedly: {}", e);
                        eprintln!("Terminal input unavailable, falling back to basic mode...");
                        return self.run_basic().await;
                    }
                    eprintln!("Input error: {}", e);
                    continue;
                }
            };

            if self.handle_line(&line).await == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Plain stdin loop for dumb terminals and piped input.
    async fn run_basic(&mut self) -> Result<()> {
        use std::io::{self, Write};

        let is_tty = io::stdin().is_terminal();
        if is_tty {
            println!("{}", render::render_home());
        }

        loop {
            if crate::is_shutdown_requested() {
                break;
            }
            if is_tty {
                print!("archvision[{}] ❯ ", self.studio.view().label());
                io::stdout().flush()?;
            }

            let mut input = String::new();
            if io::stdin().read_line(&mut input)? == 0 {
                break;
            }

            if self.handle_line(&input).await == Flow::Exit {
                break;
            }
        }
        Ok(())
    }
}
