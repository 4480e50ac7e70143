//! Studio line editor
//!
//! reedline-backed input with persistent history and argument-aware
//! completion.

pub mod command_registry;
mod completer;
mod prompt;

pub use completer::{SharedIds, StudioCompleter};
pub use prompt::StudioPrompt;

use anyhow::Result;
use reedline::{
    default_emacs_keybindings, ColumnarMenu, DefaultHinter, EditCommand, Emacs,
    FileBackedHistory, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Signal,
};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct InputConfig {
    pub history_path: Option<PathBuf>,
    pub max_history: usize,
    /// Command words offered for completion
    pub commands: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            history_path: dirs_history_path(),
            max_history: 1000,
            commands: command_registry::command_names(),
        }
    }
}

fn dirs_history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("archvision").join("history.txt"))
}

pub struct StudioEditor {
    editor: Reedline,
    prompt: StudioPrompt,
}

impl StudioEditor {
    pub fn new(config: InputConfig, design_ids: SharedIds) -> Result<Self> {
        let history = if let Some(path) = &config.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Box::new(FileBackedHistory::with_file(
                config.max_history,
                path.clone(),
            )?)
        } else {
            Box::new(FileBackedHistory::new(config.max_history)?)
        };

        let completer = Box::new(StudioCompleter::new(config.commands.clone(), design_ids));
        let completion_menu = Box::new(
            ColumnarMenu::default()
                .with_name("completion_menu")
                .with_columns(1)
                .with_column_padding(2)
                .with_marker(" > "),
        );
        let edit_mode = Box::new(Emacs::new(Self::build_keybindings()));

        let editor = Reedline::create()
            .with_history(history)
            .with_completer(completer)
            .with_quick_completions(true)
            .with_partial_completions(true)
            .with_hinter(Box::new(DefaultHinter::default()))
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(edit_mode)
            .with_history_exclusion_prefix(Some(" ".into()));

        Ok(Self {
            editor,
            prompt: StudioPrompt::new(),
        })
    }

    fn build_keybindings() -> Keybindings {
        let mut keybindings = default_emacs_keybindings();

        // First Tab completes inline or opens the menu, later Tabs cycle it
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::HistoryHintComplete,
                ReedlineEvent::Edit(vec![EditCommand::Complete]),
                ReedlineEvent::Menu("completion_menu".to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        keybindings.add_binding(KeyModifiers::NONE, KeyCode::Esc, ReedlineEvent::Esc);

        // Right arrow accepts the history hint
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Right,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::HistoryHintComplete,
                ReedlineEvent::Edit(vec![EditCommand::MoveRight { select: false }]),
            ]),
        );

        keybindings
    }

    pub fn read_line(&mut self) -> Result<ReadlineResult> {
        match self.editor.read_line(&self.prompt) {
            Ok(Signal::Success(line)) => Ok(ReadlineResult::Line(line)),
            Ok(Signal::CtrlC) => Ok(ReadlineResult::Interrupt),
            Ok(Signal::CtrlD) => Ok(ReadlineResult::Eof),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set_prompt_context(&mut self, view: &str, saved: usize) {
        self.prompt = StudioPrompt::with_context(view, saved);
    }
}

#[derive(Debug)]
pub enum ReadlineResult {
    Line(String),
    /// Ctrl+C
    Interrupt,
    /// Ctrl+D
    Eof,
}
