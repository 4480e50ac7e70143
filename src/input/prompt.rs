//! Studio Prompt
//!
//! Shows the active screen on the left and the library size on the right.

use nu_ansi_term::{Color, Style};
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};
use std::borrow::Cow;

pub struct StudioPrompt {
    view: String,
    saved: usize,
    left_style: Style,
    right_style: Style,
}

impl StudioPrompt {
    pub fn new() -> Self {
        Self::with_context("Home", 0)
    }

    pub fn with_context(view: &str, saved: usize) -> Self {
        Self {
            view: view.to_string(),
            saved,
            left_style: Style::new().fg(Color::Rgb(74, 144, 226)).bold(), // Blueprint
            right_style: Style::new().fg(Color::Rgb(140, 140, 140)).dimmed(), // Concrete
        }
    }
}

impl Default for StudioPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(mismatched_lifetime_syntaxes)]
impl Prompt for StudioPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Owned(
            self.left_style
                .paint(format!("archvision[{}] ", self.view))
                .to_string(),
        )
    }

    fn render_prompt_right(&self) -> Cow<str> {
        if self.saved == 0 {
            return Cow::Borrowed("");
        }
        let label = if self.saved == 1 { "design" } else { "designs" };
        Cow::Owned(
            self.right_style
                .paint(format!("[{} saved {}]", self.saved, label))
                .to_string(),
        )
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<str> {
        match edit_mode {
            PromptEditMode::Default | PromptEditMode::Emacs => Cow::Borrowed("❯ "),
            PromptEditMode::Vi(vi_mode) => match vi_mode {
                reedline::PromptViMode::Normal => Cow::Borrowed("❮ "),
                reedline::PromptViMode::Insert => Cow::Borrowed("❯ "),
            },
            PromptEditMode::Custom(s) => Cow::Owned(format!("{} ", s)),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("  ⋮ ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "search",
            PromptHistorySearchStatus::Failing => "failing search",
        };
        Cow::Owned(format!("({})[{}]: ", prefix, history_search.term))
    }
}
