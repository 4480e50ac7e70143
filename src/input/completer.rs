//! Studio Autocomplete
//!
//! Context-aware completion for command words and their arguments: style
//! slugs, feature names, generation kinds, `set` fields and saved design ids.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use parking_lot::RwLock;
use reedline::{Completer, Span, Suggestion};
use std::sync::Arc;

use super::command_registry::{command_description, SET_FIELDS};
use crate::design::{HomeStyle, AVAILABLE_FEATURES};

/// Saved design ids, refreshed by the shell after every command.
pub type SharedIds = Arc<RwLock<Vec<String>>>;

const KINDS: &[&str] = &["blueprint", "exterior", "both"];

pub struct StudioCompleter {
    commands: Vec<String>,
    design_ids: SharedIds,
    matcher: SkimMatcherV2,
}

impl StudioCompleter {
    pub fn new(commands: Vec<String>, design_ids: SharedIds) -> Self {
        Self {
            commands,
            design_ids,
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Fuzzy-rank `candidates` against `prefix`, best first.
    fn rank<I>(&self, candidates: I, prefix: &str, span: Span) -> Vec<Suggestion>
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        let mut scored: Vec<(i64, Suggestion)> = candidates
            .into_iter()
            .filter_map(|(value, description)| {
                self.matcher.fuzzy_match(&value, prefix).map(|score| {
                    (
                        score,
                        Suggestion {
                            value,
                            description,
                            span,
                            append_whitespace: true,
                            ..Default::default()
                        },
                    )
                })
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, s)| s).collect()
    }

    fn detect_context(&self, before_cursor: &str) -> CompletionContext {
        let Some((command, rest)) = before_cursor.split_once(' ') else {
            return CompletionContext::Command;
        };
        match command {
            "template" => CompletionContext::Style,
            "feature" => CompletionContext::Feature,
            "download" if rest.contains(' ') => CompletionContext::DesignId,
            "generate" | "download" => CompletionContext::Kind,
            "edit" | "delete" => CompletionContext::DesignId,
            "set" if !rest.contains(' ') => CompletionContext::SetField,
            "set" if rest.starts_with("style ") => CompletionContext::Style,
            _ => CompletionContext::None,
        }
    }
}

enum CompletionContext {
    Command,
    Style,
    Feature,
    Kind,
    SetField,
    DesignId,
    None,
}

impl Completer for StudioCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let before_cursor = line.get(..pos).unwrap_or(line);
        let word_start = before_cursor
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        let word = &before_cursor[word_start..];
        let word_span = Span::new(word_start, pos);

        match self.detect_context(before_cursor) {
            CompletionContext::Command => {
                let candidates = self.commands.iter().map(|c| {
                    (
                        c.clone(),
                        command_description(c).map(str::to_string),
                    )
                });
                self.rank(candidates, word, word_span)
            }
            CompletionContext::Style => {
                let candidates = HomeStyle::ALL
                    .iter()
                    .map(|s| (s.slug().to_string(), Some(s.label().to_string())));
                self.rank(candidates, word, word_span)
            }
            CompletionContext::Feature => {
                // Feature names contain spaces; replace everything after
                // the command word.
                let arg_start = "feature ".len();
                let prefix = before_cursor.get(arg_start..).unwrap_or("");
                let candidates = AVAILABLE_FEATURES.iter().map(|f| (f.to_string(), None));
                self.rank(candidates, prefix, Span::new(arg_start, pos))
            }
            CompletionContext::Kind => {
                let candidates = KINDS.iter().map(|k| (k.to_string(), None));
                self.rank(candidates, word, word_span)
            }
            CompletionContext::SetField => {
                let candidates = SET_FIELDS.iter().map(|f| (f.to_string(), None));
                self.rank(candidates, word, word_span)
            }
            CompletionContext::DesignId => {
                let ids = self.design_ids.read().clone();
                let candidates = ids.into_iter().map(|id| (id, None));
                self.rank(candidates, word, word_span)
            }
            CompletionContext::None => Vec::new(),
        }
    }
}
