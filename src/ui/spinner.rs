//! Live Generation Spinner
//!
//! Animates on the current terminal line using `\r` + ANSI line clearing,
//! driven by a tokio background task. The step message and the elapsed-time
//! readout come from the orchestrator's progress feed, so the spinner shows
//! exactly what the orchestrator measures.
//!
//! Terminal capability detection: respects `TERM=dumb`, unset `TERM`, and the
//! `NO_COLOR` environment variable. When ANSI is not supported, spinner output
//! and color sequences are suppressed.

use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::orchestrator::Progress;
use crate::output;
use crate::ui::style::is_ascii_mode;

pub const SPINNER_DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_ASCII: &[&str] = &["|", "/", "-", "\\"];
const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Check if the terminal supports ANSI escape sequences.
///
/// Returns `false` if the `TERM` env var is `"dumb"` or unset, or stdout is
/// not a terminal. Does not check `NO_COLOR`; use `supports_color()` for that.
pub fn supports_ansi() -> bool {
    if !io::stdout().is_terminal() {
        return false;
    }
    match std::env::var("TERM") {
        Ok(term) => !term.is_empty() && term != "dumb",
        Err(_) => false,
    }
}

/// Check if color output is allowed (<https://no-color.org/>).
pub fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() || output::is_plain() {
        return false;
    }
    supports_ansi()
}

/// One frame of the spinner line.
pub fn render_line(frame: &str, progress: &Progress) -> String {
    format!(
        "  {} {} ({:.1}s)",
        frame,
        progress.step,
        progress.elapsed_secs()
    )
}

pub struct GenerationSpinner {
    stop_signal: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl GenerationSpinner {
    /// Start animating from a progress subscription.
    pub fn start(progress: watch::Receiver<Progress>) -> Self {
        if output::is_plain() || !supports_ansi() {
            return Self::inert();
        }

        let stop_signal = Arc::new(AtomicBool::new(false));
        let stop = stop_signal.clone();

        let handle = tokio::spawn(async move {
            let frames = if is_ascii_mode() {
                SPINNER_ASCII
            } else {
                SPINNER_DOTS
            };
            let mut tick: usize = 0;

            loop {
                if stop.load(Ordering::Relaxed) {
                    break;
                }

                let line = {
                    let snapshot = progress.borrow();
                    render_line(frames[tick % frames.len()], &snapshot)
                };
                print!("\r\x1b[2K{}", line);
                io::stdout().flush().ok();

                tick += 1;
                tokio::time::sleep(FRAME_INTERVAL).await;
            }
        });

        Self {
            stop_signal,
            handle: Some(handle),
        }
    }

    fn inert() -> Self {
        Self {
            stop_signal: Arc::new(AtomicBool::new(true)),
            handle: None,
        }
    }

    pub fn stop_success(self, message: &str, elapsed_secs: f64) {
        if supports_color() {
            self.stop_with_icon("\x1b[32m\u{2714}\x1b[0m", message, elapsed_secs);
        } else {
            self.stop_with_icon("\u{2714}", message, elapsed_secs);
        }
    }

    pub fn stop_error(self, message: &str, elapsed_secs: f64) {
        if supports_color() {
            self.stop_with_icon("\x1b[31m\u{2715}\x1b[0m", message, elapsed_secs);
        } else {
            self.stop_with_icon("\u{2715}", message, elapsed_secs);
        }
    }

    fn stop_with_icon(mut self, icon: &str, message: &str, elapsed_secs: f64) {
        let animated = self.handle.is_some();
        self.halt();
        if animated {
            print!("\r\x1b[2K");
        }
        println!("  {} {} ({:.1}s)", icon, message, elapsed_secs);
        io::stdout().flush().ok();
    }

    fn halt(&mut self) {
        self.stop_signal.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for GenerationSpinner {
    fn drop(&mut self) {
        let animated = self.handle.is_some();
        self.halt();
        if animated {
            print!("\r\x1b[2K");
            io::stdout().flush().ok();
        }
    }
}
