//! Output Control Module
//!
//! Process-wide output flags set once at startup from CLI flags and config:
//! - `verbose_mode`: show debug detail (queries, timings) in the shell
//! - `no_color`: strip ANSI colors from everything `colored` renders

use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE_MODE: AtomicBool = AtomicBool::new(false);
static PLAIN_MODE: AtomicBool = AtomicBool::new(false);

/// Initialize output modes from config
pub(crate) fn init(verbose: bool, no_color: bool) {
    VERBOSE_MODE.store(verbose, Ordering::SeqCst);
    PLAIN_MODE.store(no_color, Ordering::SeqCst);
    if no_color {
        colored::control::set_override(false);
    }
}

#[inline]
pub(crate) fn is_verbose() -> bool {
    VERBOSE_MODE.load(Ordering::SeqCst)
}

/// True when colors and cursor control should be avoided.
#[inline]
pub(crate) fn is_plain() -> bool {
    PLAIN_MODE.load(Ordering::SeqCst)
}

/// Print a debug line in verbose mode only
pub(crate) fn verbose(message: &str) {
    if is_verbose() {
        println!("  {}", message.dimmed());
    }
}
