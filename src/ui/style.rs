//! Studio Style System
//!
//! Drafting-table palette: blueprint blue, brass, concrete grey.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::{Colorize, CustomColor};

/// When true, all glyphs use plain ASCII instead of Unicode.
static ASCII_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_ascii_mode(enabled: bool) {
    ASCII_MODE.store(enabled, Ordering::Relaxed);
}

pub fn is_ascii_mode() -> bool {
    ASCII_MODE.load(Ordering::Relaxed)
}

pub struct Palette;

impl Palette {
    pub const BLUEPRINT: CustomColor = CustomColor {
        r: 74,
        g: 144,
        b: 226,
    }; // #4A90E2
    pub const BRASS: CustomColor = CustomColor {
        r: 201,
        g: 162,
        b: 39,
    }; // #C9A227
    pub const CONCRETE: CustomColor = CustomColor {
        r: 140,
        g: 140,
        b: 140,
    };
    pub const IVY: CustomColor = CustomColor {
        r: 92,
        g: 184,
        b: 92,
    }; // success
    pub const BRICK: CustomColor = CustomColor {
        r: 203,
        g: 65,
        b: 84,
    }; // error
}

/// Semantic styling for studio output
pub trait StudioStyle {
    fn title(self) -> colored::ColoredString;
    fn accent(self) -> colored::ColoredString;
    fn muted(self) -> colored::ColoredString;
    fn success(self) -> colored::ColoredString;
    fn failure(self) -> colored::ColoredString;
    fn emphasis(self) -> colored::ColoredString;
}

impl StudioStyle for &str {
    fn title(self) -> colored::ColoredString {
        self.custom_color(Palette::BLUEPRINT).bold()
    }

    fn accent(self) -> colored::ColoredString {
        self.custom_color(Palette::BRASS)
    }

    fn muted(self) -> colored::ColoredString {
        self.custom_color(Palette::CONCRETE)
    }

    fn success(self) -> colored::ColoredString {
        self.custom_color(Palette::IVY)
    }

    fn failure(self) -> colored::ColoredString {
        self.custom_color(Palette::BRICK).bold()
    }

    fn emphasis(self) -> colored::ColoredString {
        self.custom_color(Palette::BLUEPRINT)
    }
}

impl StudioStyle for String {
    fn title(self) -> colored::ColoredString {
        self.as_str().title()
    }

    fn accent(self) -> colored::ColoredString {
        self.as_str().accent()
    }

    fn muted(self) -> colored::ColoredString {
        self.as_str().muted()
    }

    fn success(self) -> colored::ColoredString {
        self.as_str().success()
    }

    fn failure(self) -> colored::ColoredString {
        self.as_str().failure()
    }

    fn emphasis(self) -> colored::ColoredString {
        self.as_str().emphasis()
    }
}

/// Glyphs with plain-ASCII fallbacks for [`set_ascii_mode`].
pub struct Glyphs;

impl Glyphs {
    pub fn house() -> &'static str {
        if is_ascii_mode() {
            "[H]"
        } else {
            "🏠"
        }
    }
    pub fn blueprint() -> &'static str {
        if is_ascii_mode() {
            "[B]"
        } else {
            "📐"
        }
    }
    pub fn exterior() -> &'static str {
        if is_ascii_mode() {
            "[E]"
        } else {
            "🏡"
        }
    }
    pub fn library() -> &'static str {
        if is_ascii_mode() {
            "[L]"
        } else {
            "📚"
        }
    }
    pub fn check() -> &'static str {
        if is_ascii_mode() {
            "[ok]"
        } else {
            "✔"
        }
    }
    pub fn cross() -> &'static str {
        if is_ascii_mode() {
            "[x]"
        } else {
            "✕"
        }
    }
    pub fn bullet() -> &'static str {
        if is_ascii_mode() {
            "*"
        } else {
            "•"
        }
    }
    pub fn horiz() -> &'static str {
        if is_ascii_mode() {
            "-"
        } else {
            "─"
        }
    }
}

/// A horizontal rule `width` glyphs long.
pub fn rule(width: usize) -> String {
    Glyphs::horiz().repeat(width)
}
