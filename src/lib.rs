//! ArchVision Studio
//!
//! An architectural concept studio: pick a home style, tune a handful of
//! parameters, and get a floor-plan blueprint and a photorealistic exterior
//! back. Results can be saved to an in-memory library and compared.
//!
//! - **Design**: bounded, always-valid design configurations
//! - **Content**: a pluggable `ContentProvider` (note validation + images)
//! - **Orchestrator**: the generation state machine with a live progress feed
//! - **Studio**: explicit application state behind the interactive shell
//!
//! # Quick Start
//!
//! ```ignore
//! use archvision::{config::Config, orchestrator::GenerationKind, studio::Studio};
//!
//! let config = Config::load(None)?;
//! let mut studio = Studio::from_config(&config)?;
//! studio.select_template(archvision::design::HomeStyle::Luxury);
//! let outcome = studio.generate(GenerationKind::Both).await?;
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

// ─── Core ──────────────────────────────────────────────────────────
pub mod api;
pub mod config;
pub mod design;
pub mod errors;
pub mod library;
pub mod orchestrator;
pub mod random;
pub mod studio;

// ─── Surface ───────────────────────────────────────────────────────
pub mod cli;
pub mod download;
pub mod input;
pub mod shell;
pub mod ui;

// ─── Infrastructure ────────────────────────────────────────────────
pub mod observability;
mod output;

static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Ask long-running loops to wind down.
pub fn request_shutdown() {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

pub fn is_shutdown_requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}
