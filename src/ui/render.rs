//! Screen rendering
//!
//! Each function renders one screen to a `String`; the shell decides when to
//! print. Nothing here mutates state.

use colored::Colorize;
use std::fmt::Write as _;

use super::style::{rule, Glyphs, StudioStyle};
use crate::design::{DesignConfig, HomeStyle, AVAILABLE_FEATURES, HOME_STYLES};
use crate::input::command_registry::{CommandCategory, COMMANDS, EXIT_COMMANDS};
use crate::library::{format_average, GeneratedDesign, Library};
use crate::orchestrator::GenerationOutcome;
use crate::studio::Studio;

const WIDTH: usize = 64;
/// Width of one design column in the comparison table.
const COLUMN: usize = 12;

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title.title());
    let _ = writeln!(out, "{}", rule(WIDTH).muted());
}

/// Home: the style gallery.
pub fn render_home() -> String {
    let mut out = String::new();
    header(&mut out, &format!("{} ArchVision Studio", Glyphs::house()));
    let _ = writeln!(out, "Pick a style to start a new design:\n");
    for (i, template) in HOME_STYLES.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {} {}  {}",
            format!("{}.", i + 1).accent(),
            template.style.label().bold(),
            format!("({})", template.style.slug()).muted()
        );
        let _ = writeln!(out, "     {}", template.description);
        let _ = writeln!(out, "     {}", template.preview_image.muted());
    }
    let _ = writeln!(
        out,
        "\n{}",
        "template <number|style> to begin, help for all commands".muted()
    );
    out
}

pub fn render_config(config: &DesignConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {:<12} {}", "Style", config.style().label().bold());
    let _ = writeln!(out, "  {:<12} {}", "Bedrooms", config.bedrooms());
    let _ = writeln!(out, "  {:<12} {}", "Bathrooms", config.bathrooms());
    let _ = writeln!(out, "  {:<12} {}", "Levels", config.levels());
    let _ = writeln!(out, "  {:<12} {} m²", "Lot size", config.lot_size());
    let features = if config.features().is_empty() {
        "none".muted().to_string()
    } else {
        config.features().join(", ")
    };
    let _ = writeln!(out, "  {:<12} {}", "Features", features);
    if config.has_custom_instructions() {
        let _ = writeln!(out, "  {:<12} {}", "Notes", config.custom_instructions());
    }
    out
}

fn image_line(out: &mut String, glyph: &str, label: &str, image: Option<&str>) {
    match image {
        Some(url) => {
            let _ = writeln!(out, "  {} {:<10} {}", glyph, label, url.emphasis());
        }
        None => {
            let _ = writeln!(out, "  {} {:<10} {}", glyph, label, "not generated".muted());
        }
    }
}

/// Generate: config, renderings and status of the workspace.
pub fn render_workspace(studio: &Studio) -> String {
    let ws = studio.workspace();
    let mut out = String::new();
    header(&mut out, "Design Workspace");
    out.push_str(&render_config(&ws.config));
    let _ = writeln!(out);

    image_line(&mut out, Glyphs::blueprint(), "Blueprint", ws.blueprint());
    image_line(&mut out, Glyphs::exterior(), "Exterior", ws.exterior());

    if let Some(secs) = ws.generation_time() {
        let _ = writeln!(out, "\n  Generated in {}", format!("{:.1}s", secs).accent());
    }
    if let Some(err) = studio.last_error() {
        let _ = writeln!(out, "\n  {} {}", Glyphs::cross(), err.failure());
    }
    out
}

fn library_entry(out: &mut String, design: &GeneratedDesign) {
    let images = match (&design.blueprint_url, &design.exterior_url) {
        (Some(_), Some(_)) => "blueprint + exterior",
        (Some(_), None) => "blueprint",
        (None, Some(_)) => "exterior",
        (None, None) => "no images",
    };
    let _ = writeln!(
        out,
        "  {}  {}  {}",
        design.short_id().accent(),
        design.config.style().label().bold(),
        design
            .timestamp
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .muted()
    );
    let mut details = format!(
        "{} bd / {} ba / {} lvl / {} m²  {}",
        design.config.bedrooms(),
        design.config.bathrooms(),
        design.config.levels(),
        design.config.lot_size(),
        images
    );
    if let Some(secs) = design.generation_time {
        let _ = write!(details, "  {:.1}s", secs);
    }
    let _ = write!(
        details,
        "  score {}",
        format_average(&design.scores).accent()
    );
    if design.is_recommended() {
        let _ = write!(details, "  {}", "recommended".success());
    }
    let _ = writeln!(out, "            {}", details);
}

/// Library: saved designs, newest first.
pub fn render_library(library: &Library) -> String {
    let mut out = String::new();
    header(&mut out, &format!("{} Design Library", Glyphs::library()));
    if library.is_empty() {
        let _ = writeln!(out, "  {}", "No saved designs yet.".muted());
        return out;
    }
    for design in library.iter() {
        library_entry(&mut out, design);
    }
    let _ = writeln!(
        out,
        "\n{}",
        "edit <id> to reopen, delete <id> to remove, compare for scores".muted()
    );
    out
}

fn header_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    let _ = write!(out, "  {:<22}", "");
    for cell in cells {
        let _ = write!(out, "{:>COLUMN$}", cell);
    }
    let _ = writeln!(out);
}

/// Compare: metric-by-design score table.
pub fn render_compare(library: &Library) -> String {
    let mut out = String::new();
    header(&mut out, "Compare Designs");
    if library.is_empty() {
        let _ = writeln!(out, "  {}", "Save at least one design to compare.".muted());
        return out;
    }

    let columns = library.compare_columns();
    header_row(&mut out, columns.iter().map(|c| c.label.as_str()));
    header_row(&mut out, columns.iter().map(|c| c.short_id.as_str()));
    header_row(&mut out, columns.iter().map(|c| c.style.as_str()));
    header_row(&mut out, columns.iter().map(|c| c.date.as_str()));

    for row in library.compare_matrix() {
        let is_average = row.metric == "Average";
        let label = format!("  {:<22}", row.metric);
        let _ = write!(
            out,
            "{}",
            if is_average {
                label.bold().to_string()
            } else {
                label
            }
        );
        for cell in &row.cells {
            let cell = format!("{:>COLUMN$}", cell);
            let _ = write!(
                out,
                "{}",
                if is_average {
                    cell.accent().to_string()
                } else {
                    cell
                }
            );
        }
        let _ = writeln!(out);
    }

    let _ = write!(out, "  {:<22}", "Recommended");
    for column in &columns {
        let mark = if column.recommended { Glyphs::check() } else { "" };
        let _ = write!(out, "{}", format!("{:>COLUMN$}", mark).success());
    }
    let _ = writeln!(out);
    out
}

pub fn render_help() -> String {
    let mut out = String::new();
    header(&mut out, "Commands");
    for category in CommandCategory::ALL {
        let _ = writeln!(out, "{}", category.label().accent());
        for cmd in COMMANDS.iter().filter(|c| c.category == category) {
            let synopsis = format!("{} {}", cmd.name, cmd.usage);
            let _ = writeln!(out, "  {:<34} {}", synopsis.trim_end(), cmd.description);
        }
    }
    let _ = writeln!(out, "  {:<34} Leave the studio", EXIT_COMMANDS.join(" | "));
    out
}

pub fn render_styles() -> String {
    let mut out = String::new();
    for (i, style) in HomeStyle::ALL.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {:<26} {}",
            i + 1,
            style.label(),
            style.slug().muted()
        );
    }
    out
}

pub fn render_features() -> String {
    let mut out = String::new();
    for feature in AVAILABLE_FEATURES {
        let _ = writeln!(out, "{} {}", Glyphs::bullet(), feature);
    }
    out
}

/// Summary of a headless run.
pub fn render_outcome(config: &DesignConfig, outcome: &GenerationOutcome) -> String {
    let mut out = String::new();
    out.push_str(&render_config(config));
    let _ = writeln!(out);
    if outcome.blueprint.is_some() {
        image_line(&mut out, Glyphs::blueprint(), "Blueprint", outcome.blueprint.as_deref());
    }
    if outcome.exterior.is_some() {
        image_line(&mut out, Glyphs::exterior(), "Exterior", outcome.exterior.as_deref());
    }
    let _ = writeln!(out, "\n  Generated in {:.1}s", outcome.generation_time);
    out
}
