//! ArchVision command line
//!
//! With no subcommand (or `studio`) the interactive shell starts on the Home
//! screen. `generate` runs one headless generation and prints the result.

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::config::Config;
use crate::design::{catalog_feature, DesignConfig, HomeStyle};
use crate::download::Downloader;
use crate::errors::{ArchVisionError, GenerationError};
use crate::observability::telemetry::{init_tracing, init_tracing_verbose};
use crate::orchestrator::{GenerationKind, GenerationOutcome};
use crate::output;
use crate::shell::Shell;
use crate::studio::Studio;
use crate::ui::render;
use crate::ui::spinner::GenerationSpinner;
use crate::ui::style::set_ascii_mode;

#[derive(Parser)]
#[command(name = "archvision")]
#[command(about = "Architectural concept studio: blueprints and exteriors from a few parameters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Use plain ASCII glyphs
    #[arg(long, global = true)]
    ascii: bool,

    /// Verbose mode (debug logging and generated queries)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive studio (default)
    #[command(alias = "s")]
    Studio,

    /// Generate renderings once and exit
    #[command(alias = "g")]
    Generate(GenerateArgs),

    /// List the gallery styles
    Styles,

    /// List the optional features
    Features,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Style label, slug or gallery number
    #[arg(long, default_value = "luxury")]
    style: HomeStyle,

    #[arg(long, value_enum, default_value = "both")]
    kind: GenerationKind,

    #[arg(long)]
    bedrooms: Option<i64>,

    #[arg(long)]
    bathrooms: Option<f64>,

    #[arg(long)]
    levels: Option<i64>,

    /// Lot size in square meters
    #[arg(long)]
    lot_size: Option<i64>,

    /// Optional feature; repeat for several. Replaces the default set.
    #[arg(long = "feature", value_name = "FEATURE")]
    features: Vec<String>,

    /// Custom instructions (validated before generating)
    #[arg(long)]
    notes: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl GenerateArgs {
    fn to_design(&self) -> Result<DesignConfig> {
        let mut config = DesignConfig::from_template(self.style);
        if let Some(n) = self.bedrooms {
            config.set_bedrooms(n);
        }
        if let Some(n) = self.bathrooms {
            config.set_bathrooms(n);
        }
        if let Some(n) = self.levels {
            config.set_levels(n);
        }
        if let Some(n) = self.lot_size {
            config.set_lot_size(n);
        }
        if !self.features.is_empty() {
            config.clear_features();
            for name in &self.features {
                let Some(feature) = catalog_feature(name) else {
                    bail!("Unknown feature '{}' (see `archvision features`)", name);
                };
                if !config.has_feature(feature) {
                    config.toggle_feature(feature);
                }
            }
        }
        if let Some(ref notes) = self.notes {
            config.set_custom_instructions(notes.clone());
        }
        Ok(config)
    }
}

#[derive(Serialize)]
struct GenerateReport<'a> {
    config: &'a DesignConfig,
    #[serde(flatten)]
    outcome: &'a GenerationOutcome,
}

fn load_config(cli: &Cli) -> Result<Config> {
    // Expand ~ so configs can live in the home directory
    let path = cli.config.as_ref().map(|p| match p.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|h| h.join(rest).to_string_lossy().to_string())
            .unwrap_or_else(|| p.clone()),
        None => p.clone(),
    });

    let mut config = Config::load(path.as_deref())
        .map_err(|e| ArchVisionError::Config(format!("{:#}", e)))?;
    config.verbose_mode = cli.verbose || config.ui.verbose_mode;
    config.ui.no_color = cli.no_color || config.ui.no_color || std::env::var("NO_COLOR").is_ok();
    Ok(config)
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        init_tracing_verbose();
    } else {
        init_tracing();
    }

    let config = load_config(&cli)?;
    output::init(config.verbose_mode, config.ui.no_color);
    set_ascii_mode(cli.ascii);

    match cli.command.unwrap_or(Commands::Studio) {
        Commands::Studio => {
            let studio = Studio::from_config(&config).map_err(ArchVisionError::Api)?;
            let downloader = Downloader::new(&config).map_err(ArchVisionError::Api)?;
            let mut shell = Shell::new(studio, downloader);
            shell.run().await?;
        }
        Commands::Generate(args) => generate_once(&config, &args).await?,
        Commands::Styles => print!("{}", render::render_styles()),
        Commands::Features => print!("{}", render::render_features()),
    }
    Ok(())
}

async fn generate_once(config: &Config, args: &GenerateArgs) -> Result<()> {
    let design = args.to_design()?;
    let mut studio = Studio::from_config(config).map_err(ArchVisionError::Api)?;
    *studio.config_mut() = design;

    let spinner = (!args.json).then(|| GenerationSpinner::start(studio.subscribe()));
    let result = studio.generate(args.kind).await;
    let elapsed = studio.progress().elapsed_secs();

    match result {
        Ok(outcome) => {
            if let Some(spinner) = spinner {
                spinner.stop_success("Renderings ready", outcome.generation_time);
            }
            let design = &studio.workspace().config;
            if args.json {
                let report = GenerateReport {
                    config: design,
                    outcome: &outcome,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::render_outcome(design, &outcome));
            }
            Ok(())
        }
        Err(e) => {
            if let Some(spinner) = spinner {
                spinner.stop_error(&e.to_string(), elapsed);
            }
            if let GenerationError::GenerationFailed { ref cause } = e {
                tracing::error!("Generation failed: {:#}", cause);
            }
            Err(ArchVisionError::Generation(e).into())
        }
    }
}
