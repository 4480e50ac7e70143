//! Configuration Management
//!
//! Loads studio configuration from TOML files. Configuration includes:
//! - Text model settings (endpoint, model, API key) used for note validation
//! - Image search settings (endpoint, access key, page size, fallback image)
//! - Studio behavior (progress tick interval, download directory)
//!
//! Every field has a default, so an empty file (or no file at all) is a valid
//! configuration. Credentials are usually supplied through `ARCHVISION_*`
//! environment variables rather than written to disk.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Name of the config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "archvision.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub text_model: TextModelConfig,

    #[serde(default)]
    pub image_search: ImageSearchConfig,

    #[serde(default)]
    pub studio: StudioConfig,

    #[serde(default)]
    pub ui: UiConfig,

    /// Verbose output mode - CLI override
    #[serde(skip)]
    pub verbose_mode: bool,
}

/// Remote text model used to judge whether custom instructions are on-topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextModelConfig {
    #[serde(default = "default_text_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_text_model")]
    pub model: String,
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

impl Default for TextModelConfig {
    fn default() -> Self {
        Self {
            endpoint: default_text_endpoint(),
            model: default_text_model(),
            api_key: None,
            timeout_secs: default_request_timeout(),
        }
    }
}

/// Remote photo index that stands in for image generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSearchConfig {
    #[serde(default = "default_image_endpoint")]
    pub endpoint: String,
    pub access_key: Option<String>,
    /// Candidates requested per search (the API caps this at 20)
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_orientation")]
    pub orientation: String,
    /// Returned whenever a search fails or comes back empty
    #[serde(default = "default_fallback_image")]
    pub fallback_image: String,
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

impl Default for ImageSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_image_endpoint(),
            access_key: None,
            per_page: default_per_page(),
            orientation: default_orientation(),
            fallback_image: default_fallback_image(),
            timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// How often the live elapsed-time readout refreshes while generating
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Where downloaded renderings are written
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    /// Prefix of downloaded file names
    #[serde(default = "default_product_name")]
    pub product_name: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            download_dir: default_download_dir(),
            product_name: default_product_name(),
        }
    }
}

/// UI configuration for terminal output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Default to verbose mode
    #[serde(default)]
    pub verbose_mode: bool,
    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,
}

fn default_text_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_image_endpoint() -> String {
    "https://api.unsplash.com".to_string()
}
fn default_per_page() -> u32 {
    20
}
fn default_orientation() -> String {
    "landscape".to_string()
}
fn default_fallback_image() -> String {
    "https://images.unsplash.com/photo-1518780664697-55e3ad937233?auto=format&fit=crop&w=1200&q=80"
        .to_string()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_tick_interval_ms() -> u64 {
    100
}
fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_product_name() -> String {
    "archvision".to_string()
}

impl Config {
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config from {}", p))?;
                toml::from_str(&content).context("Failed to parse config")?
            }
            None => {
                let mut default_paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
                if let Some(home) = dirs::home_dir() {
                    default_paths.push(home.join(".config/archvision/config.toml"));
                }

                let mut loaded = None;
                for p in &default_paths {
                    if let Ok(content) = std::fs::read_to_string(p) {
                        debug!("Loading config from {}", p.display());
                        loaded = Some(toml::from_str(&content).context("Failed to parse config")?);
                        break;
                    }
                }
                loaded.unwrap_or_else(|| {
                    debug!("No config file found, using defaults");
                    Self::default()
                })
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.verbose_mode = config.ui.verbose_mode;

        Ok(config)
    }

    /// Override file settings with `ARCHVISION_*` variables.
    ///
    /// The lookup is injected so tests do not have to mutate the process
    /// environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("ARCHVISION_GEMINI_ENDPOINT") {
            self.text_model.endpoint = endpoint;
        }
        if let Some(model) = lookup("ARCHVISION_GEMINI_MODEL") {
            self.text_model.model = model;
        }
        if let Some(api_key) = lookup("ARCHVISION_GEMINI_API_KEY") {
            self.text_model.api_key = Some(api_key);
        }
        if let Some(endpoint) = lookup("ARCHVISION_UNSPLASH_ENDPOINT") {
            self.image_search.endpoint = endpoint;
        }
        if let Some(key) = lookup("ARCHVISION_UNSPLASH_ACCESS_KEY") {
            self.image_search.access_key = Some(key);
        }
        if let Some(timeout) = lookup("ARCHVISION_TIMEOUT") {
            if let Ok(t) = timeout.parse::<u64>() {
                self.text_model.timeout_secs = t;
                self.image_search.timeout_secs = t;
            }
        }
        if let Some(dir) = lookup("ARCHVISION_DOWNLOAD_DIR") {
            self.studio.download_dir = PathBuf::from(dir);
        }
    }

    /// Tick interval of the live elapsed readout, never below 10ms.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.studio.tick_interval_ms.max(10))
    }
}
