//! Unit tests for the config module
//!
//! Tests cover:
//! - Config defaults
//! - Loading from an explicit TOML file
//! - Environment overrides
//! - Exit codes of config failures

use std::io::Write;
use std::path::PathBuf;

use archvision::config::{Config, ImageSearchConfig, StudioConfig, TextModelConfig};
use archvision::errors::{get_exit_code, ArchVisionError, EXIT_CONFIG_ERROR};

mod default_tests {
    use super::*;

    #[test]
    fn test_text_model_defaults() {
        let config = TextModelConfig::default();
        assert!(config.endpoint.starts_with("https://"));
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_image_search_defaults() {
        let config = ImageSearchConfig::default();
        assert_eq!(config.per_page, 20);
        assert_eq!(config.orientation, "landscape");
        assert!(config.fallback_image.starts_with("https://"));
    }

    #[test]
    fn test_studio_defaults() {
        let config = StudioConfig::default();
        assert_eq!(config.product_name, "archvision");
        assert_eq!(config.tick_interval_ms, 100);
    }
}

mod load_tests {
    use super::*;

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[text_model]
model = "gemini-test"

[image_search]
per_page = 5
orientation = "portrait"

[studio]
product_name = "villa"
download_dir = "/tmp/villa"

[ui]
verbose_mode = true
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(config.text_model.model, "gemini-test");
        assert_eq!(config.image_search.per_page, 5);
        assert_eq!(config.image_search.orientation, "portrait");
        assert_eq!(config.studio.product_name, "villa");
        assert!(config.verbose_mode);
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[studio\ntick_interval_ms = ").unwrap();
        assert!(Config::load(Some(file.path().to_str().unwrap())).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(Config::load(Some(path.to_str().unwrap())).is_err());
    }
}

mod env_tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config: Config = toml::from_str(
            r#"
[image_search]
access_key = "from-file"
"#,
        )
        .unwrap();

        config.apply_env_overrides(|key| match key {
            "ARCHVISION_UNSPLASH_ACCESS_KEY" => Some("from-env".to_string()),
            "ARCHVISION_GEMINI_MODEL" => Some("gemini-env".to_string()),
            "ARCHVISION_DOWNLOAD_DIR" => Some("renders".to_string()),
            _ => None,
        });

        assert_eq!(config.image_search.access_key.as_deref(), Some("from-env"));
        assert_eq!(config.text_model.model, "gemini-env");
        assert_eq!(config.studio.download_dir, PathBuf::from("renders"));
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let mut config = Config::default();
        config.apply_env_overrides(|_| None);
        assert_eq!(config.text_model.model, Config::default().text_model.model);
        assert!(config.image_search.access_key.is_none());
    }
}

#[test]
fn test_config_error_exit_code() {
    let err: anyhow::Error = ArchVisionError::Config("bad file".to_string()).into();
    assert_eq!(get_exit_code(&err), EXIT_CONFIG_ERROR);
}
