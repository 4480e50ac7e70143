//! Unit tests for the studio shell
//!
//! Tests cover:
//! - Command parsing and aliases
//! - Executing commands against a studio with a fake provider
//! - Error surfacing for commands that cannot apply

use std::sync::Arc;
use std::time::Duration;

use archvision::config::Config;
use archvision::design::HomeStyle;
use archvision::download::{DownloadTarget, Downloader};
use archvision::errors::StudioError;
use archvision::orchestrator::GenerationKind;
use archvision::random::SeededRandom;
use archvision::shell::{parse_command, Command, Flow, SetField, Shell};
use archvision::studio::{Studio, View};

use crate::helpers::CountingProvider;

fn shell(provider: Arc<CountingProvider>, dir: &std::path::Path) -> Shell {
    let studio = Studio::new(
        provider,
        Arc::new(SeededRandom::new(11)),
        Duration::from_millis(20),
    );
    let mut config = Config::default();
    config.studio.download_dir = dir.to_path_buf();
    Shell::new(studio, Downloader::new(&config).unwrap())
}

mod parse_tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(parse_command("new eco"), Ok(Command::Template(HomeStyle::Eco)));
        assert_eq!(parse_command("gen"), Ok(Command::Generate(GenerationKind::Both)));
        assert_eq!(parse_command("lib"), Ok(Command::Library));
        assert_eq!(parse_command("workspace"), Ok(Command::Show));
        assert_eq!(parse_command("rm abc"), Ok(Command::Delete("abc".into())));
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert_eq!(parse_command("exit"), Ok(Command::Exit));
    }

    #[test]
    fn test_generate_kinds() {
        assert_eq!(
            parse_command("generate blueprint"),
            Ok(Command::Generate(GenerationKind::Blueprint))
        );
        assert_eq!(
            parse_command("generate exterior"),
            Ok(Command::Generate(GenerationKind::Exterior))
        );
        assert!(parse_command("generate interior").is_err());
    }

    #[test]
    fn test_set_fields() {
        assert_eq!(
            parse_command("set bedrooms 5"),
            Ok(Command::Set(SetField::Bedrooms(5)))
        );
        assert_eq!(
            parse_command("set bathrooms 2.5"),
            Ok(Command::Set(SetField::Bathrooms(2.5)))
        );
        assert_eq!(
            parse_command("set lot-size 900"),
            Ok(Command::Set(SetField::LotSize(900)))
        );
        assert_eq!(
            parse_command("set style Compact Urban"),
            Ok(Command::Set(SetField::Style(HomeStyle::Urban)))
        );
        assert!(parse_command("set bedrooms many").is_err());
        assert!(parse_command("set garage 1").is_err());
        assert!(parse_command("set").is_err());
    }

    #[test]
    fn test_feature_and_notes() {
        assert_eq!(
            parse_command("feature home gym"),
            Ok(Command::Feature("Home Gym"))
        );
        assert!(parse_command("feature moat").is_err());
        assert_eq!(
            parse_command("notes cedar shingles"),
            Ok(Command::Notes(Some("cedar shingles".into())))
        );
        assert_eq!(parse_command("notes clear"), Ok(Command::Notes(None)));
    }

    #[test]
    fn test_download_targets() {
        assert_eq!(
            parse_command("download both"),
            Ok(Command::Download {
                target: DownloadTarget::Both,
                id: None
            })
        );
        assert_eq!(
            parse_command("download blueprint 3f2a9c"),
            Ok(Command::Download {
                target: DownloadTarget::Blueprint,
                id: Some("3f2a9c".into())
            })
        );
        assert!(parse_command("download").is_err());
        assert!(parse_command("download floorplan").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_command("render").unwrap_err();
        assert!(err.contains("Unknown command"));
    }
}

mod execute_tests {
    use super::*;

    #[tokio::test]
    async fn test_save_before_generating() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell(Arc::new(CountingProvider::default()), dir.path());

        let err = shell.execute(Command::Save).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StudioError>(),
            Some(StudioError::NothingToSave)
        ));
    }

    #[tokio::test]
    async fn test_template_generates_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(CountingProvider::default());
        let mut shell = shell(provider.clone(), dir.path());

        let flow = shell
            .execute(Command::Template(HomeStyle::Luxury))
            .await
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(provider.fetches(), 2);
        assert!(shell.studio().workspace().has_result());

        shell.execute(Command::Save).await.unwrap();
        assert_eq!(shell.studio().library().len(), 1);
        assert_eq!(shell.studio().view(), View::Library);
    }

    #[tokio::test]
    async fn test_edits_apply_to_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell(Arc::new(CountingProvider::default()), dir.path());

        shell
            .execute(Command::Set(SetField::Bedrooms(99)))
            .await
            .unwrap();
        shell
            .execute(Command::Feature("Garage"))
            .await
            .unwrap();
        shell
            .execute(Command::Notes(Some("glass atrium".into())))
            .await
            .unwrap();

        let config = &shell.studio().workspace().config;
        assert_eq!(config.bedrooms(), 8);
        assert!(!config.has_feature("Garage"));
        assert_eq!(config.custom_instructions(), "glass atrium");
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell(Arc::new(CountingProvider::default()), dir.path());
        let err = shell
            .execute(Command::Delete("deadbeef".into()))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StudioError>(),
            Some(StudioError::DesignNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_download_without_images() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell(Arc::new(CountingProvider::default()), dir.path());
        let err = shell
            .execute(Command::Download {
                target: DownloadTarget::Both,
                id: None,
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Nothing to download"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_download_unknown_library_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell(Arc::new(CountingProvider::default()), dir.path());
        let err = shell
            .execute(Command::Download {
                target: DownloadTarget::Both,
                id: Some("deadbeef".into()),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StudioError>(),
            Some(StudioError::DesignNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_download_reads_the_saved_design() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell(Arc::new(CountingProvider::default()), dir.path());

        // Save a blueprint-only design, then give the workspace an exterior.
        shell
            .execute(Command::Generate(GenerationKind::Blueprint))
            .await
            .unwrap();
        shell.execute(Command::Save).await.unwrap();
        let id = shell.studio().library().designs()[0].short_id().to_string();
        shell
            .execute(Command::Generate(GenerationKind::Exterior))
            .await
            .unwrap();
        assert!(shell.studio().workspace().exterior().is_some());

        let err = shell
            .execute(Command::Download {
                target: DownloadTarget::Exterior,
                id: Some(id),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Nothing to download"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_handle_line_keeps_running_on_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell(Arc::new(CountingProvider::default()), dir.path());
        assert_eq!(shell.handle_line("bogus").await, Flow::Continue);
        assert_eq!(shell.handle_line("save").await, Flow::Continue);
        assert_eq!(shell.handle_line("compare").await, Flow::Continue);
        assert_eq!(shell.studio().view(), View::Compare);
        assert_eq!(shell.handle_line("quit").await, Flow::Exit);
    }
}
