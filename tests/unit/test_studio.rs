//! Unit tests for the studio flow
//!
//! Drives `Studio` the way the shell does: template, automatic generation,
//! save, edit, delete.

use std::sync::Arc;
use std::time::Duration;

use tokio_test::{assert_err, assert_ok};

use archvision::design::HomeStyle;
use archvision::errors::{GenerationError, StudioError};
use archvision::orchestrator::GenerationKind;
use archvision::random::SeededRandom;
use archvision::studio::{Studio, View};

use crate::helpers::CountingProvider;

fn studio(provider: Arc<CountingProvider>) -> Studio {
    Studio::new(
        provider,
        Arc::new(SeededRandom::new(3)),
        Duration::from_millis(20),
    )
}

#[tokio::test]
async fn test_template_then_open_generates_both() {
    let provider = Arc::new(CountingProvider::slow(Duration::from_millis(20)));
    let mut studio = studio(provider.clone());
    assert_eq!(studio.view(), View::Home);

    studio.select_template(HomeStyle::Luxury);
    assert_eq!(studio.view(), View::Generate);
    assert_eq!(studio.workspace().config.style(), HomeStyle::Luxury);

    let outcome = studio.open_workspace().await.unwrap().unwrap();
    assert_eq!(outcome.kind, GenerationKind::Both);
    assert!(studio.workspace().blueprint().is_some());
    assert!(studio.workspace().exterior().is_some());
    assert!(studio.workspace().generation_time().unwrap() >= 0.02);
    assert_eq!(provider.fetches(), 2);

    // The automatic run happens once per template selection.
    assert!(studio.open_workspace().await.is_none());
    assert_eq!(provider.fetches(), 2);
}

#[tokio::test]
async fn test_rejected_notes_leave_workspace_untouched() {
    let provider = Arc::new(CountingProvider::rejecting());
    let mut studio = studio(provider.clone());
    studio.select_template(HomeStyle::Modern);
    studio
        .config_mut()
        .set_custom_instructions("a spaceship made of cheese");

    let err = studio.open_workspace().await.unwrap().unwrap_err();

    assert!(matches!(err, GenerationError::ValidationRejected));
    assert_eq!(provider.fetches(), 0);
    assert!(!studio.workspace().has_result());
    assert!(studio.last_error().is_some());
}

#[tokio::test]
async fn test_single_target_keeps_the_other_image() {
    let provider = Arc::new(CountingProvider::default());
    let mut studio = studio(provider);
    studio.select_template(HomeStyle::Urban);
    studio.open_workspace().await.unwrap().unwrap();
    let blueprint = studio.workspace().blueprint().map(str::to_string);

    studio.config_mut().set_custom_instructions("brick");
    assert_ok!(studio.generate(GenerationKind::Exterior).await);

    assert_eq!(studio.workspace().blueprint().map(str::to_string), blueprint);
    assert!(studio.workspace().exterior().unwrap().ends_with("brick"));
}

#[tokio::test]
async fn test_failed_run_keeps_previous_images() {
    let provider = Arc::new(CountingProvider::default());
    let mut studio = studio(provider.clone());
    studio.select_template(HomeStyle::Eco);
    studio.open_workspace().await.unwrap().unwrap();
    let blueprint = studio.workspace().blueprint().map(str::to_string);
    let exterior = studio.workspace().exterior().map(str::to_string);

    provider.set_failing(true);
    let err = assert_err!(studio.generate(GenerationKind::Both).await);

    assert!(matches!(err, GenerationError::GenerationFailed { .. }));
    assert_eq!(studio.workspace().blueprint().map(str::to_string), blueprint);
    assert_eq!(studio.workspace().exterior().map(str::to_string), exterior);
    assert!(studio.workspace().generation_time().is_none());
    assert!(studio.last_error().is_some());

    provider.set_failing(false);
    assert_ok!(studio.generate(GenerationKind::Blueprint).await);
    assert!(studio.last_error().is_none());
    assert!(studio.workspace().generation_time().is_some());
}

#[test]
fn test_save_without_result() {
    let mut studio = studio(Arc::new(CountingProvider::default()));
    assert!(matches!(
        studio.save_workspace(),
        Err(StudioError::NothingToSave)
    ));
    assert!(studio.library().is_empty());
}

#[tokio::test]
async fn test_save_edit_delete_cycle() {
    let mut studio = studio(Arc::new(CountingProvider::default()));
    studio.select_template(HomeStyle::Traditional);
    studio.open_workspace().await.unwrap().unwrap();
    studio.config_mut().set_bedrooms(6);

    let id = studio.save_workspace().unwrap().id.clone();
    assert_eq!(studio.view(), View::Library);
    assert_eq!(studio.library().len(), 1);

    // Changing the workspace after saving leaves the snapshot alone.
    studio.config_mut().set_bedrooms(2);
    assert_eq!(studio.library().get(&id).unwrap().config.bedrooms(), 6);

    studio.edit_design(&id[..8]).unwrap();
    assert_eq!(studio.view(), View::Generate);
    assert_eq!(studio.workspace().config.bedrooms(), 6);
    assert!(studio.workspace().has_result());
    assert!(studio.open_workspace().await.is_none());

    let removed = studio.delete_design(&id[..8]).unwrap();
    assert_eq!(removed, id);
    assert!(studio.library().is_empty());
    assert!(matches!(
        studio.edit_design(&id),
        Err(StudioError::DesignNotFound(_))
    ));
}

#[test]
fn test_navigation() {
    let mut studio = studio(Arc::new(CountingProvider::default()));
    studio.navigate(View::Compare);
    assert_eq!(studio.view(), View::Compare);
    studio.navigate(View::Library);
    assert_eq!(studio.view(), View::Library);
    assert!(!studio.is_generating());
}
