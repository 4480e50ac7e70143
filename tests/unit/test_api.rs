//! Unit tests for the content service
//!
//! Tests cover:
//! - Classification short-circuit and fail-open behavior
//! - Random pick and fallback of image search
//! - Query construction
//! - Wire types of both backends

use std::sync::atomic::Ordering;
use std::sync::Arc;

use archvision::api::query::{blueprint_query, exterior_query, is_valid_verdict};
use archvision::api::types::{GenerateContentRequest, GenerateContentResponse, PhotoSearchResponse};
use archvision::api::{ContentProvider, RemoteContentService};
use archvision::config::ImageSearchConfig;
use archvision::design::{DesignConfig, HomeStyle};
use archvision::random::SeededRandom;

use crate::helpers::{FixedPhotos, ScriptedModel};

fn service(model: Arc<ScriptedModel>, photos: Arc<FixedPhotos>) -> RemoteContentService {
    RemoteContentService::new(
        model,
        photos,
        Arc::new(SeededRandom::new(7)),
        &ImageSearchConfig::default(),
    )
}

// ============================================================================
// Classification
// ============================================================================

mod classify_tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_input_is_valid_without_a_call() {
        let model = Arc::new(ScriptedModel::replying("INVALID"));
        let svc = service(model.clone(), Arc::new(FixedPhotos::with(&[])));

        assert!(svc.classify("").await);
        assert!(svc.classify("   \n\t").await);
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_verdicts_from_model() {
        let photos = Arc::new(FixedPhotos::with(&[]));
        let valid = service(Arc::new(ScriptedModel::replying("VALID")), photos.clone());
        let invalid = service(Arc::new(ScriptedModel::replying(" INVALID\n")), photos);

        assert!(valid.classify("terracotta roof with arched windows").await);
        assert!(!invalid.classify("a spaceship made of cheese").await);
    }

    #[tokio::test]
    async fn test_model_failure_fails_open() {
        let model = Arc::new(ScriptedModel::failing());
        let svc = service(model.clone(), Arc::new(FixedPhotos::with(&[])));
        assert!(svc.classify("stone facade").await);
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn test_verdict_parsing() {
        assert!(is_valid_verdict("VALID"));
        assert!(is_valid_verdict("valid."));
        assert!(!is_valid_verdict("INVALID"));
        assert!(!is_valid_verdict("VALID or INVALID"));
        assert!(!is_valid_verdict("maybe"));
        assert!(!is_valid_verdict(""));
    }
}

// ============================================================================
// Image search
// ============================================================================

mod image_tests {
    use super::*;

    #[tokio::test]
    async fn test_pick_is_one_of_the_results() {
        let results = ["https://img/a", "https://img/b", "https://img/c"];
        let svc = service(
            Arc::new(ScriptedModel::replying("VALID")),
            Arc::new(FixedPhotos::with(&results)),
        );
        for _ in 0..10 {
            let image = svc.fetch_image("house").await.unwrap();
            assert!(results.contains(&image.as_str()));
        }
    }

    #[tokio::test]
    async fn test_empty_results_use_fallback() {
        let photos = Arc::new(FixedPhotos::with(&[]));
        let svc = service(Arc::new(ScriptedModel::replying("VALID")), photos.clone());
        let image = svc.fetch_image("nothing matches").await.unwrap();
        assert_eq!(image, ImageSearchConfig::default().fallback_image);
        assert_eq!(photos.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_http_error_uses_fallback() {
        let svc = service(
            Arc::new(ScriptedModel::replying("VALID")),
            Arc::new(FixedPhotos::status(403)),
        );
        let image = svc.fetch_image("house").await.unwrap();
        assert_eq!(image, svc.fallback_image());
    }

    #[tokio::test]
    async fn test_custom_fallback_image() {
        let search = ImageSearchConfig {
            fallback_image: "https://example.test/placeholder.jpg".to_string(),
            ..Default::default()
        };
        let svc = RemoteContentService::new(
            Arc::new(ScriptedModel::replying("VALID")),
            Arc::new(FixedPhotos::status(500)),
            Arc::new(SeededRandom::new(1)),
            &search,
        );
        assert_eq!(
            svc.fetch_image("house").await.unwrap(),
            "https://example.test/placeholder.jpg"
        );
    }
}

// ============================================================================
// Queries
// ============================================================================

mod query_tests {
    use super::*;

    #[test]
    fn test_blueprint_query_is_fixed() {
        let q = blueprint_query(&DesignConfig::from_template(HomeStyle::Traditional));
        assert_eq!(q, blueprint_query(&DesignConfig::default()));
        assert!(q.to_lowercase().contains("blueprint"));
    }

    #[test]
    fn test_exterior_query_tracks_style_and_notes() {
        let mut config = DesignConfig::from_template(HomeStyle::Eco);
        config.set_custom_instructions("living roof");
        let q = exterior_query(&config);
        assert!(q.starts_with("Eco-Friendly Sustainable exterior house architecture"));
        assert!(q.ends_with("living roof"));
    }
}

// ============================================================================
// Wire types
// ============================================================================

mod wire_tests {
    use super::*;

    #[test]
    fn test_generate_request_shape() {
        let req = GenerateContentRequest::from_prompt("Is this a house?");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"]["parts"][0]["text"], "Is this a house?");
    }

    #[test]
    fn test_generate_response_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"VALID"}]}}]}"#;
        let resp: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.text().as_deref(), Some("VALID"));
    }

    #[test]
    fn test_generate_response_without_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.text().is_none());
    }

    #[test]
    fn test_photo_search_response_refs() {
        let body = r#"{
            "total": 2,
            "results": [
                {"id": "a", "urls": {"regular": "https://img/a-regular", "full": "https://img/a-full"}},
                {"id": "b", "urls": {}}
            ]
        }"#;
        let resp: PhotoSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.image_refs(), vec!["https://img/a-regular".to_string()]);
    }
}
