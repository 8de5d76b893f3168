use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use keywordsmith::api::{process_submission, AppState};
use keywordsmith::cluster::KeywordFormRequest;
use keywordsmith::llm::{GenerationBackend, GenerationError};
use keywordsmith::seo::DataSourceMode;
use keywordsmith::tools::ToolRegistry;

/// A canned backend: returns a fixed response and records whether it was
/// called at all.
struct MockBackend {
    response: Result<String, GenerationError>,
    called: Mutex<bool>,
}

impl MockBackend {
    fn returning(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            called: Mutex::new(false),
        }
    }

    fn failing(error: GenerationError) -> Self {
        Self {
            response: Err(error),
            called: Mutex::new(false),
        }
    }

    fn was_called(&self) -> bool {
        *self.called.lock().unwrap()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(
        &self,
        _prompt: &str,
        _tools: Option<&ToolRegistry>,
    ) -> Result<String, GenerationError> {
        *self.called.lock().unwrap() = true;
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(GenerationError::NoOutput) => Err(GenerationError::NoOutput),
            Err(GenerationError::Backend(e)) => Err(GenerationError::Backend(e.clone())),
            Err(GenerationError::Unparseable(_)) => {
                Err(GenerationError::Backend("unparseable".to_string()))
            }
        }
    }
}

fn state_with(backend: Arc<MockBackend>) -> AppState {
    AppState {
        backend,
        tools: Some(Arc::new(ToolRegistry::new(DataSourceMode::Simulated))),
    }
}

fn running_shoes_form() -> KeywordFormRequest {
    serde_json::from_value(json!({
        "seedKeyword": "running shoes",
        "contentType": "article",
        "websiteType": "e-commerce",
        "country": "us",
    }))
    .unwrap()
}

fn three_by_three_response() -> String {
    let entry = |kw: &str| {
        json!({
            "keyword": kw,
            "searchVolume": "880",
            "rankingDifficulty": 42,
            "trendScore": 61
        })
    };
    json!({
        "relatedKeywords": [entry("trail shoes"), entry("marathon gear"), entry("shoe care")],
        "semanticKeywords": [entry("jogging sneakers"), entry("athletic footwear"), entry("runners")],
        "phraseMatchKeywords": [
            entry("running shoes for women"),
            entry("best running shoes"),
            entry("cheap running shoes")
        ]
    })
    .to_string()
}

#[tokio::test]
async fn valid_submission_yields_three_normalized_categories() {
    let backend = Arc::new(MockBackend::returning(&three_by_three_response()));
    let state = state_with(backend.clone());

    let response = process_submission(&state, running_shoes_form()).await;
    assert!(response.success, "submission should succeed");
    assert!(backend.was_called());

    let data = response.data.unwrap();
    assert_eq!(data.related_keywords.len(), 3);
    assert_eq!(data.semantic_keywords.len(), 3);
    assert_eq!(data.phrase_match_keywords.len(), 3);

    for entry in data
        .related_keywords
        .iter()
        .chain(&data.semantic_keywords)
        .chain(&data.phrase_match_keywords)
    {
        assert!(entry.search_volume.is_finite());
        assert!(entry.ranking_difficulty.is_finite());
        // The stringly "880" from the backend was coerced.
        assert_eq!(entry.search_volume, 880.0);
    }
}

#[tokio::test]
async fn invalid_submission_never_reaches_the_backend() {
    let backend = Arc::new(MockBackend::returning(&three_by_three_response()));
    let state = state_with(backend.clone());

    let form: KeywordFormRequest = serde_json::from_value(json!({
        "seedKeyword": "",
        "contentType": "article",
        "websiteType": "e-commerce",
        "country": "us",
    }))
    .unwrap();

    let response = process_submission(&state, form).await;
    assert!(!response.success);
    assert!(response.error.unwrap().contains("required"));
    assert!(!backend.was_called(), "validation must short-circuit");
}

#[tokio::test]
async fn unparseable_backend_output_becomes_an_error_envelope() {
    let backend = Arc::new(MockBackend::returning("I could not think of any keywords."));
    let state = state_with(backend);

    let response = process_submission(&state, running_shoes_form()).await;
    assert!(!response.success);
    assert!(response
        .error
        .unwrap()
        .contains("did not return a usable result"));
}

#[tokio::test]
async fn empty_backend_output_becomes_an_error_envelope() {
    let backend = Arc::new(MockBackend::failing(GenerationError::NoOutput));
    let state = state_with(backend);

    let response = process_submission(&state, running_shoes_form()).await;
    assert!(!response.success);
    assert!(response
        .error
        .unwrap()
        .contains("did not return a usable result"));
}

#[tokio::test]
async fn backend_transport_failure_becomes_a_generic_message() {
    let backend = Arc::new(MockBackend::failing(GenerationError::Backend(
        "connection refused".to_string(),
    )));
    let state = state_with(backend);

    let response = process_submission(&state, running_shoes_form()).await;
    assert!(!response.success);
    let message = response.error.unwrap();
    assert!(message.contains("unexpected error"));
    assert!(
        !message.contains("connection refused"),
        "internal detail must not leak to the user"
    );
}

#[tokio::test]
async fn keywords_leaking_the_country_are_dropped() {
    let leaky = json!({
        "relatedKeywords": [
            {"keyword": "trail shoes", "searchVolume": 100, "rankingDifficulty": 10},
            {"keyword": "running shoes us", "searchVolume": 100, "rankingDifficulty": 10}
        ],
        "semanticKeywords": [],
        "phraseMatchKeywords": []
    })
    .to_string();
    let backend = Arc::new(MockBackend::returning(&leaky));
    let state = state_with(backend);

    let response = process_submission(&state, running_shoes_form()).await;
    let data = response.data.unwrap();
    assert_eq!(data.related_keywords.len(), 1);
    assert_eq!(data.related_keywords[0].keyword, "trail shoes");
}

#[tokio::test]
async fn fenced_json_output_is_accepted() {
    let fenced = format!("```json\n{}\n```", three_by_three_response());
    let backend = Arc::new(MockBackend::returning(&fenced));
    let state = state_with(backend);

    let response = process_submission(&state, running_shoes_form()).await;
    assert!(response.success);
}
