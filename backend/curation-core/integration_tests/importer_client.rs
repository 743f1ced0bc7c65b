//! HTTP adapter tests against a mock importer service.

use curation_core::error::KeywordServiceError;
use curation_core::{ImporterClient, KeywordService};

use crate::helpers::{keywords, paper};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ImporterClient {
    ImporterClient::new(&format!("{}/api", server.uri())).expect("client")
}

/// **VALUE**: Verifies the extract endpoint round trip.
///
/// **WHY THIS MATTERS**: This is the request every curation session starts with.
///
/// **BUG THIS CATCHES**: Would catch a wrong endpoint path (e.g. the base URL
/// without a trailing slash swallowing `/api`).
#[tokio::test]
async fn given_extract_response_when_extract_keywords_then_returns_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/keywords/extract"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "primary_keywords": ["transformers", "attention"],
            "secondary_keywords": ["sequence modeling"],
            "technical_terms": ["self-attention"],
            "domain_tags": ["nlp"],
            "confidence_score": 0.92,
            "extraction_method": "llm"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.extract_keywords(&paper()).await.expect("extract");

    assert_eq!(result.primary_keywords, keywords(&["transformers", "attention"]));
    assert_eq!(result.domain_tags, keywords(&["nlp"]));
    assert_eq!(result.suggestion_count(), 5);
}

#[tokio::test]
async fn given_keywords_when_validate_keywords_then_posts_keyword_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/keywords/validate"))
        .and(body_json(json!({ "keywords": ["transformers", "nueral nets"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "valid_keywords": ["transformers"],
            "invalid_keywords": ["nueral nets"],
            "suggestions": [{ "original": "nueral nets", "suggestions": ["neural networks"] }],
            "normalized_keywords": ["transformers"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = client
        .validate_keywords(&keywords(&["transformers", "nueral nets"]))
        .await
        .expect("validate");

    assert_eq!(report.valid_keywords, vec!["transformers"]);
    assert_eq!(report.invalid_keywords, vec!["nueral nets"]);
    assert_eq!(
        report.suggestions[0].alternatives,
        keywords(&["neural networks"])
    );
}

#[tokio::test]
async fn given_domains_response_when_available_domains_then_returns_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/keywords/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "domains": ["nlp", "computer vision"],
            "technical_terms": ["transformer"]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let listing = client.available_domains().await.expect("domains");

    assert_eq!(listing.domains, vec!["nlp", "computer vision"]);
    assert_eq!(listing.technical_terms, vec!["transformer"]);
}

/// **VALUE**: Verifies non-2xx statuses become `Server` errors with the code kept.
///
/// **WHY THIS MATTERS**: Retry decisions are made from the status code.
///
/// **BUG THIS CATCHES**: Would catch an error body being parsed as a result.
#[tokio::test]
async fn given_server_error_when_extract_keywords_then_server_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/keywords/extract"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .extract_keywords(&paper())
        .await
        .expect_err("503 must fail");

    match &error {
        KeywordServiceError::Server {
            status_code,
            message,
            ..
        } => {
            assert_eq!(status_code.0, 503);
            assert_eq!(message, "overloaded");
        }
        other => panic!("Expected Server error, got {other:?}"),
    }
    assert!(error.is_retryable());
}

/// **VALUE**: Verifies a response violating the contract is rejected.
///
/// **BUG THIS CATCHES**: Would catch out-of-range scores reaching the session.
#[tokio::test]
async fn given_invalid_confidence_when_extract_keywords_then_contract_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/keywords/extract"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "primary_keywords": [],
            "secondary_keywords": [],
            "technical_terms": [],
            "domain_tags": [],
            "confidence_score": -1.0
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .extract_keywords(&paper())
        .await
        .expect_err("contract violation");

    assert!(matches!(error, KeywordServiceError::Contract { .. }));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn given_malformed_body_when_validate_keywords_then_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/keywords/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .validate_keywords(&keywords(&["a"]))
        .await
        .expect_err("malformed body");

    assert!(matches!(error, KeywordServiceError::Json { .. }));
}

/// **VALUE**: Verifies the request timeout is enforced.
///
/// **WHY THIS MATTERS**: A hung service must surface as a failure, not a
/// session stuck in Extracting.
///
/// **BUG THIS CATCHES**: Would catch the configured timeout not being applied
/// to the reqwest client.
#[tokio::test]
async fn given_slow_service_when_timeout_elapses_then_timeout_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/keywords/domains"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "domains": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = ImporterClient::with_timeout(
        &format!("{}/api/", server.uri()),
        Duration::from_millis(100),
    )
    .expect("client");
    let error = client.available_domains().await.expect_err("timeout");

    assert!(matches!(
        error,
        KeywordServiceError::Http {
            is_timeout: true,
            ..
        }
    ));
    assert!(error.is_retryable());
}

#[test]
fn given_base_url_without_trailing_slash_when_new_then_slash_appended() {
    let client = ImporterClient::new("http://127.0.0.1:8000/api").expect("client");

    assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8000/api/");
}

#[test]
fn given_malformed_base_url_when_new_then_url_parse_error() {
    let result = ImporterClient::new("not a url");

    assert!(matches!(result, Err(KeywordServiceError::UrlParse { .. })));
}
