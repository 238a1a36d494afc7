//! Integration tests for AnalysisClient using wiremock
//!
//! These tests validate the single-attempt request behavior and the mapping
//! of transport, HTTP and contract failures to the error taxonomy.

mod common;

use common::verdict_body;
use stopfake::client::AnalysisClient;
use stopfake::error::AnalysisError;
use stopfake::models::{Label, Tone};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test a successful analysis round trip
#[tokio::test]
async fn test_analyze_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_json(serde_json::json!({ "text": "article text" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(verdict_body()))
        .mount(&mock_server)
        .await;

    let client = AnalysisClient::new().unwrap();
    let url = format!("{}/analyze", mock_server.uri());
    let verdict = client.analyze(&url, "article text").await.unwrap();

    assert_eq!(verdict.result, Label::Real);
    assert_eq!(verdict.confidence, 0.87);
    assert_eq!(verdict.emotion, Tone::Factual);
    assert_eq!(verdict.reasons, vec!["r1".to_string()]);
}

/// Test that a server error maps to BackendRejected with the status code
#[tokio::test]
async fn test_server_error_maps_to_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = AnalysisClient::new().unwrap();
    let url = format!("{}/analyze", mock_server.uri());
    let err = client.analyze(&url, "text").await.unwrap_err();

    assert!(matches!(err, AnalysisError::BackendRejected(500)));
    assert!(err.to_string().contains("500"));
}

/// Test that exactly one request is made per attempt (no retry)
#[tokio::test]
async fn test_no_retry_on_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AnalysisClient::new().unwrap();
    let url = format!("{}/analyze", mock_server.uri());
    let result = client.analyze(&url, "text").await;

    assert!(result.is_err());
    // Mock expectation (exactly one call) is verified on drop
}

/// Test that an unparseable success body maps to MalformedResponse
#[tokio::test]
async fn test_malformed_body_maps_to_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&mock_server)
        .await;

    let client = AnalysisClient::new().unwrap();
    let url = format!("{}/analyze", mock_server.uri());
    let err = client.analyze(&url, "text").await.unwrap_err();

    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}

/// Test that a success body missing required fields is malformed too
#[tokio::test]
async fn test_incomplete_body_maps_to_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "real"
        })))
        .mount(&mock_server)
        .await;

    let client = AnalysisClient::new().unwrap();
    let url = format!("{}/analyze", mock_server.uri());
    let err = client.analyze(&url, "text").await.unwrap_err();

    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}

/// Test that a refused connection maps to Unreachable
#[tokio::test]
async fn test_refused_connection_maps_to_unreachable() {
    // Port 1 is never listening
    let client = AnalysisClient::new().unwrap();
    let err = client
        .analyze("http://127.0.0.1:1/analyze", "text")
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Unreachable(_)));

    // The message must be distinguishable from the HTTP-status case
    let unreachable_msg = err.to_string();
    assert!(!unreachable_msg.contains("returned status"));
}
