//! Integration tests for the HTTP oracle client using wiremock
//!
//! These tests mock the oracle backend to verify the client's HTTP
//! behavior and wire-shape conformance.

use chrono::Utc;
use promptgate_core::{DetectionOracle, ReportEvent};
use promptgate_egress::HttpOracle;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn oracle_for(server: &MockServer) -> HttpOracle {
    HttpOracle::with_client(&server.uri(), reqwest::Client::new())
}

#[tokio::test]
async fn test_validate_maps_detections() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/validate"))
        .and(body_partial_json(serde_json::json!({
            "text": "mail me at jane@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "has_pii": true,
            "has_secrets": false,
            "sanitized": "mail me at <EMAIL_ADDRESS>",
            "detections": ["EMAIL_ADDRESS"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = oracle_for(&server)
        .validate("mail me at jane@example.com")
        .await
        .unwrap();

    assert!(result.has_pii);
    assert!(!result.has_secrets);
    assert_eq!(result.categories, vec!["EMAIL_ADDRESS"]);
    assert_eq!(result.sanitized.as_deref(), Some("mail me at <EMAIL_ADDRESS>"));
}

#[tokio::test]
async fn test_approval_check_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/approvals/check/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "approved": true
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/approvals/check/other"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "approved": false
        })))
        .mount(&server)
        .await;

    let oracle = oracle_for(&server);
    assert!(oracle.is_approved("abc123").await.unwrap());
    assert!(!oracle.is_approved("other").await.unwrap());
}

#[tokio::test]
async fn test_extract_text_success_and_unsupported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/extract-text"))
        .and(body_partial_json(serde_json::json!({
            "filename": "report.pdf",
            "mime_type": "application/pdf"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "text": "quarterly numbers",
            "success": true
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/extract-text"))
        .and(body_partial_json(serde_json::json!({
            "filename": "photo.png"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "text": "",
            "success": false,
            "error": "Unsupported: image/png"
        })))
        .mount(&server)
        .await;

    let oracle = oracle_for(&server);

    let text = oracle
        .extract_text(b"%PDF-1.4", "report.pdf", "application/pdf")
        .await
        .unwrap();
    assert_eq!(text.as_deref(), Some("quarterly numbers"));

    let none = oracle
        .extract_text(b"\x89PNG", "photo.png", "image/png")
        .await
        .unwrap();
    assert_eq!(none, None);
}

#[tokio::test]
async fn test_report_event_posts_backend_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/events"))
        .and(body_partial_json(serde_json::json!({
            "url": "https://chat.example.com/api/conversation",
            "domain": "chat.example.com",
            "content_type": "prompt",
            "detection_type": "pii",
            "detections": [{"type": "SSN"}],
            "content_hash": "deadbeef"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "status": "pending"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let event = ReportEvent {
        url: "https://chat.example.com/api/conversation".to_string(),
        domain: "chat.example.com".to_string(),
        content_type: "prompt".to_string(),
        categories: vec!["SSN".to_string()],
        censored_text: "my ssn is ***-**-****".to_string(),
        content_hash: "deadbeef".to_string(),
        occurred_at: Utc::now(),
    };

    oracle_for(&server).report_event(event).await.unwrap();
}

#[tokio::test]
async fn test_backend_error_status_surfaces_as_oracle_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/validate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("classifier exploded"))
        .mount(&server)
        .await;

    let err = oracle_for(&server)
        .validate("some text to classify")
        .await
        .unwrap_err();
    assert!(matches!(err, promptgate_core::Error::Oracle(_)));
}

#[tokio::test]
async fn test_health_probe() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok"
        })))
        .mount(&server)
        .await;

    assert!(oracle_for(&server).health().await.unwrap());
}
