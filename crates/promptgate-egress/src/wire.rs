//! Wire shapes shared by the HTTP and relay oracle clients
//!
//! These mirror the oracle backend's JSON API exactly; both clients speak
//! the same dialect so a relayed call and a direct call are
//! indistinguishable to the backend.

use promptgate_core::{DetectionResult, ReportEvent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub has_pii: bool,
    pub has_secrets: bool,
    #[serde(default)]
    pub sanitized: String,
    #[serde(default)]
    pub detections: Vec<String>,
}

impl From<ValidateResponse> for DetectionResult {
    fn from(resp: ValidateResponse) -> Self {
        let sanitized = (!resp.sanitized.is_empty()).then_some(resp.sanitized);
        DetectionResult {
            has_pii: resp.has_pii,
            has_secrets: resp.has_secrets,
            categories: resp.detections,
            sanitized,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalResponse {
    pub approved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractTextRequest {
    /// File contents, base64-encoded
    pub file_data: String,
    pub filename: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractTextResponse {
    #[serde(default)]
    pub text: String,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// One detection entry in an audit event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetection {
    #[serde(rename = "type")]
    pub detection_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked: Option<String>,
}

/// Audit event as the backend ingests it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreate {
    pub url: String,
    pub domain: String,
    pub content_type: String,
    pub detection_type: String,
    pub summary: String,
    pub detections: Vec<EventDetection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

impl From<ReportEvent> for EventCreate {
    fn from(event: ReportEvent) -> Self {
        let has_secrets = event.categories.iter().any(|c| c == "SECRETS");
        let has_pii = event.categories.iter().any(|c| c != "SECRETS");
        let detection_type = match (has_pii, has_secrets) {
            (true, true) => "pii_and_secrets",
            (false, true) => "secrets",
            _ => "pii",
        };

        EventCreate {
            url: event.url,
            domain: event.domain,
            content_type: event.content_type,
            detection_type: detection_type.to_string(),
            // The audit summary only ever carries censored content
            summary: event.censored_text.chars().take(200).collect(),
            detections: event
                .categories
                .into_iter()
                .map(|category| EventDetection {
                    detection_type: category,
                    masked: None,
                })
                .collect(),
            content_hash: Some(event.content_hash),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
