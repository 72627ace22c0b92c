//! Detection oracle trait definitions
//!
//! The oracle is an external collaborator reached across an execution
//! boundary. Every call shares one bounded timeout applied by the caller;
//! implementations must tolerate being unreachable.

use crate::{DetectionResult, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit record emitted when content is blocked
///
/// Fire-and-forget: failures to deliver are logged and never retried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEvent {
    pub url: String,

    pub domain: String,

    /// `"prompt"` for intercepted sends, `"file"` for proactive file scans
    pub content_type: String,

    /// Category labels that fired, local findings first
    pub categories: Vec<String>,

    /// The censored rendition of the message; never the original text
    pub censored_text: String,

    /// Hash of the original, uncensored text
    pub content_hash: String,

    pub occurred_at: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait DetectionOracle: Send + Sync {
    /// Classify text for PII and secrets
    async fn validate(&self, text: &str) -> Result<DetectionResult>;

    /// Check whether an administrator approved this exact content
    async fn is_approved(&self, content_hash: &str) -> Result<bool>;

    /// Extract text from a file the engine cannot parse locally
    ///
    /// Returns `None` when the oracle does not support the format.
    async fn extract_text(
        &self,
        bytes: &[u8],
        filename: &str,
        mime_type: &str,
    ) -> Result<Option<String>>;

    /// Deliver an audit record for a blocked evaluation
    async fn report_event(&self, event: ReportEvent) -> Result<()>;

    /// Probe collaborator liveness; never consulted on the decision path
    async fn health(&self) -> Result<bool>;
}
