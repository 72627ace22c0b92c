//! Request-transport interceptor
//!
//! The request primitive is awaitable, so this wrapper suspends the
//! caller until the full pipeline resolves: the original call only
//! proceeds after an explicit allow decision, and a block substitutes a
//! synthetic success response.

use crate::synth::synthesize_blocked_response;
use promptgate_core::{
    HttpTransport, OutboundRequest, Result, ScanOrigin, TransportResponse,
};
use promptgate_engine::{Blocker, FileCache};
use promptgate_ingress::{TrafficClassifier, classify_payload, extract_message};
use std::sync::Arc;
use tracing::debug;

pub struct RequestInterceptor {
    inner: Arc<dyn HttpTransport>,
    classifier: Arc<TrafficClassifier>,
    blocker: Arc<Blocker>,
    file_cache: Arc<FileCache>,
}

impl RequestInterceptor {
    pub fn new(
        inner: Arc<dyn HttpTransport>,
        classifier: Arc<TrafficClassifier>,
        blocker: Arc<Blocker>,
        file_cache: Arc<FileCache>,
    ) -> Self {
        Self {
            inner,
            classifier,
            blocker,
            file_cache,
        }
    }

    /// The text under evaluation: the user message plus cached content
    /// for any file the message references by name
    fn candidate_text(&self, message: &promptgate_core::ExtractedMessage) -> String {
        let mut candidate = message.text.clone();
        for attachment in &message.attachments {
            if let Some(content) = self.file_cache.get(&attachment.name) {
                if !candidate.is_empty() {
                    candidate.push(' ');
                }
                candidate.push_str(&content);
            }
        }
        candidate
    }
}

#[async_trait::async_trait]
impl HttpTransport for RequestInterceptor {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse> {
        // Telemetry short-circuits the whole pipeline unmodified
        if self.classifier.should_skip_url(&request.url)
            || self.classifier.is_analytics_payload(&request.body)
        {
            return self.inner.send(request).await;
        }

        let payload = classify_payload(&request.body);
        let Some(message) = extract_message(&payload) else {
            return self.inner.send(request).await;
        };

        let candidate = self.candidate_text(&message);
        if candidate.trim().is_empty() {
            return self.inner.send(request).await;
        }

        let origin = ScanOrigin::for_request(&request.url);
        if self.blocker.check_and_block(&candidate, &origin).await {
            debug!(url = %request.url, "Substituting synthetic response for blocked request");
            return Ok(synthesize_blocked_response(&payload));
        }

        self.inner.send(request).await
    }
}
