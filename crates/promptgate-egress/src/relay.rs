//! Cross-context request/response relay
//!
//! Hosts running in a privilege-restricted execution context cannot reach
//! the oracle backend directly; calls cross an event bus instead. This
//! module models that boundary explicitly: a correlation id per call, one
//! pending-call table, and timeout-driven cancellation. The bus itself is
//! behind the [`RelayTransport`] trait and carries opaque envelopes.

use crate::wire::{
    ApprovalResponse, EventCreate, ExtractTextRequest, ExtractTextResponse, ValidateRequest,
    ValidateResponse,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use dashmap::DashMap;
use promptgate_core::{DetectionOracle, DetectionResult, Error, ReportEvent, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;

/// Outbound envelope handed to the bus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayRequest {
    pub id: Uuid,
    pub method: String,
    pub params: Value,
}

/// Inbound envelope correlated back to a pending call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayResponse {
    pub id: Uuid,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<String>,
}

/// The event bus carrying envelopes across the context boundary
///
/// `dispatch` only enqueues; responses arrive out of band through
/// [`Relay::complete`].
pub trait RelayTransport: Send + Sync {
    fn dispatch(&self, request: RelayRequest) -> Result<()>;
}

/// Async request/response correlation over a fire-and-forget bus
pub struct Relay {
    transport: Arc<dyn RelayTransport>,
    pending: DashMap<Uuid, oneshot::Sender<RelayResponse>>,
    timeout: Duration,
}

impl Relay {
    pub fn new(transport: Arc<dyn RelayTransport>, timeout: Duration) -> Self {
        Self {
            transport,
            pending: DashMap::new(),
            timeout,
        }
    }

    /// Issue a call and await its correlated response or the deadline
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel();
        self.pending.insert(id, tx);

        let request = RelayRequest {
            id,
            method: method.to_string(),
            params,
        };
        if let Err(e) = self.transport.dispatch(request) {
            self.pending.remove(&id);
            return Err(e);
        }

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(response)) => match response.error {
                Some(error) => Err(Error::Oracle(error)),
                None => Ok(response.result),
            },
            Ok(Err(_)) => {
                // Sender dropped without a response; treat like a timeout
                Err(Error::Timeout(self.timeout.as_millis() as u64))
            }
            Err(_) => {
                self.pending.remove(&id);
                Err(Error::Timeout(self.timeout.as_millis() as u64))
            }
        }
    }

    /// Feed a response arriving from the bus back to its caller
    ///
    /// Returns false when no call is pending under that id: already timed
    /// out, or a duplicate delivery. Late responses are dropped silently.
    pub fn complete(&self, response: RelayResponse) -> bool {
        match self.pending.remove(&response.id) {
            Some((_, tx)) => tx.send(response).is_ok(),
            None => {
                debug!(id = %response.id, "Dropping uncorrelated relay response");
                false
            }
        }
    }

    /// Number of calls currently awaiting a response
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// Oracle client speaking the backend dialect over a relay
pub struct RelayOracle {
    relay: Arc<Relay>,
}

impl RelayOracle {
    pub fn new(relay: Arc<Relay>) -> Self {
        Self { relay }
    }

    async fn call_typed<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize,
        Resp: serde::de::DeserializeOwned,
    {
        let params = serde_json::to_value(request)?;
        let result = self.relay.call(method, params).await?;
        Ok(serde_json::from_value(result)?)
    }
}

#[async_trait::async_trait]
impl DetectionOracle for RelayOracle {
    async fn validate(&self, text: &str) -> Result<DetectionResult> {
        let response: ValidateResponse = self
            .call_typed(
                "validate",
                &ValidateRequest {
                    text: text.to_string(),
                },
            )
            .await?;
        Ok(response.into())
    }

    async fn is_approved(&self, content_hash: &str) -> Result<bool> {
        let response: ApprovalResponse = self
            .call_typed("is_approved", &serde_json::json!({ "content_hash": content_hash }))
            .await?;
        Ok(response.approved)
    }

    async fn extract_text(
        &self,
        bytes: &[u8],
        filename: &str,
        mime_type: &str,
    ) -> Result<Option<String>> {
        let response: ExtractTextResponse = self
            .call_typed(
                "extract_text",
                &ExtractTextRequest {
                    file_data: BASE64.encode(bytes),
                    filename: filename.to_string(),
                    mime_type: mime_type.to_string(),
                },
            )
            .await?;

        Ok(response.success.then_some(response.text))
    }

    async fn report_event(&self, event: ReportEvent) -> Result<()> {
        let wire: EventCreate = event.into();
        self.relay
            .call("report_event", serde_json::to_value(&wire)?)
            .await?;
        Ok(())
    }

    async fn health(&self) -> Result<bool> {
        let result = self.relay.call("health", Value::Null).await?;
        Ok(result
            .get("status")
            .and_then(Value::as_str)
            .is_some_and(|s| s == "ok"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Bus stub that records dispatched envelopes
    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<RelayRequest>>,
    }

    impl RelayTransport for RecordingTransport {
        fn dispatch(&self, request: RelayRequest) -> Result<()> {
            self.sent.lock().unwrap().push(request);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_call_resolves_on_correlated_response() {
        let transport = Arc::new(RecordingTransport::default());
        let relay = Arc::new(Relay::new(transport.clone(), Duration::from_secs(1)));

        let call = {
            let relay = relay.clone();
            tokio::spawn(async move { relay.call("validate", Value::Null).await })
        };

        // Wait until the envelope is on the bus, then answer it
        let id = loop {
            if let Some(req) = transport.sent.lock().unwrap().first() {
                break req.id;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        };

        assert!(relay.complete(RelayResponse {
            id,
            result: serde_json::json!({"ok": true}),
            error: None,
        }));

        let result = call.await.unwrap().unwrap();
        assert_eq!(result, serde_json::json!({"ok": true}));
        assert_eq!(relay.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_call_times_out_and_drains_pending() {
        let transport = Arc::new(RecordingTransport::default());
        let relay = Relay::new(transport.clone(), Duration::from_millis(20));

        let err = relay.call("validate", Value::Null).await.unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
        assert_eq!(relay.pending_count(), 0);

        // A response arriving after the deadline is dropped, not delivered
        let id = transport.sent.lock().unwrap()[0].id;
        assert!(!relay.complete(RelayResponse {
            id,
            result: Value::Null,
            error: None,
        }));
    }

    #[tokio::test]
    async fn test_error_envelope_surfaces_as_oracle_error() {
        let transport = Arc::new(RecordingTransport::default());
        let relay = Arc::new(Relay::new(transport.clone(), Duration::from_secs(1)));

        let call = {
            let relay = relay.clone();
            tokio::spawn(async move { relay.call("validate", Value::Null).await })
        };

        let id = loop {
            if let Some(req) = transport.sent.lock().unwrap().first() {
                break req.id;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        };

        relay.complete(RelayResponse {
            id,
            result: Value::Null,
            error: Some("classifier offline".to_string()),
        });

        let err = call.await.unwrap().unwrap_err();
        assert!(matches!(err, Error::Oracle(_)));
    }

    #[tokio::test]
    async fn test_dispatch_failure_cleans_up() {
        struct DeadTransport;
        impl RelayTransport for DeadTransport {
            fn dispatch(&self, _request: RelayRequest) -> Result<()> {
                Err(Error::Transport("bus closed".to_string()))
            }
        }

        let relay = Relay::new(Arc::new(DeadTransport), Duration::from_secs(1));
        assert!(relay.call("validate", Value::Null).await.is_err());
        assert_eq!(relay.pending_count(), 0);
    }
}
