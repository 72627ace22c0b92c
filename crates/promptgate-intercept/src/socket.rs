//! Socket-transport interceptor
//!
//! The socket primitive is synchronous and returns before any remote
//! scan could complete, so only the local tier gates it inline. On a
//! local hit the underlying send is skipped entirely and the full
//! pipeline runs detached for notification and reporting. On a miss the
//! frame is forwarded immediately and the full pipeline runs detached as
//! best-effort after-the-fact detection: it cannot retract data already
//! handed to the transport.

use promptgate_core::{Error, Result, ScanOrigin, SocketSink};
use promptgate_engine::Blocker;
use promptgate_ingress::{TrafficClassifier, classify_payload, extract_user_message};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::debug;

pub struct SocketInterceptor {
    inner: Arc<dyn SocketSink>,
    classifier: Arc<TrafficClassifier>,
    blocker: Arc<Blocker>,
    endpoint: String,
    handle: Handle,
}

impl SocketInterceptor {
    /// Wrap a socket sink for the given endpoint
    ///
    /// Detached detection tasks are spawned onto the current Tokio
    /// runtime, so construction must happen inside one.
    pub fn new(
        inner: Arc<dyn SocketSink>,
        classifier: Arc<TrafficClassifier>,
        blocker: Arc<Blocker>,
        endpoint: impl Into<String>,
    ) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| {
            Error::Internal("SocketInterceptor requires a running Tokio runtime".to_string())
        })?;

        Ok(Self {
            inner,
            classifier,
            blocker,
            endpoint: endpoint.into(),
            handle,
        })
    }

    fn spawn_full_pipeline(&self, text: String) {
        let blocker = Arc::clone(&self.blocker);
        let origin = ScanOrigin::for_socket(&self.endpoint);
        self.handle.spawn(async move {
            let _ = blocker.check_and_block(&text, &origin).await;
        });
    }
}

impl SocketSink for SocketInterceptor {
    fn send(&self, frame: &[u8]) -> Result<()> {
        if self.classifier.should_skip_url(&self.endpoint)
            || self.classifier.is_analytics_payload(frame)
        {
            return self.inner.send(frame);
        }

        let payload = classify_payload(frame);
        let Some(text) = extract_user_message(&payload) else {
            return self.inner.send(frame);
        };

        if self.blocker.local_precheck(&text) {
            // Fully suppressed: the underlying send is never invoked.
            // The detached pipeline still notifies and reports.
            debug!(endpoint = %self.endpoint, "Suppressing socket send on local detection");
            self.spawn_full_pipeline(text);
            return Ok(());
        }

        let result = self.inner.send(frame);
        self.spawn_full_pipeline(text);
        result
    }
}
