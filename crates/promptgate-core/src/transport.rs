//! Transport trait abstractions for the intercepted primitives
//!
//! The host application supplies implementations of these traits for its
//! real network primitives; interceptors wrap them. The request transport
//! is awaited and can be fully gated; the socket transport is synchronous
//! fire-and-forget at the platform level and cannot be retracted once the
//! underlying send has been invoked.

use crate::Result;
use bytes::Bytes;

/// An intercepted unit of work on the request transport
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: String,
    pub url: String,
    pub body: Bytes,
}

impl OutboundRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body: body.into(),
        }
    }
}

/// Response surfaced to the host page for a request-transport call
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Bytes,
}

impl TransportResponse {
    /// A 200 response carrying a JSON body
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            content_type: "application/json".to_string(),
            body: body.into(),
        }
    }
}

/// The awaitable request primitive (fetch-like)
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse>;
}

/// The synchronous socket primitive (WebSocket-send-like)
///
/// `send` must return before any asynchronous work could complete, so
/// callers can only gate it on synchronous checks.
pub trait SocketSink: Send + Sync {
    fn send(&self, frame: &[u8]) -> Result<()>;
}
