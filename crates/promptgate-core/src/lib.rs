//! PromptGate Core Types and Traits
//!
//! This crate provides the fundamental types and traits used throughout PromptGate:
//! - Extracted message and detection result types
//! - The detection oracle collaborator trait
//! - Transport trait abstractions for the intercepted primitives
//! - Content hashing
//! - Core error types and configuration

pub mod config;
pub mod error;
pub mod hash;
pub mod message;
pub mod oracle;
pub mod transport;

pub use config::GuardConfig;
pub use error::{Error, Result};
pub use hash::content_hash;
pub use message::{Attachment, DetectionResult, ExtractedMessage, ScanOrigin, StagedFile};
pub use oracle::{DetectionOracle, ReportEvent};
pub use transport::{HttpTransport, OutboundRequest, SocketSink, TransportResponse};
