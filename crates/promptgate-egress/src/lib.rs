//! PromptGate Egress
//!
//! This crate provides the detection oracle clients:
//! - Direct HTTP client against the oracle backend
//! - Event-bus relay with correlation ids, for privilege-restricted hosts
//! - Shared wire shapes for both paths

pub mod client;
pub mod http_oracle;
pub mod relay;
pub mod wire;

pub use client::{HttpClientConfig, create_client};
pub use http_oracle::HttpOracle;
pub use relay::{Relay, RelayOracle, RelayRequest, RelayResponse, RelayTransport};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EgressError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Oracle returned status {status}: {message}")]
    OracleStatus { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<EgressError> for promptgate_core::Error {
    fn from(err: EgressError) -> Self {
        promptgate_core::Error::Oracle(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EgressError>;
