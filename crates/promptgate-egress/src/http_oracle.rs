//! Direct HTTP oracle client

use crate::client::{HttpClientConfig, create_client};
use crate::wire::{
    ApprovalResponse, EventCreate, ExtractTextRequest, ExtractTextResponse, ValidateRequest,
    ValidateResponse,
};
use crate::{EgressError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use promptgate_core::config::OracleConfig;
use promptgate_core::{DetectionOracle, DetectionResult, ReportEvent};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Oracle client speaking the backend's JSON API over HTTP
pub struct HttpOracle {
    base_url: String,
    client: Client,
}

impl HttpOracle {
    pub fn new(config: &OracleConfig) -> Result<Self> {
        let client = create_client(&HttpClientConfig::default())?;
        Ok(Self::with_client(&config.base_url, client))
    }

    /// Build from an externally configured client (tests, custom pools)
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EgressError::OracleStatus {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl DetectionOracle for HttpOracle {
    async fn validate(&self, text: &str) -> promptgate_core::Result<DetectionResult> {
        let response = self
            .client
            .post(self.url("/api/validate"))
            .json(&ValidateRequest {
                text: text.to_string(),
            })
            .send()
            .await
            .map_err(EgressError::from)?;

        let body: ValidateResponse = Self::read_json(response).await?;
        Ok(body.into())
    }

    async fn is_approved(&self, content_hash: &str) -> promptgate_core::Result<bool> {
        let response = self
            .client
            .get(self.url(&format!("/api/approvals/check/{}", content_hash)))
            .send()
            .await
            .map_err(EgressError::from)?;

        let body: ApprovalResponse = Self::read_json(response).await?;
        Ok(body.approved)
    }

    async fn extract_text(
        &self,
        bytes: &[u8],
        filename: &str,
        mime_type: &str,
    ) -> promptgate_core::Result<Option<String>> {
        let response = self
            .client
            .post(self.url("/api/extract-text"))
            .json(&ExtractTextRequest {
                file_data: BASE64.encode(bytes),
                filename: filename.to_string(),
                mime_type: mime_type.to_string(),
            })
            .send()
            .await
            .map_err(EgressError::from)?;

        let body: ExtractTextResponse = Self::read_json(response).await?;
        if !body.success {
            debug!(
                filename,
                error = body.error.as_deref().unwrap_or("unsupported"),
                "Oracle could not extract text"
            );
            return Ok(None);
        }
        Ok(Some(body.text))
    }

    async fn report_event(&self, event: ReportEvent) -> promptgate_core::Result<()> {
        let wire: EventCreate = event.into();
        let response = self
            .client
            .post(self.url("/api/events"))
            .json(&wire)
            .send()
            .await
            .map_err(EgressError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(EgressError::OracleStatus {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }
            .into());
        }
        Ok(())
    }

    async fn health(&self) -> promptgate_core::Result<bool> {
        let response = self
            .client
            .get(self.url("/api/health"))
            .send()
            .await
            .map_err(EgressError::from)?;

        Ok(response.status().is_success())
    }
}
