//! HTTP document gateway backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};

use znak_core::domain::Document;
use znak_core::ports::{DocumentGateway, GatewayError};

const DEFAULT_CREATE_URL: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";

/// HTTP gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Document creation endpoint.
    pub create_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            create_url: DEFAULT_CREATE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            create_url: std::env::var("CRPT_CREATE_URL").unwrap_or(defaults.create_url),
            timeout: std::env::var("CRPT_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Document gateway over HTTP.
///
/// Serializes the document to JSON, POSTs it to the create endpoint with the
/// signature in the `Authorization` header, and maps the response status to
/// the port's error taxonomy.
pub struct HttpDocumentGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpDocumentGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl DocumentGateway for HttpDocumentGateway {
    async fn create_document(
        &self,
        document: &Document,
        signature: &str,
    ) -> Result<(), GatewayError> {
        let body = serde_json::to_string(document)
            .map_err(|e| GatewayError::Serialize(e.to_string()))?;

        let response = self
            .client
            .post(&self.config.create_url)
            .header(AUTHORIZATION, signature)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.config.timeout)
            .body(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        match map_status(status) {
            Ok(()) => {
                tracing::info!(doc_id = %document.doc_id, "Document created successfully");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    doc_id = %document.doc_id,
                    status = status.as_u16(),
                    "Document submission rejected"
                );
                Err(err)
            }
        }
    }
}

fn map_status(status: StatusCode) -> Result<(), GatewayError> {
    match status {
        StatusCode::CREATED => Ok(()),
        StatusCode::BAD_REQUEST => Err(GatewayError::BadRequest),
        StatusCode::UNAUTHORIZED => Err(GatewayError::Unauthorized),
        StatusCode::FORBIDDEN => Err(GatewayError::Forbidden),
        StatusCode::NOT_FOUND => Err(GatewayError::NotFound),
        StatusCode::INTERNAL_SERVER_ERROR => Err(GatewayError::Server),
        other => Err(GatewayError::UnexpectedStatus(other.as_u16())),
    }
}
