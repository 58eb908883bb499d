//! Document gateway port - abstraction over the downstream document API.

use async_trait::async_trait;

use crate::domain::Document;

/// Gateway trait - the guarded action behind the rate limiter.
///
/// Implementations own payload serialization, transport and authentication;
/// the caller only provides the document and its detached signature.
#[async_trait]
pub trait DocumentGateway: Send + Sync {
    /// Submit a document for creation. The signature is sent verbatim as the
    /// authorization credential.
    async fn create_document(
        &self,
        document: &Document,
        signature: &str,
    ) -> Result<(), GatewayError>;
}

/// Gateway errors, mapped from the downstream API's response statuses.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("bad request")]
    BadRequest,

    #[error("unauthorized, please check your credentials")]
    Unauthorized,

    #[error("access forbidden")]
    Forbidden,

    #[error("resource not found")]
    NotFound,

    #[error("internal server error")]
    Server,

    #[error("unhandled status code: {0}")]
    UnexpectedStatus(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to serialize document: {0}")]
    Serialize(String),
}
