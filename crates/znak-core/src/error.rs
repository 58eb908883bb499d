//! Domain-level error types.

use thiserror::Error;

use crate::ports::{GatewayError, RateLimitError};

/// Submission failures - either the wait for a permit was cancelled, or the
/// downstream call itself failed.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    RateLimit(#[from] RateLimitError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
