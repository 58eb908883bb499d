//! Rate limiting port.

use async_trait::async_trait;

/// Rate limiter trait - a gate that admits a bounded number of callers per
/// sliding time window.
///
/// `acquire` suspends the caller until a permit is available; fullness is
/// represented by waiting, never by an error. A granted permit authorizes
/// exactly one guarded action and is reclaimed by the limiter on its own
/// schedule - the caller never gives it back.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Wait for a permit. Returns `Err(Cancelled)` only if the wait is
    /// interrupted by limiter shutdown; the caller then holds no permit.
    async fn acquire(&self) -> Result<(), RateLimitError>;
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// The limiter was shut down while this caller was waiting (or before
    /// it called). No permit was granted.
    #[error("rate limiter shut down while waiting for a permit")]
    Cancelled,
}
