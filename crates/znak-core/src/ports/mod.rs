//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod gateway;
mod rate_limit;

pub use gateway::{DocumentGateway, GatewayError};
pub use rate_limit::{RateLimitError, RateLimiter};
