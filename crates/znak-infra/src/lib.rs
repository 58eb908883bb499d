//! # Znak Infra
//!
//! Infrastructure adapters for the Znak client: the sliding-window rate
//! limiter and the HTTP document gateway.

pub mod gateway;
pub mod rate_limit;
