//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use znak_infra::gateway::GatewayConfig;
use znak_infra::rate_limit::RateLimitConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    pub rate_limit: RateLimitConfig,
    pub gateway: GatewayConfig,
    /// Detached signature sent as the authorization credential.
    pub signature: String,
    /// Number of submissions to drive through the limiter.
    pub submissions: usize,
    /// Delay between launching consecutive submission tasks.
    pub stagger: Duration,
}

impl SubmitterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            rate_limit: RateLimitConfig::from_env(),
            gateway: GatewayConfig::from_env(),
            signature: env::var("CRPT_SIGNATURE").unwrap_or_else(|_| "demo-signature".to_string()),
            submissions: env::var("SUBMISSIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            stagger: Duration::from_millis(
                env::var("SUBMISSION_STAGGER_MILLIS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
        }
    }
}
