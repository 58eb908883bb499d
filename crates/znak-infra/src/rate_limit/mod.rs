mod sliding_window;

pub use sliding_window::{ConfigError, RateLimitConfig, SlidingWindowLimiter};
