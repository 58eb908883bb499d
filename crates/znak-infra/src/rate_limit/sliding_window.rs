//! In-memory sliding-log rate limiter.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use znak_core::ports::{RateLimitError, RateLimiter};

/// Sliding-window limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum permits outstanding within any window.
    pub capacity: u32,
    /// Window duration.
    pub window: Duration,
    /// Cadence of the background reclamation task. A blocked caller waits at
    /// most this long past the moment an expired permit frees its slot.
    pub reclaim_interval: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            window: Duration::from_secs(5),
            reclaim_interval: Duration::from_secs(1),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: std::env::var("RATE_LIMIT_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.capacity),
            window: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.window),
            reclaim_interval: std::env::var("RATE_LIMIT_RECLAIM_MILLIS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.reclaim_interval),
        }
    }
}

/// Configuration errors, raised at construction and never later.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("capacity must be positive")]
    ZeroCapacity,

    #[error("window must be positive")]
    ZeroWindow,

    #[error("reclaim interval must be positive")]
    ZeroReclaimInterval,
}

/// Sliding-log rate limiter.
///
/// Every grant records its timestamp in an insertion-ordered ledger and is
/// reclaimed `window` later by a background task, so any window-length slice
/// of time contains at most `capacity` grants. This is deliberately not a
/// fixed-window counter (which admits 2x bursts across a window boundary)
/// and not a token bucket (which reshapes bursts).
///
/// Grants and reclamations go through a semaphore sized to `capacity`; the
/// ledger only ever holds timestamps for permits that have been taken out of
/// the semaphore, so its length cannot exceed `capacity` regardless of how
/// callers race.
pub struct SlidingWindowLimiter {
    permits: Arc<Semaphore>,
    ledger: Arc<Mutex<VecDeque<Instant>>>,
    capacity: u32,
    reclaimer: JoinHandle<()>,
}

impl SlidingWindowLimiter {
    /// Create the limiter and spawn its reclamation task.
    ///
    /// Validation happens before anything is spawned; an invalid config
    /// leaves no background task behind. Must be called from within a tokio
    /// runtime.
    pub fn new(config: RateLimitConfig) -> Result<Self, ConfigError> {
        if config.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if config.window.is_zero() {
            return Err(ConfigError::ZeroWindow);
        }
        if config.reclaim_interval.is_zero() {
            return Err(ConfigError::ZeroReclaimInterval);
        }

        let permits = Arc::new(Semaphore::new(config.capacity as usize));
        let ledger = Arc::new(Mutex::new(VecDeque::with_capacity(config.capacity as usize)));

        let reclaimer = tokio::spawn(reclaim_loop(
            Arc::clone(&permits),
            Arc::clone(&ledger),
            config.window,
            config.reclaim_interval,
        ));

        tracing::debug!(
            capacity = config.capacity,
            window_ms = config.window.as_millis() as u64,
            reclaim_interval_ms = config.reclaim_interval.as_millis() as u64,
            "Sliding-window limiter started"
        );

        Ok(Self {
            permits,
            ledger,
            capacity: config.capacity,
            reclaimer,
        })
    }

    /// Permits currently grantable without waiting.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Stop the limiter: blocked `acquire` callers resolve with
    /// [`RateLimitError::Cancelled`] and the reclamation task is stopped.
    /// Idempotent; also runs on drop.
    pub fn shutdown(&self) {
        if !self.permits.is_closed() {
            self.permits.close();
            self.reclaimer.abort();
            tracing::info!("Rate limiter shut down");
        }
    }
}

impl Drop for SlidingWindowLimiter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[async_trait]
impl RateLimiter for SlidingWindowLimiter {
    async fn acquire(&self) -> Result<(), RateLimitError> {
        let permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| RateLimitError::Cancelled)?;

        // Recording the grant and committing the permit happen with no
        // suspension point in between: a caller cancelled while waiting for
        // the ledger lock still holds `permit`, which returns to the
        // semaphore on drop without a ledger entry.
        let mut ledger = self.ledger.lock().await;
        ledger.push_back(Instant::now());
        permit.forget();

        Ok(())
    }
}

/// Has this permit's grant timestamp aged out of the window?
///
/// Uses the monotonic clock throughout; wall-clock adjustments cannot expire
/// permits early or late.
fn is_expired(granted: Instant, now: Instant, window: Duration) -> bool {
    now.duration_since(granted) >= window
}

/// Background reclamation: on every tick, pop expired entries from the front
/// of the ledger (expiry is monotonic in insertion order) and release one
/// permit per entry removed.
async fn reclaim_loop(
    permits: Arc<Semaphore>,
    ledger: Arc<Mutex<VecDeque<Instant>>>,
    window: Duration,
    cadence: Duration,
) {
    let mut ticker = time::interval(cadence);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let mut ledger = ledger.lock().await;
        let now = Instant::now();
        let mut reclaimed = 0;
        while let Some(granted) = ledger.front() {
            if !is_expired(*granted, now, window) {
                break;
            }
            ledger.pop_front();
            reclaimed += 1;
        }
        drop(ledger);

        if reclaimed > 0 {
            permits.add_permits(reclaimed);
            tracing::debug!(reclaimed, "Expired permits reclaimed");
        }
    }
}
