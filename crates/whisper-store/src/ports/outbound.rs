//! Outbound port: the clock the store's lifecycle depends on.
//!
//! The synchronous operations take `now` explicitly; only the background
//! sweeper needs a clock of its own. Abstracted so expiration is testable
//! with injected time.

use crate::domain::entities::Timestamp;

/// Time source for consistent timestamp handling.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds since UNIX epoch.
    fn now(&self) -> Timestamp;
}

/// Default wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Deterministic time source for tests and the sweeper's tests.
///
/// Exported (not test-gated) so the integration-test crate can drive it.
#[derive(Debug, Default)]
pub struct MockTimeSource {
    time: std::sync::atomic::AtomicU64,
}

impl MockTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: std::sync::atomic::AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn set(&self, time: Timestamp) {
        self.time.store(time, std::sync::atomic::Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(std::sync::atomic::Ordering::SeqCst)
    }
}
