//! Per-client post rate limiting.
//!
//! One accepted post per client key per window. Keys are opaque strings
//! supplied by the caller (typically a network address); clients behind a
//! shared address share a budget.

use super::entities::Timestamp;
use dashmap::DashMap;

/// Fixed-window rate limiter keyed by opaque client string.
///
/// The check-and-set in [`allow`](Self::allow) goes through the DashMap
/// entry API, which holds the shard lock for the whole read-modify-write:
/// two simultaneous posts from the same key cannot both pass.
#[derive(Debug)]
pub struct PostRateLimiter {
    /// Timestamp of the last accepted post per client key.
    last_post: DashMap<String, Timestamp>,
    /// Minimum interval between accepted posts (ms).
    window_ms: u64,
}

impl PostRateLimiter {
    /// Creates a limiter with the given window.
    pub fn new(window_ms: u64) -> Self {
        Self {
            last_post: DashMap::new(),
            window_ms,
        }
    }

    /// Passes iff the key has never posted or its window has elapsed,
    /// recording `now` as the new last-post time. On rejection returns the
    /// remaining wait in ms and mutates nothing.
    pub fn allow(&self, client_key: &str, now: Timestamp) -> Result<(), u64> {
        match self.last_post.entry(client_key.to_owned()) {
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(now);
                Ok(())
            }
            dashmap::mapref::entry::Entry::Occupied(mut entry) => {
                let elapsed = now.saturating_sub(*entry.get());
                if elapsed >= self.window_ms {
                    entry.insert(now);
                    Ok(())
                } else {
                    Err(self.window_ms - elapsed)
                }
            }
        }
    }

    /// Drops entries whose window has elapsed. Stale entries are harmless
    /// (absence means "eligible"), so this is memory reclamation only.
    /// Returns the number removed.
    pub fn cleanup(&self, now: Timestamp) -> usize {
        let before = self.last_post.len();
        self.last_post
            .retain(|_, last| now.saturating_sub(*last) < self.window_ms);
        before - self.last_post.len()
    }

    /// Number of client keys currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.last_post.len()
    }
}
