//! The message store: the single entry point for posting and querying.
//!
//! Enforcement order for `post` is fixed: validate → rate-limit
//! check-and-set → insert. Only a successful rate-limit check consumes the
//! client's quota, and an insert never happens without one, so every
//! operation either fully applies or leaves no trace.
//!
//! Concurrency: one coarse `RwLock` around the index (concurrent queries,
//! exclusive inserts and sweeps) and per-key atomicity inside the limiter.
//! A `post` that has returned is visible to every subsequent `query`.

use super::config::BoardConfig;
use super::entities::{Coordinate, Message, Timestamp};
use super::errors::{StoreError, StoreResult};
use super::rate_limiter::PostRateLimiter;
use super::spatial_index::SpatialIndex;
use super::value_objects::{BoardStatus, MessageView, SweepStats};
use parking_lot::RwLock;

/// An explicitly constructed message board instance. No ambient singleton:
/// tests and the request layer each own their handle.
#[derive(Debug)]
pub struct MessageStore {
    config: BoardConfig,
    index: RwLock<SpatialIndex>,
    limiter: PostRateLimiter,
}

impl MessageStore {
    /// Creates a store with the given configuration.
    pub fn new(config: BoardConfig) -> Self {
        let limiter = PostRateLimiter::new(config.rate_limit_ms());
        Self {
            config,
            index: RwLock::new(SpatialIndex::new()),
            limiter,
        }
    }

    /// Creates a store with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(BoardConfig::default())
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Validates, rate-limits, and stores a new message.
    ///
    /// # Errors
    /// - `EmptyMessage` / `MessageTooLong` for bad text
    /// - `InvalidCoordinate` for out-of-range or non-finite lat/lng
    /// - `RateLimited` when the client posted within the window
    pub fn post(
        &self,
        client_key: &str,
        raw_text: &str,
        lat: f64,
        lng: f64,
        now: Timestamp,
    ) -> StoreResult<MessageView> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyMessage);
        }
        let len = text.chars().count();
        if len > self.config.max_message_len {
            return Err(StoreError::MessageTooLong {
                len,
                max: self.config.max_message_len,
            });
        }

        let coordinate = Coordinate::new(lat, lng);
        if !coordinate.is_valid() {
            return Err(StoreError::InvalidCoordinate { lat, lng });
        }

        self.limiter
            .allow(client_key, now)
            .map_err(|retry_after_ms| StoreError::RateLimited { retry_after_ms })?;

        let message = Message::new(text.to_owned(), coordinate, now);
        let view = MessageView::from(&message);
        self.index.write().insert(message);
        Ok(view)
    }

    /// Returns non-expired messages within `radius_m` of the query point,
    /// newest first. `radius_m` defaults to the configured query radius;
    /// `limit` defaults to, and is clamped to, the configured maximum.
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    /// - `InvalidCoordinate` for out-of-range or non-finite lat/lng
    /// - `InvalidRadius` for negative or non-finite radius
    /// - `InvalidLimit` for a limit of zero
    pub fn query(
        &self,
        lat: f64,
        lng: f64,
        radius_m: Option<f64>,
        limit: Option<usize>,
        now: Timestamp,
    ) -> StoreResult<Vec<MessageView>> {
        let center = Coordinate::new(lat, lng);
        if !center.is_valid() {
            return Err(StoreError::InvalidCoordinate { lat, lng });
        }

        let radius_m = radius_m.unwrap_or(self.config.default_query_radius_m);
        // Zero is allowed and matches only coincident points.
        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(StoreError::InvalidRadius(radius_m));
        }

        let limit = match limit {
            None => self.config.max_result_limit,
            Some(0) => return Err(StoreError::InvalidLimit(0)),
            Some(n) => n.min(self.config.max_result_limit),
        };

        let messages = self.index.read().query_radius(
            center,
            radius_m,
            limit,
            now,
            self.config.retention_ms(),
        );
        Ok(messages.iter().map(MessageView::from).collect())
    }

    /// One bounded reclamation pass over the index and the limiter.
    pub fn sweep(&self, now: Timestamp) -> SweepStats {
        let expired_messages = self
            .index
            .write()
            .sweep_expired(now, self.config.retention_ms());
        let stale_clients = self.limiter.cleanup(now);
        SweepStats {
            expired_messages,
            stale_clients,
        }
    }

    /// Point-in-time statistics.
    pub fn status(&self, now: Timestamp) -> BoardStatus {
        let index = self.index.read();
        BoardStatus {
            stored_messages: index.len(),
            tracked_clients: self.limiter.tracked_clients(),
            oldest_message_age_ms: index.oldest_age_ms(now),
        }
    }

    /// Number of stored messages (expired-but-unswept included).
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    /// Returns true if no messages are stored.
    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }
}
