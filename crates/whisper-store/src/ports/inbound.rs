//! Inbound port: the API the request-handling layer drives.
//!
//! The transport layer (HTTP or otherwise) derives the opaque `client_key`,
//! parses its own input, calls these synchronous operations, and maps
//! [`StoreError::kind`](crate::domain::errors::StoreError::kind) onto its
//! status codes.

use crate::domain::entities::Timestamp;
use crate::domain::errors::StoreResult;
use crate::domain::store::MessageStore;
use crate::domain::value_objects::{BoardStatus, MessageView, SweepStats};

/// Primary API of the message board core.
///
/// Implemented by [`MessageStore`](crate::domain::store::MessageStore);
/// object-safe so the request layer can hold a `dyn` handle.
pub trait MessageBoardApi: Send + Sync {
    /// Validates, rate-limits, and stores a new message.
    fn post(
        &self,
        client_key: &str,
        raw_text: &str,
        lat: f64,
        lng: f64,
        now: Timestamp,
    ) -> StoreResult<MessageView>;

    /// Radius query around a point, newest first. `None` radius/limit use
    /// the configured defaults.
    fn query(
        &self,
        lat: f64,
        lng: f64,
        radius_m: Option<f64>,
        limit: Option<usize>,
        now: Timestamp,
    ) -> StoreResult<Vec<MessageView>>;

    /// One bounded reclamation pass (expired messages, stale limiter keys).
    fn sweep(&self, now: Timestamp) -> SweepStats;

    /// Point-in-time statistics.
    fn status(&self, now: Timestamp) -> BoardStatus;
}

impl MessageBoardApi for MessageStore {
    fn post(
        &self,
        client_key: &str,
        raw_text: &str,
        lat: f64,
        lng: f64,
        now: Timestamp,
    ) -> StoreResult<MessageView> {
        MessageStore::post(self, client_key, raw_text, lat, lng, now)
    }

    fn query(
        &self,
        lat: f64,
        lng: f64,
        radius_m: Option<f64>,
        limit: Option<usize>,
        now: Timestamp,
    ) -> StoreResult<Vec<MessageView>> {
        MessageStore::query(self, lat, lng, radius_m, limit, now)
    }

    fn sweep(&self, now: Timestamp) -> SweepStats {
        MessageStore::sweep(self, now)
    }

    fn status(&self, now: Timestamp) -> BoardStatus {
        MessageStore::status(self, now)
    }
}
