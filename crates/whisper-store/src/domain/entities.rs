//! Core domain entities for the message store.
//!
//! A [`Message`] is immutable once stored: there is no update operation
//! anywhere in the crate, and expiration is the only way a message leaves
//! the board.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

/// A geographic coordinate (WGS84 latitude/longitude in degrees).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Creates a new coordinate without validation.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true iff both components are finite and within
    /// lat ∈ [-90, 90], lng ∈ [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// An anonymous message pinned to a coordinate.
///
/// Invariants (enforced at the `MessageStore::post` boundary, so the store
/// never holds an invalid message):
/// - `text` is trimmed, non-empty, and at most the configured max length.
/// - `coordinate` is valid per [`Coordinate::is_valid`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Opaque unique identifier, assigned at insertion.
    pub id: Uuid,
    /// The message body (already trimmed).
    pub text: String,
    /// Where the message was posted.
    pub coordinate: Coordinate,
    /// Wall-clock insertion time (ms). Used only for ordering and expiration;
    /// monotonicity across inserts is not guaranteed.
    pub created_at: Timestamp,
}

impl Message {
    /// Creates a message with a fresh random identifier.
    pub fn new(text: String, coordinate: Coordinate, created_at: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            coordinate,
            created_at,
        }
    }

    /// The instant at which this message expires.
    pub fn expires_at(&self, retention_ms: u64) -> Timestamp {
        self.created_at.saturating_add(retention_ms)
    }

    /// Returns true iff the message has aged out of the retention window.
    ///
    /// The boundary is exclusive: a message with `now - created_at`
    /// exactly equal to the window is already expired.
    pub fn is_expired(&self, now: Timestamp, retention_ms: u64) -> bool {
        now.saturating_sub(self.created_at) >= retention_ms
    }
}
