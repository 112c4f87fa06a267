//! Value objects returned to callers.

use super::entities::{Message, Timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller-facing projection of a stored message.
///
/// `created_at` is epoch milliseconds everywhere; [`MessageView::created_at_rfc3339`]
/// converts for callers that prefer ISO-8601.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageView {
    pub id: Uuid,
    pub message: String,
    pub lat: f64,
    pub lng: f64,
    pub created_at: Timestamp,
}

impl MessageView {
    /// The creation instant formatted as RFC 3339 (UTC).
    pub fn created_at_rfc3339(&self) -> String {
        DateTime::<Utc>::from_timestamp_millis(self.created_at as i64)
            .unwrap_or_default()
            .to_rfc3339()
    }
}

impl From<&Message> for MessageView {
    fn from(msg: &Message) -> Self {
        Self {
            id: msg.id,
            message: msg.text.clone(),
            lat: msg.coordinate.lat,
            lng: msg.coordinate.lng,
            created_at: msg.created_at,
        }
    }
}

/// Point-in-time board statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStatus {
    /// Messages currently held by the index (expired-but-unswept included).
    pub stored_messages: usize,
    /// Client keys currently tracked by the rate limiter.
    pub tracked_clients: usize,
    /// Age of the oldest stored message in ms (0 when empty).
    pub oldest_message_age_ms: u64,
}

/// Result of one background sweep pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Expired messages removed from the index.
    pub expired_messages: usize,
    /// Stale client entries dropped from the rate limiter.
    pub stale_clients: usize,
}
