//! Cell-bucketed spatial index over stored messages.
//!
//! ## Data structures
//!
//! - `cells`: messages bucketed by 1° grid cell for bounded query scans
//! - `next_seq`: insertion sequence, the tie-breaker for equal `created_at`
//!
//! ## Invariants enforced
//!
//! - Every stored message is reachable from exactly one cell; coordinates
//!   are immutable so re-bucketing never happens.
//! - `query_radius` never returns an expired message, whether or not the
//!   background sweep has run (lazy filtering is the source of truth).
//! - Results are ordered by `created_at` descending, ties by insertion
//!   sequence ascending, truncated to the caller's limit.

use super::entities::{Coordinate, Message, Timestamp};
use super::geo::{covering_cells, haversine_distance, CellKey};
use std::collections::HashMap;

/// A message plus its insertion sequence number.
#[derive(Clone, Debug)]
struct Stored {
    msg: Message,
    seq: u64,
}

/// In-memory spatial index. Not internally synchronized; the store wraps it
/// in a single coarse lock.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    /// Live messages bucketed by grid cell.
    cells: HashMap<CellKey, Vec<Stored>>,
    /// Total stored message count across all cells.
    len: usize,
    /// Next insertion sequence number.
    next_seq: u64,
}

impl SpatialIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored messages (expired-but-unswept included).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no messages are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Age of the oldest stored message in ms, 0 when empty.
    pub fn oldest_age_ms(&self, now: Timestamp) -> u64 {
        self.cells
            .values()
            .flatten()
            .map(|s| now.saturating_sub(s.msg.created_at))
            .max()
            .unwrap_or(0)
    }

    /// Inserts a well-formed message. O(1) amortized; never fails.
    pub fn insert(&mut self, msg: Message) {
        let key = CellKey::for_coordinate(msg.coordinate);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.cells.entry(key).or_default().push(Stored { msg, seq });
        self.len += 1;
    }

    /// All non-expired messages within `radius_m` of `center`, newest first,
    /// ties broken by insertion order, truncated to `limit`.
    ///
    /// A radius of 0 matches only coincident points.
    pub fn query_radius(
        &self,
        center: Coordinate,
        radius_m: f64,
        limit: usize,
        now: Timestamp,
        retention_ms: u64,
    ) -> Vec<Message> {
        let mut hits: Vec<&Stored> = Vec::new();

        match covering_cells(center, radius_m) {
            Some(cover) if cover.len() < self.cells.len() => {
                for key in cover {
                    if let Some(bucket) = self.cells.get(&key) {
                        self.collect_hits(bucket, center, radius_m, now, retention_ms, &mut hits);
                    }
                }
            }
            // Degenerate or wide cover: scanning occupied cells is cheaper.
            _ => {
                for bucket in self.cells.values() {
                    self.collect_hits(bucket, center, radius_m, now, retention_ms, &mut hits);
                }
            }
        }

        hits.sort_by(|a, b| {
            b.msg
                .created_at
                .cmp(&a.msg.created_at)
                .then(a.seq.cmp(&b.seq))
        });
        hits.truncate(limit);
        hits.into_iter().map(|s| s.msg.clone()).collect()
    }

    fn collect_hits<'a>(
        &self,
        bucket: &'a [Stored],
        center: Coordinate,
        radius_m: f64,
        now: Timestamp,
        retention_ms: u64,
        hits: &mut Vec<&'a Stored>,
    ) {
        for stored in bucket {
            if stored.msg.is_expired(now, retention_ms) {
                continue;
            }
            if haversine_distance(center, stored.msg.coordinate) <= radius_m {
                hits.push(stored);
            }
        }
    }

    /// Removes every expired message, reclaiming memory. Returns the number
    /// removed. One bounded pass; correctness never depends on it.
    pub fn sweep_expired(&mut self, now: Timestamp, retention_ms: u64) -> usize {
        let mut removed = 0;
        self.cells.retain(|_, bucket| {
            let before = bucket.len();
            bucket.retain(|s| !s.msg.is_expired(now, retention_ms));
            removed += before - bucket.len();
            !bucket.is_empty()
        });
        self.len -= removed;
        removed
    }
}
