//! # Whisper Store
//!
//! Ephemeral geo-indexed message store: anonymous messages pinned to a
//! coordinate, queryable by radius, gone after a retention window.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Messages are immutable; no update operation exists | `domain/entities.rs` |
//! | Invalid text/coordinates never enter the store | `domain/store.rs` - `post()` boundary checks |
//! | Expired messages are never returned, sweep or no sweep | `domain/spatial_index.rs` - lazy filter in `query_radius()` |
//! | Expiration boundary is exclusive (`age == window` is expired) | `domain/entities.rs` - `is_expired()` |
//! | One accepted post per client key per window, atomically | `domain/rate_limiter.rs` - entry-API check-and-set |
//! | Post fully applies or leaves no trace (validate → rate-limit → insert) | `domain/store.rs` - `post()` ordering |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  adapters/sweeper.rs - periodic expiration sweep task           │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ drives ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - MessageBoardApi trait                      │
//! │  ports/outbound.rs - TimeSource trait                           │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/entities.rs      - Message, Coordinate, Timestamp       │
//! │  domain/geo.rs           - haversine, grid cells                │
//! │  domain/spatial_index.rs - cell-bucketed index                  │
//! │  domain/rate_limiter.rs  - per-client post limiter              │
//! │  domain/store.rs         - MessageStore orchestration           │
//! │  domain/config.rs        - BoardConfig                          │
//! │  domain/errors.rs        - StoreError, ErrorKind                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use whisper_store::MessageStore;
//!
//! let store = MessageStore::with_defaults();
//! store.post("203.0.113.7", "found a great taco truck", 40.0, -73.0, 1_000).unwrap();
//!
//! let nearby = store.query(40.0, -73.0, Some(5_000.0), None, 2_000).unwrap();
//! assert_eq!(nearby[0].message, "found a great taco truck");
//! ```
//!
//! The core is synchronous and never logs or touches I/O; the transport
//! layer supplies timestamps, derives client keys, and maps
//! [`StoreError::kind`](domain::errors::StoreError::kind) to status codes.
//! The optional [`adapters::sweeper`] task reclaims memory in the
//! background and is stoppable on shutdown.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{spawn_sweeper, SweeperHandle};
pub use domain::{
    BoardConfig, BoardStatus, ConfigError, Coordinate, ErrorKind, Message, MessageStore,
    MessageView, StoreError, StoreResult, SweepStats, Timestamp,
};
pub use ports::{MessageBoardApi, MockTimeSource, SystemTimeSource, TimeSource};
