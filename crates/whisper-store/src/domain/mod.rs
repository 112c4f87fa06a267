//! Inner layer: entities, the spatial index, rate limiting, and the store.

pub mod config;
pub mod entities;
pub mod errors;
pub mod geo;
pub mod rate_limiter;
pub mod spatial_index;
pub mod store;
pub mod value_objects;

pub use config::{BoardConfig, ConfigError};
pub use entities::{Coordinate, Message, Timestamp};
pub use errors::{ErrorKind, StoreError, StoreResult};
pub use rate_limiter::PostRateLimiter;
pub use spatial_index::SpatialIndex;
pub use store::MessageStore;
pub use value_objects::{BoardStatus, MessageView, SweepStats};
