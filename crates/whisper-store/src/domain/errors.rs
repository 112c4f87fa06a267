//! Store error types.
//!
//! The core never logs; every operation returns a structured error for the
//! transport layer to map onto status codes via [`StoreError::kind`].

/// Broad error classification for transport status mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; nothing was mutated. Maps to a 4xx reject.
    Validation,
    /// Client posted too frequently; nothing was mutated. Retry later.
    RateLimited,
    /// Unexpected failure inside the store.
    Internal,
}

/// Errors returned by the message store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Message text is empty after trimming.
    #[error("message is required")]
    EmptyMessage,

    /// Message text exceeds the configured length cap.
    #[error("message too long: {len} chars (max {max})")]
    MessageTooLong { len: usize, max: usize },

    /// Latitude/longitude out of range or non-finite.
    #[error("invalid coordinate: ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Query radius negative or non-finite.
    #[error("invalid radius: {0} m")]
    InvalidRadius(f64),

    /// Requested result limit is zero.
    #[error("invalid result limit: {0}")]
    InvalidLimit(usize),

    /// Client exceeded the allowed post frequency.
    #[error("rate limit exceeded, retry in {retry_after_ms} ms")]
    RateLimited { retry_after_ms: u64 },

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Classifies this error for status mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyMessage
            | Self::MessageTooLong { .. }
            | Self::InvalidCoordinate { .. }
            | Self::InvalidRadius(_)
            | Self::InvalidLimit(_) => ErrorKind::Validation,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
