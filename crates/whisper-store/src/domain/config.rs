//! Store configuration with validation.
//!
//! Configuration is injected at construction; the core never reads the
//! environment itself.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Message board configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// How long a message stays on the board (default: 24 h).
    #[serde(with = "humantime_serde")]
    pub retention_window: Duration,
    /// Minimum interval between accepted posts per client (default: 2 min).
    #[serde(with = "humantime_serde")]
    pub rate_limit_window: Duration,
    /// Radius applied when a query does not supply one (default: 5000 m).
    pub default_query_radius_m: f64,
    /// Hard cap on query result size (default: 200).
    pub max_result_limit: usize,
    /// Maximum message length in characters, after trimming (default: 280).
    pub max_message_len: usize,
    /// Cadence of the background expiration sweep (default: 60 s).
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            retention_window: Duration::from_secs(86_400),
            rate_limit_window: Duration::from_secs(120),
            default_query_radius_m: 5_000.0,
            max_result_limit: 200,
            max_message_len: 280,
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl BoardConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retention_window.as_millis() == 0 {
            return Err(ConfigError::InvalidWindow(
                "retention_window cannot be 0".into(),
            ));
        }
        if self.rate_limit_window.as_millis() == 0 {
            return Err(ConfigError::InvalidWindow(
                "rate_limit_window cannot be 0".into(),
            ));
        }
        if !self.default_query_radius_m.is_finite() || self.default_query_radius_m <= 0.0 {
            return Err(ConfigError::InvalidLimit(
                "default_query_radius_m must be positive".into(),
            ));
        }
        if self.max_result_limit == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_result_limit cannot be 0".into(),
            ));
        }
        if self.max_message_len == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_message_len cannot be 0".into(),
            ));
        }
        if self.sweep_interval.as_millis() == 0 {
            return Err(ConfigError::InvalidWindow(
                "sweep_interval cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// Retention window in milliseconds.
    pub fn retention_ms(&self) -> u64 {
        self.retention_window.as_millis() as u64
    }

    /// Rate-limit window in milliseconds.
    pub fn rate_limit_ms(&self) -> u64 {
        self.rate_limit_window.as_millis() as u64
    }

    /// Creates a config with short windows for testing.
    pub fn for_testing() -> Self {
        Self {
            retention_window: Duration::from_millis(10_000),
            rate_limit_window: Duration::from_millis(1_000),
            sweep_interval: Duration::from_millis(100),
            ..Default::default()
        }
    }
}

/// Configuration validation error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A time window is out of range.
    #[error("invalid window: {0}")]
    InvalidWindow(String),

    /// A count or size limit is out of range.
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}
