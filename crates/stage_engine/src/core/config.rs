//! # Engine Configuration
//!
//! Settings for the headless engine host: log filtering and how raw frame
//! times are turned into the delta time handed to [`World::update`].
//!
//! [`World::update`]: crate::ecs::World::update

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// Engine host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `env_logger` filter string, e.g. `"info"` or `"stage_engine=debug"`
    pub log_filter: String,
    /// Upper bound on a single frame's delta time, in seconds
    pub max_delta_time: f32,
    /// Multiplier applied to every delta time; `0.0` pauses the simulation
    pub time_scale: f32,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_filter: "info".to_string(),
            max_delta_time: 0.25,
            time_scale: 1.0,
        }
    }

    /// Set the log filter
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Set the delta time clamp
    pub fn with_max_delta_time(mut self, seconds: f32) -> Self {
        self.max_delta_time = seconds;
        self
    }

    /// Set the time scale
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_delta_time.is_finite() && self.max_delta_time > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_delta_time must be positive, got {}",
                self.max_delta_time
            )));
        }
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "time_scale must be finite and non-negative, got {}",
                self.time_scale
            )));
        }
        Ok(())
    }

    /// Turn a raw frame time into the delta time used for updates
    pub fn effective_delta(&self, raw_seconds: f32) -> f32 {
        raw_seconds.max(0.0).min(self.max_delta_time) * self.time_scale
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}
