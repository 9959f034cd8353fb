//! # Core Engine Module
//!
//! Shared configuration used by the engine host.

pub mod config;

pub use config::{Config, ConfigError, EngineConfig};
