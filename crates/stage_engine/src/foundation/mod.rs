//! Foundation module - Core utilities and types
//!
//! - Membership collections backing the entity managers
//! - Frame timing
//! - Logging utilities

pub mod collections;
pub mod logging;
pub mod time;
