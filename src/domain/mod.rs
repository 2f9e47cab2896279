//! Domain layer containing the engine's core logic.
//!
//! This module contains:
//! - The restricted glob matcher used by exemption queries
//! - Error types for the configuration lifecycle
//! - Logger with rotation

mod error;
pub mod logger;
pub mod pattern;

pub use error::{ConfigError, ValidationError};
pub use pattern::matches;
