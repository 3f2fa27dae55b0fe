//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default sources, timeouts, retry parameters)
//! - CLI option types and parsing

mod constants;
mod types;

pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
