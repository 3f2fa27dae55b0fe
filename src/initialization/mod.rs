//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - The logger (colored plain text or JSON)
//! - The HTTP client used for both page fetches and remote lookups
//! - The semaphore bounding the resolver worker pool

mod client;
mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes a semaphore for controlling resolver concurrency.
///
/// # Arguments
///
/// * `count` - Maximum number of concurrent lookup operations allowed
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
