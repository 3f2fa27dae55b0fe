//! Error types, categorization, and run statistics.
//!
//! External calls return typed results rather than being swallowed in place;
//! the policy for which kinds are retried versus treated as absence lives at
//! the call sites in `fetch` and `resolve`.

mod categorization;
mod stats;
mod types;

pub use categorization::{categorize_reqwest_error, categorize_status, get_retry_strategy};
pub use stats::RunStats;
pub use types::{CacheError, FetchError, InitializationError, ResolveError};
