//! # Utilities Module
//!
//! Internal utility modules for the market-core crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

pub(crate) mod logger;
pub(crate) mod retry;

// Selective exports - only public utilities
pub use logger::{Logger, LoggerGuard};
pub use retry::{with_retry, RetryConfig};
