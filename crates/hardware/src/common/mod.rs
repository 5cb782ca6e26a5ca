//! Common types and constants shared by every prefetcher model.
//!
//! This module provides the fundamental building blocks used across the crate:
//! 1. **Constants:** History capacity, correlation lookback, prefetch degree and host bounds.
//! 2. **Access Events:** The `(pc, address, hit/miss)` record delivered once per memory reference.
//! 3. **Error Handling:** Configuration and trace-loading error types.

/// Prefetcher sizing constants and host defaults.
pub mod constants;

/// Access event definitions.
pub mod data;

/// Error types for configuration and trace loading.
pub mod error;

pub use constants::{MAX_LENGTH, MAX_LOOKBACK, PREFETCH_DEGREE};
pub use data::AccessEvent;
pub use error::{ConfigError, TraceError};
