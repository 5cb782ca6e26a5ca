//! Per-PC delta-correlation prefetcher library.
//!
//! This crate models hardware data prefetchers driven by a stream of memory
//! references. It provides the following:
//! 1. **Prefetchers:** The global history buffer (GHB) delta-correlation model, plus
//!    a four-state reference prediction table and a stride-directed table.
//! 2. **Engine:** The host-facing context that observes accesses, filters candidates,
//!    and issues prefetches through a [`PrefetchHost`].
//! 3. **Simulation:** A trace loader and a block-granular replay host for offline runs.
//! 4. **Configuration:** JSON-backed parameters and statistics reporting.

/// Common types, constants, and errors.
pub mod common;
/// Run configuration (defaults, strategy selector, per-model sections).
pub mod config;
/// Host-facing prefetch engine.
pub mod engine;
/// Contract the surrounding memory system implements.
pub mod host;
/// Prefetcher models and the admission filter.
pub mod prefetch;
/// Trace loading and offline replay.
pub mod sim;
/// Prefetch statistics collection and reporting.
pub mod stats;

/// Memory reference observed by a prefetcher.
pub use crate::common::AccessEvent;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Prefetcher context owned by a single host.
pub use crate::engine::PrefetchEngine;
/// Host capabilities a prefetch engine relies on.
pub use crate::host::PrefetchHost;
