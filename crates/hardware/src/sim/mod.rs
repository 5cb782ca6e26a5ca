//! Trace-driven simulation.
//!
//! Provides what is needed to exercise a prefetcher outside a full memory
//! simulator: loading access traces, a minimal host that answers residency
//! queries, and a driver that replays a trace through a [`PrefetchEngine`].
//!
//! [`PrefetchEngine`]: crate::engine::PrefetchEngine

/// Replay host implementing [`PrefetchHost`](crate::host::PrefetchHost).
pub mod host;

/// Trace replay driver.
pub mod simulator;

/// Access trace parsing and loading.
pub mod trace;

pub use host::TraceHost;
pub use simulator::Simulator;
pub use trace::{load_trace, parse_trace};
