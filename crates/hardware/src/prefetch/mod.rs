//! Hardware Prefetcher implementations.
//!
//! This module contains the interface and implementations for the data
//! prefetchers used to hide memory latency. Each model observes the stream of
//! `(pc, address)` events and names the addresses worth fetching ahead:
//! 1. **GHB:** Per-PC global history buffer with delta-correlation replay.
//! 2. **RPT:** Four-state reference prediction table.
//! 3. **Stride:** Stride-directed reference table.
//! 4. **Vector:** Global stride confirmation, issuing on misses only.
//!
//! Candidates are not filtered here; the [`AdmissionFilter`] applies the
//! host's feasibility checks before anything is fetched.

/// Admission filter applying host feasibility checks to candidates.
pub mod filter;

/// Global history buffer with delta-correlation prediction.
pub mod ghb;

/// Four-state reference prediction table.
pub mod rpt;

/// Stride-directed prefetcher (one entry per PC).
pub mod stride;

/// Global stride-confirming prefetcher.
pub mod vector;

pub use self::filter::{Admission, AdmissionFilter};
pub use self::ghb::GhbPrefetcher;
pub use self::rpt::RptPrefetcher;
pub use self::stride::StridePrefetcher;
pub use self::vector::VectorPrefetcher;

use crate::common::AccessEvent;

/// Trait for data prefetcher implementations.
///
/// Prefetchers observe memory access patterns and generate prefetch
/// candidates to reduce cache miss penalties. Implementations are driven in
/// program order by a single caller and are never re-entered.
pub trait Prefetcher: Send + Sync {
    /// Short, stable name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Observes a memory access and generates prefetch candidates.
    ///
    /// Called once per memory reference, hit or miss. The access is recorded
    /// into the model's history before any prediction is made.
    ///
    /// # Arguments
    ///
    /// * `event` - The access that was just performed.
    ///
    /// # Returns
    ///
    /// Candidate addresses in issue order. Empty if nothing is predicted.
    fn observe(&mut self, event: &AccessEvent) -> Vec<u64>;

    /// Notifies the prefetcher that a previously issued prefetch has landed.
    ///
    /// Models that do not adjust their lookahead ignore this.
    fn prefetch_complete(&mut self, _addr: u64) {}
}
