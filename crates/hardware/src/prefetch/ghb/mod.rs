//! Global History Buffer prefetcher.
//!
//! A per-instruction delta-correlation prefetcher. Every access is appended to
//! a bounded [`GlobalHistoryBuffer`]; accesses by the same PC are threaded
//! together through the [`IndexTable`]. On each access the
//! [`DeltaCorrelator`] searches the PC's chain for an earlier occurrence of
//! its latest two deltas and replays what followed.
//!
//! Eviction is strict FIFO across all PCs, so a PC that is hot for prediction
//! still loses its oldest history once it ages out.

/// Delta-pair matching and replay.
pub mod delta;

/// Bounded chronological history with generation-checked handles.
pub mod history;

/// PC to newest-access index.
pub mod index;

pub use self::delta::DeltaCorrelator;
pub use self::history::{EntryHandle, GlobalHistoryBuffer, HistoryEntry};
pub use self::index::{IndexEntry, IndexTable};

use super::Prefetcher;
use crate::common::AccessEvent;
use crate::config::GhbConfig;

/// Delta-correlation prefetcher backed by a global history buffer.
#[derive(Debug, Default)]
pub struct GhbPrefetcher {
    history: GlobalHistoryBuffer,
    correlator: DeltaCorrelator,
}

impl GhbPrefetcher {
    /// Creates a prefetcher with the default sizing (512 / 256 / 4).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a prefetcher from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - History capacity, lookback bound and prefetch degree.
    pub fn with_config(config: &GhbConfig) -> Self {
        Self {
            history: GlobalHistoryBuffer::with_capacity(config.history_length),
            correlator: DeltaCorrelator::new(config.max_lookback, config.degree),
        }
    }

    /// The access history.
    pub const fn history(&self) -> &GlobalHistoryBuffer {
        &self.history
    }

    /// The delta-pair matcher.
    pub const fn correlator(&self) -> &DeltaCorrelator {
        &self.correlator
    }
}

impl Prefetcher for GhbPrefetcher {
    fn name(&self) -> &'static str {
        "ghb"
    }

    /// Records the access, then predicts from the PC's correlation chain.
    fn observe(&mut self, event: &AccessEvent) -> Vec<u64> {
        let _ = self.history.record(event);
        self.correlator
            .predict(&self.history, event.pc, event.mem_addr)
    }
}
