//! Prefetch engine: the host-facing prefetcher context.
//!
//! One `PrefetchEngine` bundles everything a host needs per prefetcher
//! instance, so several engines (one per simulated core, say) can run side
//! by side without shared state:
//! 1. **Strategy:** The boxed [`Prefetcher`] selected by configuration.
//! 2. **Admission:** The stateless [`AdmissionFilter`] applied to every candidate.
//! 3. **Statistics:** Counters for everything the engine observed and issued.
//!
//! The host drives it in program order: `new` once, then `on_access` per
//! memory reference and `on_prefetch_complete` whenever a prefetch lands.

use tracing::{debug, trace};

use crate::common::AccessEvent;
use crate::config::{Config, PrefetcherKind};
use crate::host::PrefetchHost;
use crate::prefetch::{
    AdmissionFilter, GhbPrefetcher, Prefetcher, RptPrefetcher, StridePrefetcher, VectorPrefetcher,
};
use crate::stats::PrefetchStats;

/// Prefetcher context owned by a single host.
pub struct PrefetchEngine {
    prefetcher: Option<Box<dyn Prefetcher>>,
    filter: AdmissionFilter,
    stats: PrefetchStats,
}

impl std::fmt::Debug for PrefetchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefetchEngine")
            .field("prefetcher", &self.name())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl PrefetchEngine {
    /// Creates an engine with empty history for the configured strategy.
    ///
    /// # Arguments
    ///
    /// * `config` - Strategy selector and per-strategy parameters.
    pub fn new(config: &Config) -> Self {
        let prefetcher: Option<Box<dyn Prefetcher>> = match config.prefetcher {
            PrefetcherKind::Ghb => Some(Box::new(GhbPrefetcher::with_config(&config.ghb))),
            PrefetcherKind::Rpt => Some(Box::new(RptPrefetcher::with_config(&config.rpt))),
            PrefetcherKind::Stride => {
                Some(Box::new(StridePrefetcher::with_config(&config.stride)))
            }
            PrefetcherKind::Vector => {
                Some(Box::new(VectorPrefetcher::with_config(&config.vector)))
            }
            PrefetcherKind::None => None,
        };
        let engine = Self::with_prefetcher(prefetcher);
        debug!(prefetcher = engine.name(), "initialized prefetch engine");
        engine
    }

    /// Creates an engine around an existing strategy, or none at all.
    pub fn with_prefetcher(prefetcher: Option<Box<dyn Prefetcher>>) -> Self {
        Self {
            prefetcher,
            filter: AdmissionFilter::new(),
            stats: PrefetchStats::default(),
        }
    }

    /// Name of the active strategy (`"none"` when prefetching is disabled).
    pub fn name(&self) -> &'static str {
        self.prefetcher.as_ref().map_or("none", |p| p.name())
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &PrefetchStats {
        &self.stats
    }

    /// Counts a demand access that hit a block brought in by a prefetch.
    ///
    /// `was_miss` is the access's own miss flag; it separates prefetches that
    /// covered a miss from ones that only duplicated a hit.
    pub const fn record_useful(&mut self, was_miss: bool) {
        self.stats.useful += 1;
        if was_miss {
            self.stats.covered_misses += 1;
        }
    }

    /// Handles one memory reference.
    ///
    /// Records the access and predicts, then hands every admitted candidate
    /// to `host.issue_fetch` in prediction order. A candidate issued earlier
    /// in the same call is seen as in flight by later duplicates.
    ///
    /// # Arguments
    ///
    /// * `host` - The surrounding memory system.
    /// * `event` - The access that was just performed.
    ///
    /// # Returns
    ///
    /// Number of prefetches issued.
    pub fn on_access<H: PrefetchHost + ?Sized>(&mut self, host: &mut H, event: AccessEvent) -> usize {
        self.stats.accesses += 1;
        if event.miss {
            self.stats.misses += 1;
        }

        let Some(prefetcher) = self.prefetcher.as_mut() else {
            return 0;
        };
        let candidates = prefetcher.observe(&event);
        self.stats.candidates += candidates.len() as u64;

        let mut issued = 0;
        for addr in candidates {
            let admission = self.filter.check(host, addr);
            self.stats.record_admission(admission);
            if admission.is_admitted() {
                trace!(
                    target: "pfsim::prefetch",
                    pc = format_args!("{:#x}", event.pc),
                    addr = format_args!("{addr:#x}"),
                    "issue prefetch"
                );
                host.issue_fetch(addr);
                issued += 1;
            } else {
                trace!(
                    target: "pfsim::prefetch",
                    addr = format_args!("{addr:#x}"),
                    reason = ?admission,
                    "drop candidate"
                );
            }
        }
        issued
    }

    /// Handles the landing of a previously issued prefetch.
    pub fn on_prefetch_complete(&mut self, addr: u64) {
        self.stats.completed += 1;
        if let Some(prefetcher) = self.prefetcher.as_mut() {
            prefetcher.prefetch_complete(addr);
        }
    }
}
