//! Simulator: owns the prefetch engine and the replay host side-by-side.
//!
//! Each trace event is processed as:
//! 1. **Completion:** Prefetches due at this point land and are reported to the engine.
//! 2. **Prediction:** The engine records the access and issues admitted prefetches.
//! 3. **Demand:** The host performs the access itself, crediting useful prefetches.

use crate::common::AccessEvent;
use crate::config::Config;
use crate::engine::PrefetchEngine;
use crate::sim::host::{DemandOutcome, TraceHost};
use crate::stats::PrefetchStats;

/// Top-level replay driver: prefetch engine + host.
#[derive(Debug)]
pub struct Simulator {
    /// Prefetcher context under test.
    pub engine: PrefetchEngine,
    /// Memory system stand-in.
    pub host: TraceHost,
}

impl Simulator {
    /// Creates a simulator with empty prefetcher history and an empty host.
    pub fn new(config: &Config) -> Self {
        Self {
            engine: PrefetchEngine::new(config),
            host: TraceHost::new(&config.host),
        }
    }

    /// Processes a single access event.
    ///
    /// # Returns
    ///
    /// Number of prefetches issued for this event.
    pub fn step(&mut self, event: AccessEvent) -> usize {
        for addr in self.host.tick() {
            self.engine.on_prefetch_complete(addr);
        }
        let issued = self.engine.on_access(&mut self.host, event);
        if self.host.demand(event.mem_addr) == DemandOutcome::PrefetchHit {
            self.engine.record_useful(event.miss);
        }
        issued
    }

    /// Replays a whole trace.
    ///
    /// # Returns
    ///
    /// Statistics after the last event.
    pub fn run<I>(&mut self, events: I) -> PrefetchStats
    where
        I: IntoIterator<Item = AccessEvent>,
    {
        for event in events {
            let _ = self.step(event);
        }
        *self.engine.stats()
    }
}
