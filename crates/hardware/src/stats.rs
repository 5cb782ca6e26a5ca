//! Prefetch statistics collection and reporting.
//!
//! This module tracks what a prefetcher did over a run. It provides:
//! 1. **Demand traffic:** Accesses and misses seen by the prefetcher.
//! 2. **Issue:** Candidates produced, prefetches issued, and drops by admission reason.
//! 3. **Outcome:** Prefetches that landed and prefetched blocks later used by a demand access.

use serde::Serialize;

use crate::prefetch::Admission;

/// Prefetch statistics structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PrefetchStats {
    /// Memory references observed.
    pub accesses: u64,
    /// Observed references that missed in the cache.
    pub misses: u64,
    /// Candidate addresses produced by the prefetcher.
    pub candidates: u64,
    /// Candidates that passed admission and were handed to the host.
    pub issued: u64,
    /// Candidates above the physical address ceiling.
    pub dropped_out_of_bounds: u64,
    /// Candidates already resident in the cache.
    pub dropped_cached: u64,
    /// Candidates already being fetched.
    pub dropped_in_flight: u64,
    /// Issued prefetches reported as landed.
    pub completed: u64,
    /// Demand accesses that hit a block brought in by a prefetch.
    pub useful: u64,
    /// Useful prefetches whose demand access was a miss in the trace.
    pub covered_misses: u64,
}

impl PrefetchStats {
    /// Counts one admission decision.
    pub const fn record_admission(&mut self, admission: Admission) {
        match admission {
            Admission::Admit => self.issued += 1,
            Admission::OutOfBounds => self.dropped_out_of_bounds += 1,
            Admission::Cached => self.dropped_cached += 1,
            Admission::InFlight => self.dropped_in_flight += 1,
        }
    }

    /// Total candidates rejected by the admission filter.
    pub const fn dropped(&self) -> u64 {
        self.dropped_out_of_bounds + self.dropped_cached + self.dropped_in_flight
    }

    /// Fraction of issued prefetches that were later used, in `[0, 1]`.
    pub fn accuracy(&self) -> f64 {
        if self.issued == 0 {
            0.0
        } else {
            self.useful as f64 / self.issued as f64
        }
    }

    /// Fraction of observed misses whose block had already been prefetched, in `[0, 1]`.
    pub fn coverage(&self) -> f64 {
        if self.misses == 0 {
            0.0
        } else {
            self.covered_misses as f64 / self.misses as f64
        }
    }

    /// Prints the statistics report to stdout.
    pub fn print(&self, prefetcher: &str) {
        let pct = |part: u64, whole: u64| {
            if whole == 0 {
                0.0
            } else {
                100.0 * part as f64 / whole as f64
            }
        };

        println!("\n==========================================================");
        println!("PREFETCH STATISTICS ({prefetcher})");
        println!("==========================================================");
        println!("accesses                 {}", self.accesses);
        println!(
            "misses                   {} ({:.2}%)",
            self.misses,
            pct(self.misses, self.accesses)
        );
        println!("----------------------------------------------------------");
        println!("ISSUE");
        println!("  pf.candidates          {}", self.candidates);
        println!(
            "  pf.issued              {} ({:.2}%)",
            self.issued,
            pct(self.issued, self.candidates)
        );
        println!("  pf.drop.bounds         {}", self.dropped_out_of_bounds);
        println!("  pf.drop.cached         {}", self.dropped_cached);
        println!("  pf.drop.inflight       {}", self.dropped_in_flight);
        println!("----------------------------------------------------------");
        println!("OUTCOME");
        println!("  pf.completed           {}", self.completed);
        println!("  pf.useful              {}", self.useful);
        println!("  pf.accuracy            {:.2}%", self.accuracy() * 100.0);
        println!("  pf.coverage            {:.2}%", self.coverage() * 100.0);
        println!("==========================================================");
    }
}
