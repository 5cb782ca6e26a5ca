//! Trace Replay Tests.
//!
//! Runs whole traces through the engine and the replay host and checks the
//! resulting statistics.

use pfsim_core::config::{Config, HostConfig, PrefetcherKind};
use pfsim_core::host::PrefetchHost;
use pfsim_core::sim::host::{DemandOutcome, TraceHost};
use pfsim_core::sim::Simulator;
use pretty_assertions::assert_eq;

use crate::common::traces::strided;

fn config(kind: PrefetcherKind, fetch_latency: u64) -> Config {
    Config {
        prefetcher: kind,
        host: HostConfig {
            fetch_latency,
            ..HostConfig::default()
        },
        ..Config::default()
    }
}

// ══════════════════════════════════════════════════════════
// 1. Replay host
// ══════════════════════════════════════════════════════════

#[test]
fn test_host_tracks_residency_per_block() {
    let mut host = TraceHost::new(&HostConfig::default());
    assert_eq!(host.demand(0x1010), DemandOutcome::Miss);
    assert!(host.is_cached(0x1000));
    assert!(host.is_cached(0x103f));
    assert!(!host.is_cached(0x1040));
    assert_eq!(host.demand(0x1020), DemandOutcome::Hit);
}

#[test]
fn test_prefetch_lands_after_latency() {
    let mut host = TraceHost::new(&HostConfig {
        fetch_latency: 2,
        ..HostConfig::default()
    });
    host.issue_fetch(0x2000);
    assert!(host.is_in_flight(0x2008));
    assert!(host.tick().is_empty());
    assert_eq!(host.tick(), vec![0x2000]);
    assert_eq!(host.pending(), 0);
    assert!(host.is_cached(0x2000));
    assert_eq!(host.demand(0x2030), DemandOutcome::PrefetchHit);
    assert_eq!(host.demand(0x2030), DemandOutcome::Hit);
    assert_eq!(host.issued(), &[0x2000]);
}

// ══════════════════════════════════════════════════════════
// 2. End-to-end
// ══════════════════════════════════════════════════════════

/// Block-stride stream with single-access latency: from the fifth access on,
/// every demand finds its block already prefetched.
#[test]
fn test_ghb_covers_block_stride_stream() {
    let mut sim = Simulator::new(&config(PrefetcherKind::Ghb, 1));
    let stats = sim.run(strided(0x400, 0x1000, 64, 20));

    assert_eq!(stats.accesses, 20);
    assert_eq!(stats.misses, 20);
    assert_eq!(stats.candidates, 68);
    assert_eq!(stats.issued, 20);
    assert_eq!(stats.dropped_cached, 48);
    assert_eq!(stats.useful, 16);
    assert_eq!(stats.covered_misses, 16);
    assert_eq!(stats.completed, 19);
    assert_eq!(sim.host.pending(), 1);
    assert!((stats.coverage() - 0.8).abs() < f64::EPSILON);
}

/// An unbounded fetch latency keeps prefetches in flight forever instead of
/// overflowing the landing time.
#[test]
fn test_max_fetch_latency_never_lands() {
    let mut sim = Simulator::new(&config(PrefetcherKind::Stride, u64::MAX));
    let stats = sim.run(strided(0x400, 0x1000, 64, 4));

    assert_eq!(stats.issued, 3);
    assert_eq!(stats.completed, 0);
    assert_eq!(stats.useful, 0);
    assert_eq!(sim.host.pending(), 3);
}

#[test]
fn test_disabled_prefetcher_issues_nothing() {
    let mut sim = Simulator::new(&config(PrefetcherKind::None, 1));
    let stats = sim.run(strided(0x400, 0x1000, 64, 20));
    assert_eq!(stats.issued, 0);
    assert_eq!(stats.useful, 0);
    assert!(sim.host.issued().is_empty());
}

#[test]
fn test_prefetches_above_ceiling_never_reach_host() {
    let mut cfg = config(PrefetcherKind::Stride, 1);
    cfg.host.max_phys_addr = 0x1100;
    let mut sim = Simulator::new(&cfg);
    let _ = sim.run(strided(0x400, 0x1000, 64, 6));

    assert!(sim.host.issued().iter().all(|&addr| addr <= 0x1100));
    assert!(sim.engine.stats().dropped_out_of_bounds > 0);
}
