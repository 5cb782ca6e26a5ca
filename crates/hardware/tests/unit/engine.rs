//! Prefetch Engine Tests.
//!
//! Verifies that only admitted candidates reach the host, that drops are
//! counted by reason, and that a disabled engine stays silent.

use mockall::predicate::{eq, ne};
use pfsim_core::common::AccessEvent;
use pfsim_core::config::{Config, PrefetcherKind};
use pfsim_core::engine::PrefetchEngine;
use pfsim_core::prefetch::Prefetcher;
use pretty_assertions::assert_eq;

use crate::common::hosts::{MockHost, RecordingHost};
use crate::common::init_tracing;
use crate::common::traces::strided;

/// Prefetcher that always proposes the same candidates.
#[derive(Debug)]
struct FixedPrefetcher(Vec<u64>);

impl Prefetcher for FixedPrefetcher {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn observe(&mut self, _event: &AccessEvent) -> Vec<u64> {
        self.0.clone()
    }
}

fn ghb_engine() -> PrefetchEngine {
    init_tracing();
    PrefetchEngine::new(&Config::default())
}

// ══════════════════════════════════════════════════════════
// 1. Admission
// ══════════════════════════════════════════════════════════

/// 100, 200, 300, 400 predicts 500..800; 500 is cached and must never be fetched.
#[test]
fn test_cached_candidate_never_issued() {
    let mut host = MockHost::new();
    host.expect_max_physical_address().return_const(u64::MAX);
    host.expect_is_cached().returning(|addr| addr == 500);
    host.expect_is_in_flight().return_const(false);
    host.expect_issue_fetch().with(eq(500)).never();
    host.expect_issue_fetch().with(ne(500)).times(3).return_const(());

    let mut engine = ghb_engine();
    let mut issued = 0;
    for event in strided(0x400, 100, 100, 4) {
        issued = engine.on_access(&mut host, event);
    }

    assert_eq!(issued, 3);
    let stats = engine.stats();
    assert_eq!(stats.candidates, 4);
    assert_eq!(stats.issued, 3);
    assert_eq!(stats.dropped_cached, 1);
}

#[test]
fn test_issue_order_follows_prediction_order() {
    let mut host = RecordingHost::new();
    let mut engine = ghb_engine();
    for event in strided(0x400, 0x1000, 0x40, 4) {
        let _ = engine.on_access(&mut host, event);
    }
    assert_eq!(host.issued, vec![0x1100, 0x1140, 0x1180, 0x11c0]);
}

#[test]
fn test_out_of_bounds_candidates_dropped() {
    let mut host = RecordingHost::new();
    host.max_addr = 0x1140;
    let mut engine = ghb_engine();
    for event in strided(0x400, 0x1000, 0x40, 4) {
        let _ = engine.on_access(&mut host, event);
    }
    assert_eq!(host.issued, vec![0x1100, 0x1140]);
    assert_eq!(engine.stats().dropped_out_of_bounds, 2);
}

/// A zero delta repeated predicts the same address four times; the first
/// issue makes the rest in-flight duplicates.
#[test]
fn test_duplicates_within_one_access_are_in_flight() {
    let mut host = RecordingHost::new();
    let mut engine = ghb_engine();
    let mut issued = 0;
    for event in strided(0x400, 0x3000, 0, 4) {
        issued = engine.on_access(&mut host, event);
    }
    assert_eq!(issued, 1);
    assert_eq!(host.issued, vec![0x3000]);
    assert_eq!(engine.stats().dropped_in_flight, 3);
    assert_eq!(engine.stats().dropped(), 3);
}

// ══════════════════════════════════════════════════════════
// 2. Strategy selection and bookkeeping
// ══════════════════════════════════════════════════════════

#[test]
fn test_disabled_engine_only_counts_traffic() {
    let config = Config {
        prefetcher: PrefetcherKind::None,
        ..Config::default()
    };
    let mut engine = PrefetchEngine::new(&config);
    let mut host = MockHost::new();
    host.expect_issue_fetch().never();

    for event in strided(0x400, 0x1000, 0x40, 8) {
        assert_eq!(engine.on_access(&mut host, event), 0);
    }
    let _ = engine.on_access(&mut host, AccessEvent::hit(0x400, 0x1000));

    assert_eq!(engine.name(), "none");
    assert_eq!(engine.stats().accesses, 9);
    assert_eq!(engine.stats().misses, 8);
    assert_eq!(engine.stats().candidates, 0);
}

#[test]
fn test_engine_names_follow_kind() {
    for (kind, name) in [
        (PrefetcherKind::Ghb, "ghb"),
        (PrefetcherKind::Rpt, "rpt"),
        (PrefetcherKind::Stride, "stride"),
        (PrefetcherKind::Vector, "vector"),
        (PrefetcherKind::None, "none"),
    ] {
        let config = Config {
            prefetcher: kind,
            ..Config::default()
        };
        assert_eq!(PrefetchEngine::new(&config).name(), name);
    }
}

#[test]
fn test_custom_prefetcher_and_completion() {
    let mut engine =
        PrefetchEngine::with_prefetcher(Some(Box::new(FixedPrefetcher(vec![0x40, 0x80]))));
    let mut host = RecordingHost::with_cached(&[0x80]);

    assert_eq!(engine.on_access(&mut host, AccessEvent::miss(1, 0)), 1);
    engine.on_prefetch_complete(0x40);
    engine.record_useful(true);
    engine.record_useful(false);

    let stats = engine.stats();
    assert_eq!(engine.name(), "fixed");
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.useful, 2);
    assert_eq!(stats.covered_misses, 1);
}
