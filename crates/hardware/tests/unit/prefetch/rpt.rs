//! Reference Prediction Table Tests.
//!
//! Verifies the four-state transition table and that prediction is
//! suppressed while an entry sits in `NoPrediction`.

use pfsim_core::common::AccessEvent;
use pfsim_core::config::RptConfig;
use pfsim_core::prefetch::rpt::PredictionState;
use pfsim_core::prefetch::{Prefetcher, RptPrefetcher};
use pretty_assertions::assert_eq;
use rstest::rstest;

use PredictionState::{Initial, NoPrediction, Steady, Transient};

// ══════════════════════════════════════════════════════════
// 1. State machine
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(Initial, true, Steady)]
#[case(Initial, false, Transient)]
#[case(Transient, true, Steady)]
#[case(Transient, false, NoPrediction)]
#[case(Steady, true, Steady)]
#[case(Steady, false, Initial)]
#[case(NoPrediction, true, Transient)]
#[case(NoPrediction, false, NoPrediction)]
fn test_transition(
    #[case] from: PredictionState,
    #[case] correct: bool,
    #[case] to: PredictionState,
) {
    assert_eq!(from.next(correct), to);
}

// ══════════════════════════════════════════════════════════
// 2. Prediction
// ══════════════════════════════════════════════════════════

#[test]
fn test_first_access_installs_entry() {
    let mut pf = RptPrefetcher::with_config(&RptConfig::default());
    assert!(pf.observe(&AccessEvent::miss(0x400, 0x1000)).is_empty());
    assert_eq!(pf.state(0x400), Some(Initial));
    assert_eq!(pf.state(0x401), None);
}

#[test]
fn test_regular_stride_reaches_steady() {
    let mut pf = RptPrefetcher::with_config(&RptConfig::default());
    let _ = pf.observe(&AccessEvent::miss(0x400, 0x1000));
    assert_eq!(pf.observe(&AccessEvent::miss(0x400, 0x1040)), vec![0x1080]);
    assert_eq!(pf.state(0x400), Some(Transient));
    assert_eq!(pf.observe(&AccessEvent::miss(0x400, 0x1080)), vec![0x10c0]);
    assert_eq!(pf.state(0x400), Some(Steady));
}

#[test]
fn test_irregular_pattern_stops_predicting_until_stride_repeats() {
    let mut pf = RptPrefetcher::with_config(&RptConfig::default());
    for addr in [0, 10, 30] {
        let _ = pf.observe(&AccessEvent::miss(0x400, addr));
    }
    assert_eq!(pf.state(0x400), Some(NoPrediction));
    assert!(pf.observe(&AccessEvent::miss(0x400, 70)).is_empty());

    assert_eq!(pf.observe(&AccessEvent::miss(0x400, 110)), vec![150]);
    assert_eq!(pf.state(0x400), Some(Transient));
}

#[test]
fn test_degree_predicts_multiple_strides() {
    let mut pf = RptPrefetcher::new(16, 3);
    let _ = pf.observe(&AccessEvent::miss(0x400, 0x1000));
    let predicted = pf.observe(&AccessEvent::miss(0x400, 0x1100));
    assert_eq!(predicted, vec![0x1200, 0x1300, 0x1400]);
}

#[test]
fn test_conflicting_pc_replaces_entry() {
    let mut pf = RptPrefetcher::new(16, 1);
    let _ = pf.observe(&AccessEvent::miss(0x400, 0x1000));
    let _ = pf.observe(&AccessEvent::miss(0x400, 0x1040));
    assert!(pf.observe(&AccessEvent::miss(0x410, 0x9000)).is_empty());
    assert_eq!(pf.state(0x400), None);
    assert_eq!(pf.state(0x410), Some(Initial));
}
