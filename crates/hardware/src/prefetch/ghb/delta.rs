//! Delta-Correlation Predictor.
//!
//! Looks for the most recent earlier point in a PC's history where the same
//! two address deltas occurred back to back, then replays the deltas that
//! followed that point from the current address. Matching a delta pair rather
//! than a single stride lets the predictor follow repeating but non-constant
//! patterns such as alternating strides or loop-nest walks.
//!
//! ```text
//!   chain (newest on the right):  ... M2 M1 M ... E2 E1 E0
//!   signature:   (E0 - E1, E1 - E2)
//!   candidate M: (M - M1, M1 - M2)       searched from E1 backwards
//!   replay:      delta(M), delta(M.next), ... cycled up to `degree`
//! ```
//!
//! # Performance
//!
//! - **Time Complexity:** `predict()`: O(L + D) where L is the lookback bound and D the degree
//! - **Space Complexity:** O(D) per call; no state of its own

use super::history::{EntryHandle, GlobalHistoryBuffer, address_delta};
use crate::common::constants::{MAX_LOOKBACK, PREFETCH_DEGREE};

/// Read-only delta-pair matcher over a [`GlobalHistoryBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeltaCorrelator {
    max_lookback: usize,
    degree: usize,
}

impl Default for DeltaCorrelator {
    fn default() -> Self {
        Self::new(MAX_LOOKBACK, PREFETCH_DEGREE)
    }
}

impl DeltaCorrelator {
    /// Creates a correlator.
    ///
    /// # Arguments
    ///
    /// * `max_lookback` - Maximum chain hops searched for a match.
    /// * `degree` - Maximum number of addresses produced per prediction.
    pub const fn new(max_lookback: usize, degree: usize) -> Self {
        Self {
            max_lookback,
            degree,
        }
    }

    /// Maximum chain hops searched for a match.
    #[inline]
    pub const fn max_lookback(&self) -> usize {
        self.max_lookback
    }

    /// Maximum number of addresses produced per prediction.
    #[inline]
    pub const fn degree(&self) -> usize {
        self.degree
    }

    /// Predicts up to `degree` future addresses for `pc`.
    ///
    /// Must run after the current access has been recorded.
    ///
    /// # Arguments
    ///
    /// * `ghb` - History holding the current access.
    /// * `pc` - Instruction whose chain is searched.
    /// * `current` - Address of the current access; replay starts here.
    ///
    /// # Returns
    ///
    /// Predicted addresses in issue order, empty when the PC is unknown, has
    /// fewer than three accesses, or its signature has no match in range.
    pub fn predict(&self, ghb: &GlobalHistoryBuffer, pc: u64, current: u64) -> Vec<u64> {
        match self.find_match(ghb, pc) {
            Some(matched) => self.replay(ghb, matched, current),
            None => Vec::new(),
        }
    }

    /// Finds the most recent earlier record whose delta pair equals the
    /// pair ending at `pc`'s newest access.
    pub fn find_match(&self, ghb: &GlobalHistoryBuffer, pc: u64) -> Option<EntryHandle> {
        let e0 = ghb.get(ghb.most_recent(pc)?)?;
        let e1_handle = e0.prev_on_index()?;
        let e1 = ghb.get(e1_handle)?;
        let e2 = ghb.get(e1.prev_on_index()?)?;
        let signature = (
            address_delta(e1.address(), e0.address()),
            address_delta(e2.address(), e1.address()),
        );

        let mut candidate = Some(e1_handle);
        for _ in 0..self.max_lookback {
            let handle = candidate?;
            let m = ghb.get(handle)?;
            let m1 = ghb.get(m.prev_on_index()?)?;
            let m2 = ghb.get(m1.prev_on_index()?)?;
            let pair = (
                address_delta(m1.address(), m.address()),
                address_delta(m2.address(), m1.address()),
            );
            if pair == signature {
                return Some(handle);
            }
            candidate = m.prev_on_index();
        }
        None
    }

    /// Replays the deltas recorded from `matched` forward, cycling through
    /// them when the chain reaches the current access.
    fn replay(&self, ghb: &GlobalHistoryBuffer, matched: EntryHandle, current: u64) -> Vec<u64> {
        let mut period = Vec::with_capacity(self.degree);
        let mut cursor = Some(matched);
        while period.len() < self.degree {
            let Some(entry) = cursor.and_then(|h| ghb.get(h)) else {
                break;
            };
            let Some(delta) = entry.delta() else {
                break;
            };
            period.push(delta);
            cursor = entry.next_on_index();
        }

        let mut predictions = Vec::with_capacity(self.degree);
        let mut address = current;
        for &delta in period.iter().cycle().take(self.degree) {
            let Some(next) = address.checked_add_signed(delta) else {
                break;
            };
            predictions.push(next);
            address = next;
        }
        predictions
    }
}
