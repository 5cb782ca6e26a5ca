//! Reference Prediction Table Prefetcher.
//!
//! A stride prefetcher that only trusts a stride once it has been confirmed.
//! Each table entry carries a four-state machine driven by whether the last
//! stride predicted the current address:
//!
//! ```text
//!                correct                     incorrect
//!   Initial   -> Steady          Steady   -> Initial
//!   Transient -> Steady          Initial  -> Transient
//!   Steady    -> Steady          Transient-> NoPrediction
//!   NoPred.   -> Transient       NoPred.  -> NoPrediction
//! ```
//!
//! Every state except `NoPrediction` issues `addr + stride`.

use super::Prefetcher;
use crate::common::AccessEvent;
use crate::common::constants::RPT_TABLE_SIZE;
use crate::config::RptConfig;

/// Confidence state of a reference-table entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PredictionState {
    /// Freshly installed, or recovering from a miss in `Steady`.
    #[default]
    Initial,
    /// One misprediction away from giving up.
    Transient,
    /// Stride confirmed.
    Steady,
    /// Irregular; no prefetches until a stride is confirmed again.
    NoPrediction,
}

impl PredictionState {
    /// Next state after an access was (or was not) predicted by the stride.
    pub const fn next(self, correct: bool) -> Self {
        match (self, correct) {
            (Self::Initial | Self::Transient | Self::Steady, true) => Self::Steady,
            (Self::NoPrediction, true) => Self::Transient,
            (Self::Steady, false) => Self::Initial,
            (Self::Initial, false) => Self::Transient,
            (Self::Transient | Self::NoPrediction, false) => Self::NoPrediction,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct ReferencePrediction {
    tag: u64,
    prev_addr: u64,
    stride: i64,
    state: PredictionState,
    valid: bool,
}

impl ReferencePrediction {
    const fn predicts(&self, target: u64) -> bool {
        target == self.prev_addr.wrapping_add(self.stride as u64)
    }
}

/// Four-state reference prediction table.
#[derive(Debug)]
pub struct RptPrefetcher {
    table: Vec<ReferencePrediction>,
    table_mask: usize,
    degree: usize,
}

impl RptPrefetcher {
    /// Creates a new reference prediction table.
    ///
    /// # Arguments
    ///
    /// * `table_size` - Number of entries (power of 2; falls back to 16).
    /// * `degree` - Strides to prefetch ahead once a prediction is made.
    pub fn new(table_size: usize, degree: usize) -> Self {
        let safe_size = if table_size.is_power_of_two() {
            table_size
        } else {
            RPT_TABLE_SIZE
        };
        Self {
            table: vec![ReferencePrediction::default(); safe_size],
            table_mask: safe_size - 1,
            degree: degree.max(1),
        }
    }

    /// Creates a prefetcher from configuration.
    pub fn with_config(config: &RptConfig) -> Self {
        Self::new(config.table_size, config.degree)
    }

    /// Current state of `pc`'s entry, if `pc` owns one.
    pub fn state(&self, pc: u64) -> Option<PredictionState> {
        let entry = &self.table[(pc as usize) & self.table_mask];
        (entry.valid && entry.tag == pc).then_some(entry.state)
    }
}

impl Prefetcher for RptPrefetcher {
    fn name(&self) -> &'static str {
        "rpt"
    }

    fn observe(&mut self, event: &AccessEvent) -> Vec<u64> {
        let entry = &mut self.table[(event.pc as usize) & self.table_mask];

        if !(entry.valid && entry.tag == event.pc) {
            *entry = ReferencePrediction {
                tag: event.pc,
                prev_addr: event.mem_addr,
                stride: 0,
                state: PredictionState::Initial,
                valid: true,
            };
            return Vec::new();
        }

        let correct = entry.predicts(event.mem_addr);
        entry.state = entry.state.next(correct);
        entry.stride = event.mem_addr.wrapping_sub(entry.prev_addr) as i64;
        entry.prev_addr = event.mem_addr;

        if entry.state == PredictionState::NoPrediction {
            return Vec::new();
        }
        (1..=self.degree as i64)
            .map_while(|k| {
                entry
                    .stride
                    .checked_mul(k)
                    .and_then(|offset| event.mem_addr.checked_add_signed(offset))
            })
            .collect()
    }
}
