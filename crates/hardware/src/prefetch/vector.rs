//! Vector Prefetcher.
//!
//! A global stride prefetcher that ignores the issuing instruction. It keeps
//! the last few addresses of the whole access stream and, on a miss, prefetches
//! ahead only if every consecutive stride among them is the same.
//!
//! Unlike the per-PC models this one locks onto a single vector walk at a time;
//! interleaved streams from different instructions break the confirmation.
//! Hits update the history but never trigger a prefetch.

use std::collections::VecDeque;

use super::Prefetcher;
use crate::common::AccessEvent;
use crate::common::constants::VECTOR_CONFIRMATIONS;
use crate::config::VectorConfig;

/// Stride-confirming global prefetcher state.
#[derive(Debug)]
pub struct VectorPrefetcher {
    /// Most recent addresses, oldest first; holds `confirmations + 1` at most.
    recent: VecDeque<u64>,
    /// Equal consecutive strides required before issuing.
    confirmations: usize,
    /// Number of strides to prefetch ahead.
    degree: usize,
}

impl Default for VectorPrefetcher {
    fn default() -> Self {
        Self::new(VECTOR_CONFIRMATIONS, 1)
    }
}

impl VectorPrefetcher {
    /// Creates a new vector prefetcher.
    ///
    /// # Arguments
    ///
    /// * `confirmations` - Equal consecutive strides required (at least 1).
    /// * `degree` - The number of strides to prefetch ahead.
    pub fn new(confirmations: usize, degree: usize) -> Self {
        let confirmations = confirmations.max(1);
        Self {
            recent: VecDeque::with_capacity(confirmations + 1),
            confirmations,
            degree: degree.max(1),
        }
    }

    /// Creates a prefetcher from configuration.
    pub fn with_config(config: &VectorConfig) -> Self {
        Self::new(config.confirmations, config.degree)
    }

    /// The stride shared by every recent access pair, if the window is full
    /// and agrees.
    fn confirmed_stride(&self) -> Option<i64> {
        if self.recent.len() <= self.confirmations {
            return None;
        }
        let mut strides = self
            .recent
            .iter()
            .zip(self.recent.iter().skip(1))
            .map(|(&older, &newer)| newer.wrapping_sub(older) as i64);
        let first = strides.next()?;
        (first != 0 && strides.all(|s| s == first)).then_some(first)
    }
}

impl Prefetcher for VectorPrefetcher {
    fn name(&self) -> &'static str {
        "vector"
    }

    fn observe(&mut self, event: &AccessEvent) -> Vec<u64> {
        if self.recent.len() > self.confirmations {
            let _ = self.recent.pop_front();
        }
        self.recent.push_back(event.mem_addr);

        if !event.miss {
            return Vec::new();
        }
        let Some(stride) = self.confirmed_stride() else {
            return Vec::new();
        };
        (1..=self.degree as i64)
            .map_while(|k| {
                stride
                    .checked_mul(k)
                    .and_then(|offset| event.mem_addr.checked_add_signed(offset))
            })
            .collect()
    }
}
