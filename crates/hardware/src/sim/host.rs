//! Replay host.
//!
//! A deliberately small stand-in for the memory simulator a prefetcher
//! normally lives in. It models no capacity, replacement or timing beyond a
//! fixed fetch delay:
//! 1. **Residency:** Every block that was demanded or prefetched stays resident.
//! 2. **In-flight fetches:** An issued prefetch lands `fetch_latency` accesses later.
//! 3. **Bounds:** Fetches above `max_phys_addr` are refused by the admission filter.
//!
//! Residency is tracked per block, so an address is "cached" if any address
//! in its block was brought in.

use std::collections::{HashSet, VecDeque};

use crate::common::constants::BLOCK_SIZE;
use crate::config::HostConfig;
use crate::host::PrefetchHost;

/// Outcome of a demand access on the [`TraceHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemandOutcome {
    /// The block was resident because a prefetch brought it in.
    PrefetchHit,
    /// The block was resident from an earlier demand access.
    Hit,
    /// The block was not resident.
    Miss,
}

/// Trace-replay implementation of [`PrefetchHost`].
#[derive(Debug)]
pub struct TraceHost {
    block_mask: u64,
    max_phys_addr: u64,
    fetch_latency: u64,
    now: u64,
    resident: HashSet<u64>,
    /// Blocks that arrived by prefetch and have not been demanded yet.
    prefetched: HashSet<u64>,
    in_flight: VecDeque<(u64, u64)>,
    issued: Vec<u64>,
}

impl TraceHost {
    /// Creates an empty host.
    pub fn new(config: &HostConfig) -> Self {
        let block_size = if config.block_size.is_power_of_two() {
            config.block_size
        } else {
            BLOCK_SIZE
        };
        Self {
            block_mask: !(block_size - 1),
            max_phys_addr: config.max_phys_addr,
            fetch_latency: config.fetch_latency,
            now: 0,
            resident: HashSet::new(),
            prefetched: HashSet::new(),
            in_flight: VecDeque::new(),
            issued: Vec::new(),
        }
    }

    #[inline]
    const fn block(&self, addr: u64) -> u64 {
        addr & self.block_mask
    }

    /// Advances time by one access and lands every prefetch that is due.
    ///
    /// # Returns
    ///
    /// Addresses of the prefetches that landed, in issue order.
    pub fn tick(&mut self) -> Vec<u64> {
        self.now += 1;
        let mut landed = Vec::new();
        while let Some(&(addr, ready_at)) = self.in_flight.front() {
            if ready_at > self.now {
                break;
            }
            let _ = self.in_flight.pop_front();
            let block = self.block(addr);
            if self.resident.insert(block) {
                let _ = self.prefetched.insert(block);
            }
            landed.push(addr);
        }
        landed
    }

    /// Performs a demand access, making its block resident.
    pub fn demand(&mut self, addr: u64) -> DemandOutcome {
        let block = self.block(addr);
        if self.prefetched.remove(&block) {
            DemandOutcome::PrefetchHit
        } else if self.resident.insert(block) {
            DemandOutcome::Miss
        } else {
            DemandOutcome::Hit
        }
    }

    /// Every address handed to [`PrefetchHost::issue_fetch`], in order.
    pub fn issued(&self) -> &[u64] {
        &self.issued
    }

    /// Number of prefetches still in flight.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }
}

impl PrefetchHost for TraceHost {
    fn is_cached(&self, addr: u64) -> bool {
        self.resident.contains(&self.block(addr))
    }

    fn is_in_flight(&self, addr: u64) -> bool {
        let block = self.block(addr);
        self.in_flight.iter().any(|&(a, _)| self.block(a) == block)
    }

    fn max_physical_address(&self) -> u64 {
        self.max_phys_addr
    }

    fn issue_fetch(&mut self, addr: u64) {
        self.issued.push(addr);
        self.in_flight
            .push_back((addr, self.now.saturating_add(self.fetch_latency)));
    }
}
