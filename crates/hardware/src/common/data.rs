//! Memory Access Events.
//!
//! This module defines the record the host hands to a prefetcher once per
//! memory reference. It is used for the following:
//! 1. **Training:** Every event is recorded into the prefetcher's history, hit or miss.
//! 2. **Correlation:** The instruction address is the key that groups accesses into streams.
//! 3. **Statistics Tracking:** The miss flag feeds coverage accounting.

use serde::{Deserialize, Serialize};

/// One observed load/store on the host's memory path.
///
/// Events are immutable and supplied once, in program order. Prefetchers
/// copy what they need out of an event and never retain a reference to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessEvent {
    /// Address of the instruction that issued the reference.
    pub pc: u64,
    /// Referenced memory address.
    pub mem_addr: u64,
    /// Whether the reference missed in the cache.
    pub miss: bool,
}

impl AccessEvent {
    /// Creates an access event.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the issuing instruction.
    /// * `mem_addr` - Referenced memory address.
    /// * `miss` - `true` if the access missed in the cache.
    #[inline]
    pub const fn new(pc: u64, mem_addr: u64, miss: bool) -> Self {
        Self { pc, mem_addr, miss }
    }

    /// Creates an event for a cache miss.
    #[inline]
    pub const fn miss(pc: u64, mem_addr: u64) -> Self {
        Self::new(pc, mem_addr, true)
    }

    /// Creates an event for a cache hit.
    #[inline]
    pub const fn hit(pc: u64, mem_addr: u64) -> Self {
        Self::new(pc, mem_addr, false)
    }
}
