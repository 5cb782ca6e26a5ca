//! Host interface for prefetchers.
//!
//! This module defines the `PrefetchHost` trait implemented by the memory
//! simulator that embeds a prefetcher. It provides:
//! 1. **Residency:** Whether an address is already cached or already being fetched.
//! 2. **Bounds:** The highest physical address that may be requested.
//! 3. **Issue:** The fire-and-forget fetch primitive.
//!
//! The prefetch engine never caches any of these answers; the host is the
//! only source of truth for cache state.

/// Memory system surrounding a prefetcher.
pub trait PrefetchHost {
    /// Returns `true` if `addr` is resident in the cache.
    fn is_cached(&self, addr: u64) -> bool;

    /// Returns `true` if a fetch for `addr` is outstanding.
    fn is_in_flight(&self, addr: u64) -> bool;

    /// Highest physical address that may be fetched.
    fn max_physical_address(&self) -> u64;

    /// Requests `addr` be brought into the cache. No completion is reported
    /// through this call.
    fn issue_fetch(&mut self, addr: u64);
}
