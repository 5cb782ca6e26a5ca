//! Prefetch Admission Filter.
//!
//! Gates every candidate on the host's view of the memory system before a
//! fetch is requested. Checks run in a fixed order and the first failing
//! check decides the outcome:
//! 1. **Bounds:** The candidate must not exceed the host's highest physical address.
//! 2. **Residency:** The candidate must not already be cached.
//! 3. **Duplicates:** The candidate must not already have a fetch in flight.
//!
//! The filter keeps no state; every answer comes from the host.

use crate::host::PrefetchHost;

/// Outcome of running a candidate through the [`AdmissionFilter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Admission {
    /// The candidate may be fetched.
    Admit,
    /// The candidate lies above the host's physical address ceiling.
    OutOfBounds,
    /// The candidate is already resident in the cache.
    Cached,
    /// A fetch for the candidate is already outstanding.
    InFlight,
}

impl Admission {
    /// Returns `true` for [`Admission::Admit`].
    #[inline]
    pub const fn is_admitted(self) -> bool {
        matches!(self, Self::Admit)
    }
}

/// Stateless feasibility gate in front of the host's fetch primitive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdmissionFilter;

impl AdmissionFilter {
    /// Creates a filter.
    pub const fn new() -> Self {
        Self
    }

    /// Classifies a candidate address.
    ///
    /// # Arguments
    ///
    /// * `host` - Source of truth for bounds, residency and outstanding fetches.
    /// * `addr` - The candidate address.
    pub fn check<H: PrefetchHost + ?Sized>(&self, host: &H, addr: u64) -> Admission {
        if addr > host.max_physical_address() {
            Admission::OutOfBounds
        } else if host.is_cached(addr) {
            Admission::Cached
        } else if host.is_in_flight(addr) {
            Admission::InFlight
        } else {
            Admission::Admit
        }
    }

    /// Returns `true` if `addr` passes every check.
    #[inline]
    pub fn admit<H: PrefetchHost + ?Sized>(&self, host: &H, addr: u64) -> bool {
        self.check(host, addr).is_admitted()
    }
}
