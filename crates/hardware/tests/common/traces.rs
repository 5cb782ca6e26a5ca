use pfsim_core::common::AccessEvent;

/// `count` misses by `pc` starting at `base`, `stride` bytes apart.
pub fn strided(pc: u64, base: u64, stride: i64, count: usize) -> Vec<AccessEvent> {
    let mut addr = base;
    let mut events = Vec::with_capacity(count);
    for _ in 0..count {
        events.push(AccessEvent::miss(pc, addr));
        addr = addr.wrapping_add_signed(stride);
    }
    events
}

/// Misses by `pc` starting at `base` whose successive deltas are `deltas`.
///
/// Produces `deltas.len() + 1` events.
pub fn from_deltas(pc: u64, base: u64, deltas: &[i64]) -> Vec<AccessEvent> {
    let mut addr = base;
    let mut events = vec![AccessEvent::miss(pc, addr)];
    for &delta in deltas {
        addr = addr.wrapping_add_signed(delta);
        events.push(AccessEvent::miss(pc, addr));
    }
    events
}
