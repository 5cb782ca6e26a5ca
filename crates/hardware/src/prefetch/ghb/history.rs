//! Global History Buffer.
//!
//! A bounded, chronologically ordered log of every observed access. Each
//! record sits on two doubly linked lists at once:
//!
//! ```text
//!   chronological:  oldest <-> ... <-> newest          (all PCs)
//!   correlation:    first  <-> ... <-> most_recent     (one PC)
//! ```
//!
//! Records live in an arena of slots addressed by [`EntryHandle`]s. A handle
//! carries the generation of the slot it was issued for; releasing a slot bumps
//! the generation, so a handle to an evicted record resolves to `None` instead
//! of aliasing whatever reuses the slot.
//!
//! # Performance
//!
//! - **Time Complexity:** `record()`: O(1) amortized (one hash lookup, constant link updates); `get()`: O(1)
//! - **Space Complexity:** O(N) where N is the capacity (512 by default)

use tracing::trace;

use super::index::{IndexEntry, IndexTable};
use crate::common::AccessEvent;
use crate::common::constants::MAX_LENGTH;

/// Generation-checked reference to a record in a [`GlobalHistoryBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryHandle {
    slot: u32,
    generation: u32,
}

impl EntryHandle {
    #[cfg(test)]
    pub(crate) const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }
}

/// One observed access, retained until it ages out of the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pc: u64,
    address: u64,
    /// Offset to the next access by the same PC; unknown until that access happens.
    delta: Option<i64>,
    prev_in_ghb: Option<EntryHandle>,
    next_in_ghb: Option<EntryHandle>,
    prev_on_index: Option<EntryHandle>,
    next_on_index: Option<EntryHandle>,
}

impl HistoryEntry {
    /// Instruction address that issued the access.
    #[inline]
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Referenced memory address.
    #[inline]
    pub const fn address(&self) -> u64 {
        self.address
    }

    /// Signed offset to the next access by the same PC, if it has happened.
    #[inline]
    pub const fn delta(&self) -> Option<i64> {
        self.delta
    }

    /// Previous record in global insertion order.
    #[inline]
    pub const fn prev_in_ghb(&self) -> Option<EntryHandle> {
        self.prev_in_ghb
    }

    /// Next record in global insertion order.
    #[inline]
    pub const fn next_in_ghb(&self) -> Option<EntryHandle> {
        self.next_in_ghb
    }

    /// Previous record issued by the same PC.
    #[inline]
    pub const fn prev_on_index(&self) -> Option<EntryHandle> {
        self.prev_on_index
    }

    /// Next record issued by the same PC.
    #[inline]
    pub const fn next_on_index(&self) -> Option<EntryHandle> {
        self.next_on_index
    }
}

/// Signed distance from `from` to `to`.
#[inline]
pub(crate) const fn address_delta(from: u64, to: u64) -> i64 {
    to.wrapping_sub(from) as i64
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    entry: Option<HistoryEntry>,
}

/// Bounded chronological access history with a per-PC correlation index.
///
/// The buffer owns every [`HistoryEntry`]; the [`IndexTable`] only holds
/// handles into it and is kept in step on every insertion and eviction.
#[derive(Debug)]
pub struct GlobalHistoryBuffer {
    slots: Vec<Slot>,
    free: Vec<u32>,
    oldest: Option<EntryHandle>,
    newest: Option<EntryHandle>,
    len: usize,
    capacity: usize,
    index: IndexTable,
}

impl Default for GlobalHistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalHistoryBuffer {
    /// Creates an empty buffer holding up to [`MAX_LENGTH`] records.
    pub fn new() -> Self {
        Self::with_capacity(MAX_LENGTH)
    }

    /// Creates an empty buffer holding up to `capacity` records.
    ///
    /// A zero capacity is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            // One spare slot: a record is inserted before the oldest is evicted.
            slots: Vec::with_capacity(capacity + 1),
            free: Vec::new(),
            oldest: None,
            newest: None,
            len: 0,
            capacity,
            index: IndexTable::new(),
        }
    }

    /// Number of records currently held.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been recorded (or everything was evicted).
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of records held before the oldest is evicted.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The per-PC correlation index.
    #[inline]
    pub const fn index(&self) -> &IndexTable {
        &self.index
    }

    /// Handle of the chronologically oldest record.
    #[inline]
    pub const fn oldest(&self) -> Option<EntryHandle> {
        self.oldest
    }

    /// Handle of the chronologically newest record.
    #[inline]
    pub const fn newest(&self) -> Option<EntryHandle> {
        self.newest
    }

    /// Resolves a handle, or `None` if the record has been evicted.
    #[inline]
    pub fn get(&self, handle: EntryHandle) -> Option<&HistoryEntry> {
        self.slots
            .get(handle.slot as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    fn get_mut(&mut self, handle: EntryHandle) -> Option<&mut HistoryEntry> {
        self.slots
            .get_mut(handle.slot as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_mut())
    }

    /// Returns `true` if `handle` still refers to a live record.
    #[inline]
    pub fn contains(&self, handle: EntryHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Newest live record issued by `pc`.
    pub fn most_recent(&self, pc: u64) -> Option<EntryHandle> {
        self.index
            .find(pc)
            .and_then(IndexEntry::most_recent)
            .filter(|&handle| self.contains(handle))
    }

    /// Walks the records of `pc` from newest to oldest.
    pub fn chain(&self, pc: u64) -> Chain<'_> {
        Chain {
            ghb: self,
            cursor: self.most_recent(pc),
        }
    }

    /// Walks every record from oldest to newest.
    pub fn iter(&self) -> Chronological<'_> {
        Chronological {
            ghb: self,
            cursor: self.oldest,
        }
    }

    /// Records an access, evicting the oldest record if the buffer overflows.
    ///
    /// Registers the PC in the index on first sight, links the new record
    /// behind the PC's previous access (filling in that access's delta) and
    /// makes it the PC's most recent record.
    ///
    /// # Arguments
    ///
    /// * `event` - The observed access.
    ///
    /// # Returns
    ///
    /// Handle of the new record.
    pub fn record(&mut self, event: &AccessEvent) -> EntryHandle {
        let previous = match self.index.find(event.pc) {
            Some(entry) => entry.most_recent().filter(|&h| self.contains(h)),
            None => {
                let registered = self.index.register(event.pc).is_some();
                debug_assert!(registered, "pc {:#x} registered twice", event.pc);
                None
            }
        };

        let tail = self.newest;
        let handle = self.allocate(HistoryEntry {
            pc: event.pc,
            address: event.mem_addr,
            delta: None,
            prev_in_ghb: tail,
            next_in_ghb: None,
            prev_on_index: previous,
            next_on_index: None,
        });

        match tail.and_then(|t| self.get_mut(t)) {
            Some(last) => last.next_in_ghb = Some(handle),
            None => self.oldest = Some(handle),
        }
        self.newest = Some(handle);

        if let Some(prev) = previous.and_then(|p| self.get_mut(p)) {
            prev.delta = Some(address_delta(prev.address, event.mem_addr));
            prev.next_on_index = Some(handle);
        }

        self.index.update_most_recent(event.pc, handle);
        self.len += 1;

        if self.len > self.capacity {
            self.evict_oldest();
        }
        handle
    }

    /// Removes the oldest record from both of its lists, then frees its slot.
    fn evict_oldest(&mut self) {
        let Some(handle) = self.oldest else {
            return;
        };
        let Some(victim) = self.get(handle).copied() else {
            return;
        };

        match victim.next_in_ghb.and_then(|n| self.get_mut(n)) {
            Some(next) => next.prev_in_ghb = victim.prev_in_ghb,
            None => self.newest = victim.prev_in_ghb,
        }
        match victim.prev_in_ghb.and_then(|p| self.get_mut(p)) {
            Some(prev) => prev.next_in_ghb = victim.next_in_ghb,
            None => self.oldest = victim.next_in_ghb,
        }

        if let Some(next) = victim.next_on_index.and_then(|n| self.get_mut(n)) {
            next.prev_on_index = victim.prev_on_index;
        }
        if let Some(prev_handle) = victim.prev_on_index {
            let next_addr = victim
                .next_on_index
                .and_then(|n| self.get(n))
                .map(HistoryEntry::address);
            if let Some(prev) = self.get_mut(prev_handle) {
                prev.next_on_index = victim.next_on_index;
                prev.delta = next_addr.map(|addr| address_delta(prev.address, addr));
            }
        }

        self.index.retire(victim.pc, handle, victim.prev_on_index);
        self.release(handle);
        self.len -= 1;

        trace!(
            target: "pfsim::ghb",
            pc = format_args!("{:#x}", victim.pc),
            addr = format_args!("{:#x}", victim.address),
            "evicted oldest history entry"
        );
    }

    fn allocate(&mut self, entry: HistoryEntry) -> EntryHandle {
        if let Some(slot) = self.free.pop() {
            let cell = &mut self.slots[slot as usize];
            cell.entry = Some(entry);
            return EntryHandle {
                slot,
                generation: cell.generation,
            };
        }
        let slot = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        EntryHandle {
            slot,
            generation: 0,
        }
    }

    fn release(&mut self, handle: EntryHandle) {
        if let Some(cell) = self.slots.get_mut(handle.slot as usize) {
            cell.entry = None;
            cell.generation = cell.generation.wrapping_add(1);
            self.free.push(handle.slot);
        }
    }
}

/// Iterator over one PC's records, newest first.
#[derive(Debug)]
pub struct Chain<'a> {
    ghb: &'a GlobalHistoryBuffer,
    cursor: Option<EntryHandle>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (EntryHandle, &'a HistoryEntry);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let entry = self.ghb.get(handle)?;
        self.cursor = entry.prev_on_index;
        Some((handle, entry))
    }
}

/// Iterator over all records, oldest first.
#[derive(Debug)]
pub struct Chronological<'a> {
    ghb: &'a GlobalHistoryBuffer,
    cursor: Option<EntryHandle>,
}

impl<'a> Iterator for Chronological<'a> {
    type Item = (EntryHandle, &'a HistoryEntry);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let entry = self.ghb.get(handle)?;
        self.cursor = entry.next_in_ghb;
        Some((handle, entry))
    }
}
