//! Index Table.
//!
//! Maps an instruction address to the newest history record it produced.
//! From that record the rest of the PC's accesses are reachable through the
//! correlation links in the [`GlobalHistoryBuffer`](super::GlobalHistoryBuffer).
//!
//! Entries are hashed by PC, so lookup is O(1) regardless of how many
//! instructions are live. An entry whose whole chain has aged out of the
//! history is removed.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::history::EntryHandle;

/// Index entry for a single PC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pc: u64,
    most_recent: Option<EntryHandle>,
}

impl IndexEntry {
    const fn new(pc: u64) -> Self {
        Self {
            pc,
            most_recent: None,
        }
    }

    /// The instruction address this entry tracks.
    #[inline]
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Handle of the newest access by this PC, if any.
    ///
    /// The handle may be stale; resolve it through the history buffer.
    #[inline]
    pub const fn most_recent(&self) -> Option<EntryHandle> {
        self.most_recent
    }
}

/// Table of live [`IndexEntry`] records keyed by PC.
#[derive(Clone, Debug, Default)]
pub struct IndexTable {
    entries: HashMap<u64, IndexEntry>,
}

impl IndexTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the entry for `pc`.
    #[inline]
    pub fn find(&self, pc: u64) -> Option<&IndexEntry> {
        self.entries.get(&pc)
    }

    /// Registers a new entry for `pc` with no accesses yet.
    ///
    /// Callers must [`find`](Self::find) first; registering a PC twice is a
    /// no-op that leaves the existing entry untouched.
    ///
    /// # Returns
    ///
    /// The created entry, or `None` if `pc` was already registered.
    pub fn register(&mut self, pc: u64) -> Option<&IndexEntry> {
        match self.entries.entry(pc) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let entry: &IndexEntry = slot.insert(IndexEntry::new(pc));
                Some(entry)
            }
        }
    }

    /// Re-points `pc`'s newest access at `handle`.
    pub fn update_most_recent(&mut self, pc: u64, handle: EntryHandle) {
        if let Some(entry) = self.entries.get_mut(&pc) {
            entry.most_recent = Some(handle);
        }
    }

    /// Drops references to an evicted record.
    ///
    /// If `evicted` was `pc`'s newest access the entry falls back to `older`;
    /// with nothing older left the entry is removed.
    pub(crate) fn retire(&mut self, pc: u64, evicted: EntryHandle, older: Option<EntryHandle>) {
        let Some(entry) = self.entries.get_mut(&pc) else {
            return;
        };
        if entry.most_recent != Some(evicted) {
            return;
        }
        match older {
            Some(handle) => entry.most_recent = Some(handle),
            None => {
                let _ = self.entries.remove(&pc);
            }
        }
    }

    /// Number of live PCs.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no PC is tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the live entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }
}
