//! Stride-Directed Prefetcher.
//!
//! A prefetcher that keeps one reference-table entry per load instruction.
//! Each entry remembers the last address the instruction touched; the next
//! access by that instruction yields a stride, and the prefetcher asks for
//! the address one stride (or `degree` strides) ahead.
//!
//! The table is direct-mapped on the PC. Two instructions that collide simply
//! replace each other; the tag check keeps a replaced entry from producing a
//! stride against another instruction's address. A tagless table (see
//! [`StridePrefetcher::with_tagging`]) skips that check, so colliding
//! instructions share one last-address slot and may produce bogus strides.
//!
//! # Performance
//!
//! - **Time Complexity:** `observe()`: O(D) where D is the prefetch degree
//! - **Space Complexity:** O(T) where T is the table size (512 entries by default)
//! - **Best Case:** Constant-stride loops (array traversals)
//! - **Worst Case:** Irregular per-instruction patterns (pointer chasing)

use super::Prefetcher;
use crate::common::AccessEvent;
use crate::common::constants::STRIDE_TABLE_SIZE;
use crate::config::StrideConfig;

/// Entry in the reference table.
#[derive(Default, Clone, Copy, Debug)]
struct LoadInstruction {
    /// Address of the load instruction.
    pc: u64,
    /// Last address referenced by the instruction.
    prev_addr: u64,
    /// Whether the entry holds a live instruction.
    valid: bool,
}

/// Stride-directed prefetcher state.
#[derive(Debug)]
pub struct StridePrefetcher {
    /// Reference table.
    table: Vec<LoadInstruction>,
    /// Mask used to index the table.
    table_mask: usize,
    /// Number of strides to prefetch ahead.
    degree: usize,
    /// Whether entries are matched on the full PC.
    tagged: bool,
}

impl StridePrefetcher {
    /// Creates a new stride-directed prefetcher.
    ///
    /// # Arguments
    ///
    /// * `table_size` - Number of entries in the reference table (must be power of 2).
    /// * `degree` - The number of strides to prefetch ahead.
    pub fn new(table_size: usize, degree: usize) -> Self {
        let safe_size = if table_size.is_power_of_two() {
            table_size
        } else {
            STRIDE_TABLE_SIZE
        };

        Self {
            table: vec![LoadInstruction::default(); safe_size],
            table_mask: safe_size - 1,
            degree: degree.max(1),
            tagged: true,
        }
    }

    /// Enables or disables the PC tag check.
    #[must_use]
    pub const fn with_tagging(mut self, tagged: bool) -> Self {
        self.tagged = tagged;
        self
    }

    /// Creates a prefetcher from configuration.
    pub fn with_config(config: &StrideConfig) -> Self {
        Self::new(config.table_size, config.degree).with_tagging(config.tagged)
    }

    /// Returns `true` if an access by `pc` would be matched against its table entry.
    pub fn tracks(&self, pc: u64) -> bool {
        let entry = &self.table[(pc as usize) & self.table_mask];
        entry.valid && (!self.tagged || entry.pc == pc)
    }
}

impl Prefetcher for StridePrefetcher {
    fn name(&self) -> &'static str {
        "stride"
    }

    /// Observes a memory access and generates prefetch candidates.
    ///
    /// A known instruction produces `addr + k * stride` for `k` in
    /// `1..=degree`; an unknown one is installed and produces nothing.
    fn observe(&mut self, event: &AccessEvent) -> Vec<u64> {
        let idx = (event.pc as usize) & self.table_mask;
        let entry = &mut self.table[idx];

        if !(entry.valid && (!self.tagged || entry.pc == event.pc)) {
            *entry = LoadInstruction {
                pc: event.pc,
                prev_addr: event.mem_addr,
                valid: true,
            };
            return Vec::new();
        }

        let stride = event.mem_addr.wrapping_sub(entry.prev_addr) as i64;
        entry.pc = event.pc;
        entry.prev_addr = event.mem_addr;

        let mut prefetches = Vec::new();
        if stride == 0 {
            return prefetches;
        }
        let mut target = event.mem_addr;
        for _ in 0..self.degree {
            match target.checked_add_signed(stride) {
                Some(next) => {
                    prefetches.push(next);
                    target = next;
                }
                None => break,
            }
        }
        prefetches
    }
}
