//! Global Prefetcher Constants.
//!
//! This module defines the sizing constants of the prefetcher models. It includes:
//! 1. **History Constants:** Capacity of the global history buffer and the correlation lookback.
//! 2. **Issue Constants:** Maximum number of prefetches produced per access.
//! 3. **Host Constants:** Physical memory ceiling and block size of the replay host.

/// Capacity of the global history buffer, in access records.
pub const MAX_LENGTH: usize = 512;

/// Maximum number of per-PC chain hops searched for a matching delta pair.
pub const MAX_LOOKBACK: usize = 256;

/// Maximum number of addresses predicted per triggering access.
pub const PREFETCH_DEGREE: usize = 4;

/// Highest physical address the replay host accepts (256 MiB of memory).
pub const MAX_PHYS_MEM_ADDR: u64 = 256 * 1024 * 1024 - 1;

/// Cache block size in bytes used by the replay host.
pub const BLOCK_SIZE: u64 = 64;

/// Number of accesses a prefetch spends in flight before it lands.
pub const FETCH_LATENCY: u64 = 16;

/// Entries in the four-state reference prediction table.
pub const RPT_TABLE_SIZE: usize = 16;

/// Entries in the stride-directed reference table.
pub const STRIDE_TABLE_SIZE: usize = 512;

/// Equal consecutive strides the vector prefetcher needs before it issues.
pub const VECTOR_CONFIRMATIONS: usize = 3;
