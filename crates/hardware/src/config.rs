//! Configuration system for the prefetcher models.
//!
//! This module defines all configuration structures and enums used to
//! parameterize a run. It provides:
//! 1. **Defaults:** Baseline sizing for each prefetcher and for the replay host.
//! 2. **Structures:** Per-model sections (`ghb`, `rpt`, `stride`, `vector`) and the `host` section.
//! 3. **Enums:** The prefetcher strategy selector.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built with
//! `Config::default()`. Every field is optional in JSON and falls back to its default.

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants.
///
/// These values define the baseline configuration when not explicitly
/// overridden in a JSON configuration document.
mod defaults {
    use crate::common::constants;

    /// Global history buffer capacity (512 records).
    pub const GHB_HISTORY_LENGTH: usize = constants::MAX_LENGTH;

    /// Delta-pair search bound (256 chain hops).
    pub const GHB_MAX_LOOKBACK: usize = constants::MAX_LOOKBACK;

    /// Addresses predicted per access by the GHB prefetcher.
    pub const GHB_DEGREE: usize = constants::PREFETCH_DEGREE;

    /// Reference prediction table size (16 entries).
    pub const RPT_TABLE_SIZE: usize = constants::RPT_TABLE_SIZE;

    /// Stride-directed reference table size (512 entries).
    pub const STRIDE_TABLE_SIZE: usize = constants::STRIDE_TABLE_SIZE;

    /// Strides prefetched ahead by the table-based prefetchers.
    pub const TABLE_DEGREE: usize = 1;

    /// Equal consecutive strides required by the vector prefetcher.
    pub const VECTOR_CONFIRMATIONS: usize = constants::VECTOR_CONFIRMATIONS;

    /// Highest physical address accepted by the replay host.
    pub const MAX_PHYS_ADDR: u64 = constants::MAX_PHYS_MEM_ADDR;

    /// Cache block size of the replay host in bytes.
    pub const BLOCK_SIZE: u64 = constants::BLOCK_SIZE;

    /// Accesses a prefetch stays in flight on the replay host.
    pub const FETCH_LATENCY: u64 = constants::FETCH_LATENCY;
}

/// Prefetcher strategy.
///
/// All strategies sit behind the same observe/predict contract and are
/// interchangeable at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PrefetcherKind {
    /// No prefetching.
    #[serde(alias = "none")]
    None,
    /// Per-PC global history buffer with delta-correlation replay.
    #[default]
    #[serde(alias = "GHB", alias = "ghb")]
    Ghb,
    /// Four-state reference prediction table.
    #[serde(alias = "RPT", alias = "rpt")]
    Rpt,
    /// Stride-directed reference table.
    #[serde(alias = "stride")]
    Stride,
    /// Global stride confirmation, issuing on misses only.
    #[serde(alias = "vector")]
    Vector,
}

impl std::str::FromStr for PrefetcherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "ghb" => Ok(Self::Ghb),
            "rpt" => Ok(Self::Rpt),
            "stride" => Ok(Self::Stride),
            "vector" => Ok(Self::Vector),
            other => Err(format!(
                "unknown prefetcher `{other}` (expected none, ghb, rpt, stride or vector)"
            )),
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use pfsim_core::config::{Config, PrefetcherKind};
///
/// let config = Config::default();
/// assert_eq!(config.prefetcher, PrefetcherKind::Ghb);
/// assert_eq!(config.ghb.history_length, 512);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use pfsim_core::config::{Config, PrefetcherKind};
///
/// let json = r#"{
///     "prefetcher": "Rpt",
///     "rpt": { "table_size": 64 },
///     "host": { "block_size": 32 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.prefetcher, PrefetcherKind::Rpt);
/// assert_eq!(config.rpt.table_size, 64);
/// assert_eq!(config.rpt.degree, 1);
/// assert_eq!(config.host.block_size, 32);
/// assert_eq!(config.ghb.max_lookback, 256);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Active prefetcher strategy
    #[serde(default)]
    pub prefetcher: PrefetcherKind,
    /// Global history buffer prefetcher parameters
    #[serde(default)]
    pub ghb: GhbConfig,
    /// Reference prediction table parameters
    #[serde(default)]
    pub rpt: RptConfig,
    /// Stride-directed table parameters
    #[serde(default)]
    pub stride: StrideConfig,
    /// Vector prefetcher parameters
    #[serde(default)]
    pub vector: VectorConfig,
    /// Replay host parameters
    #[serde(default)]
    pub host: HostConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON and the matching
    /// validation error for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section for values the models cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ghb.history_length == 0 {
            return Err(ConfigError::ZeroHistoryLength);
        }
        if self.ghb.max_lookback == 0 {
            return Err(ConfigError::ZeroLookback);
        }
        if self.ghb.degree == 0 {
            return Err(ConfigError::ZeroDegree { table: "ghb" });
        }
        if !self.rpt.table_size.is_power_of_two() {
            return Err(ConfigError::BadTableSize {
                table: "rpt",
                size: self.rpt.table_size,
            });
        }
        if self.rpt.degree == 0 {
            return Err(ConfigError::ZeroDegree { table: "rpt" });
        }
        if !self.stride.table_size.is_power_of_two() {
            return Err(ConfigError::BadTableSize {
                table: "stride",
                size: self.stride.table_size,
            });
        }
        if self.stride.degree == 0 {
            return Err(ConfigError::ZeroDegree { table: "stride" });
        }
        if self.vector.confirmations == 0 {
            return Err(ConfigError::ZeroConfirmations);
        }
        if self.vector.degree == 0 {
            return Err(ConfigError::ZeroDegree { table: "vector" });
        }
        if !self.host.block_size.is_power_of_two() {
            return Err(ConfigError::BadBlockSize(self.host.block_size));
        }
        Ok(())
    }
}

/// Global history buffer prefetcher parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GhbConfig {
    /// Records held before the oldest is evicted
    #[serde(default = "GhbConfig::default_history_length")]
    pub history_length: usize,
    /// Chain hops searched for a matching delta pair
    #[serde(default = "GhbConfig::default_max_lookback")]
    pub max_lookback: usize,
    /// Maximum addresses predicted per access
    #[serde(default = "GhbConfig::default_degree")]
    pub degree: usize,
}

impl GhbConfig {
    const fn default_history_length() -> usize {
        defaults::GHB_HISTORY_LENGTH
    }

    const fn default_max_lookback() -> usize {
        defaults::GHB_MAX_LOOKBACK
    }

    const fn default_degree() -> usize {
        defaults::GHB_DEGREE
    }
}

impl Default for GhbConfig {
    fn default() -> Self {
        Self {
            history_length: Self::default_history_length(),
            max_lookback: Self::default_max_lookback(),
            degree: Self::default_degree(),
        }
    }
}

/// Reference prediction table parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RptConfig {
    /// Direct-mapped table entries (power of two)
    #[serde(default = "RptConfig::default_table_size")]
    pub table_size: usize,
    /// Strides prefetched ahead
    #[serde(default = "default_table_degree")]
    pub degree: usize,
}

impl RptConfig {
    const fn default_table_size() -> usize {
        defaults::RPT_TABLE_SIZE
    }
}

impl Default for RptConfig {
    fn default() -> Self {
        Self {
            table_size: Self::default_table_size(),
            degree: default_table_degree(),
        }
    }
}

/// Stride-directed table parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StrideConfig {
    /// Direct-mapped table entries (power of two)
    #[serde(default = "StrideConfig::default_table_size")]
    pub table_size: usize,
    /// Strides prefetched ahead
    #[serde(default = "default_table_degree")]
    pub degree: usize,
    /// Check the PC tag; when off, PCs sharing an entry share its last address
    #[serde(default = "StrideConfig::default_tagged")]
    pub tagged: bool,
}

impl StrideConfig {
    const fn default_tagged() -> bool {
        true
    }

    const fn default_table_size() -> usize {
        defaults::STRIDE_TABLE_SIZE
    }
}

impl Default for StrideConfig {
    fn default() -> Self {
        Self {
            table_size: Self::default_table_size(),
            degree: default_table_degree(),
            tagged: Self::default_tagged(),
        }
    }
}

/// Vector (global stride confirmation) prefetcher parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct VectorConfig {
    /// Equal consecutive strides required before a miss triggers a prefetch
    #[serde(default = "VectorConfig::default_confirmations")]
    pub confirmations: usize,
    /// Strides prefetched ahead
    #[serde(default = "default_table_degree")]
    pub degree: usize,
}

impl VectorConfig {
    const fn default_confirmations() -> usize {
        defaults::VECTOR_CONFIRMATIONS
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            confirmations: Self::default_confirmations(),
            degree: default_table_degree(),
        }
    }
}

const fn default_table_degree() -> usize {
    defaults::TABLE_DEGREE
}

/// Replay host parameters.
///
/// Only used by the trace-driven host in [`crate::sim`]; the prefetchers
/// themselves never read these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    /// Highest physical address that may be prefetched
    #[serde(default = "HostConfig::default_max_phys_addr")]
    pub max_phys_addr: u64,
    /// Cache block size in bytes (power of two)
    #[serde(default = "HostConfig::default_block_size")]
    pub block_size: u64,
    /// Accesses a prefetch stays in flight before it lands
    #[serde(default = "HostConfig::default_fetch_latency")]
    pub fetch_latency: u64,
}

impl HostConfig {
    const fn default_max_phys_addr() -> u64 {
        defaults::MAX_PHYS_ADDR
    }

    const fn default_block_size() -> u64 {
        defaults::BLOCK_SIZE
    }

    const fn default_fetch_latency() -> u64 {
        defaults::FETCH_LATENCY
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_phys_addr: Self::default_max_phys_addr(),
            block_size: Self::default_block_size(),
            fetch_latency: Self::default_fetch_latency(),
        }
    }
}
