//! Configuration and Trace Errors.
//!
//! This module defines the error types of the crate. It provides:
//! 1. **Configuration Errors:** Malformed JSON and out-of-range prefetcher parameters.
//! 2. **Trace Errors:** I/O failures and malformed lines in access traces.
//!
//! The prediction path itself never fails: a missing history, a cold PC or an
//! unmatched pattern simply yields no prefetch candidates.

use thiserror::Error;

/// Errors raised while loading or validating a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for the schema.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The global history buffer cannot hold any entries.
    #[error("ghb.history_length must be at least 1")]
    ZeroHistoryLength,

    /// The correlation search would never examine a candidate.
    #[error("ghb.max_lookback must be at least 1")]
    ZeroLookback,

    /// The vector prefetcher would issue without confirming a stride.
    #[error("vector.confirmations must be at least 1")]
    ZeroConfirmations,

    /// A prefetcher was configured to never issue anything.
    #[error("{table}.degree must be at least 1")]
    ZeroDegree {
        /// Section of the configuration holding the bad value.
        table: &'static str,
    },

    /// A direct-mapped table size that is zero or not a power of two.
    #[error("{table}.table_size must be a non-zero power of two, got {size}")]
    BadTableSize {
        /// Section of the configuration holding the bad value.
        table: &'static str,
        /// The rejected size.
        size: usize,
    },

    /// A host block size that is zero or not a power of two.
    #[error("host.block_size must be a non-zero power of two, got {0}")]
    BadBlockSize(u64),
}

/// Errors raised while reading an access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace could not be read.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A line does not have the `<pc> <addr> [hit|miss]` shape.
    #[error("line {line}: expected `<pc> <addr> [hit|miss]`, got {fields} field(s)")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Number of whitespace-separated fields found.
        fields: usize,
    },

    /// A numeric field failed to parse.
    #[error("line {line}: invalid {field} `{text}`")]
    BadNumber {
        /// 1-based line number.
        line: usize,
        /// Name of the field (`pc` or `addr`).
        field: &'static str,
        /// The offending token.
        text: String,
    },

    /// The hit/miss flag is not recognized.
    #[error("line {line}: expected `hit` or `miss`, got `{text}`")]
    BadFlag {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        text: String,
    },
}
