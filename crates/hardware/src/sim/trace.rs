//! Access Trace Loader.
//!
//! This module reads the access traces replayed by the [`Simulator`](super::Simulator). It performs:
//! 1. **Loading:** Reads a trace file from disk.
//! 2. **Parsing:** Turns each line into an [`AccessEvent`].
//!
//! The format is one access per line:
//!
//! ```text
//! # pc        address      outcome
//! 0x400a10    0x1000       miss
//! 0x400a10    0x1040       hit
//! 4197904     4160              # outcome omitted: miss
//! ```
//!
//! Numbers are decimal or `0x`-prefixed hex. `#` starts a comment; blank lines
//! are skipped.

use std::fs;
use std::path::Path;

use crate::common::AccessEvent;
use crate::common::error::TraceError;

/// Reads and parses a trace file.
///
/// # Arguments
///
/// * `path` - Path to the trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be read and a parse error for
/// the first malformed line.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<AccessEvent>, TraceError> {
    let text = fs::read_to_string(path)?;
    parse_trace(&text)
}

/// Parses trace text.
///
/// # Errors
///
/// Returns the error for the first malformed line, with its 1-based number.
pub fn parse_trace(text: &str) -> Result<Vec<AccessEvent>, TraceError> {
    let mut events = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        if let Some(event) = parse_line(idx + 1, raw)? {
            events.push(event);
        }
    }
    Ok(events)
}

fn parse_line(line: usize, raw: &str) -> Result<Option<AccessEvent>, TraceError> {
    let content = raw.split_once('#').map_or(raw, |(before, _)| before);
    let fields: Vec<&str> = content.split_whitespace().collect();

    let (pc, addr, flag) = match fields.as_slice() {
        [] => return Ok(None),
        [pc, addr] => (*pc, *addr, None),
        [pc, addr, flag] => (*pc, *addr, Some(*flag)),
        other => {
            return Err(TraceError::Malformed {
                line,
                fields: other.len(),
            });
        }
    };

    let pc = parse_number(line, "pc", pc)?;
    let mem_addr = parse_number(line, "addr", addr)?;
    let miss = match flag.map(str::to_ascii_lowercase).as_deref() {
        None | Some("miss" | "m" | "1") => true,
        Some("hit" | "h" | "0") => false,
        Some(_) => {
            return Err(TraceError::BadFlag {
                line,
                text: flag.unwrap_or_default().to_string(),
            });
        }
    };

    Ok(Some(AccessEvent { pc, mem_addr, miss }))
}

fn parse_number(line: usize, field: &'static str, text: &str) -> Result<u64, TraceError> {
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|_| TraceError::BadNumber {
        line,
        field,
        text: text.to_string(),
    })
}
