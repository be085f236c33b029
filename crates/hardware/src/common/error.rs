//! Error definitions.
//!
//! This module defines the error taxonomy of the simulator. It provides:
//! 1. **Configuration Errors:** Geometry values that break the power-of-two or
//!    divisibility rules, detected before any access is simulated.
//! 2. **Trace Errors:** Per-record problems (bad op-code, bad or oversized
//!    address). The driver skips these records and keeps going.
//! 3. **Simulation Errors:** Fatal conditions surfaced to the command line.
//!
//! The cache state machine itself has no error path once it has been built
//! from a validated geometry.

use std::io;

use thiserror::Error;

/// Invalid cache geometry or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Line size is zero or not a power of two.
    #[error("line size {0} bytes is not a non-zero power of two")]
    LineSizeNotPowerOfTwo(usize),

    /// Associativity of zero ways.
    #[error("associativity must be at least one way")]
    ZeroAssociativity,

    /// Capacity is zero or not a whole number of lines.
    #[error("capacity {size} bytes is not a non-zero multiple of the {line}-byte line size")]
    CapacityNotDivisible {
        /// Configured capacity in bytes.
        size: usize,
        /// Configured line size in bytes.
        line: usize,
    },

    /// The line count cannot be split evenly into sets.
    #[error("{lines} lines cannot be split evenly into {ways}-way sets")]
    LinesNotDivisibleByWays {
        /// Number of lines implied by capacity and line size.
        lines: usize,
        /// Configured associativity.
        ways: usize,
    },

    /// The resulting set count is not a power of two.
    #[error("set count {0} is not a power of two")]
    SetsNotPowerOfTwo(usize),

    /// Address width outside `1..=64`.
    #[error("address width {0} bits is outside 1..=64")]
    AddressWidthOutOfRange(u32),

    /// Offset and index fields together are wider than the address.
    #[error("{offset} offset bits + {index} index bits exceed the {width}-bit address")]
    AddressTooNarrow {
        /// Byte-offset field width.
        offset: u32,
        /// Set-index field width.
        index: u32,
        /// Configured address width.
        width: u32,
    },

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    /// Configuration file is not valid JSON for [`crate::Config`].
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A malformed trace record, or a failure reading the trace stream.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The op-code field is neither `0` (read) nor `1` (write).
    #[error("line {line}: unknown operation '{token}'")]
    UnknownOperation {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The address field is not a hexadecimal number.
    #[error("line {line}: invalid address '{token}'")]
    BadAddress {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The address has bits set above the configured address width.
    #[error("line {line}: address {address:#x} does not fit in {bits} bits")]
    AddressOutOfRange {
        /// 1-based line number.
        line: usize,
        /// Parsed address value.
        address: u64,
        /// Configured address width.
        bits: u32,
    },

    /// The record has an operation but no address.
    #[error("line {line}: missing address")]
    MissingField {
        /// 1-based line number.
        line: usize,
    },

    /// The record has extra tokens after the address.
    #[error("line {line}: unexpected trailing field")]
    TrailingField {
        /// 1-based line number.
        line: usize,
    },

    /// The line is not valid UTF-8.
    #[error("line {line}: not valid UTF-8")]
    InvalidEncoding {
        /// 1-based line number.
        line: usize,
    },

    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),
}

impl TraceError {
    /// Returns `true` if the error concerns a single record and replay can
    /// continue with the next one.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

/// Fatal simulation error.
#[derive(Debug, Error)]
pub enum SimError {
    /// The cache could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace stream could not be read.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),
}

impl From<TraceError> for SimError {
    /// Only [`TraceError::Io`] ends a run; anything else is wrapped as invalid data.
    fn from(err: TraceError) -> Self {
        match err {
            TraceError::Io(e) => Self::Io(e),
            other => Self::Io(io::Error::new(io::ErrorKind::InvalidData, other)),
        }
    }
}
