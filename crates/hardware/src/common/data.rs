//! Memory Access Types.
//!
//! Every trace record carries one of two operations. The numeric codes are
//! the ones used by the trace format: `0` for a read and `1` for a write.

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Data read access.
    ///
    /// A read miss allocates a clean line; a read hit leaves the dirty bit alone.
    Read,

    /// Data write access.
    ///
    /// A write always leaves the target line dirty, whether it hit or was
    /// allocated on a miss (write-allocate, write-back).
    Write,
}

impl AccessType {
    /// Trace op-code for reads.
    pub const READ_CODE: u64 = 0;
    /// Trace op-code for writes.
    pub const WRITE_CODE: u64 = 1;

    /// Maps a trace op-code to an access type.
    ///
    /// # Returns
    ///
    /// `None` for any code other than [`Self::READ_CODE`] or [`Self::WRITE_CODE`].
    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            Self::READ_CODE => Some(Self::Read),
            Self::WRITE_CODE => Some(Self::Write),
            _ => None,
        }
    }

    /// Returns the trace op-code for this access type.
    pub const fn code(self) -> u64 {
        match self {
            Self::Read => Self::READ_CODE,
            Self::Write => Self::WRITE_CODE,
        }
    }

    /// Returns `true` for [`AccessType::Write`].
    #[inline(always)]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}
