//! Physical address type.
//!
//! Trace addresses are physical; there is no translation stage in front of the
//! cache. The newtype keeps raw `u64` values from being confused with tags,
//! set indices or byte offsets, which are all plain integers.

use std::fmt;

/// A physical address presented to the cache.
///
/// The value is stored as a `u64` regardless of the configured address width;
/// [`PhysAddr::fits`] checks it against a narrower width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Returns `true` if the address is representable in `bits` bits.
    ///
    /// # Arguments
    ///
    /// * `bits` - Address width in bits. Widths of 64 or more accept every value.
    #[inline]
    pub const fn fits(&self, bits: u32) -> bool {
        bits >= u64::BITS || self.0 >> bits == 0
    }
}

impl From<u64> for PhysAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::UpperHex for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}
