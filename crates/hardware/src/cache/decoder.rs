//! Address decoder.
//!
//! Splits a physical address into the three fields the cache works with:
//!
//! ```text
//!  address_bits-1            offset+index   offset        0
//! +-------------------------+--------------+-------------+
//! |           tag           |    index     |   offset    |
//! +-------------------------+--------------+-------------+
//! ```
//!
//! Decoding is pure shift-and-mask arithmetic; bits above the configured
//! address width are ignored.

use super::geometry::CacheGeometry;
use crate::common::PhysAddr;

/// The three fields of a decoded address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DecodedAddress {
    /// High-order bits identifying the line within its set.
    pub tag: u64,
    /// Middle bits selecting the set.
    pub index: usize,
    /// Low-order bits selecting a byte within the line.
    pub offset: u64,
}

/// Returns a mask covering the low `bits` bits. Handles `bits == 64`.
#[inline(always)]
const fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Shift/mask decoder derived from a [`CacheGeometry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    offset_bits: u32,
    index_bits: u32,
    offset_mask: u64,
    index_mask: u64,
    tag_mask: u64,
}

impl AddressDecoder {
    /// Creates a decoder for the given geometry.
    pub const fn new(geometry: &CacheGeometry) -> Self {
        Self {
            offset_bits: geometry.offset_bits(),
            index_bits: geometry.index_bits(),
            offset_mask: low_mask(geometry.offset_bits()),
            index_mask: low_mask(geometry.index_bits()),
            tag_mask: low_mask(geometry.tag_bits()),
        }
    }

    /// Splits an address into tag, set index and byte offset.
    ///
    /// # Arguments
    ///
    /// * `addr` - Physical address. Bits at or above the address width do not
    ///   contribute to any field.
    #[inline]
    pub const fn decode(&self, addr: PhysAddr) -> DecodedAddress {
        let raw = addr.val();
        let tag_shift = self.offset_bits + self.index_bits;
        let tag = match raw.checked_shr(tag_shift) {
            Some(high) => high & self.tag_mask,
            None => 0,
        };
        let index = match raw.checked_shr(self.offset_bits) {
            Some(mid) => mid & self.index_mask,
            None => 0,
        };
        DecodedAddress {
            tag,
            index: index as usize,
            offset: raw & self.offset_mask,
        }
    }

    /// Reassembles an address from its fields; the inverse of [`Self::decode`].
    ///
    /// Each field is masked to its width before it is placed.
    pub const fn encode(&self, tag: u64, index: usize, offset: u64) -> PhysAddr {
        let tag_shift = self.offset_bits + self.index_bits;
        let tag_part = match (tag & self.tag_mask).checked_shl(tag_shift) {
            Some(v) => v,
            None => 0,
        };
        let index_part = match (index as u64 & self.index_mask).checked_shl(self.offset_bits) {
            Some(v) => v,
            None => 0,
        };
        PhysAddr::new(tag_part | index_part | (offset & self.offset_mask))
    }
}
