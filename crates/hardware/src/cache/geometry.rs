//! Cache geometry.
//!
//! A [`CacheGeometry`] is the validated shape of the cache: capacity, line
//! size, associativity and address width, plus everything derived from them.
//! It is immutable once built and is the only way to construct a cache, so
//! every size and shift the cache uses is known to be consistent.

use crate::common::error::ConfigError;

/// Validated, immutable cache shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    size_bytes: usize,
    line_bytes: usize,
    ways: usize,
    address_bits: u32,
    num_lines: usize,
    num_sets: usize,
    offset_bits: u32,
    index_bits: u32,
    tag_bits: u32,
}

impl CacheGeometry {
    /// Derives and validates a geometry.
    ///
    /// # Arguments
    ///
    /// * `size_bytes` - Total capacity in bytes.
    /// * `line_bytes` - Line size in bytes; must be a power of two.
    /// * `ways` - Associativity; the line count must divide evenly by it.
    /// * `address_bits` - Physical address width, `1..=64`.
    ///
    /// # Errors
    ///
    /// One [`ConfigError`] variant per violated rule. Checks run in the order
    /// line size, ways, capacity, line split, set count, address width.
    pub const fn new(
        size_bytes: usize,
        line_bytes: usize,
        ways: usize,
        address_bits: u32,
    ) -> Result<Self, ConfigError> {
        if !line_bytes.is_power_of_two() {
            return Err(ConfigError::LineSizeNotPowerOfTwo(line_bytes));
        }
        if ways == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if size_bytes == 0 || size_bytes % line_bytes != 0 {
            return Err(ConfigError::CapacityNotDivisible {
                size: size_bytes,
                line: line_bytes,
            });
        }
        let num_lines = size_bytes / line_bytes;
        if num_lines % ways != 0 {
            return Err(ConfigError::LinesNotDivisibleByWays {
                lines: num_lines,
                ways,
            });
        }
        let num_sets = num_lines / ways;
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::SetsNotPowerOfTwo(num_sets));
        }
        if address_bits == 0 || address_bits > u64::BITS {
            return Err(ConfigError::AddressWidthOutOfRange(address_bits));
        }

        let offset_bits = line_bytes.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if offset_bits + index_bits > address_bits {
            return Err(ConfigError::AddressTooNarrow {
                offset: offset_bits,
                index: index_bits,
                width: address_bits,
            });
        }

        Ok(Self {
            size_bytes,
            line_bytes,
            ways,
            address_bits,
            num_lines,
            num_sets,
            offset_bits,
            index_bits,
            tag_bits: address_bits - offset_bits - index_bits,
        })
    }

    /// Total capacity in bytes.
    pub const fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> usize {
        self.line_bytes
    }

    /// Associativity (ways per set).
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Physical address width in bits.
    pub const fn address_bits(&self) -> u32 {
        self.address_bits
    }

    /// Total number of lines (`size / line`).
    pub const fn num_lines(&self) -> usize {
        self.num_lines
    }

    /// Number of sets (`lines / ways`).
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Width of the byte-offset field (`log2(line)`).
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the set-index field (`log2(sets)`).
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the tag field (the remaining high bits).
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }
}
