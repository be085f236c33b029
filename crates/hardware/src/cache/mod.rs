//! Set-Associative Cache Simulator.
//!
//! This module implements a single-level, set-associative cache with true LRU
//! replacement under a write-allocate, write-back policy. It models hits,
//! misses, evictions and writebacks; data contents and timing are not modeled.
//!
//! # LRU bookkeeping
//!
//! Each line carries a `recency` rank. Promoting a way to most recently used
//! decrements every rank above it and moves it to `ways - 1`, which keeps the
//! ranks of a set a permutation of `0..ways` without a separate usage stack.
//! The victim is always the way ranked `0`.

/// Address-to-field decoding.
pub mod decoder;

/// Validated cache shape.
pub mod geometry;

/// Per-way line state.
pub mod line;

pub use decoder::{AddressDecoder, DecodedAddress};
pub use geometry::CacheGeometry;
pub use line::CacheLine;

use tracing::{debug, trace};

use crate::common::error::ConfigError;
use crate::common::{AccessType, PhysAddr};
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Result of a single cache access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessOutcome {
    /// The tag was present and valid in the selected set.
    pub hit: bool,
    /// A valid line was displaced to make room (miss path only).
    pub eviction: bool,
    /// The displaced line was dirty and had to be written back.
    pub writeback: bool,
}

/// Set-associative cache with per-set LRU ranks and hit/miss accounting.
///
/// Lines are stored flat, `num_sets * ways` entries, set-major.
#[derive(Clone, Debug)]
pub struct SetAssociativeCache {
    geometry: CacheGeometry,
    decoder: AddressDecoder,
    lines: Vec<CacheLine>,
    stats: CacheStats,
}

impl SetAssociativeCache {
    /// Creates an empty cache: every line invalid, ranks `0..ways` in way order.
    ///
    /// The storage is allocated once here and never resized.
    pub fn new(geometry: CacheGeometry) -> Self {
        let ways = geometry.ways();
        let lines = (0..geometry.num_lines())
            .map(|i| CacheLine::empty(i % ways))
            .collect();

        debug!(
            sets = geometry.num_sets(),
            ways,
            line_bytes = geometry.line_bytes(),
            tag_bits = geometry.tag_bits(),
            index_bits = geometry.index_bits(),
            offset_bits = geometry.offset_bits(),
            "cache constructed"
        );

        Self {
            decoder: AddressDecoder::new(&geometry),
            geometry,
            lines,
            stats: CacheStats::default(),
        }
    }

    /// Validates `config` and creates an empty cache from it.
    ///
    /// # Errors
    ///
    /// Propagates the [`ConfigError`] from [`CacheConfig::geometry`].
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.geometry()?))
    }

    /// The geometry this cache was built with.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// The decoder matching this cache's geometry.
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Read-only view of the ways of one set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_sets`.
    pub fn set(&self, index: usize) -> &[CacheLine] {
        let base = index * self.geometry.ways();
        &self.lines[base..base + self.geometry.ways()]
    }

    fn set_mut(&mut self, index: usize) -> &mut [CacheLine] {
        let ways = self.geometry.ways();
        let base = index * ways;
        &mut self.lines[base..base + ways]
    }

    /// Finds the way holding a valid line with `tag` in set `index`.
    ///
    /// # Returns
    ///
    /// `Some(way)` on a match, `None` if the tag is not resident. At most one
    /// way can match: a tag is only installed after a failed lookup.
    pub fn lookup_way(&self, index: usize, tag: u64) -> Option<usize> {
        self.set(index)
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Returns the least recently used way of set `index` (the one ranked `0`).
    pub fn find_victim(&self, index: usize) -> usize {
        let victim = self.set(index).iter().position(|line| line.recency == 0);
        debug_assert!(victim.is_some(), "set {index} lost its LRU rank 0");
        victim.unwrap_or_default()
    }

    /// Promotes `way` of set `index` to most recently used.
    ///
    /// Every rank above the touched one drops by one; the touched way takes
    /// `ways - 1`. Ranks below it are unchanged.
    pub fn touch(&mut self, index: usize, way: usize) {
        let mru = self.geometry.ways() - 1;
        let set = self.set_mut(index);
        let rank = set[way].recency;
        for line in set.iter_mut() {
            if line.recency > rank {
                line.recency -= 1;
            } else if line.recency == rank {
                line.recency = mru;
            }
        }
    }

    /// Performs one access and updates state and counters.
    ///
    /// Hit: the line is promoted to MRU and, for a write, marked dirty.
    /// Miss: the LRU way is replaced; displacing a valid line counts an
    /// eviction, and a dirty one also counts a writeback. The new line is
    /// dirty exactly when the access is a write.
    ///
    /// # Arguments
    ///
    /// * `op` - Read or write.
    /// * `index` - Set index, as produced by the decoder for this geometry.
    /// * `tag` - Tag, as produced by the decoder for this geometry.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_sets`; decoder output is always in range.
    pub fn access(&mut self, op: AccessType, index: usize, tag: u64) -> AccessOutcome {
        match op {
            AccessType::Read => self.stats.reads += 1,
            AccessType::Write => self.stats.writes += 1,
        }

        if let Some(way) = self.lookup_way(index, tag) {
            self.stats.hits += 1;
            if op.is_write() {
                self.set_mut(index)[way].dirty = true;
            }
            self.touch(index, way);
            trace!(?op, index, tag, way, "hit");
            return AccessOutcome {
                hit: true,
                ..AccessOutcome::default()
            };
        }

        self.stats.misses += 1;
        let victim = self.find_victim(index);
        let old = self.set(index)[victim];
        let eviction = old.valid;
        let writeback = old.valid && old.dirty;
        if eviction {
            self.stats.evictions += 1;
        }
        if writeback {
            self.stats.writebacks += 1;
        }

        let line = &mut self.set_mut(index)[victim];
        line.tag = tag;
        line.valid = true;
        line.dirty = op.is_write();
        self.touch(index, victim);

        trace!(?op, index, tag, way = victim, eviction, writeback, "miss");
        AccessOutcome {
            hit: false,
            eviction,
            writeback,
        }
    }

    /// Decodes `addr` and performs the access.
    pub fn access_addr(&mut self, op: AccessType, addr: PhysAddr) -> AccessOutcome {
        let fields = self.decoder.decode(addr);
        self.access(op, fields.index, fields.tag)
    }

    /// Checks whether the line containing `addr` is resident.
    ///
    /// Does not touch LRU state or counters.
    pub fn contains(&self, addr: PhysAddr) -> bool {
        let fields = self.decoder.decode(addr);
        self.lookup_way(fields.index, fields.tag).is_some()
    }
}
