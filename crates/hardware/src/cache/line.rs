//! Cache line state.

/// One way of a set: tag, valid and dirty bits, and its LRU rank.
///
/// `recency` is a rank within the set, not a timestamp: `0` is the least
/// recently used way and `ways - 1` the most recently used. The ranks of a
/// set always form a permutation of `0..ways`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    pub(super) tag: u64,
    pub(super) valid: bool,
    pub(super) dirty: bool,
    pub(super) recency: usize,
}

impl CacheLine {
    /// Creates an invalid line holding the given LRU rank.
    pub(super) const fn empty(recency: usize) -> Self {
        Self {
            tag: 0,
            valid: false,
            dirty: false,
            recency,
        }
    }

    /// Stored tag. Meaningful only when [`Self::valid`] is `true`.
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Whether the line holds data.
    pub const fn valid(&self) -> bool {
        self.valid
    }

    /// Whether the line has been written since it was filled.
    pub const fn dirty(&self) -> bool {
        self.dirty
    }

    /// LRU rank within the set (`0` = least recently used).
    pub const fn recency(&self) -> usize {
        self.recency
    }
}
