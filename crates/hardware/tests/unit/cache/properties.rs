//! Cache Invariant Properties.
//!
//! Replays random access sequences over random valid geometries and checks,
//! after every access:
//! - each set's ranks are a permutation of `0..ways`;
//! - no set holds the same valid tag twice;
//! - `reads + writes` and `hits + misses` both equal the accesses so far;
//! - writebacks never exceed evictions, and evictions never exceed misses.

use l1sim_core::SetAssociativeCache;
use l1sim_core::common::{AccessType, PhysAddr};
use proptest::prelude::*;

use crate::common::harness::{assert_rank_permutation, assert_unique_tags, geometry};

/// Geometries with 1..=16 ways, 1..=8 sets and 1..=64-byte lines.
fn small_cache() -> impl Strategy<Value = SetAssociativeCache> {
    (0u32..=6, 0u32..=3, 1usize..=16).prop_map(|(offset_bits, index_bits, ways)| {
        let line = 1usize << offset_bits;
        let sets = 1usize << index_bits;
        SetAssociativeCache::new(geometry(line * sets * ways, line, ways, 32))
    })
}

/// Accesses confined to 4 KiB so lines are reused and sets fill up.
fn accesses() -> impl Strategy<Value = Vec<(bool, u64)>> {
    prop::collection::vec((any::<bool>(), 0u64..4096), 1..300)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn invariants_hold_after_every_access(mut cache in small_cache(), trace in accesses()) {
        for (n, (is_write, addr)) in trace.iter().enumerate() {
            let op = if *is_write { AccessType::Write } else { AccessType::Read };
            let _ = cache.access_addr(op, PhysAddr::new(*addr));

            assert_rank_permutation(&cache);
            assert_unique_tags(&cache);

            let stats = cache.stats();
            let total = n as u64 + 1;
            prop_assert_eq!(stats.reads + stats.writes, total);
            prop_assert_eq!(stats.hits + stats.misses, total);
            prop_assert!(stats.evictions <= stats.misses);
            prop_assert!(stats.writebacks <= stats.evictions);
        }
    }

    /// The first touch of every line in an empty cache is a miss without eviction.
    #[test]
    fn cold_start_never_evicts(mut cache in small_cache(), addr in any::<u32>(), write in any::<bool>()) {
        let op = if write { AccessType::Write } else { AccessType::Read };
        let outcome = cache.access_addr(op, PhysAddr::new(u64::from(addr)));
        prop_assert!(!outcome.hit);
        prop_assert!(!outcome.eviction);
        prop_assert_eq!(cache.stats().evictions, 0);
    }

    /// With only reads, nothing is ever dirty, so nothing is ever written back.
    #[test]
    fn read_only_traces_never_write_back(mut cache in small_cache(), addrs in prop::collection::vec(0u64..4096, 1..300)) {
        for addr in addrs {
            let _ = cache.access_addr(AccessType::Read, PhysAddr::new(addr));
        }
        prop_assert_eq!(cache.stats().writebacks, 0);
    }
}
