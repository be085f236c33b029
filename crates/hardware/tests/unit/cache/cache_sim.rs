//! SetAssociativeCache Unit Tests.
//!
//! Verifies the write-allocate, write-back state machine: cold misses, warm
//! hits, conflict evictions, dirty writebacks and counter bookkeeping.
//!
//! The cache is constructed directly from a geometry; no trace is needed.

use l1sim_core::SetAssociativeCache;
use l1sim_core::cache::AccessOutcome;
use l1sim_core::common::{AccessType, PhysAddr};
use pretty_assertions::assert_eq;

use crate::common::harness::{geometry, two_way};

use AccessType::{Read, Write};

fn access(cache: &mut SetAssociativeCache, op: AccessType, addr: u64) -> AccessOutcome {
    cache.access_addr(op, PhysAddr::new(addr))
}

// ══════════════════════════════════════════════════════════
// 1. Cold Miss
// ══════════════════════════════════════════════════════════

/// First access to any address is a compulsory miss with nothing evicted.
#[test]
fn cold_miss_evicts_nothing() {
    let mut cache = two_way();
    let outcome = access(&mut cache, Read, 0x1000);

    assert_eq!(outcome, AccessOutcome::default());
    assert_eq!(cache.stats().misses, 1);
    assert_eq!(cache.stats().evictions, 0);
    assert_eq!(cache.stats().writebacks, 0);
}

/// Filling every way of a set with distinct tags never counts an eviction.
#[test]
fn filling_empty_ways_is_free() {
    let mut cache = two_way();
    let _ = access(&mut cache, Write, 0);
    let _ = access(&mut cache, Write, 128);

    assert_eq!(cache.stats().misses, 2);
    assert_eq!(cache.stats().evictions, 0);
    assert_eq!(cache.stats().writebacks, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Warm Hit
// ══════════════════════════════════════════════════════════

/// Second access to the same address hits.
#[test]
fn warm_hit() {
    let mut cache = two_way();
    let _ = access(&mut cache, Read, 0x1000);

    assert!(access(&mut cache, Read, 0x1000).hit);
    assert_eq!(cache.stats().hits, 1);
}

/// A different offset within the same 64-byte line hits.
#[test]
fn same_line_different_offset_hits() {
    let mut cache = two_way();
    let _ = access(&mut cache, Read, 0x1000);

    assert!(access(&mut cache, Read, 0x1000 + 32).hit);
    assert!(!access(&mut cache, Read, 0x1000 + 64).hit, "next line is a new line");
}

/// Same tag in a different set is a different line.
#[test]
fn same_tag_different_set_misses() {
    let mut cache = two_way();
    // 0 -> set 0 tag 0; 64 -> set 1 tag 0.
    let _ = access(&mut cache, Read, 0);
    assert!(!access(&mut cache, Read, 64).hit);
    assert!(cache.contains(PhysAddr::new(0)));
    assert!(cache.contains(PhysAddr::new(64)));
}

// ══════════════════════════════════════════════════════════
// 3. Set Conflict Eviction
// ══════════════════════════════════════════════════════════

/// A third tag in a full 2-way set evicts the least recently used line.
#[test]
fn set_conflict_evicts_lru() {
    let mut cache = two_way();

    let _ = access(&mut cache, Read, 0);
    let _ = access(&mut cache, Read, 128);
    let outcome = access(&mut cache, Read, 256);

    assert_eq!(
        outcome,
        AccessOutcome {
            hit: false,
            eviction: true,
            writeback: false
        }
    );
    assert!(!cache.contains(PhysAddr::new(0)), "LRU victim should be evicted");
    assert!(cache.contains(PhysAddr::new(128)));
    assert!(cache.contains(PhysAddr::new(256)));
}

/// A, B, A, C: the hit on A re-promotes it, so C evicts B.
#[test]
fn hit_repromotes_line_before_eviction() {
    let mut cache = two_way();

    assert!(!access(&mut cache, Read, 0).hit);
    assert!(!access(&mut cache, Read, 128).hit);
    assert!(access(&mut cache, Read, 0).hit);
    assert!(access(&mut cache, Read, 384).eviction);

    assert!(cache.contains(PhysAddr::new(0)), "A was most recently used");
    assert!(!cache.contains(PhysAddr::new(128)), "B was least recently used");
    assert_eq!(cache.stats().evictions, 1);
}

/// `contains` does not change which line is evicted next.
#[test]
fn contains_does_not_touch_lru() {
    let mut cache = two_way();
    let _ = access(&mut cache, Read, 0);
    let _ = access(&mut cache, Read, 128);

    assert!(cache.contains(PhysAddr::new(0)));
    let _ = access(&mut cache, Read, 256);
    assert!(!cache.contains(PhysAddr::new(0)));
}

// ══════════════════════════════════════════════════════════
// 4. Dirty Writeback
// ══════════════════════════════════════════════════════════

/// Write a line, then cycle it out: one eviction, one writeback.
#[test]
fn dirty_line_is_written_back_on_eviction() {
    let mut cache = two_way();

    let _ = access(&mut cache, Write, 0);
    let _ = access(&mut cache, Read, 128);
    let outcome = access(&mut cache, Read, 256);

    assert!(outcome.eviction && outcome.writeback);
    assert_eq!(cache.stats().evictions, 1);
    assert_eq!(cache.stats().writebacks, 1);
}

/// A read hit leaves the dirty bit set.
#[test]
fn dirty_bit_persists_across_read_hits() {
    let mut cache = two_way();

    let _ = access(&mut cache, Write, 0);
    let _ = access(&mut cache, Read, 0);
    let _ = access(&mut cache, Read, 128);
    assert!(access(&mut cache, Read, 256).writeback);
}

/// A write hit dirties a line that was filled by a read.
#[test]
fn write_hit_dirties_clean_line() {
    let mut cache = two_way();

    let _ = access(&mut cache, Read, 0);
    assert!(!cache.set(0)[0].dirty());
    assert!(access(&mut cache, Write, 0).hit);
    assert!(cache.set(0)[0].dirty());
}

/// A write miss allocates the line dirty; a read miss allocates it clean.
#[test]
fn write_allocate_fill_state() {
    let mut cache = two_way();

    let _ = access(&mut cache, Write, 0);
    let _ = access(&mut cache, Read, 128);
    let set = cache.set(0);
    assert!(set[0].valid() && set[0].dirty());
    assert!(set[1].valid() && !set[1].dirty());
}

// ══════════════════════════════════════════════════════════
// 5. Clean Eviction
// ══════════════════════════════════════════════════════════

/// Evicting a clean line counts an eviction but no writeback.
#[test]
fn clean_eviction_has_no_writeback() {
    let mut cache = two_way();

    let _ = access(&mut cache, Read, 0);
    let _ = access(&mut cache, Read, 128);
    let outcome = access(&mut cache, Read, 256);

    assert!(outcome.eviction);
    assert!(!outcome.writeback);
    assert_eq!(cache.stats().writebacks, 0);
}

// ══════════════════════════════════════════════════════════
// 6. Counters and direct field access
// ══════════════════════════════════════════════════════════

/// Reads and writes are counted separately, hits and misses add up.
#[test]
fn counters_partition_accesses() {
    let mut cache = two_way();
    let trace = [(Read, 0), (Write, 0), (Read, 128), (Write, 256), (Read, 0)];
    for (op, addr) in trace {
        let _ = access(&mut cache, op, addr);
    }

    let stats = cache.stats();
    assert_eq!(stats.reads, 3);
    assert_eq!(stats.writes, 2);
    assert_eq!(stats.hits + stats.misses, 5);
    assert_eq!(stats.accesses(), 5);
}

/// `access` takes pre-decoded fields and agrees with `access_addr`.
#[test]
fn access_by_fields_matches_access_by_address() {
    let mut by_addr = two_way();
    let mut by_fields = two_way();
    let decoder = *by_fields.decoder();

    for addr in [0u64, 0x40, 0x80, 0x1C0, 0x80, 0x0] {
        let fields = decoder.decode(PhysAddr::new(addr));
        assert_eq!(
            access(&mut by_addr, Write, addr),
            by_fields.access(Write, fields.index, fields.tag)
        );
    }
    assert_eq!(by_addr.stats(), by_fields.stats());
}

/// Direct-mapped: every conflicting access evicts the only way.
#[test]
fn direct_mapped_ping_pong() {
    let mut cache = SetAssociativeCache::new(geometry(128, 64, 1, 32));
    // Two sets; 0 and 128 both map to set 0.
    for _ in 0..3 {
        let _ = access(&mut cache, Read, 0);
        let _ = access(&mut cache, Read, 128);
    }
    assert_eq!(cache.stats().hits, 0);
    assert_eq!(cache.stats().misses, 6);
    assert_eq!(cache.stats().evictions, 5);
}
