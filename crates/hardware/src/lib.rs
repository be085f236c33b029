//! Set-associative L1 cache simulator library.
//!
//! This crate replays a memory trace through a single-level cache model:
//! 1. **Cache:** Geometry validation, address decoding, true-LRU replacement,
//!    write-allocate / write-back line state.
//! 2. **Statistics:** Read, write, hit, miss, eviction and writeback counters
//!    with derived ratios and a text report.
//! 3. **Simulation:** Trace parsing, configuration and the replay driver.

/// Set-associative cache, geometry and address decoder.
pub mod cache;
/// Common types (addresses, access types, errors).
pub mod common;
/// Simulator configuration (defaults, JSON loading, geometry validation).
pub mod config;
/// Trace reader and replay driver.
pub mod sim;
/// Cache statistics collection and reporting.
pub mod stats;

/// Main cache type; build from a [`cache::CacheGeometry`] or a [`config::CacheConfig`].
pub use crate::cache::SetAssociativeCache;
/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Replay driver owning a cache.
pub use crate::sim::Simulator;
/// Final counters of a run, and their serializable report form.
pub use crate::stats::{CacheReport, CacheStats};
