//! Simulation statistics collection and reporting.
//!
//! This module tracks the cache counters for a run. It provides:
//! 1. **Counters:** Reads, writes, hits, misses, evictions and writebacks.
//! 2. **Ratios:** Hit and miss ratios over all accesses (NaN before the first access).
//! 3. **Report:** The parameter and statistics blocks printed at the end of a run.

use std::io::{self, Write};

use serde::Serialize;

use crate::cache::CacheGeometry;

/// Cache statistics. Every counter only ever increases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Read accesses.
    pub reads: u64,
    /// Write accesses.
    pub writes: u64,
    /// Accesses that found their tag resident.
    pub hits: u64,
    /// Accesses that had to allocate a line.
    pub misses: u64,
    /// Misses that displaced a valid line.
    pub evictions: u64,
    /// Evictions whose line was dirty.
    pub writebacks: u64,
}

impl CacheStats {
    /// Total accesses (`reads + writes`).
    pub const fn accesses(&self) -> u64 {
        self.reads + self.writes
    }

    /// `hits / accesses`, or NaN if nothing has been accessed.
    pub fn hit_ratio(&self) -> f64 {
        ratio(self.hits, self.accesses())
    }

    /// `misses / accesses`, or NaN if nothing has been accessed.
    pub fn miss_ratio(&self) -> f64 {
        ratio(self.misses, self.accesses())
    }

    /// Bundles the counters with derived ratios for machine-readable output.
    ///
    /// Ratios are `None` (JSON `null`) when there were no accesses.
    pub fn report(&self, skipped: u64) -> CacheReport {
        let defined = |r: f64| if r.is_nan() { None } else { Some(r) };
        CacheReport {
            counters: *self,
            accesses: self.accesses(),
            hit_ratio: defined(self.hit_ratio()),
            miss_ratio: defined(self.miss_ratio()),
            skipped_records: skipped,
        }
    }

    /// Writes the parameter and statistics blocks.
    ///
    /// Ratios are printed as percentages, or `n/a` when there were no accesses.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination writer.
    /// * `geometry` - Geometry of the cache the counters belong to.
    /// * `skipped` - Malformed trace records that were not simulated.
    ///
    /// # Errors
    ///
    /// Any error returned by `out`.
    pub fn write_report(
        &self,
        out: &mut impl Write,
        geometry: &CacheGeometry,
        skipped: u64,
    ) -> io::Result<()> {
        writeln!(out, "==========================================================")?;
        writeln!(out, "CACHE PARAMETERS")?;
        writeln!(out, "==========================================================")?;
        writeln!(out, "  sets                   {}", geometry.num_sets())?;
        writeln!(out, "  associativity          {}", geometry.ways())?;
        writeln!(out, "  line_size              {} B", geometry.line_bytes())?;
        writeln!(out, "  capacity               {} B", geometry.size_bytes())?;
        writeln!(
            out,
            "  address_split          tag {} | index {} | offset {}",
            geometry.tag_bits(),
            geometry.index_bits(),
            geometry.offset_bits()
        )?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "CACHE STATISTICS")?;
        writeln!(out, "  accesses               {}", self.accesses())?;
        writeln!(out, "  reads                  {}", self.reads)?;
        writeln!(out, "  writes                 {}", self.writes)?;
        writeln!(out, "  hits                   {}", self.hits)?;
        writeln!(out, "  misses                 {}", self.misses)?;
        writeln!(out, "  hit_ratio              {}", percent(self.hit_ratio()))?;
        writeln!(out, "  miss_ratio             {}", percent(self.miss_ratio()))?;
        writeln!(out, "  evictions              {}", self.evictions)?;
        writeln!(out, "  writebacks             {}", self.writebacks)?;
        if skipped > 0 {
            writeln!(out, "  skipped_records        {skipped}")?;
        }
        writeln!(out, "==========================================================")
    }

    /// Prints the report to stdout.
    ///
    /// Equivalent to [`Self::write_report`] on a locked stdout.
    ///
    /// # Errors
    ///
    /// Propagates stdout write failures.
    pub fn print(&self, geometry: &CacheGeometry, skipped: u64) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_report(&mut lock, geometry, skipped)?;
        lock.flush()
    }
}

/// Final counters plus derived values, as printed by `--json`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CacheReport {
    /// Raw counters, flattened into the top level.
    #[serde(flatten)]
    pub counters: CacheStats,
    /// `reads + writes`.
    pub accesses: u64,
    /// `hits / accesses`.
    pub hit_ratio: Option<f64>,
    /// `misses / accesses`.
    pub miss_ratio: Option<f64>,
    /// Malformed trace records that were not simulated.
    pub skipped_records: u64,
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        f64::NAN
    } else {
        part as f64 / total as f64
    }
}

fn percent(r: f64) -> String {
    if r.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}%", r * 100.0)
    }
}
