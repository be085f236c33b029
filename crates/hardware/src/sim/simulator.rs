//! Simulator: owns the cache and replays a trace through it.
//!
//! Records are applied one at a time in the order they are read. A record
//! that fails to parse is logged and skipped without touching cache state;
//! an I/O failure on the trace stream ends the run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use super::trace::{TraceReader, TraceRecord};
use crate::cache::{AccessOutcome, SetAssociativeCache};
use crate::common::error::{SimError, TraceError};
use crate::config::Config;
use crate::stats::CacheStats;

/// Top-level simulator: the cache plus replay bookkeeping.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// The simulated cache.
    pub cache: SetAssociativeCache,
    echo: bool,
    skipped: u64,
}

impl Simulator {
    /// Builds a simulator with an empty cache.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the cache geometry is invalid.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        Ok(Self {
            cache: SetAssociativeCache::from_config(&config.cache)?,
            echo: config.trace.echo_accesses,
            skipped: 0,
        })
    }

    /// Applies one record to the cache.
    pub fn step(&mut self, record: &TraceRecord) -> AccessOutcome {
        if self.echo {
            info!(
                "operation - {}\taddress - {:X}",
                record.op.code(),
                record.addr
            );
        }
        self.cache.access_addr(record.op, record.addr)
    }

    /// Replays records until the iterator is exhausted.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] on the first unrecoverable read error. Malformed
    /// records are counted in [`Self::skipped`] instead.
    pub fn replay<I>(&mut self, records: I) -> Result<(), SimError>
    where
        I: IntoIterator<Item = Result<TraceRecord, TraceError>>,
    {
        for record in records {
            match record {
                Ok(record) => {
                    let _ = self.step(&record);
                }
                Err(e) if e.is_recoverable() => {
                    warn!("skipping malformed record: {e}");
                    self.skipped += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
        let stats = self.cache.stats();
        info!(
            accesses = stats.accesses(),
            hits = stats.hits,
            misses = stats.misses,
            skipped = self.skipped,
            "trace complete"
        );
        Ok(())
    }

    /// Replays a trace from a buffered reader.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if reading the trace fails.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<(), SimError> {
        let address_bits = self.cache.geometry().address_bits();
        self.replay(TraceReader::new(reader, address_bits))
    }

    /// Opens and replays a trace file.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file cannot be opened or read.
    pub fn run_file(&mut self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let file = File::open(path)?;
        self.run(BufReader::new(file))
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    /// Number of malformed records skipped so far.
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }
}
