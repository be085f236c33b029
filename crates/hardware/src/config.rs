//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline L1 geometry (16 KiB, 64-byte lines, 8 ways, 32-bit addresses).
//! 2. **Structures:** `Config` holding cache geometry and trace replay options.
//! 3. **Validation:** Conversion of a raw [`CacheConfig`] into a checked [`CacheGeometry`].
//!
//! Configuration is read from JSON (`Config::from_file`) or taken from
//! `Config::default()`; the command line overrides individual fields.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::cache::CacheGeometry;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values describe the classic 16 KiB, 8-way L1 data cache when not
/// explicitly overridden in a configuration file.
mod defaults {
    /// Default cache capacity in bytes (16 KiB).
    pub const CACHE_SIZE: usize = 16 * 1024;

    /// Default cache line size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes and DRAM burst length.
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity (8 ways).
    pub const CACHE_WAYS: usize = 8;

    /// Default physical address width in bits.
    pub const ADDRESS_BITS: u32 = 32;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use l1sim_core::config::Config;
///
/// let json = r#"{ "cache": { "size_bytes": 32768, "ways": 4 } }"#;
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.cache.size_bytes, 32768);
/// assert_eq!(config.cache.line_bytes, 64);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Cache geometry
    #[serde(default)]
    pub cache: CacheConfig,
    /// Trace replay options
    #[serde(default)]
    pub trace: TraceConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// Missing fields take their defaults; unknown fields are rejected.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the text is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Parse`]
    /// if its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Cache geometry configuration.
///
/// The values are not checked until [`CacheConfig::geometry`] is called.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Total cache capacity in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Cache line size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Physical address width in bits
    #[serde(default = "CacheConfig::default_address_bits")]
    pub address_bits: u32,
}

impl CacheConfig {
    /// Returns the default cache capacity in bytes.
    const fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache line size in bytes.
    const fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default cache associativity (number of ways).
    const fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default physical address width.
    const fn default_address_bits() -> u32 {
        defaults::ADDRESS_BITS
    }

    /// Validates the configuration and derives the cache geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the line size or set count is not a power
    /// of two, the capacity does not divide into whole sets, or the offset and
    /// index fields do not fit in the address width.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        CacheGeometry::new(self.size_bytes, self.line_bytes, self.ways, self.address_bits)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            address_bits: defaults::ADDRESS_BITS,
        }
    }
}

/// Trace replay options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceConfig {
    /// Log every record as it is replayed (at `info` level).
    #[serde(default)]
    pub echo_accesses: bool,
}
