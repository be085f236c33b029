//! Common types shared by the cache model, the trace reader and the driver.
//!
//! This module provides:
//! 1. **Address Types:** A strong type for physical addresses fed to the cache.
//! 2. **Memory Access:** The read/write classification carried by each trace record.
//! 3. **Error Handling:** Configuration, trace and top-level simulation errors.

/// Physical address type.
pub mod addr;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration, trace parsing and simulation.
pub mod error;

pub use addr::PhysAddr;
pub use data::AccessType;
pub use error::{ConfigError, SimError, TraceError};
