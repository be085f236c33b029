//! Trace replay.
//!
//! Provides the trace record parser and the driver that feeds records to the
//! cache strictly in file order.

/// Trace record parsing and streaming.
pub mod trace;

/// Cache-owning replay driver.
pub mod simulator;

pub use simulator::Simulator;
pub use trace::{TraceReader, TraceRecord};
