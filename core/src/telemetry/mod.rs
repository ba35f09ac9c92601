//! telemetry/mod.rs
//! Counters, stage timers and immutable snapshots for gzip processors and
//! stream adapters.
//!
//! Industry notes:
//! - Compression ratio `bytes_out / bytes_in` is the usual storage metric.
//! - Counters are plain integers owned by one processor and merged afterwards,
//!   so nothing here needs locks or atomics.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
