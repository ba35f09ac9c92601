//! headers/mod.rs
//! Gzip member header and trailer inspection (RFC 1952).
//!
//! Industry notes:
//! - The processor never needs these: the engine parses and writes the
//!   container itself. The middleware uses them to reject non-gzip buffered
//!   bodies early and to log member metadata (file name, mtime, OS byte).
//! - All multi-byte integers are little-endian on the wire.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
