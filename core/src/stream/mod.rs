//! stream/mod.rs
//! Pull-based byte streams and the gzip adapter that transforms them lazily.
//!
//! Design notes:
//! - `ByteSource` is the upstream contract: bounded reads with a deadline and
//!   an explicit closed flag.
//! - `GzipStream` is itself a `ByteSource`, so adapters chain.
//! - `GzipReader` and the chunk iterators bridge to `std::io::Read`.

pub mod source;
pub mod adapter;
pub mod io;

pub use source::*;
pub use adapter::*;
pub use io::*;
