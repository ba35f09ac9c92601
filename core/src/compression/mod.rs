//! compression/mod.rs
//! Chunked gzip transformation over an incremental deflate/inflate engine.
//!
//! Industry notes:
//! - The engine is driven with SyncFlush between chunks so each chunk's output
//!   is usable downstream immediately, as HTTP content-encoding filters do.
//! - Status codes keep zlib's numbering so native diagnostics stay familiar.

pub mod status;
pub mod codec;
pub mod types;
pub mod processor;
pub mod registry;
pub mod oneshot;

pub use status::{classify, StatusCode, UNKNOWN_MESSAGE};
pub use codec::{Codec, DeflateCodec, FlushMode, InflateCodec, Progress};
pub use types::*;
pub use processor::{GzipCompressor, GzipDecompressor, TRUNCATED_STREAM};
pub use registry::*;
pub use oneshot::*;
