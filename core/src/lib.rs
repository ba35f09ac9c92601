//! gzip-core
//!
//! Chunked, stateful gzip stream transformer.
//! Pure Rust orchestration over a zlib-backed deflate engine.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Core
pub mod compression;
pub mod headers;
pub mod telemetry;

// Stream layers and collaborators
pub mod stream;
pub mod interop;
pub mod middleware;

pub use types::{GzipError, Result};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        compress_all, create_processor, decompress_all, GzipCompressor, GzipDecompressor,
        GzipProcessor, Gzippable, Mode, ProcessorConfig,
    };
    pub use crate::middleware::{Body, GzipMiddleware, Middleware, Responder};
    pub use crate::stream::{
        compress_stream, decompress_stream, ByteSource, Deadline, GzipReader, GzipStream,
        MemorySource, ReaderSource,
    };
    pub use crate::types::{GzipError, Result};
}
