//! constants.rs
//! Sizing defaults and gzip container constants shared across the crate.

/// Output chunk increment used by the processor loop (16 KiB).
/// The output buffer of a `process` call starts at this size and grows by it.
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Default deflate level (zlib `Z_DEFAULT_COMPRESSION` resolves to 6).
pub const DEFAULT_LEVEL: u32 = 6;

/// Highest deflate level accepted by the engine.
pub const MAX_LEVEL: u32 = 9;

/// Base-two log of the LZ77 window (zlib `MAX_WBITS`).
pub const MAX_WBITS: u8 = 15;

/// Upstream pull size used by `drain` and the `Read` bridge when the caller
/// does not choose one.
pub const DEFAULT_READ_SIZE: usize = 16 * 1024;

/// Gzip container constants (RFC 1952).
pub mod gzip {
    /// Member magic `1F 8B`.
    pub const MAGIC: [u8; 2] = [0x1f, 0x8b];
    /// Compression method `08` (deflate).
    pub const METHOD_DEFLATE: u8 = 0x08;
    /// Fixed part of the member header.
    pub const HEADER_LEN: usize = 10;
    /// CRC32 + ISIZE.
    pub const TRAILER_LEN: usize = 8;
    /// Operating system byte written by zlib on Unix hosts.
    pub const OS_UNIX: u8 = 0x03;
    /// Operating system byte for "unknown".
    pub const OS_UNKNOWN: u8 = 0xff;
}
