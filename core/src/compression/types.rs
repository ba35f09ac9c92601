//! compression/types.rs
//! Mode tag, processor configuration and the shared processor capability.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_LEVEL, MAX_CHUNK_SIZE, MAX_LEVEL};
use crate::telemetry::TelemetryCounters;
use crate::types::{GzipError, Result};

/// Direction of a processor, fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Compress,
    Decompress,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Compress   => f.write_str("compress"),
            Mode::Decompress => f.write_str("decompress"),
        }
    }
}

/// Construction-time configuration of a processor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Initial output capacity and growth increment of each `process` call.
    pub chunk_size: usize,
    /// Deflate level 0..=9 (ignored when decompressing).
    pub level: u32,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            level: DEFAULT_LEVEL,
        }
    }
}

impl ProcessorConfig {
    pub fn new(chunk_size: Option<usize>, level: Option<u32>) -> Self {
        Self {
            chunk_size: chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
            level: level.unwrap_or(DEFAULT_LEVEL),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(GzipError::Initialization("chunk size must be non-zero".into()));
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(GzipError::Initialization(format!(
                "chunk size too large: {} > {}",
                self.chunk_size, MAX_CHUNK_SIZE
            )));
        }
        if self.level > MAX_LEVEL {
            return Err(GzipError::Initialization(format!(
                "invalid compression level: {} > {}",
                self.level, MAX_LEVEL
            )));
        }
        Ok(())
    }
}

/// Chunked gzip transformer shared by the compress and decompress variants.
///
/// Lifecycle: `initialize()` once, any number of `process` calls, then
/// finalization (explicit `close()`, a final chunk, or the natural end of a
/// decompressed stream). Implementations are `Send` so a processor can move
/// with the stream that owns it; they are never shared between threads.
pub trait GzipProcessor: Send {
    /// Direction fixed at construction.
    fn mode(&self) -> Mode;

    /// Configure the codec. Must be called exactly once before `process`.
    fn initialize(&mut self) -> Result<()>;

    /// Transform one chunk and return exactly the bytes produced by this call.
    fn process(&mut self, chunk: &[u8], is_last: bool) -> Result<Vec<u8>>;

    /// Finalize the codec state. Idempotent.
    fn close(&mut self);

    /// True once the codec state has been finalized.
    fn is_closed(&self) -> bool;

    /// Counters collected since construction.
    fn counters(&self) -> &TelemetryCounters;

    /// Force out buffered output and end the stream.
    fn flush(&mut self) -> Result<Vec<u8>> {
        self.process(&[], true)
    }

    /// Like `flush`, but a closed processor yields an empty buffer instead of
    /// an error.
    fn safe_flush(&mut self) -> Result<Vec<u8>> {
        if self.is_closed() {
            return Ok(Vec::new());
        }
        self.flush()
    }
}

impl fmt::Debug for dyn GzipProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GzipProcessor")
            .field("mode", &self.mode())
            .field("closed", &self.is_closed())
            .finish()
    }
}
