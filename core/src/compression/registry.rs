//! compression/registry.rs
//! Processor factory keyed by `Mode`.

use crate::compression::processor::{GzipCompressor, GzipDecompressor};
use crate::compression::types::{GzipProcessor, Mode, ProcessorConfig};

/// Build an uninitialized processor for `mode`.
pub fn create_processor(mode: Mode, config: ProcessorConfig) -> Box<dyn GzipProcessor> {
    match mode {
        Mode::Compress => Box::new(GzipCompressor::with_config(config)),
        Mode::Decompress => Box::new(GzipDecompressor::with_config(config)),
    }
}

impl Mode {
    /// Shorthand for [`create_processor`].
    pub fn processor(self, config: ProcessorConfig) -> Box<dyn GzipProcessor> {
        create_processor(self, config)
    }
}
