//! compression/oneshot.rs
//! One-shot entry points for callers holding the whole payload in memory.
//!
//! Each call builds a fresh processor, feeds the payload as a single final
//! chunk and returns the result. Empty input never touches the codec.

use bytes::Bytes;

use crate::compression::registry::create_processor;
use crate::compression::types::{Mode, ProcessorConfig};
use crate::types::Result;

/// Run `data` through a fresh processor of `mode` as one final chunk.
pub fn transform_all(mode: Mode, data: &[u8], config: ProcessorConfig) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let mut processor = create_processor(mode, config);
    processor.initialize()?;
    processor.process(data, true)
}

pub fn compress_all(data: &[u8]) -> Result<Vec<u8>> {
    transform_all(Mode::Compress, data, ProcessorConfig::default())
}

pub fn decompress_all(data: &[u8]) -> Result<Vec<u8>> {
    transform_all(Mode::Decompress, data, ProcessorConfig::default())
}

pub fn compress_all_with_config(data: &[u8], config: ProcessorConfig) -> Result<Vec<u8>> {
    transform_all(Mode::Compress, data, config)
}

pub fn decompress_all_with_config(data: &[u8], config: ProcessorConfig) -> Result<Vec<u8>> {
    transform_all(Mode::Decompress, data, config)
}

/// Extension methods on byte containers.
///
/// Each implementation returns its own buffer family so callers never convert
/// by hand.
pub trait Gzippable {
    type Output;

    /// Compress into a gzip member.
    fn gzip_compressed(&self) -> Result<Self::Output>;

    /// Decompress a gzip member.
    fn gzip_uncompressed(&self) -> Result<Self::Output>;
}

impl Gzippable for [u8] {
    type Output = Vec<u8>;

    fn gzip_compressed(&self) -> Result<Vec<u8>> {
        compress_all(self)
    }

    fn gzip_uncompressed(&self) -> Result<Vec<u8>> {
        decompress_all(self)
    }
}

impl Gzippable for Vec<u8> {
    type Output = Vec<u8>;

    fn gzip_compressed(&self) -> Result<Vec<u8>> {
        compress_all(self)
    }

    fn gzip_uncompressed(&self) -> Result<Vec<u8>> {
        decompress_all(self)
    }
}

// Vec -> Bytes takes ownership of the allocation, no copy.
impl Gzippable for Bytes {
    type Output = Bytes;

    fn gzip_compressed(&self) -> Result<Bytes> {
        compress_all(self).map(Bytes::from)
    }

    fn gzip_uncompressed(&self) -> Result<Bytes> {
        decompress_all(self).map(Bytes::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_empty_output() {
        assert!(compress_all(&[]).unwrap().is_empty());
        assert!(decompress_all(&[]).unwrap().is_empty());
        assert!(Bytes::new().gzip_uncompressed().unwrap().is_empty());
    }

    #[test]
    fn extension_trait_roundtrips() {
        let data = b"payload payload payload".to_vec();
        let gz = data.gzip_compressed().unwrap();
        assert_eq!(gz.gzip_uncompressed().unwrap(), data);

        let bytes = Bytes::from_static(b"static payload");
        assert_eq!(bytes.gzip_compressed().unwrap().gzip_uncompressed().unwrap(), bytes);
    }
}
