//! compression/codec.rs
//! The raw inflate/deflate primitive seen by the processor loop.
//!
//! Design notes:
//! - The processor owns the output buffer; the codec only ever sees slices
//!   plus the flush mode and reports how many bytes it consumed/produced.
//! - Results are reported as zlib status codes so the classifier stays the
//!   single place that turns codes into errors.
//! - Both engines are flate2 `Compress`/`Decompress` in gzip framing.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::compression::status::StatusCode;
use crate::compression::types::ProcessorConfig;
use crate::constants::MAX_WBITS;
use crate::types::Result;

/// Flush semantics for one codec invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlushMode {
    /// Emit as much as possible without closing the stream.
    Sync,
    /// No more input follows.
    Finish,
}

impl FlushMode {
    pub fn for_chunk(is_last: bool) -> Self {
        if is_last { FlushMode::Finish } else { FlushMode::Sync }
    }

    fn compress(self) -> FlushCompress {
        match self {
            FlushMode::Sync   => FlushCompress::Sync,
            FlushMode::Finish => FlushCompress::Finish,
        }
    }

    fn decompress(self) -> FlushDecompress {
        match self {
            FlushMode::Sync   => FlushDecompress::Sync,
            FlushMode::Finish => FlushDecompress::Finish,
        }
    }
}

/// Outcome of one codec invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Input bytes consumed by this call.
    pub consumed: usize,
    /// Output bytes written by this call.
    pub produced: usize,
    /// zlib status code.
    pub code: i32,
    /// Native message accompanying a failure, if any.
    pub message: Option<String>,
}

impl Progress {
    pub fn new(consumed: usize, produced: usize, code: i32, message: Option<String>) -> Self {
        Self { consumed, produced, code, message }
    }

    /// Neither input nor output moved.
    pub fn is_idle(&self) -> bool {
        self.consumed == 0 && self.produced == 0
    }
}

/// Incremental codec driven by the processor loop.
pub trait Codec: Send {
    /// Configure a fresh engine.
    fn open(config: &ProcessorConfig) -> Result<Self>
    where
        Self: Sized;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Run the engine once over `input`, writing into `output`.
    fn transform(&mut self, input: &[u8], output: &mut [u8], flush: FlushMode) -> Progress;

    /// Cumulative input consumed since `open`.
    fn total_in(&self) -> u64;

    /// Cumulative output produced since `open`.
    fn total_out(&self) -> u64;

    /// Release the engine. Consuming `self` makes a second release impossible.
    fn end(self)
    where
        Self: Sized,
    {
        drop(self);
    }
}

fn status_code(status: Status) -> i32 {
    match status {
        Status::Ok        => StatusCode::Ok as i32,
        Status::StreamEnd => StatusCode::StreamEnd as i32,
        Status::BufError  => StatusCode::BufError as i32,
    }
}

/// Deflate engine emitting a gzip container (zlib `MAX_WBITS + 16`).
pub struct DeflateCodec {
    inner: Compress,
}

impl Codec for DeflateCodec {
    fn open(config: &ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Compress::new_gzip(Compression::new(config.level), MAX_WBITS),
        })
    }

    fn name(&self) -> &'static str {
        "deflate"
    }

    fn transform(&mut self, input: &[u8], output: &mut [u8], flush: FlushMode) -> Progress {
        let (in_before, out_before) = (self.inner.total_in(), self.inner.total_out());
        let result = self.inner.compress(input, output, flush.compress());
        let consumed = (self.inner.total_in() - in_before) as usize;
        let produced = (self.inner.total_out() - out_before) as usize;

        match result {
            Ok(status) => Progress::new(consumed, produced, status_code(status), None),
            Err(e) => Progress::new(
                consumed,
                produced,
                StatusCode::StreamError as i32,
                Some(native_message(&e.to_string(), "deflate compression error")),
            ),
        }
    }

    fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    fn total_out(&self) -> u64 {
        self.inner.total_out()
    }
}

/// Inflate engine accepting a gzip container (zlib `MAX_WBITS + 16`).
///
/// Gzip only: flate2 offers no gzip-or-zlib auto-detection, so zlib-wrapped
/// input is rejected with `Data("incorrect header check")`.
pub struct InflateCodec {
    inner: Decompress,
}

impl Codec for InflateCodec {
    fn open(config: &ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Decompress::new_gzip(MAX_WBITS),
        })
    }

    fn name(&self) -> &'static str {
        "inflate"
    }

    fn transform(&mut self, input: &[u8], output: &mut [u8], flush: FlushMode) -> Progress {
        let (in_before, out_before) = (self.inner.total_in(), self.inner.total_out());
        let result = self.inner.decompress(input, output, flush.decompress());
        let consumed = (self.inner.total_in() - in_before) as usize;
        let produced = (self.inner.total_out() - out_before) as usize;

        match result {
            Ok(status) => Progress::new(consumed, produced, status_code(status), None),
            Err(e) if e.needs_dictionary().is_some() => Progress::new(
                consumed,
                produced,
                StatusCode::NeedDict as i32,
                Some("requires a dictionary".to_string()),
            ),
            Err(e) => {
                let message = native_message(&e.to_string(), "deflate decompression error");
                // flate2 folds Z_MEM_ERROR into the same error type as Z_DATA_ERROR.
                let code = if message.contains("memory") {
                    StatusCode::MemError
                } else {
                    StatusCode::DataError
                };
                Progress::new(consumed, produced, code as i32, Some(message))
            }
        }
    }

    fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    fn total_out(&self) -> u64 {
        self.inner.total_out()
    }
}

/// Strip flate2's generic prefix so only the native zlib text remains.
fn native_message(display: &str, prefix: &str) -> String {
    display
        .strip_prefix(prefix)
        .map(|rest| rest.trim_start_matches(':').trim())
        .filter(|rest| !rest.is_empty())
        .unwrap_or(display)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_message_strips_prefix() {
        assert_eq!(
            native_message("deflate decompression error: incorrect header check", "deflate decompression error"),
            "incorrect header check"
        );
        assert_eq!(
            native_message("deflate decompression error", "deflate decompression error"),
            "deflate decompression error"
        );
    }

    #[test]
    fn deflate_then_inflate_one_step() {
        let config = ProcessorConfig::default();
        let mut deflate = DeflateCodec::open(&config).unwrap();
        let mut out = vec![0u8; 1024];
        let p = deflate.transform(b"abcabcabc", &mut out, FlushMode::Finish);
        assert_eq!(p.code, StatusCode::StreamEnd as i32);
        assert_eq!(p.consumed, 9);
        assert_eq!(deflate.total_out() as usize, p.produced);

        let mut inflate = InflateCodec::open(&config).unwrap();
        let mut plain = vec![0u8; 64];
        let q = inflate.transform(&out[..p.produced], &mut plain, FlushMode::Finish);
        assert_eq!(q.code, StatusCode::StreamEnd as i32);
        assert_eq!(&plain[..q.produced], b"abcabcabc");
    }

    #[test]
    fn inflate_reports_data_error_for_garbage() {
        let mut inflate = InflateCodec::open(&ProcessorConfig::default()).unwrap();
        let mut out = vec![0u8; 64];
        let p = inflate.transform(b"foo", &mut out, FlushMode::Finish);
        assert_eq!(p.code, StatusCode::DataError as i32);
        assert_eq!(p.message.as_deref(), Some("incorrect header check"));
    }

    #[test]
    fn inflate_rejects_zlib_wrapped_input() {
        let mut zlib = Compress::new(Compression::default(), true);
        let mut wrapped = vec![0u8; 128];
        zlib.compress(b"zlib framed", &mut wrapped, FlushCompress::Finish).unwrap();
        wrapped.truncate(zlib.total_out() as usize);

        let mut inflate = InflateCodec::open(&ProcessorConfig::default()).unwrap();
        let mut out = vec![0u8; 64];
        let p = inflate.transform(&wrapped, &mut out, FlushMode::Finish);
        assert_eq!(p.code, StatusCode::DataError as i32);
        assert_eq!(p.message.as_deref(), Some("incorrect header check"));
    }
}
