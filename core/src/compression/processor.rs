//! compression/processor.rs
//! Stream processor core: the chunk loop and its two variants.
//!
//! Design notes:
//! - Each `process` call owns a fresh output buffer that starts at
//!   `chunk_size` bytes and grows by the same increment whenever the codec
//!   fills it; the buffer is trimmed to the bytes actually written.
//! - Compress and decompress share the loop and differ only in the
//!   continuation predicate and in finalizing on the natural stream end.
//! - The codec slot moves `Created -> Active -> Finalized` exactly once;
//!   `Drop` finalizes whatever is still active.

use std::fmt;
use std::mem;

use tracing::{debug, trace, warn};

use crate::compression::codec::{Codec, DeflateCodec, FlushMode, InflateCodec};
use crate::compression::status::{classify, StatusCode};
use crate::compression::types::{GzipProcessor, Mode, ProcessorConfig};
use crate::telemetry::TelemetryCounters;
use crate::types::{GzipError, Result};

/// Reported when a decompressed stream ends before its trailer.
pub const TRUNCATED_STREAM: &str = "unexpected end of compressed stream";

enum CodecState<C> {
    Created,
    Active(C),
    Finalized,
}

/// Loop continuation rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LoopPolicy {
    /// Continue while the output buffer was filled completely.
    Deflate,
    /// Continue while fed input remains or the output buffer was filled
    /// completely; stop at the natural stream end.
    Inflate,
}

struct ChunkOutput {
    bytes: Vec<u8>,
    ended: bool,
}

struct ProcessorCore<C: Codec> {
    mode: Mode,
    policy: LoopPolicy,
    config: ProcessorConfig,
    state: CodecState<C>,
    counters: TelemetryCounters,
}

impl<C: Codec> ProcessorCore<C> {
    fn new(mode: Mode, policy: LoopPolicy, config: ProcessorConfig) -> Self {
        Self {
            mode,
            policy,
            config,
            state: CodecState::Created,
            counters: TelemetryCounters::default(),
        }
    }

    fn initialize(&mut self) -> Result<()> {
        match self.state {
            CodecState::Created => {}
            CodecState::Active(_) => {
                return Err(GzipError::Initialization("already initialized".into()));
            }
            CodecState::Finalized => return Err(GzipError::AlreadyClosed),
        }

        let codec = C::open(&self.config)?;
        debug!(
            mode = %self.mode,
            codec = codec.name(),
            chunk_size = self.config.chunk_size,
            level = self.config.level,
            "gzip codec initialized"
        );
        self.state = CodecState::Active(codec);
        Ok(())
    }

    fn process(&mut self, chunk: &[u8], is_last: bool) -> Result<Vec<u8>> {
        let policy = self.policy;
        let chunk_size = self.config.chunk_size;
        let codec = match &mut self.state {
            CodecState::Active(codec) => codec,
            CodecState::Created => {
                return Err(GzipError::Stream("processor not initialized".into()));
            }
            CodecState::Finalized => return Err(GzipError::AlreadyClosed),
        };

        match run_chunk(codec, chunk, is_last, chunk_size, policy, &mut self.counters) {
            Ok(out) => {
                self.counters.record_chunk(chunk.len(), out.bytes.len(), is_last);
                trace!(
                    mode = %self.mode,
                    bytes_in = chunk.len(),
                    bytes_out = out.bytes.len(),
                    is_last,
                    ended = out.ended,
                    "gzip chunk processed"
                );
                if is_last || out.ended {
                    self.finalize();
                }
                Ok(out.bytes)
            }
            Err(e) => {
                debug!(mode = %self.mode, error = %e, "gzip chunk failed; finalizing codec");
                self.finalize();
                Err(e)
            }
        }
    }

    fn finalize(&mut self) {
        match mem::replace(&mut self.state, CodecState::Finalized) {
            CodecState::Active(codec) => {
                debug!(
                    mode = %self.mode,
                    codec = codec.name(),
                    total_in = codec.total_in(),
                    total_out = codec.total_out(),
                    "gzip codec finalized"
                );
                codec.end();
                self.counters.finalizations += 1;
            }
            CodecState::Created | CodecState::Finalized => {}
        }
    }

    fn is_closed(&self) -> bool {
        matches!(self.state, CodecState::Finalized)
    }
}

impl<C: Codec> Drop for ProcessorCore<C> {
    fn drop(&mut self) {
        self.finalize();
    }
}

/// Extend `output` by `increment` zeroed bytes, reporting allocation failure.
fn grow(output: &mut Vec<u8>, increment: usize) -> Result<()> {
    output
        .try_reserve_exact(increment)
        .map_err(|e| GzipError::Memory(e.to_string()))?;
    output.resize(output.len() + increment, 0);
    Ok(())
}

fn run_chunk<C: Codec>(
    codec: &mut C,
    input: &[u8],
    is_last: bool,
    chunk_size: usize,
    policy: LoopPolicy,
    counters: &mut TelemetryCounters,
) -> Result<ChunkOutput> {
    let flush = FlushMode::for_chunk(is_last);
    let finishing_inflate = policy == LoopPolicy::Inflate && flush == FlushMode::Finish;

    let mut output = Vec::new();
    grow(&mut output, chunk_size)?;

    let mut consumed = 0usize;
    let mut written = 0usize;
    let mut code;

    loop {
        if written >= output.len() {
            grow(&mut output, chunk_size)?;
            counters.buffer_grows += 1;
        }

        let progress = codec.transform(&input[consumed..], &mut output[written..], flush);
        counters.codec_calls += 1;
        consumed += progress.consumed;
        written += progress.produced;
        code = progress.code;
        let exhausted = written == output.len();

        if code == StatusCode::BufError as i32 {
            // No progress because the output is full: grow and retry.
            if exhausted {
                continue;
            }
            if consumed == input.len() {
                if finishing_inflate {
                    return Err(GzipError::Data(TRUNCATED_STREAM.into()));
                }
                if progress.is_idle() {
                    code = StatusCode::Ok as i32;
                    break;
                }
            }
            return Err(classify(code, progress.message.as_deref()));
        }
        if StatusCode::is_negative(code) {
            return Err(classify(code, progress.message.as_deref()));
        }
        if code != StatusCode::Ok as i32 {
            break;
        }

        let more = match policy {
            LoopPolicy::Deflate => exhausted,
            LoopPolicy::Inflate => consumed < input.len() || exhausted,
        };
        if !more {
            break;
        }
        if progress.is_idle() && !exhausted {
            return Err(GzipError::Stream("codec made no progress".into()));
        }
    }

    let ended = code == StatusCode::StreamEnd as i32;
    if !ended && code != StatusCode::Ok as i32 {
        return Err(GzipError::Stream(format!(
            "wrong result code {}",
            StatusCode::name(code)
        )));
    }
    if finishing_inflate && !ended {
        return Err(GzipError::Data(TRUNCATED_STREAM.into()));
    }
    // Data past the member end fails the same way whether it shares the
    // final chunk or arrives in a later one.
    if ended && consumed < input.len() {
        warn!(
            trailing = input.len() - consumed,
            "data after the end of the gzip stream"
        );
        return Err(GzipError::AlreadyClosed);
    }

    output.truncate(written);
    Ok(ChunkOutput { bytes: output, ended })
}

/// Gzip compressor: deflate with a gzip header, default strategy.
pub struct GzipCompressor {
    core: ProcessorCore<DeflateCodec>,
}

impl GzipCompressor {
    pub fn new() -> Self {
        Self::with_config(ProcessorConfig::default())
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        Self {
            core: ProcessorCore::new(Mode::Compress, LoopPolicy::Deflate, config),
        }
    }
}

impl Default for GzipCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GzipCompressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GzipCompressor")
            .field("config", &self.core.config)
            .field("closed", &self.core.is_closed())
            .finish()
    }
}

impl GzipProcessor for GzipCompressor {
    fn mode(&self) -> Mode {
        Mode::Compress
    }

    fn initialize(&mut self) -> Result<()> {
        self.core.initialize()
    }

    fn process(&mut self, chunk: &[u8], is_last: bool) -> Result<Vec<u8>> {
        self.core.process(chunk, is_last)
    }

    fn close(&mut self) {
        self.core.finalize();
    }

    fn is_closed(&self) -> bool {
        self.core.is_closed()
    }

    fn counters(&self) -> &TelemetryCounters {
        &self.core.counters
    }
}

/// Gzip decompressor: inflate expecting a gzip header.
pub struct GzipDecompressor {
    core: ProcessorCore<InflateCodec>,
}

impl GzipDecompressor {
    pub fn new() -> Self {
        Self::with_config(ProcessorConfig::default())
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        Self {
            core: ProcessorCore::new(Mode::Decompress, LoopPolicy::Inflate, config),
        }
    }
}

impl Default for GzipDecompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GzipDecompressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GzipDecompressor")
            .field("config", &self.core.config)
            .field("closed", &self.core.is_closed())
            .finish()
    }
}

impl GzipProcessor for GzipDecompressor {
    fn mode(&self) -> Mode {
        Mode::Decompress
    }

    fn initialize(&mut self) -> Result<()> {
        self.core.initialize()
    }

    fn process(&mut self, chunk: &[u8], is_last: bool) -> Result<Vec<u8>> {
        self.core.process(chunk, is_last)
    }

    fn close(&mut self) {
        self.core.finalize();
    }

    fn is_closed(&self) -> bool {
        self.core.is_closed()
    }

    fn counters(&self) -> &TelemetryCounters {
        &self.core.counters
    }
}
