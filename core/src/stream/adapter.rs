//! stream/adapter.rs
//! Lazy gzip transformation of an upstream `ByteSource`.
//!
//! Design notes:
//! - Every `read` pulls at most one upstream chunk and runs it through the
//!   processor; output size is whatever the codec produced for that chunk.
//! - The adapter closes only after upstream closed and the processor
//!   finalized. Once closed, reads return nothing and touch nothing.
//! - Upstream data arriving after the processor finalized is a protocol
//!   violation and fails with `AlreadyClosed`.

use std::fmt;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::compression::{create_processor, GzipProcessor, Mode, ProcessorConfig};
use crate::stream::source::{ByteSource, Deadline};
use crate::telemetry::{Stage, TelemetrySnapshot, TelemetryTimer};
use crate::types::{GzipError, Result};

pub struct GzipStream<S> {
    upstream: S,
    processor: Box<dyn GzipProcessor>,
    closed: bool,
    timer: TelemetryTimer,
}

impl<S: ByteSource> GzipStream<S> {
    /// Wrap `upstream` with an initialized processor of `mode`.
    pub fn new(upstream: S, mode: Mode) -> Result<Self> {
        Self::with_config(upstream, mode, ProcessorConfig::default())
    }

    pub fn with_config(upstream: S, mode: Mode, config: ProcessorConfig) -> Result<Self> {
        let mut processor = create_processor(mode, config);
        processor.initialize()?;
        Ok(Self {
            upstream,
            processor,
            closed: false,
            timer: TelemetryTimer::new(),
        })
    }

    pub fn compress(upstream: S) -> Result<Self> {
        Self::new(upstream, Mode::Compress)
    }

    pub fn decompress(upstream: S) -> Result<Self> {
        Self::new(upstream, Mode::Decompress)
    }

    pub fn mode(&self) -> Mode {
        self.processor.mode()
    }

    pub fn get_ref(&self) -> &S {
        &self.upstream
    }

    pub fn processor(&self) -> &dyn GzipProcessor {
        self.processor.as_ref()
    }

    /// Counters and stage timings so far.
    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(self.mode(), self.processor.counters(), &self.timer)
    }

    fn codec_stage(&self) -> Stage {
        match self.mode() {
            Mode::Compress => Stage::Compress,
            Mode::Decompress => Stage::Decompress,
        }
    }

    /// Upstream closed: release the codec and stop.
    fn finish(&mut self) {
        let processor = &mut self.processor;
        self.timer.time(Stage::Finalize, || processor.close());
        self.closed = true;
        self.timer.finish();
        debug!(
            mode = %self.mode(),
            bytes_in = self.processor.counters().bytes_in,
            bytes_out = self.processor.counters().bytes_out,
            "gzip stream closed"
        );
    }
}

impl<S: ByteSource> ByteSource for GzipStream<S> {
    fn read(&mut self, max_bytes: usize, deadline: Deadline) -> Result<Bytes> {
        if self.closed {
            return Ok(Bytes::new());
        }

        let upstream = &mut self.upstream;
        let chunk = self.timer.time(Stage::Read, || upstream.read(max_bytes, deadline))?;
        let upstream_closed = self.upstream.is_closed();

        if self.processor.is_closed() {
            if !chunk.is_empty() {
                warn!(
                    mode = %self.mode(),
                    ignored = chunk.len(),
                    "upstream produced data after the gzip stream ended"
                );
                return Err(GzipError::AlreadyClosed);
            }
            if upstream_closed {
                self.finish();
            }
            return Ok(Bytes::new());
        }

        // A decompress body that never carried a byte is an empty payload, not
        // a truncated member.
        if chunk.is_empty()
            && upstream_closed
            && self.mode() == Mode::Decompress
            && self.processor.counters().bytes_in == 0
        {
            self.finish();
            return Ok(Bytes::new());
        }

        let is_last = upstream_closed || self.processor.is_closed();
        let stage = self.codec_stage();
        let processor = &mut self.processor;
        let out = self.timer.time(stage, || processor.process(&chunk, is_last))?;
        trace!(
            mode = %self.mode(),
            bytes_in = chunk.len(),
            bytes_out = out.len(),
            is_last,
            "gzip stream read"
        );

        if upstream_closed {
            self.finish();
        }
        Ok(Bytes::from(out))
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) {
        self.processor.close();
        self.upstream.close();
        if !self.closed {
            self.closed = true;
            self.timer.finish();
        }
    }
}

impl<S> fmt::Debug for GzipStream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GzipStream")
            .field("processor", &self.processor)
            .field("closed", &self.closed)
            .finish()
    }
}
