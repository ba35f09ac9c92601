//! stream/io.rs
//! Bridges between `ByteSource` and `std::io::Read`.

use std::io::{self, Read};

use bytes::{Buf, Bytes};

use crate::compression::{Mode, ProcessorConfig};
use crate::constants::DEFAULT_READ_SIZE;
use crate::stream::adapter::GzipStream;
use crate::stream::source::{ByteSource, Deadline, ReaderSource};
use crate::types::{GzipError, Result};

/// `std::io::Read` over any `ByteSource`.
///
/// A transformed chunk larger than the caller's buffer is kept and handed out
/// by the following calls.
pub struct GzipReader<S> {
    inner: S,
    pending: Bytes,
    read_size: usize,
    deadline: Deadline,
}

impl<S: ByteSource> GzipReader<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            pending: Bytes::new(),
            read_size: DEFAULT_READ_SIZE,
            deadline: Deadline::Never,
        }
    }

    /// Upstream pull size per refill.
    pub fn with_read_size(mut self, read_size: usize) -> Self {
        self.read_size = read_size.max(1);
        self
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<R: Read> GzipReader<GzipStream<ReaderSource<R>>> {
    /// Reader yielding the gzip compression of `reader`.
    pub fn compressing(reader: R) -> Result<Self> {
        Ok(Self::new(GzipStream::compress(ReaderSource::new(reader))?))
    }

    /// Reader yielding the decompression of the gzip member in `reader`.
    pub fn decompressing(reader: R) -> Result<Self> {
        Ok(Self::new(GzipStream::decompress(ReaderSource::new(reader))?))
    }
}

impl<S: ByteSource> Read for GzipReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pending.is_empty() {
            if self.inner.is_closed() {
                return Ok(0);
            }
            self.pending = self.inner.read(self.read_size, self.deadline)?;
        }
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.advance(n);
        Ok(n)
    }
}

/// Iterator of transformed chunks over a `std::io::Read`.
///
/// Empty intermediate outputs are skipped. The first error ends the iteration.
pub struct GzipChunks<R> {
    stream: Option<GzipStream<ReaderSource<R>>>,
    pending_error: Option<GzipError>,
    read_size: usize,
}

impl<R: Read> GzipChunks<R> {
    fn new(reader: R, chunk_size: usize, mode: Mode) -> Self {
        let config = ProcessorConfig::default().with_chunk_size(chunk_size);
        match GzipStream::with_config(ReaderSource::new(reader), mode, config) {
            Ok(stream) => Self { stream: Some(stream), pending_error: None, read_size: chunk_size },
            Err(e) => Self { stream: None, pending_error: Some(e), read_size: chunk_size },
        }
    }
}

impl<R: Read> Iterator for GzipChunks<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending_error.take() {
            return Some(Err(e));
        }
        let stream = self.stream.as_mut()?;
        let outcome = loop {
            if stream.is_closed() {
                break None;
            }
            match stream.read(self.read_size, Deadline::Never) {
                Ok(chunk) if chunk.is_empty() => continue,
                Ok(chunk) => break Some(Ok(Vec::from(chunk))),
                Err(e) => break Some(Err(e)),
            }
        };
        if !matches!(outcome, Some(Ok(_))) {
            self.stream = None;
        }
        outcome
    }
}

/// Compress data read from `r` in `chunk_size` blocks, yielding gzip chunks.
/// An invalid `chunk_size` is reported as the first item.
pub fn compress_stream<R: Read>(r: R, chunk_size: usize) -> GzipChunks<R> {
    GzipChunks::new(r, chunk_size, Mode::Compress)
}

/// Decompress a gzip member read from `r` in `chunk_size` blocks.
pub fn decompress_stream<R: Read>(r: R, chunk_size: usize) -> GzipChunks<R> {
    GzipChunks::new(r, chunk_size, Mode::Decompress)
}
