//! stream/source.rs
//! Upstream byte sources.

use std::io::{self, Read};
use std::time::{Duration, Instant};

use bytes::Bytes;

use crate::constants::DEFAULT_READ_SIZE;
use crate::types::{GzipError, Result};

/// Point in time after which an upstream read should give up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Deadline {
    #[default]
    Never,
    At(Instant),
}

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        Deadline::At(Instant::now() + timeout)
    }

    pub fn is_expired(&self) -> bool {
        match self {
            Deadline::Never => false,
            Deadline::At(at) => Instant::now() >= *at,
        }
    }
}

/// Pull-based source of bytes.
///
/// `read` may return fewer bytes than asked for, including none; callers
/// keep reading until `is_closed()` reports true.
pub trait ByteSource {
    /// Read up to `max_bytes`, blocking no later than `deadline`.
    fn read(&mut self, max_bytes: usize, deadline: Deadline) -> Result<Bytes>;

    fn is_closed(&self) -> bool;

    fn close(&mut self);

    /// Read until closed and concatenate everything.
    fn drain(&mut self, deadline: Deadline) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        while !self.is_closed() {
            let chunk = self.read(DEFAULT_READ_SIZE, deadline)?;
            out.extend_from_slice(&chunk);
        }
        Ok(out)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read(&mut self, max_bytes: usize, deadline: Deadline) -> Result<Bytes> {
        (**self).read(max_bytes, deadline)
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// In-memory source. Closes on the read that hands out its last byte.
#[derive(Clone, Debug)]
pub struct MemorySource {
    data: Bytes,
    closed: bool,
}

impl MemorySource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into(), closed: false }
    }
}

impl ByteSource for MemorySource {
    fn read(&mut self, max_bytes: usize, _deadline: Deadline) -> Result<Bytes> {
        if self.closed {
            return Ok(Bytes::new());
        }
        let n = max_bytes.min(self.data.len());
        let chunk = self.data.split_to(n);
        if self.data.is_empty() {
            self.closed = true;
        }
        Ok(chunk)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) {
        self.closed = true;
        self.data.clear();
    }
}

/// Source over any `std::io::Read`. Closes once the reader reports EOF.
///
/// A deadline that expired before the call fails with
/// `io::ErrorKind::TimedOut`. Once it expires mid-fill, the bytes gathered so
/// far are returned. A blocking reader is not interrupted mid-call.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    closed: bool,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, closed: false }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read(&mut self, max_bytes: usize, deadline: Deadline) -> Result<Bytes> {
        if self.closed {
            return Ok(Bytes::new());
        }
        if deadline.is_expired() {
            return Err(GzipError::Io(io::Error::new(
                io::ErrorKind::TimedOut,
                "upstream read deadline exceeded",
            )));
        }

        let mut buf = vec![0u8; max_bytes];
        let mut filled = 0;
        while filled < max_bytes {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.closed = true;
                    break;
                }
                Ok(n) => {
                    filled += n;
                    if deadline.is_expired() {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(GzipError::Io(e)),
            }
        }
        buf.truncate(filled);
        Ok(Bytes::from(buf))
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
