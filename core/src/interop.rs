//! interop.rs
//! Conversions between the byte containers callers hand to the crate.
//!
//! Costs:
//! - `Vec<u8>` -> `Bytes`: no copy, the allocation moves.
//! - `Bytes` -> `Vec<u8>`: no copy when the `Bytes` is the unique owner of a
//!   `Vec`-backed buffer, otherwise one copy.
//! - `BytesMut` -> `Bytes` (`freeze`): no copy.
//! - `&[u8]` -> any owned buffer: one copy.
//! - Any owned buffer -> `&[u8]`: no copy.

use bytes::{Bytes, BytesMut};

/// Owned view over a byte buffer, whichever container it came in.
pub trait ByteBuffer {
    fn as_bytes(&self) -> &[u8];

    /// Take the contents as `Bytes`.
    fn into_bytes(self) -> Bytes
    where
        Self: Sized;

    /// Take the contents as `Vec<u8>`.
    fn into_vec(self) -> Vec<u8>
    where
        Self: Sized;
}

impl ByteBuffer for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn into_bytes(self) -> Bytes {
        Bytes::from(self)
    }

    fn into_vec(self) -> Vec<u8> {
        self
    }
}

impl ByteBuffer for Bytes {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn into_bytes(self) -> Bytes {
        self
    }

    fn into_vec(self) -> Vec<u8> {
        Vec::from(self)
    }
}

impl ByteBuffer for BytesMut {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn into_bytes(self) -> Bytes {
        self.freeze()
    }

    fn into_vec(self) -> Vec<u8> {
        Vec::from(self.freeze())
    }
}

impl ByteBuffer for &[u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn into_bytes(self) -> Bytes {
        Bytes::copy_from_slice(self)
    }

    fn into_vec(self) -> Vec<u8> {
        self.to_vec()
    }
}

/// Copy `data` into a fresh `BytesMut` for callers that keep appending.
pub fn to_bytes_mut(data: &[u8]) -> BytesMut {
    BytesMut::from(data)
}

/// Join transformed chunks into one `Bytes`; a single chunk moves without a
/// copy.
pub fn join_chunks(mut chunks: Vec<Vec<u8>>) -> Bytes {
    if chunks.len() == 1 {
        if let Some(only) = chunks.pop() {
            return Bytes::from(only);
        }
    }
    let total = chunks.iter().map(Vec::len).sum();
    let mut out = BytesMut::with_capacity(total);
    for chunk in &chunks {
        out.extend_from_slice(chunk);
    }
    out.freeze()
}
