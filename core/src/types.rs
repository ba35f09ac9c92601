use std::io;

use thiserror::Error;

use crate::compression::StatusCode;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GzipError>;

/// Closed failure taxonomy for the processor, the stream adapter and the
/// HTTP collaborator.
/// - Codec variants mirror zlib's well-known status codes.
/// - Messages come from the native codec where one is available.
#[derive(Debug, Error)]
pub enum GzipError {
    /// Codec state could not be configured; the processor must be discarded.
    #[error("gzip initialization error: {0}")]
    Initialization(String),

    /// The codec state was inconsistent (zlib `Z_STREAM_ERROR`).
    #[error("gzip stream error: {0}")]
    Stream(String),

    /// Input does not conform to the requested mode (zlib `Z_DATA_ERROR`).
    #[error("gzip data error: {0}")]
    Data(String),

    /// Allocation failure while growing output or setting up the codec.
    #[error("gzip memory error: {0}")]
    Memory(String),

    /// No progress was possible with the current buffer sizing.
    #[error("gzip buffer error: {0}")]
    Buffer(String),

    /// Codec library version mismatch.
    #[error("gzip version error: {0}")]
    Version(String),

    /// Any status code outside the table above.
    #[error("unknown gzip error (code {code}): {message}")]
    Unknown { code: i32, message: String },

    /// Response body is neither a buffer nor a pull stream.
    #[error("unsupported response body kind")]
    UnsupportedStreamKind,

    /// Data arrived after the gzip member ended, or the processor was used
    /// after it finalized.
    #[error("gzip stream already closed")]
    AlreadyClosed,

    /// Upstream I/O failure (including deadline expiry), propagated verbatim.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl GzipError {
    /// zlib-numbered status for codec-derived variants.
    pub fn status_code(&self) -> Option<i32> {
        match self {
            GzipError::Stream(_) => Some(StatusCode::StreamError as i32),
            GzipError::Data(_) => Some(StatusCode::DataError as i32),
            GzipError::Memory(_) => Some(StatusCode::MemError as i32),
            GzipError::Buffer(_) => Some(StatusCode::BufError as i32),
            GzipError::Version(_) => Some(StatusCode::VersionError as i32),
            GzipError::Unknown { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// True for failures reported by the codec itself.
    pub fn is_codec_error(&self) -> bool {
        self.status_code().is_some()
    }
}

impl From<GzipError> for io::Error {
    fn from(e: GzipError) -> Self {
        match e {
            GzipError::Io(inner) => inner,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
