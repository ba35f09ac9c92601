//! middleware.rs
//! Client-side HTTP collaborator that undoes `Content-Encoding: gzip`.
//!
//! The request always advertises `Accept-Encoding: gzip`. A response whose
//! `Content-Encoding` mentions gzip gets its body replaced by the decoded
//! body; anything else passes through untouched. Place it last in a chain so
//! other layers see plain bytes.

use std::fmt;
use std::io::Write;

use bytes::Bytes;
use http::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH};
use http::{HeaderMap, HeaderValue, Request, Response};
use tracing::debug;

use crate::compression::oneshot::decompress_all;
use crate::headers::{decode_header, is_gzip};
use crate::stream::{ByteSource, GzipStream};
use crate::types::{GzipError, Result};

/// Callback that writes a body into a sink.
pub type BodyWriter = Box<dyn FnOnce(&mut dyn Write) -> std::io::Result<()> + Send>;

/// HTTP message body.
pub enum Body {
    Empty,
    /// Fully buffered body.
    Buffer(Bytes),
    /// Pull stream.
    Reader(Box<dyn ByteSource + Send>),
    /// Push stream; cannot be decoded here.
    Writer(BodyWriter),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Empty => true,
            Body::Buffer(b) => b.is_empty(),
            Body::Reader(_) | Body::Writer(_) => false,
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::Empty
    }
}

impl From<Bytes> for Body {
    fn from(b: Bytes) -> Self {
        Body::Buffer(b)
    }
}

impl From<Vec<u8>> for Body {
    fn from(v: Vec<u8>) -> Self {
        Body::Buffer(Bytes::from(v))
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Body::Empty"),
            Body::Buffer(b) => write!(f, "Body::Buffer({} bytes)", b.len()),
            Body::Reader(_) => f.write_str("Body::Reader(..)"),
            Body::Writer(_) => f.write_str("Body::Writer(..)"),
        }
    }
}

/// Next hop in a client chain.
pub trait Responder {
    fn respond(&self, request: Request<Body>) -> Result<Response<Body>>;
}

impl<F> Responder for F
where
    F: Fn(Request<Body>) -> Result<Response<Body>>,
{
    fn respond(&self, request: Request<Body>) -> Result<Response<Body>> {
        self(request)
    }
}

/// Request/response filter wrapped around a `Responder`.
pub trait Middleware {
    fn respond(&self, request: Request<Body>, next: &dyn Responder) -> Result<Response<Body>>;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct GzipMiddleware;

impl GzipMiddleware {
    pub fn new() -> Self {
        Self
    }
}

/// True when any `Content-Encoding` value contains "gzip" (ASCII
/// case-insensitive).
pub fn is_gzip_encoded(headers: &HeaderMap) -> bool {
    headers
        .get_all(CONTENT_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.to_ascii_lowercase().contains("gzip"))
}

/// Decode a buffered gzip member. Bodies without the gzip magic are rejected
/// before any codec state is built.
fn decode_buffer(data: Bytes) -> Result<Bytes> {
    if data.is_empty() {
        return Ok(data);
    }
    if !is_gzip(&data) {
        return Err(GzipError::Data("incorrect header check".into()));
    }
    if let Ok((header, header_len)) = decode_header(&data) {
        debug!(
            file_name = ?header.file_name(),
            mtime = header.mtime,
            os = header.os,
            header_len,
            "gzip response member"
        );
    }
    Ok(Bytes::from(decompress_all(&data)?))
}

/// Replace a gzip-encoded body with its decoded form.
pub fn decode_body(body: Body) -> Result<Body> {
    match body {
        Body::Empty => Ok(Body::Empty),
        Body::Buffer(data) => Ok(Body::Buffer(decode_buffer(data)?)),
        Body::Reader(stream) => Ok(Body::Reader(Box::new(GzipStream::decompress(stream)?))),
        Body::Writer(_) => Err(GzipError::UnsupportedStreamKind),
    }
}

impl Middleware for GzipMiddleware {
    fn respond(&self, mut request: Request<Body>, next: &dyn Responder) -> Result<Response<Body>> {
        request
            .headers_mut()
            .insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        let response = next.respond(request)?;
        if !is_gzip_encoded(response.headers()) {
            return Ok(response);
        }

        let (mut parts, body) = response.into_parts();
        debug!(body = ?body, "decoding gzip response body");
        let body = decode_body(body)?;
        parts.headers.remove(CONTENT_ENCODING);
        parts.headers.remove(CONTENT_LENGTH);
        Ok(Response::from_parts(parts, body))
    }
}
