//! headers/decode.rs
//!
//! Header and trailer decoding.
//!
//! Design notes:
//! - Reads the fixed 10 bytes, then the optional fields in FLG order:
//!   FEXTRA, FNAME, FCOMMENT, FHCRC.
//! - Returns the header together with its encoded length so the caller can
//!   find the start of the deflate body.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::constants::gzip::{HEADER_LEN, MAGIC, METHOD_DEFLATE, TRAILER_LEN};
use crate::headers::types::{GzipFlags, GzipHeader, GzipTrailer, HeaderError, RESERVED_FLAG_BITS};
use crate::utils::compute_crc32;

/// True when `buf` starts with the gzip magic and the deflate method byte.
pub fn is_gzip(buf: &[u8]) -> bool {
    buf.len() >= 3 && buf[..2] == MAGIC && buf[2] == METHOD_DEFLATE
}

fn io_err(e: std::io::Error) -> HeaderError {
    HeaderError::Validation(e.to_string())
}

fn need(buf: &[u8], end: usize) -> Result<(), HeaderError> {
    if buf.len() < end {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: end });
    }
    Ok(())
}

fn read_zero_terminated(
    buf: &[u8],
    pos: &mut usize,
    field: &'static str,
) -> Result<Vec<u8>, HeaderError> {
    let rest = &buf[*pos..];
    let len = rest
        .iter()
        .position(|&b| b == 0)
        .ok_or(HeaderError::UnterminatedField { field })?;
    let value = rest[..len].to_vec();
    *pos += len + 1;
    Ok(value)
}

/// Decode a member header from the start of `buf`.
///
/// # Returns
/// - `Ok((header, len))` where `len` is the number of header bytes.
/// - `Err(HeaderError)` on bad magic, method, reserved bits, truncation or a
///   wrong FHCRC.
pub fn decode_header(buf: &[u8]) -> Result<(GzipHeader, usize), HeaderError> {
    need(buf, HEADER_LEN)?;
    if buf[..2] != MAGIC {
        return Err(HeaderError::InvalidMagic { have: [buf[0], buf[1]] });
    }
    if buf[2] != METHOD_DEFLATE {
        return Err(HeaderError::UnsupportedMethod { raw: buf[2] });
    }
    if buf[3] & RESERVED_FLAG_BITS != 0 {
        return Err(HeaderError::ReservedFlags { raw: buf[3] });
    }

    let flags = GzipFlags::from_bits_truncate(buf[3]);
    let mut rdr = Cursor::new(&buf[4..HEADER_LEN]);
    let mtime = rdr.read_u32::<LittleEndian>().map_err(io_err)?;
    let xfl = rdr.read_u8().map_err(io_err)?;
    let os = rdr.read_u8().map_err(io_err)?;

    let mut header = GzipHeader {
        method: buf[2],
        flags,
        mtime,
        xfl,
        os,
        ..GzipHeader::default()
    };
    let mut pos = HEADER_LEN;

    if flags.contains(GzipFlags::FEXTRA) {
        need(buf, pos + 2)?;
        let xlen = u16::from_le_bytes([buf[pos], buf[pos + 1]]) as usize;
        pos += 2;
        need(buf, pos + xlen)?;
        header.extra = Some(buf[pos..pos + xlen].to_vec());
        pos += xlen;
    }
    if flags.contains(GzipFlags::FNAME) {
        header.name = Some(read_zero_terminated(buf, &mut pos, "name")?);
    }
    if flags.contains(GzipFlags::FCOMMENT) {
        header.comment = Some(read_zero_terminated(buf, &mut pos, "comment")?);
    }
    if flags.contains(GzipFlags::FHCRC) {
        need(buf, pos + 2)?;
        let stored = u16::from_le_bytes([buf[pos], buf[pos + 1]]);
        let computed = (compute_crc32(&buf[..pos]) & 0xffff) as u16;
        if stored != computed {
            return Err(HeaderError::HeaderCrcMismatch { have: computed, need: stored });
        }
        header.header_crc = Some(stored);
        pos += 2;
    }

    Ok((header, pos))
}

/// Decode the trailer of a complete single-member gzip buffer.
pub fn decode_trailer(member: &[u8]) -> Result<GzipTrailer, HeaderError> {
    need(member, HEADER_LEN + TRAILER_LEN)?;
    let mut rdr = Cursor::new(&member[member.len() - TRAILER_LEN..]);
    let crc32 = rdr.read_u32::<LittleEndian>().map_err(io_err)?;
    let isize = rdr.read_u32::<LittleEndian>().map_err(io_err)?;
    Ok(GzipTrailer { crc32, isize })
}
