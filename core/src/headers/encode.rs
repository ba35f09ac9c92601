//! headers/encode.rs
//!
//! Header encoding.
//!
//! Design notes:
//! - FLG is derived from the optional fields present, so a header can never
//!   announce a field it does not carry.
//! - FHCRC, when requested, is computed over the bytes written before it.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::constants::gzip::{HEADER_LEN, MAGIC};
use crate::headers::types::{GzipFlags, GzipHeader, GzipTrailer, HeaderError};
use crate::utils::compute_crc32;

fn put_zero_terminated(out: &mut Vec<u8>, value: &[u8], field: &str) -> Result<(), HeaderError> {
    if value.contains(&0) {
        return Err(HeaderError::Validation(format!("{} contains a NUL byte", field)));
    }
    out.extend_from_slice(value);
    out.push(0);
    Ok(())
}

/// Serialize a member header.
///
/// `header.header_crc` only acts as a request for FHCRC; the stored value is
/// recomputed.
pub fn encode_header(h: &GzipHeader) -> Result<Vec<u8>, HeaderError> {
    let flags = h.implied_flags();
    let mut out = Vec::with_capacity(HEADER_LEN);

    out.extend_from_slice(&MAGIC);
    out.push(h.method);
    out.push(flags.bits());
    out.write_u32::<LittleEndian>(h.mtime)
        .map_err(|e| HeaderError::Validation(e.to_string()))?;
    out.push(h.xfl);
    out.push(h.os);

    if let Some(extra) = &h.extra {
        let xlen = u16::try_from(extra.len())
            .map_err(|_| HeaderError::Validation(format!("extra field too long: {}", extra.len())))?;
        out.write_u16::<LittleEndian>(xlen)
            .map_err(|e| HeaderError::Validation(e.to_string()))?;
        out.extend_from_slice(extra);
    }
    if let Some(name) = &h.name {
        put_zero_terminated(&mut out, name, "name")?;
    }
    if let Some(comment) = &h.comment {
        put_zero_terminated(&mut out, comment, "comment")?;
    }
    if flags.contains(GzipFlags::FHCRC) {
        let crc = (compute_crc32(&out) & 0xffff) as u16;
        out.write_u16::<LittleEndian>(crc)
            .map_err(|e| HeaderError::Validation(e.to_string()))?;
    }

    Ok(out)
}

/// Serialize a trailer: CRC32 then ISIZE, both little-endian.
pub fn encode_trailer(t: &GzipTrailer) -> [u8; 8] {
    let mut out = [0u8; 8];
    out[..4].copy_from_slice(&t.crc32.to_le_bytes());
    out[4..].copy_from_slice(&t.isize.to_le_bytes());
    out
}
