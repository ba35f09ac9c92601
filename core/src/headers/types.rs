//! headers/types.rs
//! Gzip member header, flag bits, trailer and header errors.

use std::fmt;

use bitflags::bitflags;
use num_enum::TryFromPrimitive;

use crate::constants::gzip::{METHOD_DEFLATE, OS_UNKNOWN};
use crate::utils::{compute_crc32, enum_name_or_code, isize_of};

bitflags! {
    /// FLG byte of the member header.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub struct GzipFlags: u8 {
        const FTEXT    = 0b0000_0001;
        const FHCRC    = 0b0000_0010;
        const FEXTRA   = 0b0000_0100;
        const FNAME    = 0b0000_1000;
        const FCOMMENT = 0b0001_0000;
    }
}

/// Bits 5..7 of FLG must be zero.
pub const RESERVED_FLAG_BITS: u8 = 0b1110_0000;

/// OS byte values named by RFC 1952.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum OperatingSystem {
    Fat       = 0,
    Amiga     = 1,
    Vms       = 2,
    Unix      = 3,
    VmCms     = 4,
    AtariTos  = 5,
    Hpfs      = 6,
    Macintosh = 7,
    ZSystem   = 8,
    CpM       = 9,
    Tops20    = 10,
    Ntfs      = 11,
    Qdos      = 12,
    Acorn     = 13,
    Unknown   = 255,
}

/// Decoded member header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GzipHeader {
    pub method: u8,
    pub flags: GzipFlags,
    /// Modification time, seconds since the epoch; 0 when absent.
    pub mtime: u32,
    pub xfl: u8,
    pub os: u8,
    pub extra: Option<Vec<u8>>,
    /// Original file name (Latin-1 bytes, no terminator).
    pub name: Option<Vec<u8>>,
    pub comment: Option<Vec<u8>>,
    /// Low 16 bits of the header CRC32 when FHCRC is set.
    pub header_crc: Option<u16>,
}

impl Default for GzipHeader {
    fn default() -> Self {
        Self {
            method: METHOD_DEFLATE,
            flags: GzipFlags::empty(),
            mtime: 0,
            xfl: 0,
            os: OS_UNKNOWN,
            extra: None,
            name: None,
            comment: None,
            header_crc: None,
        }
    }
}

impl GzipHeader {
    /// File name as text, lossy for non-UTF-8 bytes.
    pub fn file_name(&self) -> Option<String> {
        self.name.as_deref().map(|n| String::from_utf8_lossy(n).into_owned())
    }

    pub fn comment_text(&self) -> Option<String> {
        self.comment.as_deref().map(|c| String::from_utf8_lossy(c).into_owned())
    }

    pub fn operating_system(&self) -> Option<OperatingSystem> {
        OperatingSystem::try_from_primitive(self.os).ok()
    }

    /// Flag bits implied by the optional fields that are present.
    pub fn implied_flags(&self) -> GzipFlags {
        let mut flags = self.flags & GzipFlags::FTEXT;
        flags.set(GzipFlags::FEXTRA, self.extra.is_some());
        flags.set(GzipFlags::FNAME, self.name.is_some());
        flags.set(GzipFlags::FCOMMENT, self.comment.is_some());
        flags.set(GzipFlags::FHCRC, self.header_crc.is_some());
        flags
    }
}

/// CRC32 and ISIZE closing a member.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GzipTrailer {
    pub crc32: u32,
    /// Uncompressed length modulo 2^32.
    pub isize: u32,
}

impl GzipTrailer {
    pub fn for_plaintext(plaintext: &[u8]) -> Self {
        Self {
            crc32: compute_crc32(plaintext),
            isize: isize_of(plaintext.len() as u64),
        }
    }

    /// Check `plaintext` against the recorded checksum and size.
    pub fn verify(&self, plaintext: &[u8]) -> Result<(), HeaderError> {
        let actual = Self::for_plaintext(plaintext);
        if actual.isize != self.isize {
            return Err(HeaderError::SizeMismatch { have: actual.isize, need: self.isize });
        }
        if actual.crc32 != self.crc32 {
            return Err(HeaderError::Crc32Mismatch { have: actual.crc32, need: self.crc32 });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// Buffer ended before the named field was complete.
    BufferTooShort { have: usize, need: usize },

    /// First two bytes are not `1F 8B`.
    InvalidMagic { have: [u8; 2] },

    /// Compression method other than deflate.
    UnsupportedMethod { raw: u8 },

    /// Reserved FLG bits set.
    ReservedFlags { raw: u8 },

    /// A zero-terminated field ran off the end of the buffer.
    UnterminatedField { field: &'static str },

    /// FHCRC present but does not match the header bytes.
    HeaderCrcMismatch { have: u16, need: u16 },

    /// Trailer CRC32 does not match the plaintext.
    Crc32Mismatch { have: u32, need: u32 },

    /// Trailer ISIZE does not match the plaintext length.
    SizeMismatch { have: u32, need: u32 },

    /// A field cannot be encoded (e.g. a name containing NUL).
    Validation(String),
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use HeaderError::*;
        match self {
            BufferTooShort { have, need } =>
                write!(f, "gzip buffer too short: {} < {}", have, need),
            InvalidMagic { have } =>
                write!(f, "invalid gzip magic: 0x{:02x}{:02x}", have[0], have[1]),
            UnsupportedMethod { raw } =>
                write!(f, "unsupported compression method: {}", raw),
            ReservedFlags { raw } =>
                write!(f, "reserved flag bits set: 0x{:02x}", raw),
            UnterminatedField { field } =>
                write!(f, "unterminated {} field", field),
            HeaderCrcMismatch { have, need } =>
                write!(f, "header crc mismatch: 0x{:04x} != 0x{:04x}", have, need),
            Crc32Mismatch { have, need } =>
                write!(f, "crc32 mismatch: 0x{:08x} != 0x{:08x}", have, need),
            SizeMismatch { have, need } =>
                write!(f, "size mismatch: {} != {}", have, need),
            Validation(msg) =>
                write!(f, "gzip header validation error: {}", msg),
        }
    }
}

impl std::error::Error for HeaderError {}

/// OS byte as a name, or its number when outside the table.
pub fn os_name(raw: u8) -> String {
    enum_name_or_code::<OperatingSystem>(raw)
}
