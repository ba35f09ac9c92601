use std::fmt;
use num_enum::TryFromPrimitive;

/// CRC32 (IEEE) as stored in the gzip trailer.
pub fn compute_crc32(data: &[u8]) -> u32 {
    use crc32fast::Hasher;
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Uncompressed size modulo 2^32, as stored in the gzip trailer.
pub fn isize_of(len: u64) -> u32 {
    (len & 0xffff_ffff) as u32
}

pub fn enum_name_or_code<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::Display,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("{}", raw),
    }
}
