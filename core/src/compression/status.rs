//! compression/status.rs
//! Codec status codes and the error classifier.
//!
//! Codes follow the zlib manual numbering so diagnostics line up with the
//! native library's documentation.

use num_enum::TryFromPrimitive;

use crate::types::GzipError;
use crate::utils::enum_name_or_code;

/// Fallback text when the codec supplies no message.
pub const UNKNOWN_MESSAGE: &str = "unknown gzip error";

/// Status returned by one codec invocation.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum StatusCode {
    Ok           = 0,
    StreamEnd    = 1,
    NeedDict     = 2,
    Errno        = -1,
    StreamError  = -2,
    DataError    = -3,
    MemError     = -4,
    BufError     = -5,
    VersionError = -6,
}

impl StatusCode {
    /// Negative codes are failures (or, for `BufError`, "no progress").
    pub fn is_negative(code: i32) -> bool {
        code < 0
    }

    /// Human readable name for logs; unknown codes print as numbers.
    pub fn name(code: i32) -> String {
        enum_name_or_code::<StatusCode>(code)
    }
}

/// Map a raw status code and optional native message onto `GzipError`.
///
/// `Errno`, `NeedDict` and every code outside the table become
/// `GzipError::Unknown` carrying the original number.
pub fn classify(code: i32, message: Option<&str>) -> GzipError {
    let message = message.unwrap_or(UNKNOWN_MESSAGE).to_string();
    match StatusCode::try_from_primitive(code) {
        Ok(StatusCode::StreamError)  => GzipError::Stream(message),
        Ok(StatusCode::DataError)    => GzipError::Data(message),
        Ok(StatusCode::MemError)     => GzipError::Memory(message),
        Ok(StatusCode::BufError)     => GzipError::Buffer(message),
        Ok(StatusCode::VersionError) => GzipError::Version(message),
        _ => GzipError::Unknown { code, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_codes() {
        assert!(matches!(classify(-2, Some("x")), GzipError::Stream(m) if m == "x"));
        assert!(matches!(classify(-3, Some("incorrect header check")), GzipError::Data(_)));
        assert!(matches!(classify(-4, None), GzipError::Memory(_)));
        assert!(matches!(classify(-5, None), GzipError::Buffer(_)));
        assert!(matches!(classify(-6, None), GzipError::Version(_)));
    }

    #[test]
    fn unknown_codes_keep_their_number() {
        match classify(-42, None) {
            GzipError::Unknown { code, message } => {
                assert_eq!(code, -42);
                assert_eq!(message, UNKNOWN_MESSAGE);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(classify(-1, None), GzipError::Unknown { code: -1, .. }));
        assert!(matches!(classify(2, None), GzipError::Unknown { code: 2, .. }));
    }

    #[test]
    fn names() {
        assert_eq!(StatusCode::name(1), "StreamEnd");
        assert_eq!(StatusCode::name(-99), "-99");
    }
}
