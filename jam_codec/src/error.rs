//! Custom error

/// Errors raised while encoding, decoding or re-projecting typed values.
///
/// Decode-side variants carry the buffer offset at which the failure was
/// detected whenever an offset is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Custom error with message
    #[error("{0}")]
    Message(String),

    /// Not enough bytes remain in the source buffer
    #[error("short buffer: need {needed} byte(s) at offset {offset}, {remaining} remaining")]
    ShortBuffer {
        /// Offset at which the read was attempted
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
        /// Number of bytes that were actually available
        remaining: usize,
    },

    /// Not enough capacity remains in the destination buffer
    #[error("short destination: need {needed} byte(s) at offset {offset}, {remaining} remaining")]
    ShortDestination {
        /// Offset at which the write was attempted
        offset: usize,
        /// Number of bytes the write required
        needed: usize,
        /// Number of bytes of capacity that were actually available
        remaining: usize,
    },

    /// Value outside the legal range of its kind
    #[error("value out of range: {0}")]
    Range(String),

    /// Found invalid UTF-8 encoding
    #[error("Invalid UTF-8 encoding")]
    InvalidUtf8Encoding,

    /// A JSON value of the wrong shape was supplied to `from_json`
    #[error("type mismatch: expected {expected}")]
    TypeMismatch {
        /// Description of the expected JSON shape
        expected: &'static str,
    },

    /// Declared length exceeds the security ceiling of the kind
    #[error("{kind} length {len} exceeds maximum {limit}")]
    LimitExceeded {
        /// The kind whose ceiling was exceeded
        kind: &'static str,
        /// The declared length
        len: u64,
        /// The ceiling that was exceeded
        limit: u64,
    },

    /// Mapping keys were not in strictly ascending encoded order
    #[error("mapping keys not in strictly ascending order at offset {offset}")]
    InvalidKeyOrder {
        /// Offset of the offending key encoding
        offset: usize,
    },

    /// Discriminant or enumeration integer does not name a branch/variant
    #[error("invalid variant: {0}")]
    InvalidVariant(String),

    /// Record JSON lacks a required field with no default
    #[error("missing field `{0}`")]
    MissingField(&'static str),
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(_: std::string::FromUtf8Error) -> Self {
        Error::InvalidUtf8Encoding
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(_: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8Encoding
    }
}
