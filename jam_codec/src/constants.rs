//! Security ceilings checked by every variable-length decoder.
//!
//! A malicious length prefix must be rejected before any allocation is
//! sized from it, so each variable-length kind compares its declared
//! length against the ceiling for that kind first and only then checks
//! that the payload actually fits in the remaining buffer.
//!
//! Nesting depth needs no ceiling of its own: decode recursion follows
//! the static shape of the decoded type, never the wire data, and no
//! kind introduces owned indirection, so input cannot drive recursion
//! deeper than the type the caller wrote out.

/// Maximum element count accepted when decoding a sequence.
pub const MAX_SEQUENCE_LENGTH: u64 = 10_000_000;

/// Maximum entry count accepted when decoding a dictionary.
pub const MAX_DICTIONARY_SIZE: u64 = 1_000_000;

/// Maximum byte length accepted when decoding a variable-length octet
/// string (`Bytes` and `ByteArray`).
pub const MAX_BYTEARRAY_SIZE: u64 = 100_000_000;

/// Maximum UTF-8 byte length accepted when decoding a string.
pub const MAX_STRING_BYTES: u64 = 10_000_000;

/// Maximum bit count accepted when decoding a variable-length bit vector.
pub const MAX_BITS_LENGTH: u64 = 80_000_000;

/// Bit counts above this would overflow the `(bits + 7) / 8` byte-count
/// computation; the bits decoder rejects them independently of
/// [`MAX_BITS_LENGTH`].
pub(crate) const MAX_BITS_OVERFLOW_GUARD: u64 = (1 << 63) - 8;
