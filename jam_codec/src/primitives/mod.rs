//! Definition of the primitive kinds

mod bits;
mod blob;
mod dict;
mod int;
mod option;
mod scalar;
mod seq;
mod text;

pub use crate::primitives::bits::*;
pub use crate::primitives::blob::*;
pub use crate::primitives::dict::*;
pub use crate::primitives::int::*;
pub use crate::primitives::seq::*;

/// Represents a true or false value
///
/// category = fixed, width = 1
/// label = "boolean with the octet 0x00 being false and octet 0x01 being true"
pub type Bool = bool;

/// Integer in the range 0 to 2^8-1 inclusive
///
/// category = fixed, width = 1
/// label = "8-bit unsigned integer, little-endian"
pub type U8 = u8;

/// Integer in the range 0 to 2^16-1 inclusive
///
/// category = fixed, width = 2
/// label = "16-bit unsigned integer, little-endian"
pub type U16 = u16;

/// Integer in the range 0 to 2^32-1 inclusive
///
/// category = fixed, width = 4
/// label = "32-bit unsigned integer, little-endian"
pub type U32 = u32;

/// Integer in the range 0 to 2^64-1 inclusive
///
/// category = fixed, width = 8
/// label = "64-bit unsigned integer, little-endian"
pub type U64 = u64;

/// Integer in the range -(2^7) to 2^7-1 inclusive
///
/// category = fixed, width = 1
/// label = "8-bit two's-complement integer"
pub type I8 = i8;

/// Integer in the range -(2^15) to 2^15-1 inclusive
///
/// category = fixed, width = 2
/// label = "16-bit two's-complement integer, little-endian"
pub type I16 = i16;

/// Integer in the range -(2^31) to 2^31-1 inclusive
///
/// category = fixed, width = 4
/// label = "32-bit two's-complement integer, little-endian"
pub type I32 = i32;

/// Integer in the range -(2^63) to 2^63-1 inclusive
///
/// category = fixed, width = 8
/// label = "64-bit two's-complement integer, little-endian"
pub type I64 = i64;

/// UTF-8 text with a varint byte-length prefix
///
/// category = variable
/// label = "UTF-8 string; the length unit is bytes, not code points"
pub type Text = String;
