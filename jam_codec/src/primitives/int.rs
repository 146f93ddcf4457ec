//! Fixed-width and variable-length integers
//!
//! Fixed-width integers occupy exactly `N / 8` octets, little-endian,
//! two's complement for the signed widths. The variable-length [`Uint`]
//! wraps a `u64` and takes 1 to 9 octets on the wire (see
//! [`varint`](crate::varint)).

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Sub};

use serde_json::Value;

use crate::codable::{check_destination, Codable};
use crate::error::Error;
use crate::json::JsonCodable;
use crate::primitives::{BitOrder, Bits};
use crate::read::SliceReader;
use crate::varint;

macro_rules! impl_unsigned_fixed {
    ($($ty:ty),*) => {$(
        impl Codable for $ty {
            fn encode_size(&self) -> usize {
                std::mem::size_of::<$ty>()
            }

            fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                check_destination(buf, offset, WIDTH)?;
                buf[offset..offset + WIDTH].copy_from_slice(&self.to_le_bytes());
                Ok(WIDTH)
            }

            fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                let mut reader = SliceReader::new(buf, offset);
                let bytes = reader.read_const_bytes::<WIDTH>()?;
                Ok((<$ty>::from_le_bytes(bytes), WIDTH))
            }
        }

        impl JsonCodable for $ty {
            fn to_json(&self) -> Value {
                Value::from(*self)
            }

            fn from_json(value: &Value) -> Result<Self, Error> {
                let n = value.as_u64().ok_or(Error::TypeMismatch {
                    expected: "unsigned integer",
                })?;
                <$ty>::try_from(n).map_err(|_| {
                    Error::Range(format!(
                        "{} does not fit in {}",
                        n,
                        stringify!($ty)
                    ))
                })
            }
        }
    )*};
}

macro_rules! impl_signed_fixed {
    ($($ty:ty),*) => {$(
        impl Codable for $ty {
            fn encode_size(&self) -> usize {
                std::mem::size_of::<$ty>()
            }

            fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                check_destination(buf, offset, WIDTH)?;
                buf[offset..offset + WIDTH].copy_from_slice(&self.to_le_bytes());
                Ok(WIDTH)
            }

            fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                let mut reader = SliceReader::new(buf, offset);
                let bytes = reader.read_const_bytes::<WIDTH>()?;
                Ok((<$ty>::from_le_bytes(bytes), WIDTH))
            }
        }

        impl JsonCodable for $ty {
            fn to_json(&self) -> Value {
                Value::from(*self)
            }

            fn from_json(value: &Value) -> Result<Self, Error> {
                let n = value.as_i64().ok_or(Error::TypeMismatch {
                    expected: "integer",
                })?;
                <$ty>::try_from(n).map_err(|_| {
                    Error::Range(format!(
                        "{} does not fit in {}",
                        n,
                        stringify!($ty)
                    ))
                })
            }
        }
    )*};
}

impl_unsigned_fixed!(u8, u16, u32, u64);
impl_signed_fixed!(i8, i16, i32, i64);

/// Variable-length unsigned integer over the half-open range `[0, 2^64)`.
///
/// The wire form is the 1 to 9 octet varint; the JSON form is a native
/// integer.
///
/// ```rust
/// use jam_codec::{Codable, Uint};
///
/// assert_eq!(Uint(127).encode().unwrap(), vec![0x7F]);
/// assert_eq!(Uint(128).encode().unwrap(), vec![0x80, 0x80]);
/// ```
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Uint(pub u64);

impl Uint {
    /// Creates a new variable-length integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Consumes the wrapper into the inner integer.
    pub fn into_inner(self) -> u64 {
        self.0
    }

    /// Checked addition; `None` when the sum leaves `[0, 2^64)`.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction; `None` when the difference is negative.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Checked multiplication; `None` when the product leaves `[0, 2^64)`.
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        self.0.checked_mul(rhs.0).map(Self)
    }

    /// Expands the value into a 64-bit vector, the significance of each
    /// position given by the order `O`.
    pub fn to_bits<O: BitOrder>(self) -> Bits<O> {
        (0..64)
            .map(|i| (self.0 >> O::significance(i, 64)) & 1 == 1)
            .collect()
    }

    /// Reassembles a value from at most 64 bits.
    pub fn from_bits<O: BitOrder>(bits: &Bits<O>) -> Result<Self, Error> {
        bits.to_int().map(Self)
    }
}

impl fmt::Display for Uint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for Uint {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u32> for Uint {
    fn from(value: u32) -> Self {
        Self(u64::from(value))
    }
}

impl From<u16> for Uint {
    fn from(value: u16) -> Self {
        Self(u64::from(value))
    }
}

impl From<u8> for Uint {
    fn from(value: u8) -> Self {
        Self(u64::from(value))
    }
}

impl From<Uint> for u64 {
    fn from(value: Uint) -> Self {
        value.0
    }
}

macro_rules! impl_uint_op {
    ($($trait:ident :: $method:ident),*) => {$(
        impl $trait for Uint {
            type Output = Uint;

            fn $method(self, rhs: Uint) -> Uint {
                Uint($trait::$method(self.0, rhs.0))
            }
        }
    )*};
}

impl_uint_op!(
    Add::add,
    Sub::sub,
    Mul::mul,
    Div::div,
    BitAnd::bitand,
    BitOr::bitor,
    BitXor::bitxor
);

impl Codable for Uint {
    fn encode_size(&self) -> usize {
        varint::size(self.0)
    }

    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
        varint::encode_into(self.0, buf, offset)
    }

    fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
        let (value, read) = varint::decode_from(buf, offset)?;
        Ok((Self(value), read))
    }
}

impl JsonCodable for Uint {
    fn to_json(&self) -> Value {
        Value::from(self.0)
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        value.as_u64().map(Self).ok_or(Error::TypeMismatch {
            expected: "unsigned integer",
        })
    }
}
