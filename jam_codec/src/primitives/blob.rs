//! Octet strings
//!
//! Three flavors share the hex JSON projection: [`FixedBytes`] is an
//! exact-width string with no length prefix, [`Bytes`] is an immutable
//! variable-length string and [`ByteArray`] its mutable counterpart,
//! both carrying a varint length prefix on the wire.

use std::ops::{Deref, DerefMut};

use serde_json::Value;

use crate::codable::{check_destination, Codable};
use crate::constants::MAX_BYTEARRAY_SIZE;
use crate::error::Error;
use crate::json::{hex_from_json, to_hex, JsonCodable};
use crate::read::SliceReader;
use crate::varint;

/// Octet string of exactly `N` octets, encoded with no length prefix.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FixedBytes<const N: usize>([u8; N]);

impl<const N: usize> FixedBytes<N> {
    /// Creates a fixed octet string from an array.
    pub fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Consumes the wrapper into the inner array.
    pub fn into_inner(self) -> [u8; N] {
        self.0
    }

    /// Borrow the octets as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> TryFrom<&[u8]> for FixedBytes<N> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        <[u8; N]>::try_from(bytes).map(Self).map_err(|_| {
            Error::Range(format!(
                "fixed byte string length mismatch: expected {}, got {}",
                N,
                bytes.len()
            ))
        })
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Deref for FixedBytes<N> {
    type Target = [u8; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> Codable for FixedBytes<N> {
    fn encode_size(&self) -> usize {
        N
    }

    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
        check_destination(buf, offset, N)?;
        buf[offset..offset + N].copy_from_slice(&self.0);
        Ok(N)
    }

    fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
        let mut reader = SliceReader::new(buf, offset);
        let bytes = reader.read_const_bytes::<N>()?;
        Ok((Self(bytes), N))
    }
}

impl<const N: usize> JsonCodable for FixedBytes<N> {
    fn to_json(&self) -> Value {
        Value::String(to_hex(&self.0))
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        Self::try_from(hex_from_json(value)?.as_slice())
    }
}

/// 16-octet fixed byte string.
pub type Bytes16 = FixedBytes<16>;
/// 32-octet fixed byte string.
pub type Bytes32 = FixedBytes<32>;
/// 64-octet fixed byte string.
pub type Bytes64 = FixedBytes<64>;
/// 128-octet fixed byte string.
pub type Bytes128 = FixedBytes<128>;
/// 256-octet fixed byte string.
pub type Bytes256 = FixedBytes<256>;
/// 512-octet fixed byte string.
pub type Bytes512 = FixedBytes<512>;
/// 1024-octet fixed byte string.
pub type Bytes1024 = FixedBytes<1024>;

/// Read a varint length prefix and the octets it claims, enforcing the
/// byte-string ceiling before anything is sized from the length.
fn decode_prefixed<'a>(
    reader: &mut SliceReader<'a>,
    kind: &'static str,
) -> Result<&'a [u8], Error> {
    let len = varint::read(reader)?;
    if len > MAX_BYTEARRAY_SIZE {
        return Err(Error::LimitExceeded {
            kind,
            len,
            limit: MAX_BYTEARRAY_SIZE,
        });
    }
    reader.read_bytes(len as usize)
}

/// Immutable variable-length octet string.
///
/// Wire form: varint length, then the octets. Cloning is cheap; the
/// underlying storage is shared.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bytes(bytes::Bytes);

impl Bytes {
    /// Creates an octet string from anything the underlying buffer accepts.
    pub fn new(bytes: impl Into<bytes::Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Creates an octet string by copying a slice.
    pub fn copy_from_slice(bytes: &[u8]) -> Self {
        Self(bytes::Bytes::copy_from_slice(bytes))
    }

    /// Consumes the wrapper into the inner buffer.
    pub fn into_inner(self) -> bytes::Bytes {
        self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes::Bytes::from(bytes))
    }
}

impl From<&'static [u8]> for Bytes {
    fn from(bytes: &'static [u8]) -> Self {
        Self(bytes::Bytes::from_static(bytes))
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Codable for Bytes {
    fn encode_size(&self) -> usize {
        varint::size(self.0.len() as u64) + self.0.len()
    }

    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
        check_destination(buf, offset, self.encode_size())?;
        let mut cur = offset;
        cur += varint::encode_into(self.0.len() as u64, buf, cur)?;
        buf[cur..cur + self.0.len()].copy_from_slice(&self.0);
        Ok(cur + self.0.len() - offset)
    }

    fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
        let mut reader = SliceReader::new(buf, offset);
        let payload = decode_prefixed(&mut reader, "Bytes")?;
        Ok((Self::copy_from_slice(payload), reader.consumed(offset)))
    }
}

impl JsonCodable for Bytes {
    fn to_json(&self) -> Value {
        Value::String(to_hex(&self.0))
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        Ok(Self::from(hex_from_json(value)?))
    }
}

/// Mutable variable-length octet string.
///
/// Same wire form as [`Bytes`]; backed by a `Vec<u8>` that deref-mutably
/// exposes the usual vector mutators.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ByteArray(Vec<u8>);

impl ByteArray {
    /// Creates an empty octet string.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Consumes the wrapper into the inner vector.
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for ByteArray {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteArray {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<ByteArray> for Vec<u8> {
    fn from(value: ByteArray) -> Self {
        value.0
    }
}

impl FromIterator<u8> for ByteArray {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self(Vec::from_iter(iter))
    }
}

impl AsRef<[u8]> for ByteArray {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for ByteArray {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ByteArray {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Codable for ByteArray {
    fn encode_size(&self) -> usize {
        varint::size(self.0.len() as u64) + self.0.len()
    }

    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
        check_destination(buf, offset, self.encode_size())?;
        let mut cur = offset;
        cur += varint::encode_into(self.0.len() as u64, buf, cur)?;
        buf[cur..cur + self.0.len()].copy_from_slice(&self.0);
        Ok(cur + self.0.len() - offset)
    }

    fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
        let mut reader = SliceReader::new(buf, offset);
        let payload = decode_prefixed(&mut reader, "ByteArray")?;
        Ok((Self(payload.to_vec()), reader.consumed(offset)))
    }
}

impl JsonCodable for ByteArray {
    fn to_json(&self) -> Value {
        Value::String(to_hex(&self.0))
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        Ok(Self(hex_from_json(value)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_bytes_wire_form() {
        let fixed = FixedBytes::<4>::new([1, 2, 3, 4]);
        assert_eq!(fixed.encode().unwrap(), vec![1, 2, 3, 4]);
        let (decoded, read) = FixedBytes::<4>::decode_from(&[1, 2, 3, 4, 9], 0).unwrap();
        assert_eq!(decoded, fixed);
        assert_eq!(read, 4);
    }

    #[test]
    fn test_fixed_bytes_short_buffer() {
        assert!(matches!(
            FixedBytes::<4>::decode(&[1, 2]),
            Err(Error::ShortBuffer { .. })
        ));
    }

    #[test]
    fn test_empty_byte_array() {
        let empty = ByteArray::new();
        assert_eq!(empty.encode().unwrap(), vec![0x00]);
        let (decoded, read) = ByteArray::decode_from(&[0x00], 0).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(read, 1);
    }

    #[test]
    fn test_single_byte_array() {
        let one = ByteArray::from(b"x".as_slice());
        assert_eq!(one.encode().unwrap(), vec![0x01, 0x78]);
    }

    #[test]
    fn test_decode_from_empty_buffer_is_short() {
        assert!(matches!(
            ByteArray::decode(&[]),
            Err(Error::ShortBuffer { .. })
        ));
    }

    #[test]
    fn test_truncated_payload_detected() {
        // Claims 100 octets, supplies 10
        let mut buf = vec![100u8];
        buf.extend_from_slice(b"short data");
        assert!(matches!(
            ByteArray::decode(&buf),
            Err(Error::ShortBuffer { .. })
        ));
        assert!(matches!(
            Bytes::decode(&buf),
            Err(Error::ShortBuffer { .. })
        ));
    }

    #[test]
    fn test_length_limit_enforced() {
        let mut buf = vec![0u8; varint::size(MAX_BYTEARRAY_SIZE + 1)];
        varint::encode_into(MAX_BYTEARRAY_SIZE + 1, &mut buf, 0).unwrap();

        assert!(matches!(
            ByteArray::decode(&buf),
            Err(Error::LimitExceeded { kind: "ByteArray", .. })
        ));
        assert!(matches!(
            Bytes::decode(&buf),
            Err(Error::LimitExceeded { kind: "Bytes", .. })
        ));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let original = Bytes::from(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        let buf = original.encode().unwrap();
        assert_eq!(buf, vec![0x04, 0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(Bytes::decode(&buf).unwrap(), original);
    }

    #[test]
    fn test_mutation_through_deref() {
        let mut bytes = ByteArray::from(vec![1, 2]);
        bytes.push(3);
        bytes.extend_from_slice(&[4, 5]);
        assert_eq!(bytes.encode().unwrap(), vec![5, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_json_hex_projection() {
        let fixed = FixedBytes::<2>::new([0xAB, 0xCD]);
        assert_eq!(fixed.to_json(), Value::String("abcd".into()));
        assert_eq!(
            FixedBytes::<2>::from_json(&Value::String("0xABCD".into())).unwrap(),
            fixed
        );
        assert!(matches!(
            FixedBytes::<2>::from_json(&Value::String("abcdef".into())),
            Err(Error::Range(_))
        ));

        let bytes = ByteArray::from(vec![0x00, 0xFF]);
        assert_eq!(bytes.to_json(), Value::String("00ff".into()));
        assert_eq!(
            ByteArray::from_json(&Value::String("00ff".into())).unwrap(),
            bytes
        );
    }
}
