//! Homogeneous sequences
//!
//! Three size disciplines over an element type `T`:
//!
//! - `[T; N]` — exactly `N` elements, no framing;
//! - `Vec<T>` — varint element count, then the elements;
//! - [`BoundedVec`] — the `Vec` wire form with construction and mutation
//!   held to `MIN ..= MAX` elements.

use std::ops::Deref;

use serde_json::Value;

use crate::codable::{check_destination, Codable};
use crate::constants::MAX_SEQUENCE_LENGTH;
use crate::error::Error;
use crate::json::JsonCodable;
use crate::varint;

fn encode_elements<T: Codable>(
    elements: &[T],
    buf: &mut [u8],
    mut cur: usize,
) -> Result<usize, Error> {
    for element in elements {
        cur += element.encode_into(buf, cur)?;
    }
    Ok(cur)
}

impl<T: Codable, const N: usize> Codable for [T; N] {
    fn encode_size(&self) -> usize {
        self.iter().map(Codable::encode_size).sum()
    }

    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
        check_destination(buf, offset, self.encode_size())?;
        let cur = encode_elements(self, buf, offset)?;
        Ok(cur - offset)
    }

    fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
        let mut cur = offset;
        let mut elements = Vec::with_capacity(N);
        for _ in 0..N {
            let (element, read) = T::decode_from(buf, cur)?;
            elements.push(element);
            cur += read;
        }
        match <[T; N]>::try_from(elements) {
            Ok(array) => Ok((array, cur - offset)),
            Err(_) => Err(Error::Message("array length mismatch".to_owned())),
        }
    }
}

impl<T: JsonCodable, const N: usize> JsonCodable for [T; N] {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(JsonCodable::to_json).collect())
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        let items = value.as_array().ok_or(Error::TypeMismatch {
            expected: "array",
        })?;
        if items.len() != N {
            return Err(Error::Range(format!(
                "expected {} element(s), got {}",
                N,
                items.len()
            )));
        }
        let mut elements = Vec::with_capacity(N);
        for item in items {
            elements.push(T::from_json(item)?);
        }
        match <[T; N]>::try_from(elements) {
            Ok(array) => Ok(array),
            Err(_) => Err(Error::Message("array length mismatch".to_owned())),
        }
    }
}

fn decode_counted<T: Codable>(
    buf: &[u8],
    offset: usize,
) -> Result<(Vec<T>, u64, usize), Error> {
    let (count, mut cur) = varint::decode_from(buf, offset)?;
    if count > MAX_SEQUENCE_LENGTH {
        return Err(Error::LimitExceeded {
            kind: "Sequence",
            len: count,
            limit: MAX_SEQUENCE_LENGTH,
        });
    }
    cur += offset;
    // Reserve no more than the remaining buffer could possibly yield
    let capacity = (count as usize).min(buf.len().saturating_sub(cur));
    let mut elements = Vec::with_capacity(capacity);
    for _ in 0..count {
        let (element, read) = T::decode_from(buf, cur)?;
        elements.push(element);
        cur += read;
    }
    Ok((elements, count, cur - offset))
}

impl<T: Codable> Codable for Vec<T> {
    fn encode_size(&self) -> usize {
        varint::size(self.len() as u64) + self.iter().map(Codable::encode_size).sum::<usize>()
    }

    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
        check_destination(buf, offset, self.encode_size())?;
        let mut cur = offset;
        cur += varint::encode_into(self.len() as u64, buf, cur)?;
        cur = encode_elements(self, buf, cur)?;
        Ok(cur - offset)
    }

    fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
        let (elements, _, read) = decode_counted(buf, offset)?;
        Ok((elements, read))
    }
}

impl<T: JsonCodable> JsonCodable for Vec<T> {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(JsonCodable::to_json).collect())
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        let items = value.as_array().ok_or(Error::TypeMismatch {
            expected: "array",
        })?;
        items.iter().map(T::from_json).collect()
    }
}

/// Sequence whose length is held to `MIN ..= MAX` elements.
///
/// The wire form is identical to `Vec<T>`; the bounds are a construction
/// invariant, re-checked when decoding.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct BoundedVec<T, const MIN: usize, const MAX: usize>(Vec<T>);

impl<T, const MIN: usize, const MAX: usize> BoundedVec<T, MIN, MAX> {
    fn check_len(len: usize) -> Result<(), Error> {
        if len < MIN || len > MAX {
            return Err(Error::Range(format!(
                "sequence length {} not in [{}, {}]",
                len, MIN, MAX
            )));
        }
        Ok(())
    }

    /// Creates a bounded sequence, validating `MIN <= len <= MAX`.
    pub fn new(elements: Vec<T>) -> Result<Self, Error> {
        Self::check_len(elements.len())?;
        Ok(Self(elements))
    }

    /// Appends an element; fails when the sequence is already at `MAX`.
    pub fn push(&mut self, element: T) -> Result<(), Error> {
        Self::check_len(self.0.len() + 1)?;
        self.0.push(element);
        Ok(())
    }

    /// Removes the last element; fails when the sequence is already at
    /// `MIN`.
    pub fn pop(&mut self) -> Result<T, Error> {
        if self.0.len() <= MIN {
            return Err(Error::Range(format!(
                "sequence length may not drop below {}",
                MIN
            )));
        }
        // Guarded: MIN < len
        match self.0.pop() {
            Some(element) => Ok(element),
            None => Err(Error::Range("sequence is empty".to_owned())),
        }
    }

    /// Mutable access to one element; element mutation cannot violate the
    /// length bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.0.get_mut(index)
    }

    /// Consumes the wrapper into the inner vector.
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T, const MIN: usize, const MAX: usize> TryFrom<Vec<T>> for BoundedVec<T, MIN, MAX> {
    type Error = Error;

    fn try_from(elements: Vec<T>) -> Result<Self, Error> {
        Self::new(elements)
    }
}

impl<T, const MIN: usize, const MAX: usize> Deref for BoundedVec<T, MIN, MAX> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Codable, const MIN: usize, const MAX: usize> Codable for BoundedVec<T, MIN, MAX> {
    fn encode_size(&self) -> usize {
        self.0.encode_size()
    }

    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
        self.0.encode_into(buf, offset)
    }

    fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
        let (elements, count, read) = decode_counted(buf, offset)?;
        Self::check_len(count as usize)?;
        Ok((Self(elements), read))
    }
}

impl<T: JsonCodable, const MIN: usize, const MAX: usize> JsonCodable for BoundedVec<T, MIN, MAX> {
    fn to_json(&self) -> Value {
        Value::Array(self.0.iter().map(JsonCodable::to_json).collect())
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        let items = value.as_array().ok_or(Error::TypeMismatch {
            expected: "array",
        })?;
        Self::check_len(items.len())?;
        let elements = items
            .iter()
            .map(T::from_json)
            .collect::<Result<Vec<T>, Error>>()?;
        Ok(Self(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_array_has_no_framing() {
        let array: [u16; 3] = [1, 2, 3];
        assert_eq!(array.encode().unwrap(), vec![1, 0, 2, 0, 3, 0]);
        let (decoded, read) = <[u16; 3]>::decode_from(&[1, 0, 2, 0, 3, 0], 0).unwrap();
        assert_eq!(decoded, array);
        assert_eq!(read, 6);
    }

    #[test]
    fn test_vector_prefixes_count() {
        let vec: Vec<u8> = vec![10, 20, 30];
        assert_eq!(vec.encode().unwrap(), vec![3, 10, 20, 30]);
        assert_eq!(Vec::<u8>::decode(&[3, 10, 20, 30]).unwrap(), vec);
    }

    #[test]
    fn test_empty_vector() {
        let vec: Vec<u32> = Vec::new();
        assert_eq!(vec.encode().unwrap(), vec![0x00]);
        let (decoded, read) = Vec::<u32>::decode_from(&[0x00], 0).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(read, 1);
    }

    #[test]
    fn test_vector_of_variable_elements() {
        let vec = vec![String::from("ab"), String::from("c")];
        let buf = vec.encode().unwrap();
        assert_eq!(buf, b"\x02\x02ab\x01c");
        assert_eq!(Vec::<String>::decode(&buf).unwrap(), vec);
    }

    #[test]
    fn test_vector_count_limit() {
        let mut buf = vec![0u8; varint::size(MAX_SEQUENCE_LENGTH + 1)];
        varint::encode_into(MAX_SEQUENCE_LENGTH + 1, &mut buf, 0).unwrap();
        assert!(matches!(
            Vec::<u8>::decode(&buf),
            Err(Error::LimitExceeded { kind: "Sequence", .. })
        ));
    }

    #[test]
    fn test_vector_truncated_elements() {
        // Claims 3 elements but supplies 2
        assert!(matches!(
            Vec::<u8>::decode(&[3, 1, 2]),
            Err(Error::ShortBuffer { .. })
        ));
    }

    #[test]
    fn test_bounded_construction() {
        assert!(BoundedVec::<u8, 1, 3>::new(vec![1]).is_ok());
        assert!(BoundedVec::<u8, 1, 3>::new(vec![1, 2, 3]).is_ok());
        assert!(matches!(
            BoundedVec::<u8, 1, 3>::new(vec![]),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            BoundedVec::<u8, 1, 3>::new(vec![1, 2, 3, 4]),
            Err(Error::Range(_))
        ));
    }

    #[test]
    fn test_bounded_mutators() {
        let mut bounded = BoundedVec::<u8, 1, 2>::new(vec![1]).unwrap();
        bounded.push(2).unwrap();
        assert!(matches!(bounded.push(3), Err(Error::Range(_))));
        assert_eq!(bounded.pop().unwrap(), 2);
        assert!(matches!(bounded.pop(), Err(Error::Range(_))));
    }

    #[test]
    fn test_bounded_wire_form_matches_vector() {
        let bounded = BoundedVec::<u8, 0, 8>::new(vec![7, 8]).unwrap();
        assert_eq!(bounded.encode().unwrap(), vec![7u8, 8].encode().unwrap());
    }

    #[test]
    fn test_bounded_decode_revalidates() {
        // Count 4 exceeds MAX = 3 even though the stream is well formed
        let buf = vec![4u8, 1, 2, 3, 4];
        assert!(matches!(
            BoundedVec::<u8, 0, 3>::decode(&buf),
            Err(Error::Range(_))
        ));
        assert!(BoundedVec::<u8, 0, 4>::decode(&buf).is_ok());
    }

    #[test]
    fn test_json_projection() {
        let array: [u8; 2] = [1, 2];
        assert_eq!(
            array.to_json(),
            Value::Array(vec![Value::from(1u64), Value::from(2u64)])
        );
        assert_eq!(<[u8; 2]>::from_json(&array.to_json()).unwrap(), array);
        assert!(matches!(
            <[u8; 2]>::from_json(&Value::Array(vec![Value::from(1u64)])),
            Err(Error::Range(_))
        ));

        let vec = vec![true, false];
        assert_eq!(Vec::<bool>::from_json(&vec.to_json()).unwrap(), vec);

        let bounded = BoundedVec::<u8, 1, 4>::new(vec![9]).unwrap();
        assert_eq!(
            BoundedVec::<u8, 1, 4>::from_json(&bounded.to_json()).unwrap(),
            bounded
        );
    }
}
