//! Optional values
//!
//! `Option<T>` is the two-branch sum of `T` and null. Wire form: the
//! discriminant octet `0x01` followed by the payload when present, the
//! single octet `0x00` when absent. `Some(0)` and `None` therefore
//! encode to different bytes.

use serde_json::Value;

use crate::codable::{check_destination, Codable};
use crate::error::Error;
use crate::json::JsonCodable;
use crate::read::SliceReader;

impl<T: Codable> Codable for Option<T> {
    fn encode_size(&self) -> usize {
        match self {
            Some(value) => 1 + value.encode_size(),
            None => 1,
        }
    }

    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
        check_destination(buf, offset, self.encode_size())?;
        match self {
            Some(value) => {
                buf[offset] = 0x01;
                let written = value.encode_into(buf, offset + 1)?;
                Ok(1 + written)
            }
            None => {
                buf[offset] = 0x00;
                Ok(1)
            }
        }
    }

    fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
        let mut reader = SliceReader::new(buf, offset);
        match reader.next()? {
            0x00 => Ok((None, 1)),
            0x01 => {
                let (value, read) = T::decode_from(buf, offset + 1)?;
                Ok((Some(value), 1 + read))
            }
            other => Err(Error::InvalidVariant(format!(
                "option discriminant {:#04x} at offset {}",
                other, offset
            ))),
        }
    }
}

impl<T: JsonCodable> JsonCodable for Option<T> {
    fn to_json(&self) -> Value {
        match self {
            Some(value) => value.to_json(),
            None => Value::Null,
        }
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Null => Ok(None),
            other => T::from_json(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity() {
        let present: Option<u16> = Some(12345);
        assert_eq!(present.encode().unwrap(), vec![0x01, 0x39, 0x30]);

        let absent: Option<u16> = None;
        assert_eq!(absent.encode().unwrap(), vec![0x00]);
    }

    #[test]
    fn test_some_zero_differs_from_none() {
        let zero: Option<u8> = Some(0);
        let none: Option<u8> = None;

        let enc_zero = zero.encode().unwrap();
        let enc_none = none.encode().unwrap();

        assert_ne!(enc_zero, enc_none);
        assert_eq!(enc_zero[0], 0x01);
        assert_eq!(enc_none[0], 0x00);

        assert_eq!(Option::<u8>::decode(&enc_zero).unwrap(), Some(0));
        assert_eq!(Option::<u8>::decode(&enc_none).unwrap(), None);
    }

    #[test]
    fn test_boundary_payloads() {
        for value in [u32::MIN, 1, u32::MAX] {
            let opt = Some(value);
            let buf = opt.encode().unwrap();
            assert_eq!(buf.len(), opt.encode_size());
            let (decoded, read) = Option::<u32>::decode_from(&buf, 0).unwrap();
            assert_eq!(decoded, opt);
            assert_eq!(read, buf.len());
        }
    }

    #[test]
    fn test_bad_discriminant_rejected() {
        assert!(matches!(
            Option::<u8>::decode(&[0x02, 0x00]),
            Err(Error::InvalidVariant(_))
        ));
    }

    #[test]
    fn test_empty_buffer_is_short() {
        assert!(matches!(
            Option::<u8>::decode(&[]),
            Err(Error::ShortBuffer { .. })
        ));
        // Present discriminant with missing payload
        assert!(matches!(
            Option::<u8>::decode(&[0x01]),
            Err(Error::ShortBuffer { .. })
        ));
    }

    #[test]
    fn test_nested_options() {
        let nested: Option<Option<u8>> = Some(Some(7));
        let buf = nested.encode().unwrap();
        assert_eq!(buf, vec![0x01, 0x01, 0x07]);
        assert_eq!(Option::<Option<u8>>::decode(&buf).unwrap(), nested);

        let inner_none: Option<Option<u8>> = Some(None);
        let buf = inner_none.encode().unwrap();
        assert_eq!(buf, vec![0x01, 0x00]);
        assert_eq!(Option::<Option<u8>>::decode(&buf).unwrap(), inner_none);
    }

    #[test]
    fn test_json_projection() {
        let present: Option<String> = Some(String::from("text"));
        assert_eq!(present.to_json(), Value::String("text".into()));
        assert_eq!(
            Option::<String>::from_json(&present.to_json()).unwrap(),
            present
        );

        let absent: Option<String> = None;
        assert_eq!(absent.to_json(), Value::Null);
        assert_eq!(Option::<String>::from_json(&Value::Null).unwrap(), None);
    }
}
