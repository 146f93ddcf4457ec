//! UTF-8 text
//!
//! Wire form: varint byte length, then the UTF-8 bytes. The length unit
//! is bytes, not code points.

use serde_json::Value;

use crate::codable::{check_destination, Codable};
use crate::constants::MAX_STRING_BYTES;
use crate::error::Error;
use crate::json::JsonCodable;
use crate::read::SliceReader;
use crate::varint;

impl Codable for String {
    fn encode_size(&self) -> usize {
        varint::size(self.len() as u64) + self.len()
    }

    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
        check_destination(buf, offset, self.encode_size())?;
        let mut cur = offset;
        cur += varint::encode_into(self.len() as u64, buf, cur)?;
        buf[cur..cur + self.len()].copy_from_slice(self.as_bytes());
        Ok(cur + self.len() - offset)
    }

    fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
        let mut reader = SliceReader::new(buf, offset);
        let len = varint::read(&mut reader)?;
        if len > MAX_STRING_BYTES {
            return Err(Error::LimitExceeded {
                kind: "String",
                len,
                limit: MAX_STRING_BYTES,
            });
        }
        let bytes = reader.read_bytes(len as usize)?;
        let text = std::str::from_utf8(bytes)?;
        Ok((text.to_owned(), reader.consumed(offset)))
    }
}

impl JsonCodable for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        match value {
            Value::String(text) => Ok(text.clone()),
            _ => Err(Error::TypeMismatch { expected: "string" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_wire_form() {
        let text = String::from("Hello");
        let buf = text.encode().unwrap();
        assert_eq!(buf, b"\x05Hello");
        assert_eq!(String::decode(&buf).unwrap(), text);
    }

    #[test]
    fn test_empty_string() {
        let text = String::new();
        assert_eq!(text.encode().unwrap(), vec![0x00]);
        let (decoded, read) = String::decode_from(&[0x00], 0).unwrap();
        assert_eq!(decoded, "");
        assert_eq!(read, 1);
    }

    #[test]
    fn test_length_prefix_counts_bytes_not_chars() {
        // U+00E9 is two UTF-8 bytes but one char
        let text = String::from("é");
        assert_eq!(text.chars().count(), 1);
        let buf = text.encode().unwrap();
        assert_eq!(buf[0], 2);
        assert_eq!(buf.len(), 3);
        assert_eq!(String::decode(&buf).unwrap(), text);
    }

    #[test]
    fn test_multibyte_roundtrip() {
        let text = String::from("héllo wörld ✓");
        let buf = text.encode().unwrap();
        assert_eq!(buf.len(), text.encode_size());
        assert_eq!(String::decode(&buf).unwrap(), text);
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let buf = [0x02, 0xFF, 0xFE];
        assert_eq!(
            String::decode(&buf).unwrap_err(),
            Error::InvalidUtf8Encoding
        );
    }

    #[test]
    fn test_truncated_payload() {
        let mut buf = vec![100u8];
        buf.extend_from_slice(b"short");
        assert!(matches!(
            String::decode(&buf),
            Err(Error::ShortBuffer { .. })
        ));
    }

    #[test]
    fn test_length_limit_enforced() {
        let mut buf = vec![0u8; varint::size(MAX_STRING_BYTES + 1)];
        varint::encode_into(MAX_STRING_BYTES + 1, &mut buf, 0).unwrap();
        assert!(matches!(
            String::decode(&buf),
            Err(Error::LimitExceeded { kind: "String", .. })
        ));
    }

    #[test]
    fn test_json_projection_is_native() {
        let text = String::from("plain");
        assert_eq!(text.to_json(), Value::String("plain".into()));
        assert_eq!(String::from_json(&text.to_json()).unwrap(), text);
        assert!(String::from_json(&Value::from(5u64)).is_err());
    }
}
