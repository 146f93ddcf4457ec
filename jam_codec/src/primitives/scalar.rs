//! Boolean and null scalars

use serde_json::Value;

use crate::codable::{check_destination, Codable};
use crate::error::Error;
use crate::json::JsonCodable;
use crate::read::SliceReader;

impl Codable for bool {
    fn encode_size(&self) -> usize {
        1
    }

    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
        check_destination(buf, offset, 1)?;
        buf[offset] = u8::from(*self);
        Ok(1)
    }

    fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
        let mut reader = SliceReader::new(buf, offset);
        match reader.next()? {
            0x00 => Ok((false, 1)),
            0x01 => Ok((true, 1)),
            other => Err(Error::Range(format!(
                "boolean octet must be 0x00 or 0x01, got {:#04x} at offset {}",
                other, offset
            ))),
        }
    }
}

impl JsonCodable for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        value.as_bool().ok_or(Error::TypeMismatch {
            expected: "boolean",
        })
    }
}

/// Null occupies zero octets on the wire.
impl Codable for () {
    fn encode_size(&self) -> usize {
        0
    }

    fn encode_into(&self, _buf: &mut [u8], _offset: usize) -> Result<usize, Error> {
        Ok(0)
    }

    fn decode_from(_buf: &[u8], _offset: usize) -> Result<(Self, usize), Error> {
        Ok(((), 0))
    }
}

impl JsonCodable for () {
    fn to_json(&self) -> Value {
        Value::Null
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Null => Ok(()),
            _ => Err(Error::TypeMismatch { expected: "null" }),
        }
    }
}
