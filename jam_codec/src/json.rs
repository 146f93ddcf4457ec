//! JSON projection of typed values
//!
//! Every kind has a canonical [`serde_json::Value`] form: native scalars
//! for integers, booleans and text, lowercase hex for octet and bit
//! kinds, arrays for sequences, and tagged objects for sum types. The
//! projection is lossless together with the kind: `from_json(to_json(v))`
//! reconstructs `v` exactly.

use serde_json::Value;

use crate::error::Error;

/// A kind with a canonical JSON projection.
pub trait JsonCodable: Sized {
    /// Project the value into JSON.
    fn to_json(&self) -> Value;

    /// Reconstruct a value from its JSON projection.
    fn from_json(value: &Value) -> Result<Self, Error>;
}

/// Lowercase hex without a `0x` prefix.
pub(crate) fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Parse hex, tolerating an optional `0x`/`0X` prefix and uppercase digits.
pub(crate) fn from_hex(text: &str) -> Result<Vec<u8>, Error> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    hex::decode(digits).map_err(|err| Error::Message(format!("invalid hex string: {}", err)))
}

/// Pull a hex string out of a JSON value.
pub(crate) fn hex_from_json(value: &Value) -> Result<Vec<u8>, Error> {
    match value {
        Value::String(text) => from_hex(text),
        _ => Err(Error::TypeMismatch {
            expected: "hex string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        assert_eq!(to_hex(&[0xDE, 0xAD, 0x01]), "dead01");
        assert_eq!(from_hex("dead01").unwrap(), vec![0xDE, 0xAD, 0x01]);
    }

    #[test]
    fn test_hex_prefix_and_case_accepted() {
        assert_eq!(from_hex("0xDEAD01").unwrap(), vec![0xDE, 0xAD, 0x01]);
        assert_eq!(from_hex("0Xdead01").unwrap(), vec![0xDE, 0xAD, 0x01]);
        assert_eq!(from_hex("").unwrap(), Vec::<u8>::new());
        assert_eq!(from_hex("0x").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert!(from_hex("zz").is_err());
        assert!(from_hex("abc").is_err()); // odd digit count
        assert!(matches!(
            hex_from_json(&Value::Bool(true)),
            Err(Error::TypeMismatch { .. })
        ));
    }
}
