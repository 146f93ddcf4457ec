#![deny(missing_docs, missing_debug_implementations)]

//! A typed-value implementation of the JAM binary encoding scheme.
//!
//! # Encoding and decoding typed values
//!
//! Every kind in the closed type universe implements the [`Codable`]
//! trait: it knows its exact wire size ([`Codable::encode_size`]), writes
//! itself into a caller-provided buffer ([`Codable::encode_into`]) and
//! reads itself back together with the exact byte count consumed
//! ([`Codable::decode_from`]). The [`Codable::encode`] and
//! [`Codable::decode`] wrappers cover the common whole-buffer case.
//!
//! ```rust
//! use jam_codec::Codable;
//!
//! let value: u32 = 0x12345678;
//! let buf = value.encode().unwrap();
//! assert_eq!(buf, [0x78, 0x56, 0x34, 0x12]); // little-endian
//! assert_eq!(u32::decode(&buf).unwrap(), value);
//! ```
//!
//! # Primitive kinds
//!
//! All primitive kinds can be found in mod [`primitives`]: fixed-width
//! integers map to the native integer types, the 1–9 octet
//! variable-length integer is [`Uint`], octet strings come in fixed
//! ([`FixedBytes`]), immutable ([`Bytes`]) and mutable ([`ByteArray`])
//! flavors, bit vectors in variable ([`Bits`]) and fixed
//! ([`BitArray`]) forms under an [`Msb0`] or [`Lsb0`] packing order,
//! sequences are `[T; N]`, `Vec<T>` and [`BoundedVec`], and mappings are
//! [`Dictionary`] with a canonical sorted-key wire form.
//!
//! # JSON projection
//!
//! Every kind also implements [`JsonCodable`], the canonical
//! [`serde_json::Value`] projection: native scalars for integers,
//! booleans and text, lowercase hex for octet and bit kinds (a `0x`
//! prefix is accepted on input), arrays for sequences and tagged forms
//! for sum types.
//!
//! # Records, choices and enumerations
//!
//! Fixed-shape records (structs, encoded as their fields concatenated in
//! declaration order), choices (data-carrying enums, encoded as a
//! discriminant octet followed by the branch) and enumerations (unit
//! enums, encoded as a varint of the variant's integer) are derived with
//! the [`Codable`](derive@Codable) and [`JsonCodable`](derive@JsonCodable)
//! macros. Please be aware that the `"derive"` feature flag must be
//! enabled.
//!
//! ```rust, ignore
//! use jam_codec::{Codable, JsonCodable};
//!
//! #[derive(Debug, PartialEq, Codable, JsonCodable)]
//! struct Block {
//!     number: u32,
//!     #[codec(rename = "parentHash")]
//!     parent_hash: jam_codec::Bytes32,
//!     transactions: Vec<Vec<u8>>,
//! }
//! ```
//!
//! # Security
//!
//! Every variable-length decoder validates its declared length against
//! the per-kind ceilings in [`constants`] before sizing any allocation
//! from it, and verifies the remaining buffer actually holds the claimed
//! payload. Malformed input never panics; it surfaces an [`Error`].
//!
//! # Feature flag
//!
//! - `"derive"`: enables the custom derive macros `Codable` and
//!   `JsonCodable`.

// Public mods
pub mod codable;
pub mod config;
pub mod constants;
pub mod error;
pub mod json;
pub mod primitives;
pub mod read;
pub mod varint;

pub use serde_json;

pub use codable::Codable;
pub use config::DictOrder;
pub use error::Error;
pub use json::JsonCodable;
pub use primitives::*;

#[cfg(feature = "derive")]
pub use jam_codec_derive::{Codable, JsonCodable};
