//! Ordered key-value mapping
//!
//! Wire form: varint entry count, then `E(k) || E(v)` per entry with the
//! keys in strictly ascending order of their encoded bytes. Decoding
//! enforces that order, which also makes duplicate keys unrepresentable.

use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use indexmap::IndexMap;
use serde_json::Value;

use crate::codable::{check_destination, Codable};
use crate::config::DictOrder;
use crate::constants::MAX_DICTIONARY_SIZE;
use crate::error::Error;
use crate::json::JsonCodable;
use crate::read::SliceReader;
use crate::varint;

/// Mapping from `K` to `V` with a canonical wire order.
///
/// Entries iterate in insertion order in memory; the canonical sort by
/// encoded key bytes is applied when encoding. The JSON projection is an
/// object when every key projects to a JSON string, otherwise an array
/// of `{key, value}` records (field names configurable through
/// [`with_entry_names`](Dictionary::with_entry_names)).
#[derive(Debug, Clone)]
pub struct Dictionary<K, V> {
    entries: IndexMap<K, V>,
    order: DictOrder,
    key_name: &'static str,
    value_name: &'static str,
}

impl<K, V> Default for Dictionary<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            order: DictOrder::Sorted,
            key_name: "key",
            value_name: "value",
        }
    }
}

impl<K, V> Dictionary<K, V> {
    /// Creates an empty mapping with the canonical encode order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the wire entry order for this value.
    pub fn with_order(mut self, order: DictOrder) -> Self {
        self.order = order;
        self
    }

    /// Names the key and value fields of the array-of-records JSON form.
    pub fn with_entry_names(mut self, key_name: &'static str, value_name: &'static str) -> Self {
        self.key_name = key_name;
        self.value_name = value_name;
        self
    }

    /// The wire entry order of this value.
    pub fn order(&self) -> DictOrder {
        self.order
    }

    /// Consumes the wrapper into the inner map.
    pub fn into_inner(self) -> IndexMap<K, V> {
        self.entries
    }
}

impl<K: Hash + Eq, V> From<IndexMap<K, V>> for Dictionary<K, V> {
    fn from(entries: IndexMap<K, V>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for Dictionary<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from(IndexMap::from_iter(iter))
    }
}

impl<K: Hash + Eq + PartialEq, V: PartialEq> PartialEq for Dictionary<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Hash + Eq, V: Eq> Eq for Dictionary<K, V> {}

impl<K, V> Deref for Dictionary<K, V> {
    type Target = IndexMap<K, V>;

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl<K, V> DerefMut for Dictionary<K, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.entries
    }
}

impl<K, V> Dictionary<K, V>
where
    K: Codable + Hash + Eq,
    V: Codable,
{
    fn write_entries(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
        let mut cur = offset;
        cur += varint::encode_into(self.entries.len() as u64, buf, cur)?;

        match self.order {
            DictOrder::Sorted => {
                // Scratch key encodings carry the sort; values are written
                // straight into the destination afterwards
                let mut keyed: Vec<(Vec<u8>, &V)> = Vec::with_capacity(self.entries.len());
                for (key, value) in &self.entries {
                    keyed.push((key.encode()?, value));
                }
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
                for (key_bytes, value) in keyed {
                    buf[cur..cur + key_bytes.len()].copy_from_slice(&key_bytes);
                    cur += key_bytes.len();
                    cur += value.encode_into(buf, cur)?;
                }
            }
            DictOrder::Insertion => {
                for (key, value) in &self.entries {
                    cur += key.encode_into(buf, cur)?;
                    cur += value.encode_into(buf, cur)?;
                }
            }
        }
        Ok(cur - offset)
    }

    fn read_entries(
        buf: &[u8],
        offset: usize,
        enforce_order: bool,
    ) -> Result<(Self, usize), Error> {
        let mut reader = SliceReader::new(buf, offset);
        let count = varint::read(&mut reader)?;
        if count > MAX_DICTIONARY_SIZE {
            return Err(Error::LimitExceeded {
                kind: "Dictionary",
                len: count,
                limit: MAX_DICTIONARY_SIZE,
            });
        }

        let capacity = (count as usize).min(buf.len().saturating_sub(reader.position()));
        let mut entries = IndexMap::with_capacity(capacity);
        let mut prev_key: Option<&[u8]> = None;

        for _ in 0..count {
            let key_start = reader.position();
            let (key, key_read) = K::decode_from(buf, key_start)?;
            let key_bytes = reader.read_bytes(key_read)?;

            if enforce_order {
                if let Some(prev) = prev_key {
                    if key_bytes <= prev {
                        return Err(Error::InvalidKeyOrder { offset: key_start });
                    }
                }
                prev_key = Some(key_bytes);
            }

            let (value, value_read) = V::decode_from(buf, reader.position())?;
            reader.read_bytes(value_read)?;

            if entries.insert(key, value).is_some() {
                return Err(Error::InvalidKeyOrder { offset: key_start });
            }
        }

        Ok((Self::from(entries), reader.consumed(offset)))
    }

    /// Decodes a mapping without enforcing ascending key order.
    ///
    /// For payloads produced with [`DictOrder::Insertion`] only; duplicate
    /// keys are still rejected. Never use this across an interop boundary.
    pub fn decode_from_insertion_order(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
        let (dict, read) = Self::read_entries(buf, offset, false)?;
        Ok((dict.with_order(DictOrder::Insertion), read))
    }
}

impl<K, V> Codable for Dictionary<K, V>
where
    K: Codable + Hash + Eq,
    V: Codable,
{
    fn encode_size(&self) -> usize {
        varint::size(self.entries.len() as u64)
            + self
                .entries
                .iter()
                .map(|(key, value)| key.encode_size() + value.encode_size())
                .sum::<usize>()
    }

    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error> {
        check_destination(buf, offset, self.encode_size())?;
        self.write_entries(buf, offset)
    }

    fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error> {
        Self::read_entries(buf, offset, true)
    }
}

impl<K, V> JsonCodable for Dictionary<K, V>
where
    K: Codable + JsonCodable + Hash + Eq,
    V: Codable + JsonCodable,
{
    fn to_json(&self) -> Value {
        let keys: Vec<Value> = self.entries.keys().map(JsonCodable::to_json).collect();

        if keys.iter().all(Value::is_string) {
            let mut object = serde_json::Map::with_capacity(self.entries.len());
            for (key, value) in keys.into_iter().zip(self.entries.values()) {
                match key {
                    Value::String(name) => {
                        object.insert(name, value.to_json());
                    }
                    _ => unreachable!("all keys checked to be strings"),
                }
            }
            Value::Object(object)
        } else {
            let records = keys
                .into_iter()
                .zip(self.entries.values())
                .map(|(key, value)| {
                    let mut record = serde_json::Map::with_capacity(2);
                    record.insert(self.key_name.to_owned(), key);
                    record.insert(self.value_name.to_owned(), value.to_json());
                    Value::Object(record)
                })
                .collect();
            Value::Array(records)
        }
    }

    fn from_json(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Object(object) => {
                let mut entries = IndexMap::with_capacity(object.len());
                for (name, item) in object {
                    let key = K::from_json(&Value::String(name.clone()))?;
                    entries.insert(key, V::from_json(item)?);
                }
                Ok(Self::from(entries))
            }
            Value::Array(records) => {
                let defaults = Self::default();
                let mut entries = IndexMap::with_capacity(records.len());
                for record in records {
                    let record = record.as_object().ok_or(Error::TypeMismatch {
                        expected: "entry record object",
                    })?;
                    let key = record
                        .get(defaults.key_name)
                        .ok_or(Error::MissingField("key"))?;
                    let value = record
                        .get(defaults.value_name)
                        .ok_or(Error::MissingField("value"))?;
                    entries.insert(K::from_json(key)?, V::from_json(value)?);
                }
                Ok(Self::from(entries))
            }
            _ => Err(Error::TypeMismatch {
                expected: "object or array of entry records",
            }),
        }
    }
}
