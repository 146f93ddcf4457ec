//! End-to-end wire vectors and cross-kind properties.

use jam_codec::{
    BitArray, Bits, BoundedVec, ByteArray, Bytes, Codable, Dictionary, Error, FixedBytes,
    JsonCodable, Lsb0, Msb0, Uint,
};
use rand::{Rng, SeedableRng};

fn assert_universal<T>(value: &T)
where
    T: Codable + JsonCodable + PartialEq + std::fmt::Debug,
{
    let buf = value.encode().unwrap();
    assert_eq!(buf.len(), value.encode_size());

    let (decoded, read) = T::decode_from(&buf, 0).unwrap();
    assert_eq!(&decoded, value);
    assert_eq!(read, buf.len());

    // encode_into at a nonzero offset writes the same bytes
    let mut shifted = vec![0u8; buf.len() + 3];
    let written = value.encode_into(&mut shifted, 3).unwrap();
    assert_eq!(written, buf.len());
    assert_eq!(&shifted[3..], buf.as_slice());

    // JSON round-trip
    let back = T::from_json(&value.to_json()).unwrap();
    assert_eq!(&back, value);
}

#[test]
fn fixed_int_little_endian() {
    assert_eq!(
        0x12345678u32.encode().unwrap(),
        vec![0x78, 0x56, 0x34, 0x12]
    );
}

#[test]
fn varint_boundaries() {
    assert_eq!(Uint(127).encode().unwrap(), vec![0x7F]);
    assert_eq!(Uint(128).encode().unwrap(), vec![0x80, 0x80]);
}

#[test]
fn mapping_canonical_vector() {
    let mut dict: Dictionary<String, u8> = Dictionary::new();
    dict.insert(String::from("a"), 1);
    dict.insert(String::from("b"), 2);

    assert_eq!(
        dict.encode().unwrap(),
        vec![0x02, 0x01, 0x61, 0x01, 0x01, 0x62, 0x02]
    );
}

#[test]
fn option_vectors() {
    assert_eq!(
        Some(12345u16).encode().unwrap(),
        vec![0x01, 0x39, 0x30]
    );
    assert_eq!(None::<u16>.encode().unwrap(), vec![0x00]);
}

#[test]
fn bits_order_vectors() {
    let msb = BitArray::<Msb0, 4>::from_slice(&[true, false, true, false]).unwrap();
    assert_eq!(msb.encode().unwrap(), vec![0xA0]);

    let lsb = BitArray::<Lsb0, 4>::from_slice(&[true, false, true, false]).unwrap();
    assert_eq!(lsb.encode().unwrap(), vec![0x05]);
}

#[test]
fn byte_array_vectors() {
    assert_eq!(ByteArray::new().encode().unwrap(), vec![0x00]);
    assert_eq!(
        ByteArray::from(b"x".as_slice()).encode().unwrap(),
        vec![0x01, 0x78]
    );
    assert!(matches!(
        ByteArray::decode(&[]),
        Err(Error::ShortBuffer { .. })
    ));
}

#[test]
fn universal_properties_across_kinds() {
    assert_universal(&true);
    assert_universal(&0x12345678u32);
    assert_universal(&(-12345i32));
    assert_universal(&Uint(u64::MAX));
    assert_universal(&String::from("héllo"));
    assert_universal(&FixedBytes::<4>::new([1, 2, 3, 4]));
    assert_universal(&Bytes::from(vec![9, 8, 7]));
    assert_universal(&ByteArray::from(vec![0, 255]));
    assert_universal(&vec![1u16, 2, 3]);
    assert_universal(&[String::from("a"), String::from("bc")]);
    assert_universal(&BoundedVec::<u8, 1, 4>::new(vec![5, 6]).unwrap());
    assert_universal(&Some(77u8));
    assert_universal(&None::<u8>);
    assert_universal(&Bits::<Lsb0>::from(vec![true; 16]));
    assert_universal(&BitArray::<Msb0, 12>::from_slice(&[true; 12]).unwrap());

    let mut dict: Dictionary<String, Vec<u8>> = Dictionary::new();
    dict.insert(String::from("k"), vec![1, 2]);
    dict.insert(String::from("j"), vec![]);
    assert_universal(&dict);
}

#[test]
fn nested_composites_roundtrip() {
    let value: Vec<Option<Vec<String>>> = vec![
        Some(vec![String::from("x"), String::new()]),
        None,
        Some(vec![]),
    ];
    let buf = value.encode().unwrap();
    assert_eq!(buf.len(), value.encode_size());
    let (decoded, read) = Vec::<Option<Vec<String>>>::decode_from(&buf, 0).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(read, buf.len());
}

#[test]
fn decode_consumes_exact_prefix() {
    // Trailing garbage after a complete value is left untouched
    let mut buf = Some(7u8).encode().unwrap();
    buf.extend_from_slice(&[0xAA, 0xBB]);
    let (decoded, read) = Option::<u8>::decode_from(&buf, 0).unwrap();
    assert_eq!(decoded, Some(7));
    assert_eq!(read, 2);
}

#[test]
fn randomized_roundtrips() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x4A414D);

    for _ in 0..200 {
        let value: u64 = rng.gen();
        assert_universal(&Uint(value));
        assert_universal(&value);
    }

    for _ in 0..50 {
        let len = rng.gen_range(0..64);
        let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        assert_universal(&ByteArray::from(bytes.clone()));
        assert_universal(&Bytes::from(bytes));

        let bits: Vec<bool> = (0..rng.gen_range(0..40) * 8).map(|_| rng.gen()).collect();
        assert_universal(&Bits::<Msb0>::from(bits.clone()));
        assert_universal(&Bits::<Lsb0>::from(bits));
    }
}

#[test]
fn equal_values_encode_identically() {
    let a = vec![String::from("same"), String::from("bytes")];
    let b = vec![String::from("same"), String::from("bytes")];
    assert_eq!(a, b);
    assert_eq!(a.encode().unwrap(), b.encode().unwrap());
}
