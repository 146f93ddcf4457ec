//! The per-value codec contract

use crate::error::Error;

/// A kind that knows its exact wire size and how to write and read itself.
///
/// Encoding is deterministic: equal values produce equal bytes. Decoding
/// consumes bytes strictly left to right and reports the exact count read,
/// so composite kinds chain their parts by accumulating offsets.
pub trait Codable: Sized {
    /// Exact encoded length in octets.
    fn encode_size(&self) -> usize;

    /// Write the encoding at `offset`; returns the number of octets
    /// written, which always equals [`encode_size`](Codable::encode_size).
    fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize, Error>;

    /// Decode one value starting at `offset`; returns the value and the
    /// number of octets consumed.
    fn decode_from(buf: &[u8], offset: usize) -> Result<(Self, usize), Error>;

    /// Encode into a freshly allocated buffer of exactly
    /// [`encode_size`](Codable::encode_size) octets.
    fn encode(&self) -> Result<Vec<u8>, Error> {
        let mut buf = vec![0u8; self.encode_size()];
        self.encode_into(&mut buf, 0)?;
        Ok(buf)
    }

    /// Decode one value from the start of `buf`.
    fn decode(buf: &[u8]) -> Result<Self, Error> {
        Self::decode_from(buf, 0).map(|(value, _)| value)
    }
}

/// Fail with [`Error::ShortDestination`] unless `buf` can hold `needed`
/// octets at `offset`.
pub(crate) fn check_destination(buf: &[u8], offset: usize, needed: usize) -> Result<(), Error> {
    let remaining = buf.len().saturating_sub(offset);
    if remaining < needed {
        return Err(Error::ShortDestination {
            offset,
            needed,
            remaining,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_destination() {
        let buf = [0u8; 4];
        assert!(check_destination(&buf, 0, 4).is_ok());
        assert!(check_destination(&buf, 2, 2).is_ok());
        assert_eq!(
            check_destination(&buf, 2, 3),
            Err(Error::ShortDestination {
                offset: 2,
                needed: 3,
                remaining: 2
            })
        );
        // Offset past the end reports zero remaining rather than wrapping
        assert_eq!(
            check_destination(&buf, 10, 1),
            Err(Error::ShortDestination {
                offset: 10,
                needed: 1,
                remaining: 0
            })
        );
    }
}
