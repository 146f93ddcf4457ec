//! Per-value encoding options

/// Entry order a [`Dictionary`](crate::Dictionary) uses on the wire.
///
/// [`Sorted`](DictOrder::Sorted) is the canonical form required for
/// interop: entries appear in strictly ascending order of their encoded
/// keys. [`Insertion`](DictOrder::Insertion) emits entries in the order
/// they were inserted; the output is non-canonical and must not cross a
/// trust or interop boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DictOrder {
    /// Strictly ascending encoded-key order (canonical).
    #[default]
    Sorted,
    /// Insertion order (non-canonical).
    Insertion,
}
