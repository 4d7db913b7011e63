//! The RLP value model and typed accessors.

use crate::error::{RlpError, RlpResult};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// A recursively-defined RLP item: either a byte string or a list of items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rlp {
    /// An opaque byte string.
    Bytes(Vec<u8>),
    /// An ordered list of nested items.
    List(Vec<Rlp>),
}

impl Rlp {
    /// Creates a byte-string item.
    #[inline]
    #[must_use]
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Rlp::Bytes(data.into())
    }

    /// Creates a list item.
    #[inline]
    #[must_use]
    pub fn list(items: Vec<Rlp>) -> Self {
        Rlp::List(items)
    }

    /// The empty byte string (also the wire form of the integer zero).
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Rlp::Bytes(Vec::new())
    }

    /// Creates an item from an unsigned integer using the minimal
    /// big-endian byte form; zero encodes as the empty string.
    #[must_use]
    pub fn from_uint(value: &BigUint) -> Self {
        if value.is_zero() {
            Rlp::Bytes(Vec::new())
        } else {
            Rlp::Bytes(value.to_bytes_be())
        }
    }

    /// Creates an item from a `u64` using the minimal big-endian form.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self::from_uint(&BigUint::from(value))
    }

    /// Borrows the byte string.
    ///
    /// # Errors
    ///
    /// Returns `RlpError::ExpectedBytes` if the item is a list.
    pub fn as_bytes(&self) -> RlpResult<&[u8]> {
        match self {
            Rlp::Bytes(data) => Ok(data),
            Rlp::List(_) => Err(RlpError::ExpectedBytes),
        }
    }

    /// Borrows the list items.
    ///
    /// # Errors
    ///
    /// Returns `RlpError::ExpectedList` if the item is a byte string.
    pub fn as_list(&self) -> RlpResult<&[Rlp]> {
        match self {
            Rlp::List(items) => Ok(items),
            Rlp::Bytes(_) => Err(RlpError::ExpectedList),
        }
    }

    /// Reads the item as an unsigned big-endian integer.
    ///
    /// The bytes are interpreted as unsigned regardless of the high bit, so
    /// a value such as `0xff` reads as 255, never −1. A redundant leading
    /// zero byte is rejected: integers are minimally encoded on the wire.
    ///
    /// # Errors
    ///
    /// Returns `RlpError::ExpectedBytes` for lists and
    /// `RlpError::LeadingZero` for non-minimal integer bytes.
    pub fn as_uint(&self) -> RlpResult<BigUint> {
        let data = self.as_bytes()?;
        if data.first() == Some(&0) {
            return Err(RlpError::LeadingZero);
        }
        Ok(BigUint::from_bytes_be(data))
    }

    /// Reads the item as a `u64`.
    ///
    /// # Errors
    ///
    /// As [`Rlp::as_uint`], plus `RlpError::IntegerOverflow` for values
    /// beyond 64 bits.
    pub fn as_u64(&self) -> RlpResult<u64> {
        self.as_uint()?
            .to_u64()
            .ok_or(RlpError::IntegerOverflow { width: 64 })
    }

    /// Reads the item as a `u32`.
    ///
    /// # Errors
    ///
    /// As [`Rlp::as_uint`], plus `RlpError::IntegerOverflow` for values
    /// beyond 32 bits.
    pub fn as_u32(&self) -> RlpResult<u32> {
        self.as_uint()?
            .to_u32()
            .ok_or(RlpError::IntegerOverflow { width: 32 })
    }

    /// Reads the item as a `u8`.
    ///
    /// # Errors
    ///
    /// As [`Rlp::as_uint`], plus `RlpError::IntegerOverflow` for values
    /// beyond 8 bits.
    pub fn as_u8(&self) -> RlpResult<u8> {
        self.as_uint()?
            .to_u8()
            .ok_or(RlpError::IntegerOverflow { width: 8 })
    }

    /// Serializes the item to its wire form.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        crate::encode::encode(self)
    }

    /// Parses a complete wire item, rejecting trailing bytes.
    ///
    /// # Errors
    ///
    /// Any [`RlpError`] decode variant.
    pub fn decode(data: &[u8]) -> RlpResult<Self> {
        crate::decode::decode(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_bit_bytes_read_unsigned() {
        // A two's-complement reader would call this -1.
        assert_eq!(BigUint::from(255u32), Rlp::bytes(vec![0xff]).as_uint().unwrap());
        assert_eq!(
            BigUint::from(0x8000u32),
            Rlp::bytes(vec![0x80, 0x00]).as_uint().unwrap()
        );
    }

    #[test]
    fn uint_round_trip_preserves_high_bit_values() {
        for value in [0u64, 1, 127, 128, 255, 256, 0x8000_0000, u64::MAX] {
            let item = Rlp::from_u64(value);
            assert_eq!(value, item.as_u64().unwrap());
        }
    }

    #[test]
    fn zero_is_the_empty_string() {
        assert_eq!(Rlp::empty(), Rlp::from_u64(0));
        assert_eq!(0, Rlp::empty().as_u64().unwrap());
    }

    #[test]
    fn leading_zero_integers_are_rejected() {
        assert_eq!(
            Err(RlpError::LeadingZero),
            Rlp::bytes(vec![0x00, 0x01]).as_uint()
        );
    }

    #[test]
    fn shape_mismatches_are_typed_errors() {
        assert_eq!(Some(RlpError::ExpectedList), Rlp::empty().as_list().err());
        assert_eq!(
            Some(RlpError::ExpectedBytes),
            Rlp::list(vec![]).as_bytes().err()
        );
        assert_eq!(
            Err(RlpError::IntegerOverflow { width: 8 }),
            Rlp::bytes(vec![0x01, 0x00]).as_u8()
        );
    }
}
