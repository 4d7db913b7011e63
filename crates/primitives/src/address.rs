//! Implementation of `Address`, a 20-byte account address.

use crate::constants::{ADDRESS_PREFIX, ADDRESS_SIZE};
use crate::error::{PrimitiveError, PrimitiveResult};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Represents a 20-byte account address.
///
/// The canonical text form is `Mx` followed by 40 lowercase hex characters;
/// parsing also accepts a `0x` prefix or bare hex.
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// Alias for the byte length of an address.
    pub const LENGTH: usize = ADDRESS_SIZE;

    /// Returns the all-zero address.
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Checks whether every byte of the address is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Creates an address from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidLength` if the slice is not exactly
    /// 20 bytes.
    pub fn from_bytes(value: &[u8]) -> PrimitiveResult<Self> {
        if value.len() != ADDRESS_SIZE {
            return Err(PrimitiveError::InvalidLength {
                expected: ADDRESS_SIZE,
                actual: value.len(),
            });
        }
        let mut inner = [0u8; ADDRESS_SIZE];
        inner.copy_from_slice(value);
        Ok(Self(inner))
    }

    /// Returns the raw address bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Returns the address bytes as an owned array.
    #[inline]
    #[must_use]
    pub fn to_array(&self) -> [u8; ADDRESS_SIZE] {
        self.0
    }

    /// Parses an address from its text form.
    ///
    /// Accepts `Mx`-prefixed, `0x`-prefixed, or bare 40-character hex.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidFormat` for malformed hex and
    /// `PrimitiveError::InvalidLength` for the wrong number of bytes.
    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        let hex_part = strip_prefix(s, ADDRESS_PREFIX);
        let bytes = hex::decode(hex_part).map_err(|e| PrimitiveError::InvalidFormat {
            message: format!("invalid address hex: {e}"),
        })?;
        Self::from_bytes(&bytes)
    }
}

/// Strips a chain prefix (`Mx`, `Mp`, ...) or `0x`, case-insensitively.
pub(crate) fn strip_prefix<'a>(s: &'a str, prefix: &str) -> &'a str {
    if s.len() >= 2 && s.is_char_boundary(2) {
        let head = &s[..2];
        if head.eq_ignore_ascii_case(prefix) || head.eq_ignore_ascii_case("0x") {
            return &s[2..];
        }
    }
    s
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ADDRESS_PREFIX, hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> PrimitiveResult<Self> {
        Self::parse(s)
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(value: [u8; ADDRESS_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = PrimitiveError;

    fn try_from(value: &[u8]) -> PrimitiveResult<Self> {
        Self::from_bytes(value)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct AddressVisitor;

impl<'de> Visitor<'de> for AddressVisitor {
    type Value = Address;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an Mx-prefixed hex address string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Address, E> {
        Address::parse(v).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(AddressVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Mx31e61a05adbd13c6b625262704bc305bf7725026";

    #[test]
    fn parse_and_display_round_trip() {
        let address = Address::parse(SAMPLE).unwrap();
        assert_eq!(SAMPLE, address.to_string());
    }

    #[test]
    fn parse_accepts_alternate_prefixes() {
        let canonical = Address::parse(SAMPLE).unwrap();
        let bare = Address::parse("31e61a05adbd13c6b625262704bc305bf7725026").unwrap();
        let zero_x = Address::parse("0x31e61a05adbd13c6b625262704bc305bf7725026").unwrap();
        assert_eq!(canonical, bare);
        assert_eq!(canonical, zero_x);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            Address::parse("Mx31e61a05"),
            Err(PrimitiveError::InvalidLength { .. })
        ));
        assert!(Address::from_bytes(&[0u8; 19]).is_err());
        assert!(Address::from_bytes(&[0u8; 21]).is_err());
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(matches!(
            Address::parse("Mxzz e61a05adbd13c6b625262704bc305bf77250"),
            Err(PrimitiveError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn serde_uses_text_form() {
        let address = Address::parse(SAMPLE).unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(format!("\"{SAMPLE}\""), json);
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(address, back);
    }
}
