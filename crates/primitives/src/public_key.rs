//! Implementation of `PublicKey`, a 32-byte candidate public key.

use crate::address::strip_prefix;
use crate::constants::{PUBLIC_KEY_PREFIX, PUBLIC_KEY_SIZE};
use crate::error::{PrimitiveError, PrimitiveResult};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Represents a 32-byte candidate/validator public key.
///
/// The canonical text form is `Mp` followed by 64 lowercase hex characters.
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    /// Alias for the byte length of a public key.
    pub const LENGTH: usize = PUBLIC_KEY_SIZE;

    /// Returns the all-zero public key.
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Creates a public key from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidLength` if the slice is not exactly
    /// 32 bytes.
    pub fn from_bytes(value: &[u8]) -> PrimitiveResult<Self> {
        if value.len() != PUBLIC_KEY_SIZE {
            return Err(PrimitiveError::InvalidLength {
                expected: PUBLIC_KEY_SIZE,
                actual: value.len(),
            });
        }
        let mut inner = [0u8; PUBLIC_KEY_SIZE];
        inner.copy_from_slice(value);
        Ok(Self(inner))
    }

    /// Returns the raw key bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    /// Returns the key bytes as an owned array.
    #[inline]
    #[must_use]
    pub fn to_array(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0
    }

    /// Parses a public key from its text form.
    ///
    /// Accepts `Mp`-prefixed, `0x`-prefixed, or bare 64-character hex.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidFormat` for malformed hex and
    /// `PrimitiveError::InvalidLength` for the wrong number of bytes.
    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        let hex_part = strip_prefix(s, PUBLIC_KEY_PREFIX);
        let bytes = hex::decode(hex_part).map_err(|e| PrimitiveError::InvalidFormat {
            message: format!("invalid public key hex: {e}"),
        })?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PUBLIC_KEY_PREFIX, hex::encode(self.0))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl FromStr for PublicKey {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> PrimitiveResult<Self> {
        Self::parse(s)
    }
}

impl From<[u8; PUBLIC_KEY_SIZE]> for PublicKey {
    fn from(value: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = PrimitiveError;

    fn try_from(value: &[u8]) -> PrimitiveResult<Self> {
        Self::from_bytes(value)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct PublicKeyVisitor;

impl<'de> Visitor<'de> for PublicKeyVisitor {
    type Value = PublicKey;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an Mp-prefixed hex public key string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PublicKey, E> {
        PublicKey::parse(v).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(PublicKeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Mp0eb98ea04ae466d8d38f490db3c99b3996a90e24243952ce9822c6dc1e2c1a43";

    #[test]
    fn parse_and_display_round_trip() {
        let key = PublicKey::parse(SAMPLE).unwrap();
        assert_eq!(SAMPLE, key.to_string());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            PublicKey::parse("Mp0eb98e"),
            Err(PrimitiveError::InvalidLength { .. })
        ));
        assert!(PublicKey::from_bytes(&[0u8; 31]).is_err());
        assert!(PublicKey::from_bytes(&[0u8; 33]).is_err());
    }
}
