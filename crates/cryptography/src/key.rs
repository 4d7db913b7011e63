//! Private key handling.

use crate::hash::{keccak256, sha256};
use crate::{CryptoError, CryptoResult};
use minter_primitives::Address;
use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{PublicKey as SecpPublicKey, SecretKey, SECP256K1};

/// The length of a private key in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// The length of an uncompressed SEC1 public key in bytes.
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

/// A secp256k1 private key.
///
/// Holds key material validated against the curve order; every constructor
/// rejects out-of-range scalars.
#[derive(Clone, Eq, PartialEq)]
pub struct PrivateKey([u8; PRIVATE_KEY_SIZE]);

impl PrivateKey {
    /// Creates a private key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKey` if the bytes are not a valid curve
    /// scalar (zero, or at least the curve order) or not 32 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let secret = SecretKey::from_slice(bytes)
            .map_err(|e| CryptoError::InvalidKey(format!("invalid private key: {e}")))?;
        Ok(Self(secret.secret_bytes()))
    }

    /// Creates a private key from a hex string, with or without a `0x`
    /// prefix.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKey` for malformed hex or an invalid
    /// scalar.
    pub fn from_hex(s: &str) -> CryptoResult<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| CryptoError::InvalidKey(format!("invalid private key hex: {e}")))?;
        Self::from_bytes(&bytes)
    }

    /// Generates a fresh random private key from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut candidate = [0u8; PRIVATE_KEY_SIZE];
        loop {
            OsRng.fill_bytes(&mut candidate);
            if let Ok(secret) = SecretKey::from_slice(&candidate) {
                return Self(secret.secret_bytes());
            }
        }
    }

    /// Derives the key a check passphrase stands for: `sha256(passphrase)`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKey` in the negligible case where the
    /// digest is not a valid curve scalar.
    pub fn from_passphrase(passphrase: &str) -> CryptoResult<Self> {
        Self::from_bytes(&sha256(passphrase.as_bytes()))
    }

    /// Returns the raw key bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        &self.0
    }

    /// Derives the uncompressed SEC1 public key (`0x04 || X || Y`).
    #[must_use]
    pub fn public_key(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_SIZE] {
        // Key material is validated on construction, so this cannot fail.
        let secret = SecretKey::from_slice(&self.0).expect("validated key");
        SecpPublicKey::from_secret_key(SECP256K1, &secret).serialize_uncompressed()
    }

    /// Derives the 20-byte account address of this key.
    #[must_use]
    pub fn address(&self) -> Address {
        public_key_to_address(&self.public_key())
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of logs.
        f.write_str("PrivateKey(..)")
    }
}

/// Derives the account address of an uncompressed SEC1 public key:
/// the last 20 bytes of `keccak256(X || Y)`.
#[must_use]
pub fn public_key_to_address(uncompressed: &[u8; UNCOMPRESSED_PUBLIC_KEY_SIZE]) -> Address {
    let digest = keccak256(&uncompressed[1..]);
    Address::from_bytes(&digest[12..]).expect("20-byte digest tail")
}
