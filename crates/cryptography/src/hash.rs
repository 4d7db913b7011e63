//! Hash functions used by the transaction codec.
//!
//! Keccak-256 hashes the canonical RLP bytes before signing; SHA-256 turns
//! check passphrases into key material and produces display hashes.

use sha2::{Digest, Sha256};

/// Computes SHA-256 of the input data.
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes Keccak-256 of the input data.
///
/// This is the pre-signing hash over canonical transaction bytes.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    use sha3::{Digest, Keccak256};
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
