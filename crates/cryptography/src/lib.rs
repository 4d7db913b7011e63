//! # Minter Cryptography
//!
//! Cryptographic primitives for the transaction codec: SHA-256 and
//! Keccak-256 hashing, private key handling, and recoverable ECDSA over
//! secp256k1.
//!
//! Everything here is a thin, typed wrapper over `sha2`/`sha3`/`secp256k1`;
//! the curve math itself is out of scope. The secp256k1 global context is
//! used throughout, so signing and recovery are safe to run from any number
//! of threads concurrently.

pub mod hash;
pub mod key;
pub mod signature;

use thiserror::Error;

// Re-export main types
pub use hash::{keccak256, sha256};
pub use key::{public_key_to_address, PrivateKey, PRIVATE_KEY_SIZE, UNCOMPRESSED_PUBLIC_KEY_SIZE};
pub use signature::{
    recover_address, recover_public_key, sign_recoverable, Signature, SIGNATURE_SIZE,
};

/// Result type for cryptographic operations.
pub type CryptoResult<T> = std::result::Result<T, CryptoError>;

/// Cryptography-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key material is malformed or outside the curve order.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A signature is malformed or carries an invalid recovery byte.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// A recoverable signature did not resolve to a public key.
    #[error("recovery failed: {0}")]
    RecoveryFailed(String),
}
