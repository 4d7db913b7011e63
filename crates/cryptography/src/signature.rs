//! Recoverable ECDSA over secp256k1.
//!
//! Signing uses the crate's pre-allocated global context, which is thread
//! safe; independent transactions can be signed fully in parallel without
//! any process-wide lock.

use crate::key::{
    public_key_to_address, PrivateKey, UNCOMPRESSED_PUBLIC_KEY_SIZE,
};
use crate::{CryptoError, CryptoResult};
use minter_primitives::Address;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, SecretKey, SECP256K1};

/// The length of a serialized recoverable signature (`r || s || v`).
pub const SIGNATURE_SIZE: usize = 65;

/// A recoverable ECDSA signature.
///
/// The recovery byte `v` is kept in {0, 1} everywhere; the 27/28 convention
/// of some stacks never appears on this wire format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Signature {
    /// The R scalar, big-endian.
    pub r: [u8; 32],
    /// The S scalar, big-endian.
    pub s: [u8; 32],
    /// The recovery id, 0 or 1.
    pub v: u8,
}

impl Signature {
    /// Serializes as the 65-byte `r || s || v` form used by check locks and
    /// redemption proofs.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut out = [0u8; SIGNATURE_SIZE];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// Parses the 65-byte `r || s || v` form.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidSignature` for a wrong length or a
    /// recovery byte outside {0, 1}.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != SIGNATURE_SIZE {
            return Err(CryptoError::InvalidSignature(format!(
                "expected {SIGNATURE_SIZE} bytes, got {}",
                bytes.len()
            )));
        }
        let v = bytes[64];
        if v > 1 {
            return Err(CryptoError::InvalidSignature(format!(
                "recovery byte must be 0 or 1, got {v}"
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v })
    }
}

/// Signs a 32-byte message hash, returning a recoverable signature.
///
/// Signing is deterministic (RFC 6979), so the same hash and key always
/// produce the same bytes.
///
/// # Errors
///
/// Returns `CryptoError::InvalidKey` if the key material fails to load.
pub fn sign_recoverable(hash: &[u8; 32], key: &PrivateKey) -> CryptoResult<Signature> {
    let secret = SecretKey::from_slice(key.as_bytes())
        .map_err(|e| CryptoError::InvalidKey(format!("invalid private key: {e}")))?;
    let message = Message::from_digest(*hash);
    let signature = SECP256K1.sign_ecdsa_recoverable(&message, &secret);
    let (recovery_id, compact) = signature.serialize_compact();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&compact[..32]);
    s.copy_from_slice(&compact[32..]);
    Ok(Signature {
        r,
        s,
        v: recovery_id.to_i32() as u8,
    })
}

/// Recovers the uncompressed public key that produced `signature` over
/// `hash`.
///
/// # Errors
///
/// Returns `CryptoError::RecoveryFailed` if the signature does not resolve
/// to a curve point.
pub fn recover_public_key(
    hash: &[u8; 32],
    signature: &Signature,
) -> CryptoResult<[u8; UNCOMPRESSED_PUBLIC_KEY_SIZE]> {
    let recovery_id = RecoveryId::from_i32(signature.v as i32)
        .map_err(|e| CryptoError::InvalidSignature(format!("invalid recovery id: {e}")))?;
    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r);
    compact[32..].copy_from_slice(&signature.s);
    let recoverable = RecoverableSignature::from_compact(&compact, recovery_id)
        .map_err(|e| CryptoError::InvalidSignature(format!("invalid signature: {e}")))?;
    let message = Message::from_digest(*hash);
    let public_key = SECP256K1
        .recover_ecdsa(&message, &recoverable)
        .map_err(|e| CryptoError::RecoveryFailed(format!("recovery failed: {e}")))?;
    Ok(public_key.serialize_uncompressed())
}

/// Recovers the account address that produced `signature` over `hash`.
///
/// # Errors
///
/// As [`recover_public_key`].
pub fn recover_address(hash: &[u8; 32], signature: &Signature) -> CryptoResult<Address> {
    Ok(public_key_to_address(&recover_public_key(hash, signature)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::keccak256;

    fn test_key() -> PrivateKey {
        PrivateKey::from_hex("07bc17abdcee8b971bb8723e36fe9d2523306d5ab2d683631693238e0f9df142")
            .unwrap()
    }

    #[test]
    fn sign_then_recover_yields_signer() {
        let key = test_key();
        let hash = keccak256(b"canonical transaction bytes");
        let signature = sign_recoverable(&hash, &key).unwrap();

        assert!(signature.v <= 1);
        assert_eq!(key.public_key(), recover_public_key(&hash, &signature).unwrap());
        assert_eq!(key.address(), recover_address(&hash, &signature).unwrap());
    }

    #[test]
    fn signing_is_deterministic() {
        let key = test_key();
        let hash = keccak256(b"same bytes");
        let first = sign_recoverable(&hash, &key).unwrap();
        let second = sign_recoverable(&hash, &key).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn recovery_distinguishes_messages() {
        let key = test_key();
        let signature = sign_recoverable(&keccak256(b"one"), &key).unwrap();
        let other_hash = keccak256(b"two");
        // Recovery over a different hash must not yield the signer.
        let recovered = recover_address(&other_hash, &signature);
        assert!(recovered.is_err() || recovered.unwrap() != key.address());
    }

    #[test]
    fn sixty_five_byte_form_round_trips() {
        let key = test_key();
        let signature = sign_recoverable(&keccak256(b"bytes"), &key).unwrap();
        let packed = signature.to_bytes();
        assert_eq!(signature, Signature::from_bytes(&packed).unwrap());
    }

    #[test]
    fn rejects_bad_serialized_signatures() {
        assert!(Signature::from_bytes(&[0u8; 64]).is_err());
        let mut bad_v = [0u8; 65];
        bad_v[64] = 27;
        assert!(Signature::from_bytes(&bad_v).is_err());
    }
}
