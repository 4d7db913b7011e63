//! Signature envelopes: single-signer and multisig.

use crate::error::{CoreError, CoreResult};
use crate::wire::{address_field, address_rlp, expect_fields};
use minter_cryptography::{recover_address, Signature};
use minter_primitives::Address;
use minter_rlp::Rlp;
use serde::{Deserialize, Serialize};

/// Selects the shape of the signature element in the envelope.
///
/// This axis is independent of the operation type: any operation can travel
/// under either shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureType {
    /// One (v, r, s) triple from a single signer.
    Single = 0x01,
    /// A multisig account address plus one triple per co-signer.
    Multi = 0x02,
}

impl SignatureType {
    /// Returns the wire code of this shape.
    #[inline]
    #[must_use]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Looks a shape up by wire code, failing closed on unknown values.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownSignatureType` for anything but 1 or 2.
    pub fn from_code(code: u8) -> CoreResult<Self> {
        match code {
            0x01 => Ok(SignatureType::Single),
            0x02 => Ok(SignatureType::Multi),
            other => Err(CoreError::UnknownSignatureType(other)),
        }
    }
}

/// One recoverable signature as it travels in the envelope.
///
/// Wire form: the list `[v, r, s]` with all three as minimal unsigned
/// integers; decode re-pads `r`/`s` to 32 bytes. The recovery byte is kept
/// in {0, 1}.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SingleSignature {
    /// Recovery id, 0 or 1.
    pub v: u8,
    /// The R scalar, left-padded to 32 bytes.
    pub r: [u8; 32],
    /// The S scalar, left-padded to 32 bytes.
    pub s: [u8; 32],
}

impl SingleSignature {
    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            Rlp::from_u64(u64::from(self.v)),
            uint_rlp(&self.r),
            uint_rlp(&self.s),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [v, r, s] = expect_fields::<3>(rlp, "signature")?;
        let v = v
            .as_u8()
            .map_err(|e| CoreError::decode(format!("signature v: {e}")))?;
        if v > 1 {
            return Err(CoreError::decode(format!(
                "signature v must be 0 or 1, got {v}"
            )));
        }
        Ok(Self {
            v,
            r: scalar_field(r, "signature r")?,
            s: scalar_field(s, "signature s")?,
        })
    }

    /// Recovers the address that produced this signature over `hash`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Crypto` if recovery fails.
    pub fn recover(&self, hash: &[u8; 32]) -> CoreResult<Address> {
        Ok(recover_address(hash, &Signature::from(*self))?)
    }
}

impl From<Signature> for SingleSignature {
    fn from(signature: Signature) -> Self {
        Self {
            v: signature.v,
            r: signature.r,
            s: signature.s,
        }
    }
}

impl From<SingleSignature> for Signature {
    fn from(signature: SingleSignature) -> Self {
        Self {
            r: signature.r,
            s: signature.s,
            v: signature.v,
        }
    }
}

/// Encodes a 32-byte scalar as a minimal unsigned integer.
fn uint_rlp(scalar: &[u8; 32]) -> Rlp {
    let start = scalar.iter().position(|b| *b != 0).unwrap_or(32);
    Rlp::bytes(scalar[start..].to_vec())
}

/// Reads a minimal unsigned integer back into a 32-byte scalar.
fn scalar_field(item: &Rlp, field: &'static str) -> CoreResult<[u8; 32]> {
    let digits = item
        .as_uint()
        .map_err(|e| CoreError::decode(format!("{field}: {e}")))?
        .to_bytes_be();
    // BigUint encodes zero as a single zero byte.
    let digits = if digits == [0] { Vec::new() } else { digits };
    if digits.len() > 32 {
        return Err(CoreError::decode(format!(
            "{field}: scalar wider than 32 bytes"
        )));
    }
    let mut scalar = [0u8; 32];
    scalar[32 - digits.len()..].copy_from_slice(&digits);
    Ok(scalar)
}

/// The multisig envelope: the account address plus the co-signer triples
/// in the exact order they were collected. No canonical sort is imposed;
/// order is part of the wire bytes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MultiSignature {
    /// The multisig account the signatures act for.
    pub address: Address,
    /// Co-signer signatures, in collection order.
    pub signatures: Vec<SingleSignature>,
}

impl MultiSignature {
    /// Assembles a multisig envelope from collected co-signer triples.
    pub fn new(address: Address, signatures: Vec<SingleSignature>) -> Self {
        Self {
            address,
            signatures,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            address_rlp(&self.address),
            Rlp::list(self.signatures.iter().map(SingleSignature::to_rlp).collect()),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [address, signatures] = expect_fields::<2>(rlp, "multi signature")?;
        let signatures = signatures
            .as_list()
            .map_err(|_| CoreError::decode("multi signature: expected a signature list"))?
            .iter()
            .map(SingleSignature::from_rlp)
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self {
            address: address_field(address, "multisig address")?,
            signatures,
        })
    }
}

/// The signature element of a signed transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SignatureData {
    /// A single-signer envelope.
    Single(SingleSignature),
    /// A multisig envelope.
    Multi(MultiSignature),
}

impl SignatureData {
    /// Returns the shape of this envelope.
    #[must_use]
    pub fn signature_type(&self) -> SignatureType {
        match self {
            SignatureData::Single(_) => SignatureType::Single,
            SignatureData::Multi(_) => SignatureType::Multi,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        match self {
            SignatureData::Single(signature) => signature.to_rlp(),
            SignatureData::Multi(signature) => signature.to_rlp(),
        }
    }

    /// Encodes the envelope to the byte string embedded in the signed
    /// transaction.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.to_rlp().encode()
    }

    /// Decodes the envelope for the shape announced by `signature_type`.
    ///
    /// # Errors
    ///
    /// Any decode variant of [`CoreError`].
    pub fn decode(signature_type: SignatureType, data: &[u8]) -> CoreResult<Self> {
        let rlp = Rlp::decode(data)?;
        Ok(match signature_type {
            SignatureType::Single => SignatureData::Single(SingleSignature::from_rlp(&rlp)?),
            SignatureType::Multi => SignatureData::Multi(MultiSignature::from_rlp(&rlp)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature(tag: u8) -> SingleSignature {
        let mut r = [0u8; 32];
        r[31] = tag;
        SingleSignature {
            v: 1,
            r,
            s: [0x44; 32],
        }
    }

    #[test]
    fn single_round_trip_re_pads_scalars() {
        let original = signature(9);
        let rlp = original.to_rlp();
        // The minimal form of r is one byte.
        assert_eq!(1, rlp.as_list().unwrap()[1].as_bytes().unwrap().len());
        assert_eq!(original, SingleSignature::from_rlp(&rlp).unwrap());
    }

    #[test]
    fn unknown_signature_type_fails_closed() {
        assert!(matches!(
            SignatureType::from_code(3),
            Err(CoreError::UnknownSignatureType(3))
        ));
    }

    #[test]
    fn legacy_recovery_bytes_are_rejected() {
        let rlp = Rlp::list(vec![
            Rlp::from_u64(27),
            Rlp::from_u64(5),
            Rlp::from_u64(6),
        ]);
        assert!(SingleSignature::from_rlp(&rlp).is_err());
    }

    #[test]
    fn multi_round_trip_preserves_collection_order() {
        let multi = MultiSignature::new(
            Address::from([0xaa; 20]),
            vec![signature(1), signature(2), signature(3)],
        );
        let back = MultiSignature::from_rlp(&multi.to_rlp()).unwrap();
        assert_eq!(multi, back);
        let tags: Vec<u8> = back.signatures.iter().map(|s| s.r[31]).collect();
        assert_eq!(vec![1, 2, 3], tags);
    }

    #[test]
    fn envelope_decode_dispatches_on_shape() {
        let single = SignatureData::Single(signature(7));
        let bytes = single.encode();
        assert_eq!(
            single,
            SignatureData::decode(SignatureType::Single, &bytes).unwrap()
        );
        // The same bytes under the multi shape are a decode error.
        assert!(SignatureData::decode(SignatureType::Multi, &bytes).is_err());
    }
}
