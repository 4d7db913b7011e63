//! Check redemption.

use crate::error::{CoreResult, FieldError};
use crate::wire::{bytes_field, expect_fields};
use minter_primitives::PROOF_SIZE;
use minter_rlp::Rlp;
use serde::{Deserialize, Serialize};

/// Redeems a bearer check.
///
/// Wire field order: `(raw_check, proof)`.
///
/// The proof binds the redemption to the redeemer's address and is exactly
/// 65 bytes once present. An *empty* proof is accepted on decode so the
/// reduced interchange form can travel proof-less to a signer, but building
/// a real transaction requires the proof to be attached first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemCheckData {
    /// The full wire bytes of the check being redeemed.
    pub raw_check: Vec<u8>,
    /// The redeemer-bound proof (`r || s || v`), or empty when not yet
    /// attached.
    pub proof: Vec<u8>,
}

impl RedeemCheckData {
    /// Creates a redemption with the proof attached.
    pub fn new(raw_check: impl Into<Vec<u8>>, proof: [u8; PROOF_SIZE]) -> Self {
        Self {
            raw_check: raw_check.into(),
            proof: proof.to_vec(),
        }
    }

    /// Creates a proof-less redemption for the interchange flow; the signer
    /// attaches the proof before building the final transaction.
    pub fn without_proof(raw_check: impl Into<Vec<u8>>) -> Self {
        Self {
            raw_check: raw_check.into(),
            proof: Vec::new(),
        }
    }

    /// Attaches the redeemer-bound proof.
    #[must_use]
    pub fn with_proof(mut self, proof: [u8; PROOF_SIZE]) -> Self {
        self.proof = proof.to_vec();
        self
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            Rlp::bytes(self.raw_check.clone()),
            Rlp::bytes(self.proof.clone()),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [raw_check, proof] = expect_fields::<2>(rlp, "redeem check")?;
        let proof = bytes_field(proof, "proof")?;
        if !proof.is_empty() && proof.len() != PROOF_SIZE {
            return Err(crate::CoreError::decode(format!(
                "proof: expected {PROOF_SIZE} bytes, got {}",
                proof.len()
            )));
        }
        Ok(Self {
            raw_check: bytes_field(raw_check, "raw_check")?,
            proof,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.raw_check.is_empty() {
            errors.push(FieldError::new("raw_check", "check bytes must not be empty"));
        }
        if self.proof.len() != PROOF_SIZE {
            errors.push(FieldError::new(
                "proof",
                format!(
                    "proof must be {PROOF_SIZE} bytes, got {}",
                    self.proof.len()
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redeem_round_trip() {
        let data = RedeemCheckData::new(vec![0xab; 120], [0x7f; PROOF_SIZE]);
        assert_eq!(data, RedeemCheckData::from_rlp(&data.to_rlp()).unwrap());
    }

    #[test]
    fn proofless_form_decodes_but_fails_validation() {
        let data = RedeemCheckData::without_proof(vec![0xab; 120]);
        let back = RedeemCheckData::from_rlp(&data.to_rlp()).unwrap();
        assert_eq!(data, back);

        let mut errors = Vec::new();
        back.validate(&mut errors);
        assert!(errors.iter().any(|e| e.field == "proof"));
    }

    #[test]
    fn sixty_four_byte_proof_is_a_decode_error() {
        let rlp = Rlp::list(vec![
            Rlp::bytes(vec![0xab; 120]),
            Rlp::bytes(vec![0x7f; PROOF_SIZE - 1]),
        ]);
        assert!(RedeemCheckData::from_rlp(&rlp).is_err());
    }
}
