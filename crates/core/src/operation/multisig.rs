//! Multisig account management.

use crate::error::{CoreResult, FieldError};
use crate::wire::{address_field, address_rlp, expect_fields, u32_field};
use minter_primitives::Address;
use minter_rlp::Rlp;
use serde::{Deserialize, Serialize};

/// Creates or edits a weighted multisig account.
///
/// Wire field order: `(threshold, weights, addresses)`; the two lists run
/// in parallel and must be the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigData {
    /// Combined weight required to authorize a transaction.
    pub threshold: u32,
    /// Per-signer weights, parallel to `addresses`.
    pub weights: Vec<u32>,
    /// Participant addresses, parallel to `weights`.
    pub addresses: Vec<Address>,
}

impl MultisigData {
    /// Creates a multisig description with the given threshold.
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Appends one participant, fluent style.
    #[must_use]
    pub fn add_signer(mut self, address: Address, weight: u32) -> Self {
        self.addresses.push(address);
        self.weights.push(weight);
        self
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            Rlp::from_u64(u64::from(self.threshold)),
            Rlp::list(
                self.weights
                    .iter()
                    .map(|w| Rlp::from_u64(u64::from(*w)))
                    .collect(),
            ),
            Rlp::list(self.addresses.iter().map(address_rlp).collect()),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [threshold, weights, addresses] = expect_fields::<3>(rlp, "multisig")?;
        let weights = weights
            .as_list()
            .map_err(|_| crate::CoreError::decode("weights: expected a list"))?
            .iter()
            .map(|w| u32_field(w, "weights"))
            .collect::<CoreResult<Vec<_>>>()?;
        let addresses = addresses
            .as_list()
            .map_err(|_| crate::CoreError::decode("addresses: expected a list"))?
            .iter()
            .map(|a| address_field(a, "addresses"))
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self {
            threshold: u32_field(threshold, "threshold")?,
            weights,
            addresses,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.addresses.is_empty() {
            errors.push(FieldError::new(
                "addresses",
                "multisig requires at least one participant",
            ));
        }
        if self.weights.len() != self.addresses.len() {
            errors.push(FieldError::new(
                "weights",
                format!(
                    "weights ({}) and addresses ({}) must have equal length",
                    self.weights.len(),
                    self.addresses.len()
                ),
            ));
        }
        if self.threshold == 0 {
            errors.push(FieldError::new("threshold", "threshold must be positive"));
        }
        let total: u64 = self.weights.iter().map(|w| u64::from(*w)).sum();
        if total < u64::from(self.threshold) {
            errors.push(FieldError::new(
                "threshold",
                "threshold is unreachable by the combined weights",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        Address::from([tag; 20])
    }

    #[test]
    fn multisig_round_trip_preserves_parallel_lists() {
        let data = MultisigData::new(3)
            .add_signer(addr(1), 1)
            .add_signer(addr(2), 2)
            .add_signer(addr(3), 3);
        let back = MultisigData::from_rlp(&data.to_rlp()).unwrap();
        assert_eq!(data, back);
        assert_eq!(vec![1, 2, 3], back.weights);
        assert_eq!(addr(2), back.addresses[1]);
    }

    #[test]
    fn unreachable_threshold_is_invalid() {
        let data = MultisigData::new(10).add_signer(addr(1), 4);
        let mut errors = Vec::new();
        data.validate(&mut errors);
        assert!(errors.iter().any(|e| e.field == "threshold"));
    }

    #[test]
    fn empty_participant_list_is_invalid() {
        let mut errors = Vec::new();
        MultisigData::new(1).validate(&mut errors);
        assert!(errors.iter().any(|e| e.field == "addresses"));
    }
}
