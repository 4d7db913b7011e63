//! Plain value transfers: single-recipient send and batched multisend.

use crate::error::{CoreResult, FieldError};
use crate::wire::{
    address_field, address_rlp, amount_field, amount_rlp, coin_field, coin_rlp, expect_fields,
    expect_min_fields,
};
use minter_primitives::{Address, Amount, CoinId};
use minter_rlp::Rlp;
use serde::{Deserialize, Serialize};

/// Sends a value of one coin to one address.
///
/// Wire field order: `(coin, to, value)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendData {
    /// Coin to transfer.
    pub coin: CoinId,
    /// Recipient address.
    pub to: Address,
    /// Value in pips.
    pub value: Amount,
}

impl SendData {
    /// Creates a send operation.
    pub fn new(coin: CoinId, to: Address, value: Amount) -> Self {
        Self { coin, to, value }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            coin_rlp(self.coin),
            address_rlp(&self.to),
            amount_rlp(&self.value),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [coin, to, value] = expect_fields::<3>(rlp, "send")?;
        Ok(Self {
            coin: coin_field(coin, "coin")?,
            to: address_field(to, "to")?,
            value: amount_field(value, "value")?,
        })
    }

    pub(crate) fn validate(&self, _errors: &mut Vec<FieldError>) {
        // Any coin and any value (including zero) is wire-legal; balance
        // checks belong to the chain.
    }
}

/// Sends values to many recipients in one transaction.
///
/// Wire form: a list of `(coin, to, value)` items, at least one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisendData {
    /// The individual transfers, in wire order.
    pub items: Vec<SendData>,
}

impl MultisendData {
    /// Creates an empty multisend to be filled with [`MultisendData::add`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one transfer, fluent style.
    #[must_use]
    pub fn add(mut self, item: SendData) -> Self {
        self.items.push(item);
        self
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(self.items.iter().map(SendData::to_rlp).collect())
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let items = expect_min_fields(rlp, 0, "multisend")?;
        let items = items
            .iter()
            .map(SendData::from_rlp)
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self { items })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.items.is_empty() {
            errors.push(FieldError::new("items", "multisend requires at least one item"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient() -> Address {
        "Mx31e61a05adbd13c6b625262704bc305bf7725026".parse().unwrap()
    }

    #[test]
    fn send_round_trip() {
        let data = SendData::new(
            CoinId::BASE,
            recipient(),
            Amount::from_decimal("0.012345").unwrap(),
        );
        assert_eq!(data, SendData::from_rlp(&data.to_rlp()).unwrap());
    }

    #[test]
    fn multisend_preserves_item_order() {
        let data = MultisendData::new()
            .add(SendData::new(CoinId::BASE, recipient(), Amount::from(1u64)))
            .add(SendData::new(CoinId::from(7), recipient(), Amount::from(2u64)));
        let back = MultisendData::from_rlp(&data.to_rlp()).unwrap();
        assert_eq!(data, back);
        assert_eq!(CoinId::BASE, back.items[0].coin);
        assert_eq!(CoinId::from(7), back.items[1].coin);
    }

    #[test]
    fn empty_multisend_fails_validation() {
        let mut errors = Vec::new();
        MultisendData::new().validate(&mut errors);
        assert_eq!(1, errors.len());
        assert_eq!("items", errors[0].field);
    }
}
