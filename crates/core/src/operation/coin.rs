//! Reserve-backed coin lifecycle: creation, recreation, ownership transfer.

use crate::error::{CoreResult, FieldError};
use crate::wire::{
    address_field, address_rlp, amount_field, amount_rlp, expect_fields, string_field,
    symbol_field, symbol_rlp, u32_field,
};
use minter_primitives::{Address, Amount, CoinSymbol, MAX_COIN_NAME_BYTES};
use minter_rlp::Rlp;
use serde::{Deserialize, Serialize};

/// Registers a new reserve-backed coin (also the shape of recreation).
///
/// Wire field order: `(name, symbol, initial_amount, initial_reserve,
/// constant_reserve_ratio, max_supply)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCoinData {
    /// Human readable coin name, at most 64 UTF-8 bytes.
    pub name: String,
    /// Ticker symbol, NUL-padded to 10 bytes on the wire.
    pub symbol: CoinSymbol,
    /// Initial emission in pips.
    pub initial_amount: Amount,
    /// Initial base-coin reserve in pips.
    pub initial_reserve: Amount,
    /// Constant reserve ratio, 10-100 percent.
    pub constant_reserve_ratio: u32,
    /// Emission ceiling in pips.
    pub max_supply: Amount,
}

impl CreateCoinData {
    /// Creates a coin-creation operation.
    pub fn new(
        name: impl Into<String>,
        symbol: CoinSymbol,
        initial_amount: Amount,
        initial_reserve: Amount,
        constant_reserve_ratio: u32,
        max_supply: Amount,
    ) -> Self {
        Self {
            name: name.into(),
            symbol,
            initial_amount,
            initial_reserve,
            constant_reserve_ratio,
            max_supply,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            Rlp::bytes(self.name.as_bytes().to_vec()),
            symbol_rlp(&self.symbol),
            amount_rlp(&self.initial_amount),
            amount_rlp(&self.initial_reserve),
            Rlp::from_u64(u64::from(self.constant_reserve_ratio)),
            amount_rlp(&self.max_supply),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [name, symbol, initial_amount, initial_reserve, crr, max_supply] =
            expect_fields::<6>(rlp, "create coin")?;
        Ok(Self {
            name: string_field(name, "name")?,
            symbol: symbol_field(symbol, "symbol")?,
            initial_amount: amount_field(initial_amount, "initial_amount")?,
            initial_reserve: amount_field(initial_reserve, "initial_reserve")?,
            constant_reserve_ratio: u32_field(crr, "constant_reserve_ratio")?,
            max_supply: amount_field(max_supply, "max_supply")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.name.len() > MAX_COIN_NAME_BYTES {
            errors.push(FieldError::new(
                "name",
                format!(
                    "name must be at most {MAX_COIN_NAME_BYTES} bytes, got {}",
                    self.name.len()
                ),
            ));
        }
        if let Err(message) = self.symbol.validate() {
            errors.push(FieldError::new("symbol", message));
        }
        if !(10..=100).contains(&self.constant_reserve_ratio) {
            errors.push(FieldError::new(
                "constant_reserve_ratio",
                format!(
                    "reserve ratio must be 10-100, got {}",
                    self.constant_reserve_ratio
                ),
            ));
        }
        if self.initial_amount.as_pips() > self.max_supply.as_pips() {
            errors.push(FieldError::new(
                "initial_amount",
                "initial amount exceeds max supply",
            ));
        }
    }
}

/// Replaces an existing coin under the same ticker; same wire shape as
/// creation.
pub type RecreateCoinData = CreateCoinData;

/// Transfers ticker ownership to a new address.
///
/// Wire field order: `(symbol, new_owner)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCoinOwnerData {
    /// Ticker whose ownership changes.
    pub symbol: CoinSymbol,
    /// The new owning address.
    pub new_owner: Address,
}

impl EditCoinOwnerData {
    /// Creates an ownership-transfer operation.
    pub fn new(symbol: CoinSymbol, new_owner: Address) -> Self {
        Self { symbol, new_owner }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![symbol_rlp(&self.symbol), address_rlp(&self.new_owner)])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [symbol, new_owner] = expect_fields::<2>(rlp, "edit coin owner")?;
        Ok(Self {
            symbol: symbol_field(symbol, "symbol")?,
            new_owner: address_field(new_owner, "new_owner")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if let Err(message) = self.symbol.validate() {
            errors.push(FieldError::new("symbol", message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CreateCoinData {
        CreateCoinData::new(
            "Example Coin",
            CoinSymbol::new("EXAMPLE").unwrap(),
            Amount::from_base_units(1_000),
            Amount::from_base_units(10_000),
            50,
            Amount::from_base_units(1_000_000),
        )
    }

    #[test]
    fn create_coin_round_trip() {
        let data = sample();
        assert_eq!(data, CreateCoinData::from_rlp(&data.to_rlp()).unwrap());
    }

    #[test]
    fn symbol_occupies_ten_wire_bytes() {
        let rlp = sample().to_rlp();
        let fields = rlp.as_list().unwrap();
        assert_eq!(10, fields[1].as_bytes().unwrap().len());
    }

    #[test]
    fn crr_bounds_are_enforced() {
        for bad in [0u32, 9, 101] {
            let mut data = sample();
            data.constant_reserve_ratio = bad;
            let mut errors = Vec::new();
            data.validate(&mut errors);
            assert!(
                errors.iter().any(|e| e.field == "constant_reserve_ratio"),
                "crr {bad} passed"
            );
        }
    }

    #[test]
    fn oversized_name_is_flagged() {
        let mut data = sample();
        data.name = "x".repeat(65);
        let mut errors = Vec::new();
        data.validate(&mut errors);
        assert!(errors.iter().any(|e| e.field == "name"));
    }

    #[test]
    fn sixty_four_byte_name_is_legal() {
        let mut data = sample();
        data.name = "x".repeat(64);
        let mut errors = Vec::new();
        data.validate(&mut errors);
        assert!(errors.is_empty());
        assert_eq!(data, CreateCoinData::from_rlp(&data.to_rlp()).unwrap());
    }
}
