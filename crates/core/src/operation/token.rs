//! Reserve-free token lifecycle: creation, minting and burning.

use crate::error::{CoreResult, FieldError};
use crate::wire::{
    amount_field, amount_rlp, bool_field, bool_rlp, coin_field, coin_rlp, expect_fields,
    string_field, symbol_field, symbol_rlp,
};
use minter_primitives::{Amount, CoinId, CoinSymbol, MAX_COIN_NAME_BYTES};
use minter_rlp::Rlp;
use serde::{Deserialize, Serialize};

/// Registers a new reserve-free token (also the shape of recreation).
///
/// Wire field order: `(name, symbol, initial_amount, max_supply, mintable,
/// burnable)`; the flags travel as 0/1 integers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    /// Human readable token name, at most 64 UTF-8 bytes.
    pub name: String,
    /// Ticker symbol, NUL-padded to 10 bytes on the wire.
    pub symbol: CoinSymbol,
    /// Initial emission in pips.
    pub initial_amount: Amount,
    /// Emission ceiling in pips.
    pub max_supply: Amount,
    /// Whether further emission is allowed.
    pub mintable: bool,
    /// Whether burning is allowed.
    pub burnable: bool,
}

impl TokenData {
    /// Creates a token-creation operation.
    pub fn new(
        name: impl Into<String>,
        symbol: CoinSymbol,
        initial_amount: Amount,
        max_supply: Amount,
        mintable: bool,
        burnable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            symbol,
            initial_amount,
            max_supply,
            mintable,
            burnable,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            Rlp::bytes(self.name.as_bytes().to_vec()),
            symbol_rlp(&self.symbol),
            amount_rlp(&self.initial_amount),
            amount_rlp(&self.max_supply),
            bool_rlp(self.mintable),
            bool_rlp(self.burnable),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [name, symbol, initial_amount, max_supply, mintable, burnable] =
            expect_fields::<6>(rlp, "token")?;
        Ok(Self {
            name: string_field(name, "name")?,
            symbol: symbol_field(symbol, "symbol")?,
            initial_amount: amount_field(initial_amount, "initial_amount")?,
            max_supply: amount_field(max_supply, "max_supply")?,
            mintable: bool_field(mintable, "mintable")?,
            burnable: bool_field(burnable, "burnable")?,
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
        if self.initial_amount.as_pips() > self.max_supply.as_pips() {
            errors.push(FieldError::new(
                "initial_amount",
                "initial amount exceeds max supply",
            ));
        }
    }
}

/// Mints additional supply of a mintable token (also the burn shape).
///
/// Wire field order: `(coin, value)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSupplyData {
    /// Token being minted or burned.
    pub coin: CoinId,
    /// Value in pips.
    pub value: Amount,
}

impl TokenSupplyData {
    /// Creates a supply-change operation.
    pub fn new(coin: CoinId, value: Amount) -> Self {
        Self { coin, value }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![coin_rlp(self.coin), amount_rlp(&self.value)])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [coin, value] = expect_fields::<2>(rlp, "token supply")?;
        Ok(Self {
            coin: coin_field(coin, "coin")?,
            value: amount_field(value, "value")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.value.is_zero() {
            errors.push(FieldError::new("value", "value must be positive"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_keeps_flags() {
        for (mintable, burnable) in [(false, false), (true, false), (false, true), (true, true)] {
            let data = TokenData::new(
                "Wrapped Thing",
                CoinSymbol::new("WTHING").unwrap(),
                Amount::from_base_units(10),
                Amount::from_base_units(100),
                mintable,
                burnable,
            );
            let back = TokenData::from_rlp(&data.to_rlp()).unwrap();
            assert_eq!(data, back);
        }
    }

    #[test]
    fn flags_travel_as_zero_or_one() {
        let data = TokenData::new(
            "T",
            CoinSymbol::new("TTT").unwrap(),
            Amount::zero(),
            Amount::zero(),
            true,
            false,
        );
        let rlp = data.to_rlp();
        let fields = rlp.as_list().unwrap();
        assert_eq!(1, fields[4].as_u8().unwrap());
        assert_eq!(0, fields[5].as_u8().unwrap());
    }

    #[test]
    fn non_binary_flag_is_a_decode_error() {
        let mut fields = TokenData::new(
            "T",
            CoinSymbol::new("TTT").unwrap(),
            Amount::zero(),
            Amount::zero(),
            true,
            true,
        )
        .to_rlp()
        .as_list()
        .unwrap()
        .to_vec();
        fields[4] = Rlp::from_u64(2);
        assert!(TokenData::from_rlp(&Rlp::list(fields)).is_err());
    }

    #[test]
    fn zero_mint_is_invalid() {
        let mut errors = Vec::new();
        TokenSupplyData::new(CoinId::from(9), Amount::zero()).validate(&mut errors);
        assert!(errors.iter().any(|e| e.field == "value"));
    }
}
