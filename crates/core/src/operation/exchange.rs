//! Bancor-style coin conversion against coin reserves.

use crate::error::{CoreResult, FieldError};
use crate::wire::{amount_field, amount_rlp, coin_field, coin_rlp, expect_fields};
use minter_primitives::{Amount, CoinId};
use minter_rlp::Rlp;
use serde::{Deserialize, Serialize};

/// Sells a fixed value of one coin for another.
///
/// Wire field order: `(coin_to_sell, value_to_sell, coin_to_buy,
/// min_value_to_buy)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellCoinData {
    /// Coin being spent.
    pub coin_to_sell: CoinId,
    /// Value to spend, in pips.
    pub value_to_sell: Amount,
    /// Coin being acquired.
    pub coin_to_buy: CoinId,
    /// Slippage guard: minimum acceptable proceeds.
    pub min_value_to_buy: Amount,
}

impl SellCoinData {
    /// Creates a sell operation.
    pub fn new(
        coin_to_sell: CoinId,
        value_to_sell: Amount,
        coin_to_buy: CoinId,
        min_value_to_buy: Amount,
    ) -> Self {
        Self {
            coin_to_sell,
            value_to_sell,
            coin_to_buy,
            min_value_to_buy,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            coin_rlp(self.coin_to_sell),
            amount_rlp(&self.value_to_sell),
            coin_rlp(self.coin_to_buy),
            amount_rlp(&self.min_value_to_buy),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [coin_to_sell, value_to_sell, coin_to_buy, min_value_to_buy] =
            expect_fields::<4>(rlp, "sell coin")?;
        Ok(Self {
            coin_to_sell: coin_field(coin_to_sell, "coin_to_sell")?,
            value_to_sell: amount_field(value_to_sell, "value_to_sell")?,
            coin_to_buy: coin_field(coin_to_buy, "coin_to_buy")?,
            min_value_to_buy: amount_field(min_value_to_buy, "min_value_to_buy")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.coin_to_sell == self.coin_to_buy {
            errors.push(FieldError::new(
                "coin_to_buy",
                "coin to buy must differ from coin to sell",
            ));
        }
    }
}

/// Sells the sender's entire balance of one coin for another.
///
/// Wire field order: `(coin_to_sell, coin_to_buy, min_value_to_buy)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellAllCoinData {
    /// Coin being spent in full.
    pub coin_to_sell: CoinId,
    /// Coin being acquired.
    pub coin_to_buy: CoinId,
    /// Slippage guard: minimum acceptable proceeds.
    pub min_value_to_buy: Amount,
}

impl SellAllCoinData {
    /// Creates a sell-all operation.
    pub fn new(coin_to_sell: CoinId, coin_to_buy: CoinId, min_value_to_buy: Amount) -> Self {
        Self {
            coin_to_sell,
            coin_to_buy,
            min_value_to_buy,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            coin_rlp(self.coin_to_sell),
            coin_rlp(self.coin_to_buy),
            amount_rlp(&self.min_value_to_buy),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [coin_to_sell, coin_to_buy, min_value_to_buy] =
            expect_fields::<3>(rlp, "sell all coin")?;
        Ok(Self {
            coin_to_sell: coin_field(coin_to_sell, "coin_to_sell")?,
            coin_to_buy: coin_field(coin_to_buy, "coin_to_buy")?,
            min_value_to_buy: amount_field(min_value_to_buy, "min_value_to_buy")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.coin_to_sell == self.coin_to_buy {
            errors.push(FieldError::new(
                "coin_to_buy",
                "coin to buy must differ from coin to sell",
            ));
        }
    }
}

/// Buys a fixed value of one coin with another.
///
/// Wire field order: `(coin_to_buy, value_to_buy, coin_to_sell,
/// max_value_to_sell)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyCoinData {
    /// Coin being acquired.
    pub coin_to_buy: CoinId,
    /// Value to acquire, in pips.
    pub value_to_buy: Amount,
    /// Coin being spent.
    pub coin_to_sell: CoinId,
    /// Slippage guard: maximum acceptable cost.
    pub max_value_to_sell: Amount,
}

impl BuyCoinData {
    /// Creates a buy operation.
    pub fn new(
        coin_to_buy: CoinId,
        value_to_buy: Amount,
        coin_to_sell: CoinId,
        max_value_to_sell: Amount,
    ) -> Self {
        Self {
            coin_to_buy,
            value_to_buy,
            coin_to_sell,
            max_value_to_sell,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            coin_rlp(self.coin_to_buy),
            amount_rlp(&self.value_to_buy),
            coin_rlp(self.coin_to_sell),
            amount_rlp(&self.max_value_to_sell),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [coin_to_buy, value_to_buy, coin_to_sell, max_value_to_sell] =
            expect_fields::<4>(rlp, "buy coin")?;
        Ok(Self {
            coin_to_buy: coin_field(coin_to_buy, "coin_to_buy")?,
            value_to_buy: amount_field(value_to_buy, "value_to_buy")?,
            coin_to_sell: coin_field(coin_to_sell, "coin_to_sell")?,
            max_value_to_sell: amount_field(max_value_to_sell, "max_value_to_sell")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.coin_to_sell == self.coin_to_buy {
            errors.push(FieldError::new(
                "coin_to_buy",
                "coin to buy must differ from coin to sell",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sell_round_trip() {
        let data = SellCoinData::new(
            CoinId::BASE,
            Amount::from_decimal("2").unwrap(),
            CoinId::from(1),
            Amount::zero(),
        );
        assert_eq!(data, SellCoinData::from_rlp(&data.to_rlp()).unwrap());
    }

    #[test]
    fn same_coin_conversion_is_invalid() {
        let mut errors = Vec::new();
        SellAllCoinData::new(CoinId::BASE, CoinId::BASE, Amount::zero())
            .validate(&mut errors);
        assert_eq!(1, errors.len());
    }

    #[test]
    fn buy_field_order_starts_with_coin_to_buy() {
        let data = BuyCoinData::new(
            CoinId::from(5),
            Amount::from(100u64),
            CoinId::BASE,
            Amount::from(900u64),
        );
        let items = data.to_rlp();
        let fields = items.as_list().unwrap();
        assert_eq!(5, fields[0].as_u32().unwrap());
        assert_eq!(100, fields[1].as_u64().unwrap());
    }
}
