//! Swap-pool liquidity and routed conversions.

use crate::error::{CoreResult, FieldError};
use crate::wire::{amount_field, amount_rlp, coin_field, coin_rlp, expect_fields};
use minter_primitives::{Amount, CoinId};
use minter_rlp::Rlp;
use serde::{Deserialize, Serialize};

/// A conversion route may touch 2-5 pools.
const MIN_ROUTE_COINS: usize = 2;
const MAX_ROUTE_COINS: usize = 5;

fn route_rlp(coins: &[CoinId]) -> Rlp {
    Rlp::list(coins.iter().map(|c| coin_rlp(*c)).collect())
}

fn route_from_rlp(item: &Rlp) -> CoreResult<Vec<CoinId>> {
    item.as_list()
        .map_err(|_| crate::CoreError::decode("coins: expected a list"))?
        .iter()
        .map(|c| coin_field(c, "coins"))
        .collect()
}

fn check_route(coins: &[CoinId], errors: &mut Vec<FieldError>) {
    if !(MIN_ROUTE_COINS..=MAX_ROUTE_COINS).contains(&coins.len()) {
        errors.push(FieldError::new(
            "coins",
            format!(
                "conversion route must name {MIN_ROUTE_COINS}-{MAX_ROUTE_COINS} coins, got {}",
                coins.len()
            ),
        ));
    }
}

/// Provides liquidity to the pool of a coin pair.
///
/// Wire field order: `(coin0, coin1, volume0, max_volume1)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidityData {
    /// First coin of the pair.
    pub coin0: CoinId,
    /// Second coin of the pair.
    pub coin1: CoinId,
    /// Exact volume of `coin0` to provide.
    pub volume0: Amount,
    /// Ceiling on the matching `coin1` volume.
    pub max_volume1: Amount,
}

impl AddLiquidityData {
    /// Creates a liquidity provision.
    pub fn new(coin0: CoinId, coin1: CoinId, volume0: Amount, max_volume1: Amount) -> Self {
        Self {
            coin0,
            coin1,
            volume0,
            max_volume1,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            coin_rlp(self.coin0),
            coin_rlp(self.coin1),
            amount_rlp(&self.volume0),
            amount_rlp(&self.max_volume1),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [coin0, coin1, volume0, max_volume1] = expect_fields::<4>(rlp, "add liquidity")?;
        Ok(Self {
            coin0: coin_field(coin0, "coin0")?,
            coin1: coin_field(coin1, "coin1")?,
            volume0: amount_field(volume0, "volume0")?,
            max_volume1: amount_field(max_volume1, "max_volume1")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.coin0 == self.coin1 {
            errors.push(FieldError::new("coin1", "pool coins must differ"));
        }
    }
}

/// Withdraws liquidity from the pool of a coin pair.
///
/// Wire field order: `(coin0, coin1, liquidity, min_volume0, min_volume1)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLiquidityData {
    /// First coin of the pair.
    pub coin0: CoinId,
    /// Second coin of the pair.
    pub coin1: CoinId,
    /// Liquidity-token value to burn.
    pub liquidity: Amount,
    /// Floor on the `coin0` proceeds.
    pub min_volume0: Amount,
    /// Floor on the `coin1` proceeds.
    pub min_volume1: Amount,
}

impl RemoveLiquidityData {
    /// Creates a liquidity withdrawal.
    pub fn new(
        coin0: CoinId,
        coin1: CoinId,
        liquidity: Amount,
        min_volume0: Amount,
        min_volume1: Amount,
    ) -> Self {
        Self {
            coin0,
            coin1,
            liquidity,
            min_volume0,
            min_volume1,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            coin_rlp(self.coin0),
            coin_rlp(self.coin1),
            amount_rlp(&self.liquidity),
            amount_rlp(&self.min_volume0),
            amount_rlp(&self.min_volume1),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [coin0, coin1, liquidity, min_volume0, min_volume1] =
            expect_fields::<5>(rlp, "remove liquidity")?;
        Ok(Self {
            coin0: coin_field(coin0, "coin0")?,
            coin1: coin_field(coin1, "coin1")?,
            liquidity: amount_field(liquidity, "liquidity")?,
            min_volume0: amount_field(min_volume0, "min_volume0")?,
            min_volume1: amount_field(min_volume1, "min_volume1")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.coin0 == self.coin1 {
            errors.push(FieldError::new("coin1", "pool coins must differ"));
        }
        if self.liquidity.is_zero() {
            errors.push(FieldError::new("liquidity", "liquidity must be positive"));
        }
    }
}

/// Sells a fixed value through a route of pools.
///
/// Wire field order: `(coins, value_to_sell, min_value_to_buy)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellSwapPoolData {
    /// Conversion route, 2-5 coins from sold to bought.
    pub coins: Vec<CoinId>,
    /// Value to spend, in pips.
    pub value_to_sell: Amount,
    /// Slippage guard: minimum acceptable proceeds.
    pub min_value_to_buy: Amount,
}

impl SellSwapPoolData {
    /// Creates a routed sell.
    pub fn new(coins: Vec<CoinId>, value_to_sell: Amount, min_value_to_buy: Amount) -> Self {
        Self {
            coins,
            value_to_sell,
            min_value_to_buy,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            route_rlp(&self.coins),
            amount_rlp(&self.value_to_sell),
            amount_rlp(&self.min_value_to_buy),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [coins, value_to_sell, min_value_to_buy] = expect_fields::<3>(rlp, "sell swap pool")?;
        Ok(Self {
            coins: route_from_rlp(coins)?,
            value_to_sell: amount_field(value_to_sell, "value_to_sell")?,
            min_value_to_buy: amount_field(min_value_to_buy, "min_value_to_buy")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        check_route(&self.coins, errors);
    }
}

/// Buys a fixed value through a route of pools.
///
/// Wire field order: `(coins, value_to_buy, max_value_to_sell)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuySwapPoolData {
    /// Conversion route, 2-5 coins from sold to bought.
    pub coins: Vec<CoinId>,
    /// Value to acquire, in pips.
    pub value_to_buy: Amount,
    /// Slippage guard: maximum acceptable cost.
    pub max_value_to_sell: Amount,
}

impl BuySwapPoolData {
    /// Creates a routed buy.
    pub fn new(coins: Vec<CoinId>, value_to_buy: Amount, max_value_to_sell: Amount) -> Self {
        Self {
            coins,
            value_to_buy,
            max_value_to_sell,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            route_rlp(&self.coins),
            amount_rlp(&self.value_to_buy),
            amount_rlp(&self.max_value_to_sell),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [coins, value_to_buy, max_value_to_sell] = expect_fields::<3>(rlp, "buy swap pool")?;
        Ok(Self {
            coins: route_from_rlp(coins)?,
            value_to_buy: amount_field(value_to_buy, "value_to_buy")?,
            max_value_to_sell: amount_field(max_value_to_sell, "max_value_to_sell")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        check_route(&self.coins, errors);
    }
}

/// Sells the sender's entire balance through a route of pools.
///
/// Wire field order: `(coins, min_value_to_buy)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellAllSwapPoolData {
    /// Conversion route, 2-5 coins from sold to bought.
    pub coins: Vec<CoinId>,
    /// Slippage guard: minimum acceptable proceeds.
    pub min_value_to_buy: Amount,
}

impl SellAllSwapPoolData {
    /// Creates a routed sell-all.
    pub fn new(coins: Vec<CoinId>, min_value_to_buy: Amount) -> Self {
        Self {
            coins,
            min_value_to_buy,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![route_rlp(&self.coins), amount_rlp(&self.min_value_to_buy)])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [coins, min_value_to_buy] = expect_fields::<2>(rlp, "sell all swap pool")?;
        Ok(Self {
            coins: route_from_rlp(coins)?,
            min_value_to_buy: amount_field(min_value_to_buy, "min_value_to_buy")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        check_route(&self.coins, errors);
    }
}

/// Opens the pool of a coin pair with initial liquidity.
///
/// Wire field order: `(coin0, coin1, volume0, volume1)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSwapPoolData {
    /// First coin of the pair.
    pub coin0: CoinId,
    /// Second coin of the pair.
    pub coin1: CoinId,
    /// Initial `coin0` volume.
    pub volume0: Amount,
    /// Initial `coin1` volume.
    pub volume1: Amount,
}

impl CreateSwapPoolData {
    /// Creates a pool-creation operation.
    pub fn new(coin0: CoinId, coin1: CoinId, volume0: Amount, volume1: Amount) -> Self {
        Self {
            coin0,
            coin1,
            volume0,
            volume1,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            coin_rlp(self.coin0),
            coin_rlp(self.coin1),
            amount_rlp(&self.volume0),
            amount_rlp(&self.volume1),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [coin0, coin1, volume0, volume1] = expect_fields::<4>(rlp, "create swap pool")?;
        Ok(Self {
            coin0: coin_field(coin0, "coin0")?,
            coin1: coin_field(coin1, "coin1")?,
            volume0: amount_field(volume0, "volume0")?,
            volume1: amount_field(volume1, "volume1")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.coin0 == self.coin1 {
            errors.push(FieldError::new("coin1", "pool coins must differ"));
        }
        if self.volume0.is_zero() || self.volume1.is_zero() {
            errors.push(FieldError::new(
                "volume0",
                "initial pool volumes must be positive",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(ids: &[u32]) -> Vec<CoinId> {
        ids.iter().map(|id| CoinId::from(*id)).collect()
    }

    #[test]
    fn routed_sell_round_trip() {
        let data = SellSwapPoolData::new(
            coins(&[0, 3, 7]),
            Amount::from_base_units(4),
            Amount::zero(),
        );
        assert_eq!(data, SellSwapPoolData::from_rlp(&data.to_rlp()).unwrap());
    }

    #[test]
    fn five_coin_route_is_the_ceiling() {
        let mut errors = Vec::new();
        SellSwapPoolData::new(coins(&[0, 1, 2, 3, 4]), Amount::zero(), Amount::zero())
            .validate(&mut errors);
        assert!(errors.is_empty());

        errors.clear();
        SellSwapPoolData::new(coins(&[0, 1, 2, 3, 4, 5]), Amount::zero(), Amount::zero())
            .validate(&mut errors);
        assert!(errors.iter().any(|e| e.field == "coins"));
    }

    #[test]
    fn single_coin_route_is_invalid() {
        let mut errors = Vec::new();
        SellAllSwapPoolData::new(coins(&[0]), Amount::zero()).validate(&mut errors);
        assert!(errors.iter().any(|e| e.field == "coins"));
    }

    #[test]
    fn pool_creation_requires_volumes() {
        let mut errors = Vec::new();
        CreateSwapPoolData::new(CoinId::BASE, CoinId::from(1), Amount::zero(), Amount::zero())
            .validate(&mut errors);
        assert!(errors.iter().any(|e| e.field == "volume0"));
    }
}
