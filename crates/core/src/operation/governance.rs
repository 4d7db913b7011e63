//! Network governance votes: prices, commission tables, upgrades.

use crate::error::{CoreResult, FieldError};
use crate::wire::{
    amount_field, amount_rlp, coin_field, coin_rlp, expect_fields, expect_min_fields,
    public_key_field, public_key_rlp, string_field, u64_field,
};
use minter_primitives::{Amount, CoinId, PublicKey};
use minter_rlp::Rlp;
use serde::{Deserialize, Serialize};

/// Casts a legacy oracle price vote.
///
/// Wire field order: `(price)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceVoteData {
    /// The voted price.
    pub price: u64,
}

impl PriceVoteData {
    /// Creates a price vote.
    pub fn new(price: u64) -> Self {
        Self { price }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![Rlp::from_u64(self.price)])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [price] = expect_fields::<1>(rlp, "price vote")?;
        Ok(Self {
            price: u64_field(price, "price")?,
        })
    }

    pub(crate) fn validate(&self, _errors: &mut Vec<FieldError>) {}
}

/// Votes for a named network upgrade at a height.
///
/// Wire field order: `(version, pub_key, height)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteUpdateData {
    /// Upgrade version label.
    pub version: String,
    /// Validator public key casting the vote.
    pub pub_key: PublicKey,
    /// Activation height being voted for.
    pub height: u64,
}

impl VoteUpdateData {
    /// Creates an upgrade vote.
    pub fn new(version: impl Into<String>, pub_key: PublicKey, height: u64) -> Self {
        Self {
            version: version.into(),
            pub_key,
            height,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            Rlp::bytes(self.version.as_bytes().to_vec()),
            public_key_rlp(&self.pub_key),
            Rlp::from_u64(self.height),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [version, pub_key, height] = expect_fields::<3>(rlp, "vote update")?;
        Ok(Self {
            version: string_field(version, "version")?,
            pub_key: public_key_field(pub_key, "pub_key")?,
            height: u64_field(height, "height")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.version.is_empty() {
            errors.push(FieldError::new("version", "version must not be empty"));
        }
    }
}

/// Votes for a complete fee-table update.
///
/// Wire field order: `(pub_key, height, coin)` followed by the 43 price
/// components below, in exactly this order, then a variable tail of
/// forward-compatibility prices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)] // the field names are the table
pub struct VoteCommissionData {
    /// Validator public key casting the vote.
    pub pub_key: PublicKey,
    /// Height the table takes effect at.
    pub height: u64,
    /// Coin the fees are priced in.
    pub coin: CoinId,

    pub payload_byte: Amount,
    pub send: Amount,
    pub buy_bancor: Amount,
    pub sell_bancor: Amount,
    pub sell_all_bancor: Amount,
    pub buy_pool_base: Amount,
    pub buy_pool_delta: Amount,
    pub sell_pool_base: Amount,
    pub sell_pool_delta: Amount,
    pub sell_all_pool_base: Amount,
    pub sell_all_pool_delta: Amount,
    pub create_ticker3: Amount,
    pub create_ticker4: Amount,
    pub create_ticker5: Amount,
    pub create_ticker6: Amount,
    pub create_ticker7_10: Amount,
    pub create_coin: Amount,
    pub create_token: Amount,
    pub recreate_coin: Amount,
    pub recreate_token: Amount,
    pub declare_candidacy: Amount,
    pub delegate: Amount,
    pub unbond: Amount,
    pub redeem_check: Amount,
    pub set_candidate_on: Amount,
    pub set_candidate_off: Amount,
    pub create_multisig: Amount,
    pub multisend_base: Amount,
    pub multisend_delta: Amount,
    pub edit_candidate: Amount,
    pub set_halt_block: Amount,
    pub edit_ticker_owner: Amount,
    pub edit_multisig: Amount,
    pub edit_candidate_public_key: Amount,
    pub create_swap_pool: Amount,
    pub add_liquidity: Amount,
    pub remove_liquidity: Amount,
    pub edit_candidate_commission: Amount,
    pub move_stake: Amount,
    pub mint_token: Amount,
    pub burn_token: Amount,
    pub vote_commission: Amount,
    pub vote_update: Amount,

    /// Prices appended by later network upgrades.
    pub more: Vec<Amount>,
}

/// Number of wire fields before the forward-compatibility tail.
const NAMED_FIELDS: usize = 46;

impl VoteCommissionData {
    pub(crate) fn to_rlp(&self) -> Rlp {
        let mut fields = vec![
            public_key_rlp(&self.pub_key),
            Rlp::from_u64(self.height),
            coin_rlp(self.coin),
        ];
        fields.extend(self.prices().into_iter().map(|p| amount_rlp(p)));
        fields.extend(self.more.iter().map(amount_rlp));
        Rlp::list(fields)
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let items = expect_min_fields(rlp, NAMED_FIELDS, "vote commission")?;
        let mut prices = items[3..NAMED_FIELDS]
            .iter()
            .map(|item| amount_field(item, "price"));
        let mut next = || prices.next().expect("price slice length checked");

        let data = Self {
            pub_key: public_key_field(&items[0], "pub_key")?,
            height: u64_field(&items[1], "height")?,
            coin: coin_field(&items[2], "coin")?,
            payload_byte: next()?,
            send: next()?,
            buy_bancor: next()?,
            sell_bancor: next()?,
            sell_all_bancor: next()?,
            buy_pool_base: next()?,
            buy_pool_delta: next()?,
            sell_pool_base: next()?,
            sell_pool_delta: next()?,
            sell_all_pool_base: next()?,
            sell_all_pool_delta: next()?,
            create_ticker3: next()?,
            create_ticker4: next()?,
            create_ticker5: next()?,
            create_ticker6: next()?,
            create_ticker7_10: next()?,
            create_coin: next()?,
            create_token: next()?,
            recreate_coin: next()?,
            recreate_token: next()?,
            declare_candidacy: next()?,
            delegate: next()?,
            unbond: next()?,
            redeem_check: next()?,
            set_candidate_on: next()?,
            set_candidate_off: next()?,
            create_multisig: next()?,
            multisend_base: next()?,
            multisend_delta: next()?,
            edit_candidate: next()?,
            set_halt_block: next()?,
            edit_ticker_owner: next()?,
            edit_multisig: next()?,
            edit_candidate_public_key: next()?,
            create_swap_pool: next()?,
            add_liquidity: next()?,
            remove_liquidity: next()?,
            edit_candidate_commission: next()?,
            move_stake: next()?,
            mint_token: next()?,
            burn_token: next()?,
            vote_commission: next()?,
            vote_update: next()?,
            more: items[NAMED_FIELDS..]
                .iter()
                .map(|item| amount_field(item, "more"))
                .collect::<CoreResult<Vec<_>>>()?,
        };
        Ok(data)
    }

    /// The 43 named price components in wire order.
    fn prices(&self) -> [&Amount; 43] {
        [
            &self.payload_byte,
            &self.send,
            &self.buy_bancor,
            &self.sell_bancor,
            &self.sell_all_bancor,
            &self.buy_pool_base,
            &self.buy_pool_delta,
            &self.sell_pool_base,
            &self.sell_pool_delta,
            &self.sell_all_pool_base,
            &self.sell_all_pool_delta,
            &self.create_ticker3,
            &self.create_ticker4,
            &self.create_ticker5,
            &self.create_ticker6,
            &self.create_ticker7_10,
            &self.create_coin,
            &self.create_token,
            &self.recreate_coin,
            &self.recreate_token,
            &self.declare_candidacy,
            &self.delegate,
            &self.unbond,
            &self.redeem_check,
            &self.set_candidate_on,
            &self.set_candidate_off,
            &self.create_multisig,
            &self.multisend_base,
            &self.multisend_delta,
            &self.edit_candidate,
            &self.set_halt_block,
            &self.edit_ticker_owner,
            &self.edit_multisig,
            &self.edit_candidate_public_key,
            &self.create_swap_pool,
            &self.add_liquidity,
            &self.remove_liquidity,
            &self.edit_candidate_commission,
            &self.move_stake,
            &self.mint_token,
            &self.burn_token,
            &self.vote_commission,
            &self.vote_update,
        ]
    }

    pub(crate) fn validate(&self, _errors: &mut Vec<FieldError>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VoteCommissionData {
        let mut counter = 0u64;
        let mut next = || {
            counter += 1;
            Amount::from(counter)
        };
        VoteCommissionData {
            pub_key: PublicKey::from([9; 32]),
            height: 1_000_000,
            coin: CoinId::BASE,
            payload_byte: next(),
            send: next(),
            buy_bancor: next(),
            sell_bancor: next(),
            sell_all_bancor: next(),
            buy_pool_base: next(),
            buy_pool_delta: next(),
            sell_pool_base: next(),
            sell_pool_delta: next(),
            sell_all_pool_base: next(),
            sell_all_pool_delta: next(),
            create_ticker3: next(),
            create_ticker4: next(),
            create_ticker5: next(),
            create_ticker6: next(),
            create_ticker7_10: next(),
            create_coin: next(),
            create_token: next(),
            recreate_coin: next(),
            recreate_token: next(),
            declare_candidacy: next(),
            delegate: next(),
            unbond: next(),
            redeem_check: next(),
            set_candidate_on: next(),
            set_candidate_off: next(),
            create_multisig: next(),
            multisend_base: next(),
            multisend_delta: next(),
            edit_candidate: next(),
            set_halt_block: next(),
            edit_ticker_owner: next(),
            edit_multisig: next(),
            edit_candidate_public_key: next(),
            create_swap_pool: next(),
            add_liquidity: next(),
            remove_liquidity: next(),
            edit_candidate_commission: next(),
            move_stake: next(),
            mint_token: next(),
            burn_token: next(),
            vote_commission: next(),
            vote_update: next(),
            more: vec![Amount::from(900u64), Amount::from(901u64)],
        }
    }

    #[test]
    fn commission_table_round_trip() {
        let data = sample();
        assert_eq!(data, VoteCommissionData::from_rlp(&data.to_rlp()).unwrap());
    }

    #[test]
    fn price_order_is_positional() {
        let data = sample();
        let rlp = data.to_rlp();
        let fields = rlp.as_list().unwrap();
        // payload_byte is the first price after (pub_key, height, coin).
        assert_eq!(1, fields[3].as_u64().unwrap());
        // send follows immediately.
        assert_eq!(2, fields[4].as_u64().unwrap());
        // vote_update is the final named component before the tail.
        assert_eq!(43, fields[45].as_u64().unwrap());
        assert_eq!(900, fields[46].as_u64().unwrap());
    }

    #[test]
    fn missing_component_is_a_decode_error() {
        let data = sample();
        let rlp = data.to_rlp();
        let mut fields = rlp.as_list().unwrap().to_vec();
        fields.truncate(NAMED_FIELDS - 1);
        assert!(VoteCommissionData::from_rlp(&Rlp::list(fields)).is_err());
    }

    #[test]
    fn empty_tail_is_legal() {
        let mut data = sample();
        data.more.clear();
        assert_eq!(data, VoteCommissionData::from_rlp(&data.to_rlp()).unwrap());
    }

    #[test]
    fn vote_update_round_trip() {
        let data = VoteUpdateData::new("v2.6", PublicKey::from([1; 32]), 777);
        assert_eq!(data, VoteUpdateData::from_rlp(&data.to_rlp()).unwrap());
    }
}
