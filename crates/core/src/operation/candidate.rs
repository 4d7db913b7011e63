//! Validator candidacy and stake management.

use crate::error::{CoreResult, FieldError};
use crate::wire::{
    address_field, address_rlp, amount_field, amount_rlp, coin_field, coin_rlp, expect_fields,
    public_key_field, public_key_rlp, u32_field, u64_field,
};
use minter_primitives::{Address, Amount, CoinId, PublicKey};
use minter_rlp::Rlp;
use serde::{Deserialize, Serialize};

fn check_commission(commission: u32, errors: &mut Vec<FieldError>) {
    if commission > 100 {
        errors.push(FieldError::new(
            "commission",
            format!("commission must be 0-100, got {commission}"),
        ));
    }
}

/// Declares a new validator candidate.
///
/// Wire field order: `(address, pub_key, commission, coin, stake)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareCandidacyData {
    /// Reward address of the candidate.
    pub address: Address,
    /// Candidate public key.
    pub pub_key: PublicKey,
    /// Reward commission, 0-100 percent.
    pub commission: u32,
    /// Coin of the initial stake.
    pub coin: CoinId,
    /// Initial stake in pips, strictly positive.
    pub stake: Amount,
}

impl DeclareCandidacyData {
    /// Creates a candidacy declaration.
    pub fn new(
        address: Address,
        pub_key: PublicKey,
        commission: u32,
        coin: CoinId,
        stake: Amount,
    ) -> Self {
        Self {
            address,
            pub_key,
            commission,
            coin,
            stake,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            address_rlp(&self.address),
            public_key_rlp(&self.pub_key),
            Rlp::from_u64(u64::from(self.commission)),
            coin_rlp(self.coin),
            amount_rlp(&self.stake),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [address, pub_key, commission, coin, stake] =
            expect_fields::<5>(rlp, "declare candidacy")?;
        Ok(Self {
            address: address_field(address, "address")?,
            pub_key: public_key_field(pub_key, "pub_key")?,
            commission: u32_field(commission, "commission")?,
            coin: coin_field(coin, "coin")?,
            stake: amount_field(stake, "stake")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        check_commission(self.commission, errors);
        if self.stake.is_zero() {
            errors.push(FieldError::new("stake", "stake must be positive"));
        }
    }
}

/// Delegates a stake to a candidate (also the wire shape of unbonding).
///
/// Wire field order: `(pub_key, coin, value)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateData {
    /// Candidate public key.
    pub pub_key: PublicKey,
    /// Coin being delegated.
    pub coin: CoinId,
    /// Value in pips.
    pub value: Amount,
}

impl DelegateData {
    /// Creates a delegation.
    pub fn new(pub_key: PublicKey, coin: CoinId, value: Amount) -> Self {
        Self {
            pub_key,
            coin,
            value,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            public_key_rlp(&self.pub_key),
            coin_rlp(self.coin),
            amount_rlp(&self.value),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [pub_key, coin, value] = expect_fields::<3>(rlp, "delegate")?;
        Ok(Self {
            pub_key: public_key_field(pub_key, "pub_key")?,
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

/// Withdraws a delegated stake; same wire shape as delegation.
pub type UnbondData = DelegateData;

/// Turns a candidate on for block signing.
///
/// Wire field order: `(pub_key)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCandidateOnData {
    /// Candidate public key.
    pub pub_key: PublicKey,
}

impl SetCandidateOnData {
    /// Creates a switch-on operation.
    pub fn new(pub_key: PublicKey) -> Self {
        Self { pub_key }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![public_key_rlp(&self.pub_key)])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [pub_key] = expect_fields::<1>(rlp, "set candidate online")?;
        Ok(Self {
            pub_key: public_key_field(pub_key, "pub_key")?,
        })
    }

    pub(crate) fn validate(&self, _errors: &mut Vec<FieldError>) {}
}

/// Turns a candidate off; same wire shape as switching on.
pub type SetCandidateOffData = SetCandidateOnData;

/// Rotates the reward, owner and control addresses of a candidate.
///
/// Wire field order: `(pub_key, reward_address, owner_address,
/// control_address)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCandidateData {
    /// Candidate public key.
    pub pub_key: PublicKey,
    /// Address receiving rewards.
    pub reward_address: Address,
    /// Address owning the candidate.
    pub owner_address: Address,
    /// Address allowed to manage on/off state.
    pub control_address: Address,
}

impl EditCandidateData {
    /// Creates a candidate-edit operation.
    pub fn new(
        pub_key: PublicKey,
        reward_address: Address,
        owner_address: Address,
        control_address: Address,
    ) -> Self {
        Self {
            pub_key,
            reward_address,
            owner_address,
            control_address,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            public_key_rlp(&self.pub_key),
            address_rlp(&self.reward_address),
            address_rlp(&self.owner_address),
            address_rlp(&self.control_address),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [pub_key, reward, owner, control] = expect_fields::<4>(rlp, "edit candidate")?;
        Ok(Self {
            pub_key: public_key_field(pub_key, "pub_key")?,
            reward_address: address_field(reward, "reward_address")?,
            owner_address: address_field(owner, "owner_address")?,
            control_address: address_field(control, "control_address")?,
        })
    }

    pub(crate) fn validate(&self, _errors: &mut Vec<FieldError>) {}
}

/// Replaces a candidate's public key.
///
/// Wire field order: `(pub_key, new_pub_key)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCandidatePublicKeyData {
    /// Current candidate public key.
    pub pub_key: PublicKey,
    /// Replacement public key.
    pub new_pub_key: PublicKey,
}

impl EditCandidatePublicKeyData {
    /// Creates a key-rotation operation.
    pub fn new(pub_key: PublicKey, new_pub_key: PublicKey) -> Self {
        Self {
            pub_key,
            new_pub_key,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            public_key_rlp(&self.pub_key),
            public_key_rlp(&self.new_pub_key),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [pub_key, new_pub_key] = expect_fields::<2>(rlp, "edit candidate public key")?;
        Ok(Self {
            pub_key: public_key_field(pub_key, "pub_key")?,
            new_pub_key: public_key_field(new_pub_key, "new_pub_key")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.pub_key == self.new_pub_key {
            errors.push(FieldError::new(
                "new_pub_key",
                "new public key must differ from the current one",
            ));
        }
    }
}

/// Changes a candidate's reward commission.
///
/// Wire field order: `(pub_key, commission)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCandidateCommissionData {
    /// Candidate public key.
    pub pub_key: PublicKey,
    /// New commission, 0-100 percent.
    pub commission: u32,
}

impl EditCandidateCommissionData {
    /// Creates a commission-change operation.
    pub fn new(pub_key: PublicKey, commission: u32) -> Self {
        Self {
            pub_key,
            commission,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            public_key_rlp(&self.pub_key),
            Rlp::from_u64(u64::from(self.commission)),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [pub_key, commission] = expect_fields::<2>(rlp, "edit candidate commission")?;
        Ok(Self {
            pub_key: public_key_field(pub_key, "pub_key")?,
            commission: u32_field(commission, "commission")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        check_commission(self.commission, errors);
    }
}

/// Moves a stake between two candidates without unbonding.
///
/// Wire field order: `(from_pub_key, to_pub_key, coin, stake)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStakeData {
    /// Candidate the stake leaves.
    pub from_pub_key: PublicKey,
    /// Candidate the stake joins.
    pub to_pub_key: PublicKey,
    /// Coin of the stake.
    pub coin: CoinId,
    /// Stake value in pips.
    pub stake: Amount,
}

impl MoveStakeData {
    /// Creates a stake-move operation.
    pub fn new(from_pub_key: PublicKey, to_pub_key: PublicKey, coin: CoinId, stake: Amount) -> Self {
        Self {
            from_pub_key,
            to_pub_key,
            coin,
            stake,
        }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            public_key_rlp(&self.from_pub_key),
            public_key_rlp(&self.to_pub_key),
            coin_rlp(self.coin),
            amount_rlp(&self.stake),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [from, to, coin, stake] = expect_fields::<4>(rlp, "move stake")?;
        Ok(Self {
            from_pub_key: public_key_field(from, "from_pub_key")?,
            to_pub_key: public_key_field(to, "to_pub_key")?,
            coin: coin_field(coin, "coin")?,
            stake: amount_field(stake, "stake")?,
        })
    }

    pub(crate) fn validate(&self, errors: &mut Vec<FieldError>) {
        if self.from_pub_key == self.to_pub_key {
            errors.push(FieldError::new(
                "to_pub_key",
                "target candidate must differ from the source",
            ));
        }
        if self.stake.is_zero() {
            errors.push(FieldError::new("stake", "stake must be positive"));
        }
    }
}

/// Schedules a halt vote at a given height.
///
/// Wire field order: `(pub_key, height)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetHaltBlockData {
    /// Candidate public key casting the vote.
    pub pub_key: PublicKey,
    /// Block height to halt at.
    pub height: u64,
}

impl SetHaltBlockData {
    /// Creates a halt vote.
    pub fn new(pub_key: PublicKey, height: u64) -> Self {
        Self { pub_key, height }
    }

    pub(crate) fn to_rlp(&self) -> Rlp {
        Rlp::list(vec![
            public_key_rlp(&self.pub_key),
            Rlp::from_u64(self.height),
        ])
    }

    pub(crate) fn from_rlp(rlp: &Rlp) -> CoreResult<Self> {
        let [pub_key, height] = expect_fields::<2>(rlp, "set halt block")?;
        Ok(Self {
            pub_key: public_key_field(pub_key, "pub_key")?,
            height: u64_field(height, "height")?,
        })
    }

    pub(crate) fn validate(&self, _errors: &mut Vec<FieldError>) {}
}
