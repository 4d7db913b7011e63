//! The operation catalogue: every transaction type the chain understands.
//!
//! `OperationType` is the closed tag registry; `Operation` is the closed
//! sum of the typed payloads. Encode and decode dispatch are exhaustive
//! matches, so an unknown tag can only ever surface as a decode error,
//! never as a defaulted variant.

pub mod candidate;
pub mod coin;
pub mod exchange;
pub mod governance;
pub mod multisig;
pub mod redeem;
pub mod send;
pub mod swap;
pub mod token;

use crate::error::{CoreError, CoreResult, FieldError};
use minter_primitives::Amount;
use minter_rlp::Rlp;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

pub use candidate::{
    DeclareCandidacyData, DelegateData, EditCandidateCommissionData, EditCandidateData,
    EditCandidatePublicKeyData, MoveStakeData, SetCandidateOffData, SetCandidateOnData,
    SetHaltBlockData, UnbondData,
};
pub use coin::{CreateCoinData, EditCoinOwnerData, RecreateCoinData};
pub use exchange::{BuyCoinData, SellAllCoinData, SellCoinData};
pub use governance::{PriceVoteData, VoteCommissionData, VoteUpdateData};
pub use multisig::MultisigData;
pub use redeem::RedeemCheckData;
pub use send::{MultisendData, SendData};
pub use swap::{
    AddLiquidityData, BuySwapPoolData, CreateSwapPoolData, RemoveLiquidityData,
    SellAllSwapPoolData, SellSwapPoolData,
};
pub use token::{TokenData, TokenSupplyData};

/// The closed set of operation tags.
///
/// Codes are part of the wire contract: chain upgrades append new tags,
/// existing tags are never renumbered.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[allow(missing_docs)] // names mirror the chain's transaction types
pub enum OperationType {
    Send = 0x01,
    SellCoin = 0x02,
    SellAllCoin = 0x03,
    BuyCoin = 0x04,
    CreateCoin = 0x05,
    DeclareCandidacy = 0x06,
    Delegate = 0x07,
    Unbond = 0x08,
    RedeemCheck = 0x09,
    SetCandidateOnline = 0x0A,
    SetCandidateOffline = 0x0B,
    CreateMultisig = 0x0C,
    Multisend = 0x0D,
    EditCandidate = 0x0E,
    SetHaltBlock = 0x0F,
    RecreateCoin = 0x10,
    EditCoinOwner = 0x11,
    EditMultisig = 0x12,
    PriceVote = 0x13,
    EditCandidatePublicKey = 0x14,
    AddLiquidity = 0x15,
    RemoveLiquidity = 0x16,
    SellSwapPool = 0x17,
    BuySwapPool = 0x18,
    SellAllSwapPool = 0x19,
    EditCandidateCommission = 0x1A,
    MoveStake = 0x1B,
    MintToken = 0x1C,
    BurnToken = 0x1D,
    CreateToken = 0x1E,
    RecreateToken = 0x1F,
    VoteCommission = 0x20,
    VoteUpdate = 0x21,
    CreateSwapPool = 0x22,
}

impl OperationType {
    /// All tags in wire order.
    pub const ALL: [OperationType; 34] = [
        OperationType::Send,
        OperationType::SellCoin,
        OperationType::SellAllCoin,
        OperationType::BuyCoin,
        OperationType::CreateCoin,
        OperationType::DeclareCandidacy,
        OperationType::Delegate,
        OperationType::Unbond,
        OperationType::RedeemCheck,
        OperationType::SetCandidateOnline,
        OperationType::SetCandidateOffline,
        OperationType::CreateMultisig,
        OperationType::Multisend,
        OperationType::EditCandidate,
        OperationType::SetHaltBlock,
        OperationType::RecreateCoin,
        OperationType::EditCoinOwner,
        OperationType::EditMultisig,
        OperationType::PriceVote,
        OperationType::EditCandidatePublicKey,
        OperationType::AddLiquidity,
        OperationType::RemoveLiquidity,
        OperationType::SellSwapPool,
        OperationType::BuySwapPool,
        OperationType::SellAllSwapPool,
        OperationType::EditCandidateCommission,
        OperationType::MoveStake,
        OperationType::MintToken,
        OperationType::BurnToken,
        OperationType::CreateToken,
        OperationType::RecreateToken,
        OperationType::VoteCommission,
        OperationType::VoteUpdate,
        OperationType::CreateSwapPool,
    ];

    /// Returns the wire code of this tag.
    #[inline]
    #[must_use]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Looks a tag up by wire code, failing closed on unknown values.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownOperationType` for codes outside the
    /// catalogue.
    pub fn from_code(code: u8) -> CoreResult<Self> {
        match code {
            0x01 => Ok(OperationType::Send),
            0x02 => Ok(OperationType::SellCoin),
            0x03 => Ok(OperationType::SellAllCoin),
            0x04 => Ok(OperationType::BuyCoin),
            0x05 => Ok(OperationType::CreateCoin),
            0x06 => Ok(OperationType::DeclareCandidacy),
            0x07 => Ok(OperationType::Delegate),
            0x08 => Ok(OperationType::Unbond),
            0x09 => Ok(OperationType::RedeemCheck),
            0x0A => Ok(OperationType::SetCandidateOnline),
            0x0B => Ok(OperationType::SetCandidateOffline),
            0x0C => Ok(OperationType::CreateMultisig),
            0x0D => Ok(OperationType::Multisend),
            0x0E => Ok(OperationType::EditCandidate),
            0x0F => Ok(OperationType::SetHaltBlock),
            0x10 => Ok(OperationType::RecreateCoin),
            0x11 => Ok(OperationType::EditCoinOwner),
            0x12 => Ok(OperationType::EditMultisig),
            0x13 => Ok(OperationType::PriceVote),
            0x14 => Ok(OperationType::EditCandidatePublicKey),
            0x15 => Ok(OperationType::AddLiquidity),
            0x16 => Ok(OperationType::RemoveLiquidity),
            0x17 => Ok(OperationType::SellSwapPool),
            0x18 => Ok(OperationType::BuySwapPool),
            0x19 => Ok(OperationType::SellAllSwapPool),
            0x1A => Ok(OperationType::EditCandidateCommission),
            0x1B => Ok(OperationType::MoveStake),
            0x1C => Ok(OperationType::MintToken),
            0x1D => Ok(OperationType::BurnToken),
            0x1E => Ok(OperationType::CreateToken),
            0x1F => Ok(OperationType::RecreateToken),
            0x20 => Ok(OperationType::VoteCommission),
            0x21 => Ok(OperationType::VoteUpdate),
            0x22 => Ok(OperationType::CreateSwapPool),
            other => Err(CoreError::UnknownOperationType(other)),
        }
    }

    /// Returns the display name of this tag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            OperationType::Send => "send",
            OperationType::SellCoin => "sell coin",
            OperationType::SellAllCoin => "sell all coin",
            OperationType::BuyCoin => "buy coin",
            OperationType::CreateCoin => "create coin",
            OperationType::DeclareCandidacy => "declare candidacy",
            OperationType::Delegate => "delegate",
            OperationType::Unbond => "unbond",
            OperationType::RedeemCheck => "redeem check",
            OperationType::SetCandidateOnline => "set candidate online",
            OperationType::SetCandidateOffline => "set candidate offline",
            OperationType::CreateMultisig => "create multisig address",
            OperationType::Multisend => "multisend",
            OperationType::EditCandidate => "edit candidate",
            OperationType::SetHaltBlock => "set halt block",
            OperationType::RecreateCoin => "recreate coin",
            OperationType::EditCoinOwner => "edit coin owner",
            OperationType::EditMultisig => "edit multisig",
            OperationType::PriceVote => "price vote",
            OperationType::EditCandidatePublicKey => "edit candidate public key",
            OperationType::AddLiquidity => "add liquidity",
            OperationType::RemoveLiquidity => "remove liquidity",
            OperationType::SellSwapPool => "sell from swap pool",
            OperationType::BuySwapPool => "buy from swap pool",
            OperationType::SellAllSwapPool => "sell all from swap pool",
            OperationType::EditCandidateCommission => "edit candidate commission",
            OperationType::MoveStake => "move stake",
            OperationType::MintToken => "mint token",
            OperationType::BurnToken => "burn token",
            OperationType::CreateToken => "create token",
            OperationType::RecreateToken => "recreate token",
            OperationType::VoteCommission => "vote for commission",
            OperationType::VoteUpdate => "vote for update",
            OperationType::CreateSwapPool => "create swap pool",
        }
    }

    /// Returns the base fee of this operation in pips.
    ///
    /// Informational only: clients use it for fee estimation, the chain
    /// prices the final commission. Multisend adds a per-extra-recipient
    /// delta on top of its base.
    #[must_use]
    pub fn base_fee(&self) -> Amount {
        // The table is kept in thousandths of the base unit.
        let millis: u64 = match self {
            OperationType::Send => 10,
            OperationType::SellCoin => 100,
            OperationType::SellAllCoin => 100,
            OperationType::BuyCoin => 100,
            OperationType::CreateCoin => 1_000,
            OperationType::DeclareCandidacy => 10_000,
            OperationType::Delegate => 200,
            OperationType::Unbond => 200,
            OperationType::RedeemCheck => 30,
            OperationType::SetCandidateOnline => 100,
            OperationType::SetCandidateOffline => 100,
            OperationType::CreateMultisig => 100,
            OperationType::Multisend => 10,
            OperationType::EditCandidate => 10_000,
            OperationType::SetHaltBlock => 1_000,
            OperationType::RecreateCoin => 10_000,
            OperationType::EditCoinOwner => 10_000,
            OperationType::EditMultisig => 1_000,
            OperationType::PriceVote => 10,
            OperationType::EditCandidatePublicKey => 100_000,
            OperationType::AddLiquidity => 100,
            OperationType::RemoveLiquidity => 100,
            OperationType::SellSwapPool => 100,
            OperationType::BuySwapPool => 100,
            OperationType::SellAllSwapPool => 100,
            OperationType::EditCandidateCommission => 1_000,
            OperationType::MoveStake => 200,
            OperationType::MintToken => 100,
            OperationType::BurnToken => 100,
            OperationType::CreateToken => 1_000,
            OperationType::RecreateToken => 10_000,
            OperationType::VoteCommission => 1_000,
            OperationType::VoteUpdate => 1_000,
            OperationType::CreateSwapPool => 1_000,
        };
        Amount::from_pips(BigUint::from(millis) * BigUint::from(10u8).pow(15))
    }
}

/// A typed operation payload; one variant per [`OperationType`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)] // variants mirror the tag registry
pub enum Operation {
    Send(SendData),
    SellCoin(SellCoinData),
    SellAllCoin(SellAllCoinData),
    BuyCoin(BuyCoinData),
    CreateCoin(CreateCoinData),
    DeclareCandidacy(DeclareCandidacyData),
    Delegate(DelegateData),
    Unbond(UnbondData),
    RedeemCheck(RedeemCheckData),
    SetCandidateOnline(SetCandidateOnData),
    SetCandidateOffline(SetCandidateOffData),
    CreateMultisig(MultisigData),
    Multisend(MultisendData),
    EditCandidate(EditCandidateData),
    SetHaltBlock(SetHaltBlockData),
    RecreateCoin(RecreateCoinData),
    EditCoinOwner(EditCoinOwnerData),
    EditMultisig(MultisigData),
    PriceVote(PriceVoteData),
    EditCandidatePublicKey(EditCandidatePublicKeyData),
    AddLiquidity(AddLiquidityData),
    RemoveLiquidity(RemoveLiquidityData),
    SellSwapPool(SellSwapPoolData),
    BuySwapPool(BuySwapPoolData),
    SellAllSwapPool(SellAllSwapPoolData),
    EditCandidateCommission(EditCandidateCommissionData),
    MoveStake(MoveStakeData),
    MintToken(TokenSupplyData),
    BurnToken(TokenSupplyData),
    CreateToken(TokenData),
    RecreateToken(TokenData),
    VoteCommission(Box<VoteCommissionData>),
    VoteUpdate(VoteUpdateData),
    CreateSwapPool(CreateSwapPoolData),
}

impl Operation {
    /// Returns the tag of this operation.
    #[must_use]
    pub const fn operation_type(&self) -> OperationType {
        match self {
            Operation::Send(_) => OperationType::Send,
            Operation::SellCoin(_) => OperationType::SellCoin,
            Operation::SellAllCoin(_) => OperationType::SellAllCoin,
            Operation::BuyCoin(_) => OperationType::BuyCoin,
            Operation::CreateCoin(_) => OperationType::CreateCoin,
            Operation::DeclareCandidacy(_) => OperationType::DeclareCandidacy,
            Operation::Delegate(_) => OperationType::Delegate,
            Operation::Unbond(_) => OperationType::Unbond,
            Operation::RedeemCheck(_) => OperationType::RedeemCheck,
            Operation::SetCandidateOnline(_) => OperationType::SetCandidateOnline,
            Operation::SetCandidateOffline(_) => OperationType::SetCandidateOffline,
            Operation::CreateMultisig(_) => OperationType::CreateMultisig,
            Operation::Multisend(_) => OperationType::Multisend,
            Operation::EditCandidate(_) => OperationType::EditCandidate,
            Operation::SetHaltBlock(_) => OperationType::SetHaltBlock,
            Operation::RecreateCoin(_) => OperationType::RecreateCoin,
            Operation::EditCoinOwner(_) => OperationType::EditCoinOwner,
            Operation::EditMultisig(_) => OperationType::EditMultisig,
            Operation::PriceVote(_) => OperationType::PriceVote,
            Operation::EditCandidatePublicKey(_) => OperationType::EditCandidatePublicKey,
            Operation::AddLiquidity(_) => OperationType::AddLiquidity,
            Operation::RemoveLiquidity(_) => OperationType::RemoveLiquidity,
            Operation::SellSwapPool(_) => OperationType::SellSwapPool,
            Operation::BuySwapPool(_) => OperationType::BuySwapPool,
            Operation::SellAllSwapPool(_) => OperationType::SellAllSwapPool,
            Operation::EditCandidateCommission(_) => OperationType::EditCandidateCommission,
            Operation::MoveStake(_) => OperationType::MoveStake,
            Operation::MintToken(_) => OperationType::MintToken,
            Operation::BurnToken(_) => OperationType::BurnToken,
            Operation::CreateToken(_) => OperationType::CreateToken,
            Operation::RecreateToken(_) => OperationType::RecreateToken,
            Operation::VoteCommission(_) => OperationType::VoteCommission,
            Operation::VoteUpdate(_) => OperationType::VoteUpdate,
            Operation::CreateSwapPool(_) => OperationType::CreateSwapPool,
        }
    }

    /// Encodes the payload as its RLP field tuple.
    #[must_use]
    pub fn to_rlp(&self) -> Rlp {
        match self {
            Operation::Send(data) => data.to_rlp(),
            Operation::SellCoin(data) => data.to_rlp(),
            Operation::SellAllCoin(data) => data.to_rlp(),
            Operation::BuyCoin(data) => data.to_rlp(),
            Operation::CreateCoin(data) => data.to_rlp(),
            Operation::DeclareCandidacy(data) => data.to_rlp(),
            Operation::Delegate(data) => data.to_rlp(),
            Operation::Unbond(data) => data.to_rlp(),
            Operation::RedeemCheck(data) => data.to_rlp(),
            Operation::SetCandidateOnline(data) => data.to_rlp(),
            Operation::SetCandidateOffline(data) => data.to_rlp(),
            Operation::CreateMultisig(data) => data.to_rlp(),
            Operation::Multisend(data) => data.to_rlp(),
            Operation::EditCandidate(data) => data.to_rlp(),
            Operation::SetHaltBlock(data) => data.to_rlp(),
            Operation::RecreateCoin(data) => data.to_rlp(),
            Operation::EditCoinOwner(data) => data.to_rlp(),
            Operation::EditMultisig(data) => data.to_rlp(),
            Operation::PriceVote(data) => data.to_rlp(),
            Operation::EditCandidatePublicKey(data) => data.to_rlp(),
            Operation::AddLiquidity(data) => data.to_rlp(),
            Operation::RemoveLiquidity(data) => data.to_rlp(),
            Operation::SellSwapPool(data) => data.to_rlp(),
            Operation::BuySwapPool(data) => data.to_rlp(),
            Operation::SellAllSwapPool(data) => data.to_rlp(),
            Operation::EditCandidateCommission(data) => data.to_rlp(),
            Operation::MoveStake(data) => data.to_rlp(),
            Operation::MintToken(data) => data.to_rlp(),
            Operation::BurnToken(data) => data.to_rlp(),
            Operation::CreateToken(data) => data.to_rlp(),
            Operation::RecreateToken(data) => data.to_rlp(),
            Operation::VoteCommission(data) => data.to_rlp(),
            Operation::VoteUpdate(data) => data.to_rlp(),
            Operation::CreateSwapPool(data) => data.to_rlp(),
        }
    }

    /// Encodes the payload to wire bytes.
    #[must_use]
    pub fn encode_data(&self) -> Vec<u8> {
        self.to_rlp().encode()
    }

    /// Decodes a payload for the given tag from wire bytes.
    ///
    /// # Errors
    ///
    /// Any decode variant of [`CoreError`].
    pub fn decode_data(tag: OperationType, data: &[u8]) -> CoreResult<Self> {
        let rlp = Rlp::decode(data)?;
        Self::decode_rlp(tag, &rlp)
    }

    /// Decodes a payload for the given tag from an already-parsed item.
    ///
    /// # Errors
    ///
    /// Any decode variant of [`CoreError`].
    pub fn decode_rlp(tag: OperationType, rlp: &Rlp) -> CoreResult<Self> {
        Ok(match tag {
            OperationType::Send => Operation::Send(SendData::from_rlp(rlp)?),
            OperationType::SellCoin => Operation::SellCoin(SellCoinData::from_rlp(rlp)?),
            OperationType::SellAllCoin => {
                Operation::SellAllCoin(SellAllCoinData::from_rlp(rlp)?)
            }
            OperationType::BuyCoin => Operation::BuyCoin(BuyCoinData::from_rlp(rlp)?),
            OperationType::CreateCoin => Operation::CreateCoin(CreateCoinData::from_rlp(rlp)?),
            OperationType::DeclareCandidacy => {
                Operation::DeclareCandidacy(DeclareCandidacyData::from_rlp(rlp)?)
            }
            OperationType::Delegate => Operation::Delegate(DelegateData::from_rlp(rlp)?),
            OperationType::Unbond => Operation::Unbond(UnbondData::from_rlp(rlp)?),
            OperationType::RedeemCheck => {
                Operation::RedeemCheck(RedeemCheckData::from_rlp(rlp)?)
            }
            OperationType::SetCandidateOnline => {
                Operation::SetCandidateOnline(SetCandidateOnData::from_rlp(rlp)?)
            }
            OperationType::SetCandidateOffline => {
                Operation::SetCandidateOffline(SetCandidateOffData::from_rlp(rlp)?)
            }
            OperationType::CreateMultisig => {
                Operation::CreateMultisig(MultisigData::from_rlp(rlp)?)
            }
            OperationType::Multisend => Operation::Multisend(MultisendData::from_rlp(rlp)?),
            OperationType::EditCandidate => {
                Operation::EditCandidate(EditCandidateData::from_rlp(rlp)?)
            }
            OperationType::SetHaltBlock => {
                Operation::SetHaltBlock(SetHaltBlockData::from_rlp(rlp)?)
            }
            OperationType::RecreateCoin => {
                Operation::RecreateCoin(RecreateCoinData::from_rlp(rlp)?)
            }
            OperationType::EditCoinOwner => {
                Operation::EditCoinOwner(EditCoinOwnerData::from_rlp(rlp)?)
            }
            OperationType::EditMultisig => {
                Operation::EditMultisig(MultisigData::from_rlp(rlp)?)
            }
            OperationType::PriceVote => Operation::PriceVote(PriceVoteData::from_rlp(rlp)?),
            OperationType::EditCandidatePublicKey => {
                Operation::EditCandidatePublicKey(EditCandidatePublicKeyData::from_rlp(rlp)?)
            }
            OperationType::AddLiquidity => {
                Operation::AddLiquidity(AddLiquidityData::from_rlp(rlp)?)
            }
            OperationType::RemoveLiquidity => {
                Operation::RemoveLiquidity(RemoveLiquidityData::from_rlp(rlp)?)
            }
            OperationType::SellSwapPool => {
                Operation::SellSwapPool(SellSwapPoolData::from_rlp(rlp)?)
            }
            OperationType::BuySwapPool => {
                Operation::BuySwapPool(BuySwapPoolData::from_rlp(rlp)?)
            }
            OperationType::SellAllSwapPool => {
                Operation::SellAllSwapPool(SellAllSwapPoolData::from_rlp(rlp)?)
            }
            OperationType::EditCandidateCommission => {
                Operation::EditCandidateCommission(EditCandidateCommissionData::from_rlp(rlp)?)
            }
            OperationType::MoveStake => Operation::MoveStake(MoveStakeData::from_rlp(rlp)?),
            OperationType::MintToken => Operation::MintToken(TokenSupplyData::from_rlp(rlp)?),
            OperationType::BurnToken => Operation::BurnToken(TokenSupplyData::from_rlp(rlp)?),
            OperationType::CreateToken => Operation::CreateToken(TokenData::from_rlp(rlp)?),
            OperationType::RecreateToken => {
                Operation::RecreateToken(TokenData::from_rlp(rlp)?)
            }
            OperationType::VoteCommission => {
                Operation::VoteCommission(Box::new(VoteCommissionData::from_rlp(rlp)?))
            }
            OperationType::VoteUpdate => Operation::VoteUpdate(VoteUpdateData::from_rlp(rlp)?),
            OperationType::CreateSwapPool => {
                Operation::CreateSwapPool(CreateSwapPoolData::from_rlp(rlp)?)
            }
        })
    }

    /// Collects every validation problem with this payload.
    ///
    /// An empty result means the operation is ready to be built into a
    /// transaction; problems are reported together, not fail-fast.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match self {
            Operation::Send(data) => data.validate(&mut errors),
            Operation::SellCoin(data) => data.validate(&mut errors),
            Operation::SellAllCoin(data) => data.validate(&mut errors),
            Operation::BuyCoin(data) => data.validate(&mut errors),
            Operation::CreateCoin(data) => data.validate(&mut errors),
            Operation::DeclareCandidacy(data) => data.validate(&mut errors),
            Operation::Delegate(data) => data.validate(&mut errors),
            Operation::Unbond(data) => data.validate(&mut errors),
            Operation::RedeemCheck(data) => data.validate(&mut errors),
            Operation::SetCandidateOnline(data) => data.validate(&mut errors),
            Operation::SetCandidateOffline(data) => data.validate(&mut errors),
            Operation::CreateMultisig(data) => data.validate(&mut errors),
            Operation::Multisend(data) => data.validate(&mut errors),
            Operation::EditCandidate(data) => data.validate(&mut errors),
            Operation::SetHaltBlock(data) => data.validate(&mut errors),
            Operation::RecreateCoin(data) => data.validate(&mut errors),
            Operation::EditCoinOwner(data) => data.validate(&mut errors),
            Operation::EditMultisig(data) => data.validate(&mut errors),
            Operation::PriceVote(data) => data.validate(&mut errors),
            Operation::EditCandidatePublicKey(data) => data.validate(&mut errors),
            Operation::AddLiquidity(data) => data.validate(&mut errors),
            Operation::RemoveLiquidity(data) => data.validate(&mut errors),
            Operation::SellSwapPool(data) => data.validate(&mut errors),
            Operation::BuySwapPool(data) => data.validate(&mut errors),
            Operation::SellAllSwapPool(data) => data.validate(&mut errors),
            Operation::EditCandidateCommission(data) => data.validate(&mut errors),
            Operation::MoveStake(data) => data.validate(&mut errors),
            Operation::MintToken(data) => data.validate(&mut errors),
            Operation::BurnToken(data) => data.validate(&mut errors),
            Operation::CreateToken(data) => data.validate(&mut errors),
            Operation::RecreateToken(data) => data.validate(&mut errors),
            Operation::VoteCommission(data) => data.validate(&mut errors),
            Operation::VoteUpdate(data) => data.validate(&mut errors),
            Operation::CreateSwapPool(data) => data.validate(&mut errors),
        }
        errors
    }
}
