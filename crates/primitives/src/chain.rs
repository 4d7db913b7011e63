//! Network identifiers.

use crate::error::{PrimitiveError, PrimitiveResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the network a transaction is bound to.
///
/// The numeric code is part of the signed payload; decoding an unknown code
/// fails closed rather than defaulting to any network.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ChainId {
    /// The production network.
    MainNet = 1,
    /// The public test network.
    TestNet = 2,
}

impl ChainId {
    /// Returns the stable wire code of this network.
    #[inline]
    #[must_use]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Looks a network up by wire code.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::UnknownChainId` for codes outside the known
    /// network set.
    pub fn from_code(code: u8) -> PrimitiveResult<Self> {
        match code {
            1 => Ok(ChainId::MainNet),
            2 => Ok(ChainId::TestNet),
            other => Err(PrimitiveError::UnknownChainId(other)),
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainId::MainNet => write!(f, "mainnet"),
            ChainId::TestNet => write!(f, "testnet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(1, ChainId::MainNet.code());
        assert_eq!(2, ChainId::TestNet.code());
    }

    #[test]
    fn from_code_round_trips() {
        for chain in [ChainId::MainNet, ChainId::TestNet] {
            assert_eq!(chain, ChainId::from_code(chain.code()).unwrap());
        }
    }

    #[test]
    fn unknown_code_fails_closed() {
        for code in [0u8, 3, 9, 255] {
            assert_eq!(
                Err(PrimitiveError::UnknownChainId(code)),
                ChainId::from_code(code)
            );
        }
    }
}
