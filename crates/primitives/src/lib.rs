//! # Minter Primitives
//!
//! Fundamental types for the Minter transaction codec.
//!
//! This crate provides the value types used throughout the workspace:
//! - `Address`: 20-byte account address (`Mx`-prefixed in text form)
//! - `PublicKey`: 32-byte candidate/validator public key (`Mp`-prefixed)
//! - `CoinId`: numeric coin identifier
//! - `CoinSymbol`: 3-10 character coin ticker with its 10-byte wire padding
//! - `Amount`: arbitrary-precision value counted in pips (10^-18)
//! - `ChainId`: network identifier with a stable wire code
//!
//! ## Design Principles
//!
//! - **Zero dependencies on other minter-* crates**
//! - **Fail closed**: malformed input is an error, never a default value
//! - **Exact arithmetic**: decimal conversion never touches floating point

pub mod address;
pub mod amount;
pub mod chain;
pub mod coin;
pub mod constants;
pub mod error;
pub mod public_key;

// Re-exports
pub use address::Address;
pub use amount::Amount;
pub use chain::ChainId;
pub use coin::{CoinId, CoinSymbol};
pub use constants::*;
pub use error::{PrimitiveError, PrimitiveResult};
pub use public_key::PublicKey;
