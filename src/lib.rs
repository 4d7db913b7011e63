//! # Minter-RS: transaction codec and signing core
//!
//! A client-side library for constructing, encoding, signing and decoding
//! transactions for Minter-style account-based blockchains.
//!
//! This library provides the complete offline transaction pipeline:
//! - Canonical RLP binary encoding and strict decoding
//! - The full operation catalogue (send, coin conversion, delegation,
//!   multisig management, swap pools, tokens, governance votes)
//! - Single and multi-signature envelopes over recoverable secp256k1 ECDSA
//! - Bearer checks with passphrase locks and redemption proofs
//! - The reduced, signature-free interchange form used by deep links
//!
//! ## Quick Start
//!
//! ```rust
//! use minter_rs::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let key = PrivateKey::from_hex(
//!         "07bc17abdcee8b971bb8723e36fe9d2523306d5ab2d683631693238e0f9df142",
//!     )?;
//!     let to: Address = "Mx31e61a05adbd13c6b625262704bc305bf7725026".parse()?;
//!
//!     let tx = TransactionBuilder::new(ChainId::MainNet)
//!         .nonce(1)
//!         .operation(Operation::Send(SendData::new(
//!             CoinId::BASE,
//!             to,
//!             Amount::from_decimal("0.012345")?,
//!         )))
//!         .build()?;
//!
//!     let signed = tx.sign(&key)?;
//!     println!("{}", signed.to_hex());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The implementation is organized into layered crates:
//!
//! - [`minter_primitives`] - addresses, public keys, coin ids, pip amounts
//! - [`minter_rlp`] - the recursive-length-prefix wire codec
//! - [`minter_cryptography`] - hashing and recoverable ECDSA
//! - [`minter_core`] - operations, the transaction envelope, checks

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Re-export all public APIs from the member crates
pub use minter_core as core;
pub use minter_cryptography as crypto;
pub use minter_primitives as primitives;
pub use minter_rlp as rlp;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use minter_core::check::{Check, CheckBuilder};
    pub use minter_core::external::ExternalTransaction;
    pub use minter_core::operation::{Operation, OperationType};
    pub use minter_core::operation::send::{MultisendData, SendData};
    pub use minter_core::signature::{
        MultiSignature, SignatureData, SignatureType, SingleSignature,
    };
    pub use minter_core::transaction::{SignedTransaction, Transaction, TransactionBuilder};
    pub use minter_core::{CoreError, CoreResult};
    pub use minter_cryptography::{PrivateKey, Signature};
    pub use minter_primitives::{Address, Amount, ChainId, CoinId, CoinSymbol, PublicKey};
}
