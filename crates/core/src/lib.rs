//! # Minter Core
//!
//! Transaction construction, canonical encoding, signing and decoding.
//!
//! This crate owns the operation catalogue, the transaction envelope with
//! its single/multi signature shapes, the reduced interchange form used by
//! deep links, and the bearer-check sub-protocol. The wire format is RLP
//! throughout; hashing is Keccak-256 over canonical bytes; signatures are
//! recoverable secp256k1 ECDSA.
//!
//! The type system enforces the transaction lifecycle: a
//! [`transaction::TransactionBuilder`] accumulates fields, `build()`
//! validates everything at once, and signing consumes the unsigned value
//! into an immutable [`transaction::SignedTransaction`].

pub mod check;
pub mod error;
pub mod external;
pub mod operation;
pub mod signature;
pub mod transaction;

mod wire;

// Re-export main types
pub use check::{redeem_proof, verify_redeem_proof, Check, CheckBuilder};
pub use error::{CoreError, CoreResult, FieldError};
pub use external::ExternalTransaction;
pub use operation::{Operation, OperationType};
pub use signature::{MultiSignature, SignatureData, SignatureType, SingleSignature};
pub use transaction::{SignedTransaction, Transaction, TransactionBuilder, TxHash};
