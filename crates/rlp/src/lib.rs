//! # Minter RLP
//!
//! Recursive-length-prefix codec used by the transaction wire format.
//!
//! RLP serializes exactly two shapes - byte strings and lists of items -
//! which is all the transaction envelope, operation payloads and checks
//! need. This crate provides:
//!
//! - [`Rlp`]: the value model (`Bytes` | `List`)
//! - [`encode`]: canonical serialization
//! - [`decode`]: strict, total deserialization (truncation, trailing bytes
//!   and non-canonical forms are errors, never partial data)
//! - typed accessors bridging byte strings to unsigned big integers with
//!   the minimal-encoding rules the chain expects

mod decode;
mod encode;
mod error;
mod value;

pub use decode::decode;
pub use encode::{encode, encode_into};
pub use error::{RlpError, RlpResult};
pub use value::Rlp;
