//! Error taxonomy for transaction construction and decoding.
//!
//! Three families of failure exist:
//!
//! - **decode errors** - malformed wire data; always fail closed, never a
//!   default value
//! - **validation errors** - collected per-field problems with an
//!   operation, raised once when the operation is built into a transaction
//! - **precondition errors** - a builder used without its required fields

use minter_cryptography::CryptoError;
use minter_primitives::PrimitiveError;
use minter_rlp::RlpError;
use std::fmt;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// A single named validation failure on an operation field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors produced by transaction construction, signing and decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Malformed wire data: wrong element count, wrong fixed-field length,
    /// or a field that does not parse as its declared shape.
    #[error("decode error: {message}")]
    Decode {
        /// Human readable description of the mismatch.
        message: String,
    },

    /// The operation tag is not part of the catalogue.
    #[error("decode error: unknown operation type 0x{0:02x}")]
    UnknownOperationType(u8),

    /// The signature-type code is neither single nor multi.
    #[error("decode error: unknown signature type 0x{0:02x}")]
    UnknownSignatureType(u8),

    /// The operation carries invalid data; every problem is reported.
    #[error("operation has invalid data: {fields:?}")]
    InvalidOperationData {
        /// The collected per-field failures.
        fields: Vec<FieldError>,
    },

    /// A builder was finalized without one of its required fields.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The payload exceeds the wire limit.
    #[error("payload too large: {actual} bytes exceeds the {max} byte limit")]
    PayloadTooLarge {
        /// Supplied payload length.
        actual: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// RLP-level failure while decoding wire bytes.
    #[error("rlp error: {0}")]
    Rlp(#[from] RlpError),

    /// Primitive value failure (bad chain id, address length, amount).
    #[error("primitive error: {0}")]
    Primitive(#[from] PrimitiveError),

    /// Cryptographic failure while signing or recovering.
    #[error("cryptography error: {0}")]
    Crypto(#[from] CryptoError),
}

impl CoreError {
    /// Shorthand for a decode error with a formatted message.
    pub fn decode(message: impl Into<String>) -> Self {
        CoreError::Decode {
            message: message.into(),
        }
    }
}
