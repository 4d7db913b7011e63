//! Error type shared by the primitive value types.

use thiserror::Error;

/// Result type for primitive operations.
pub type PrimitiveResult<T> = std::result::Result<T, PrimitiveError>;

/// Errors produced while parsing or constructing primitive values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Input does not match the expected textual or binary format.
    #[error("invalid format: {message}")]
    InvalidFormat {
        /// Human readable description of the mismatch.
        message: String,
    },

    /// A fixed-size value was constructed from a slice of the wrong length.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required number of bytes.
        expected: usize,
        /// Number of bytes actually supplied.
        actual: usize,
    },

    /// The chain id code is not part of the known network set.
    #[error("unknown chain id: {0}")]
    UnknownChainId(u8),

    /// A decimal amount carries more than 18 significant fractional digits.
    #[error("amount {value:?} exceeds {} decimal places", crate::constants::PIP_DECIMALS)]
    PrecisionLoss {
        /// The offending decimal string.
        value: String,
    },

    /// A coin ticker fails the 3-10 uppercase alphanumeric contract.
    #[error("invalid coin symbol: {message}")]
    InvalidSymbol {
        /// Human readable description of the violation.
        message: String,
    },
}
