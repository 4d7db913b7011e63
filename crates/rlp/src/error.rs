//! RLP decode error type.

use thiserror::Error;

/// Result type for RLP operations.
pub type RlpResult<T> = std::result::Result<T, RlpError>;

/// Errors produced while decoding RLP data or reading typed values out of
/// decoded items.
///
/// Decoding is total: every malformed input maps to one of these variants,
/// never to partial or defaulted data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RlpError {
    /// The input ended before the announced item length.
    #[error("truncated input: need {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        /// Number of bytes the current item requires.
        needed: usize,
        /// Offset at which the requirement arose.
        offset: usize,
        /// Number of bytes actually remaining.
        available: usize,
    },

    /// Well-formed item followed by unconsumed bytes.
    #[error("trailing bytes: item ends at {consumed}, input has {total} bytes")]
    TrailingBytes {
        /// Bytes consumed by the decoded item.
        consumed: usize,
        /// Total input length.
        total: usize,
    },

    /// The encoding is valid-shaped but not the canonical form (a
    /// single byte below 0x80 wrapped in a string header, a long form used
    /// for a short length, or length bytes with a leading zero).
    #[error("non-canonical encoding at offset {offset}: {message}")]
    NonCanonical {
        /// Offset of the offending header.
        offset: usize,
        /// Human readable description.
        message: String,
    },

    /// An announced length does not fit in memory on this platform.
    #[error("length overflow at offset {offset}")]
    LengthOverflow {
        /// Offset of the offending header.
        offset: usize,
    },

    /// A list item ran past the end of its enclosing list payload.
    #[error("list item at offset {offset} overruns its list")]
    ListItemOverrun {
        /// Offset of the offending item.
        offset: usize,
    },

    /// A byte string was required but a list was found.
    #[error("expected a byte string, found a list")]
    ExpectedBytes,

    /// A list was required but a byte string was found.
    #[error("expected a list, found a byte string")]
    ExpectedList,

    /// An integer field does not fit the requested width.
    #[error("integer does not fit in {width} bits")]
    IntegerOverflow {
        /// Requested width in bits.
        width: u32,
    },

    /// An integer field carries a redundant leading zero byte.
    #[error("integer field has a leading zero byte")]
    LeadingZero,
}
