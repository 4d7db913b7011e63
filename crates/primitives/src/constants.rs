//! Shared size and format constants.

/// The length of an account address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// The length of a candidate/validator public key in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// The length of a check redemption proof (r || s || v) in bytes.
pub const PROOF_SIZE: usize = 65;

/// Maximum transaction payload length in bytes.
pub const MAX_PAYLOAD_SIZE: usize = 10_000;

/// Maximum coin name length in UTF-8 bytes.
pub const MAX_COIN_NAME_BYTES: usize = 64;

/// Minimum coin ticker length in characters.
pub const TICKER_MIN_LEN: usize = 3;

/// Maximum coin ticker length in characters; tickers are NUL-padded to
/// exactly this many bytes on the wire.
pub const TICKER_MAX_LEN: usize = 10;

/// Number of decimal places in the base unit; one pip is 10^-18.
pub const PIP_DECIMALS: u32 = 18;

/// Maximum length of a check nonce in bytes.
pub const MAX_CHECK_NONCE_SIZE: usize = 16;

/// Text prefix of an account address.
pub const ADDRESS_PREFIX: &str = "Mx";

/// Text prefix of a public key.
pub const PUBLIC_KEY_PREFIX: &str = "Mp";

/// Text prefix of a transaction hash.
pub const TX_HASH_PREFIX: &str = "Mt";

/// Text prefix of an encoded check.
pub const CHECK_PREFIX: &str = "Mc";
