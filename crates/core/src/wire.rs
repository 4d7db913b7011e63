//! Positional field extraction for operation payloads.
//!
//! Every operation decodes its RLP list by index. These helpers centralize
//! the index contract: a wrong element count or a field of the wrong shape
//! is a decode error naming the field, never a default value.

use crate::error::{CoreError, CoreResult};
use minter_primitives::{Address, Amount, CoinId, CoinSymbol, PublicKey};
use minter_rlp::Rlp;

/// Borrows a list of exactly `N` fields out of an operation payload.
pub(crate) fn expect_fields<'a, const N: usize>(
    rlp: &'a Rlp,
    what: &'static str,
) -> CoreResult<&'a [Rlp; N]> {
    let items = rlp
        .as_list()
        .map_err(|_| CoreError::decode(format!("{what}: expected a field list")))?;
    <&[Rlp; N]>::try_from(items).map_err(|_| {
        CoreError::decode(format!(
            "{what}: expected {N} fields, got {}",
            items.len()
        ))
    })
}

/// Borrows a list of at least `min` fields (variable-arity payloads).
pub(crate) fn expect_min_fields<'a>(
    rlp: &'a Rlp,
    min: usize,
    what: &'static str,
) -> CoreResult<&'a [Rlp]> {
    let items = rlp
        .as_list()
        .map_err(|_| CoreError::decode(format!("{what}: expected a field list")))?;
    if items.len() < min {
        return Err(CoreError::decode(format!(
            "{what}: expected at least {min} fields, got {}",
            items.len()
        )));
    }
    Ok(items)
}

pub(crate) fn bytes_field(item: &Rlp, field: &'static str) -> CoreResult<Vec<u8>> {
    Ok(item
        .as_bytes()
        .map_err(|_| CoreError::decode(format!("{field}: expected bytes")))?
        .to_vec())
}

pub(crate) fn address_field(item: &Rlp, field: &'static str) -> CoreResult<Address> {
    let bytes = item
        .as_bytes()
        .map_err(|_| CoreError::decode(format!("{field}: expected bytes")))?;
    Address::from_bytes(bytes)
        .map_err(|e| CoreError::decode(format!("{field}: {e}")))
}

pub(crate) fn public_key_field(item: &Rlp, field: &'static str) -> CoreResult<PublicKey> {
    let bytes = item
        .as_bytes()
        .map_err(|_| CoreError::decode(format!("{field}: expected bytes")))?;
    PublicKey::from_bytes(bytes)
        .map_err(|e| CoreError::decode(format!("{field}: {e}")))
}

pub(crate) fn amount_field(item: &Rlp, field: &'static str) -> CoreResult<Amount> {
    Ok(Amount::from_pips(item.as_uint().map_err(|e| {
        CoreError::decode(format!("{field}: {e}"))
    })?))
}

pub(crate) fn coin_field(item: &Rlp, field: &'static str) -> CoreResult<CoinId> {
    Ok(CoinId::from(item.as_u32().map_err(|e| {
        CoreError::decode(format!("{field}: {e}"))
    })?))
}

pub(crate) fn symbol_field(item: &Rlp, field: &'static str) -> CoreResult<CoinSymbol> {
    let bytes = item
        .as_bytes()
        .map_err(|_| CoreError::decode(format!("{field}: expected bytes")))?;
    CoinSymbol::from_wire_bytes(bytes)
        .map_err(|e| CoreError::decode(format!("{field}: {e}")))
}

pub(crate) fn string_field(item: &Rlp, field: &'static str) -> CoreResult<String> {
    let bytes = item
        .as_bytes()
        .map_err(|_| CoreError::decode(format!("{field}: expected bytes")))?;
    String::from_utf8(bytes.to_vec())
        .map_err(|e| CoreError::decode(format!("{field}: not UTF-8: {e}")))
}

pub(crate) fn u64_field(item: &Rlp, field: &'static str) -> CoreResult<u64> {
    item.as_u64()
        .map_err(|e| CoreError::decode(format!("{field}: {e}")))
}

pub(crate) fn u32_field(item: &Rlp, field: &'static str) -> CoreResult<u32> {
    item.as_u32()
        .map_err(|e| CoreError::decode(format!("{field}: {e}")))
}

pub(crate) fn u8_field(item: &Rlp, field: &'static str) -> CoreResult<u8> {
    item.as_u8()
        .map_err(|e| CoreError::decode(format!("{field}: {e}")))
}

/// Reads a 0/1 flag field.
pub(crate) fn bool_field(item: &Rlp, field: &'static str) -> CoreResult<bool> {
    match u8_field(item, field)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(CoreError::decode(format!(
            "{field}: flag must be 0 or 1, got {other}"
        ))),
    }
}

/// Encodes an address as its 20 raw bytes.
pub(crate) fn address_rlp(address: &Address) -> Rlp {
    Rlp::bytes(address.to_array().to_vec())
}

/// Encodes a public key as its 32 raw bytes.
pub(crate) fn public_key_rlp(key: &PublicKey) -> Rlp {
    Rlp::bytes(key.to_array().to_vec())
}

/// Encodes an amount as a minimal unsigned integer.
pub(crate) fn amount_rlp(amount: &Amount) -> Rlp {
    Rlp::from_uint(amount.as_pips())
}

/// Encodes a coin id as a minimal unsigned integer.
pub(crate) fn coin_rlp(coin: CoinId) -> Rlp {
    Rlp::from_u64(u64::from(coin.value()))
}

/// Encodes a ticker as its NUL-padded 10-byte form.
pub(crate) fn symbol_rlp(symbol: &CoinSymbol) -> Rlp {
    Rlp::bytes(symbol.to_wire_bytes().to_vec())
}

/// Encodes a 0/1 flag.
pub(crate) fn bool_rlp(flag: bool) -> Rlp {
    Rlp::from_u64(u64::from(flag))
}
