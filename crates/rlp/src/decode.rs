//! Strict RLP decoding.
//!
//! The decoder is total over arbitrary input: every malformed prefix,
//! truncation or non-canonical form maps to an [`RlpError`], never to
//! partial data. The top-level entry point additionally rejects trailing
//! bytes so a decoded item always accounts for the entire input.

use crate::error::{RlpError, RlpResult};
use crate::value::Rlp;

/// Parses a complete wire item.
///
/// # Errors
///
/// Any decode variant of [`RlpError`]; `RlpError::TrailingBytes` if the
/// input continues past the first item.
pub fn decode(data: &[u8]) -> RlpResult<Rlp> {
    let (item, consumed) = decode_at(data, 0)?;
    if consumed != data.len() {
        return Err(RlpError::TrailingBytes {
            consumed,
            total: data.len(),
        });
    }
    Ok(item)
}

/// Decodes the item starting at `offset`, returning it together with the
/// number of bytes consumed from `offset`.
fn decode_at(data: &[u8], offset: usize) -> RlpResult<(Rlp, usize)> {
    let prefix = *data.get(offset).ok_or(RlpError::Truncated {
        needed: 1,
        offset,
        available: 0,
    })?;

    match prefix {
        // Single byte encoding itself.
        0x00..=0x7f => Ok((Rlp::Bytes(vec![prefix]), 1)),

        // Short string.
        0x80..=0xb7 => {
            let len = (prefix - 0x80) as usize;
            let payload = read_payload(data, offset + 1, len)?;
            if len == 1 && payload[0] < 0x80 {
                return Err(RlpError::NonCanonical {
                    offset,
                    message: format!("byte 0x{:02x} must encode as itself", payload[0]),
                });
            }
            Ok((Rlp::Bytes(payload.to_vec()), 1 + len))
        }

        // Long string.
        0xb8..=0xbf => {
            let (len, header) = read_long_length(data, offset, prefix - 0xb7)?;
            let payload = read_payload(data, offset + header, len)?;
            Ok((Rlp::Bytes(payload.to_vec()), header + len))
        }

        // Short list.
        0xc0..=0xf7 => {
            let payload_len = (prefix - 0xc0) as usize;
            decode_list(data, offset, 1, payload_len)
        }

        // Long list.
        0xf8..=0xff => {
            let (payload_len, header) = read_long_length(data, offset, prefix - 0xf7)?;
            decode_list(data, offset, header, payload_len)
        }
    }
}

/// Bounds-checks and borrows `len` payload bytes starting at `start`.
fn read_payload(data: &[u8], start: usize, len: usize) -> RlpResult<&[u8]> {
    let end = start.checked_add(len).ok_or(RlpError::LengthOverflow { offset: start })?;
    if end > data.len() {
        return Err(RlpError::Truncated {
            needed: len,
            offset: start,
            available: data.len().saturating_sub(start),
        });
    }
    Ok(&data[start..end])
}

/// Reads a long-form length of `len_of_len` bytes following the prefix at
/// `offset`. Returns the payload length and the total header size.
fn read_long_length(data: &[u8], offset: usize, len_of_len: u8) -> RlpResult<(usize, usize)> {
    let len_of_len = len_of_len as usize;
    let len_bytes = read_payload(data, offset + 1, len_of_len)?;
    if len_bytes[0] == 0 {
        return Err(RlpError::NonCanonical {
            offset,
            message: "length bytes have a leading zero".to_string(),
        });
    }
    if len_of_len > std::mem::size_of::<usize>() {
        return Err(RlpError::LengthOverflow { offset });
    }
    let mut len: usize = 0;
    for byte in len_bytes {
        len = (len << 8) | *byte as usize;
    }
    if len < 56 {
        return Err(RlpError::NonCanonical {
            offset,
            message: format!("length {len} must use the short form"),
        });
    }
    Ok((len, 1 + len_of_len))
}

/// Decodes the items of a list whose payload spans
/// `[offset + header, offset + header + payload_len)`.
fn decode_list(
    data: &[u8],
    offset: usize,
    header: usize,
    payload_len: usize,
) -> RlpResult<(Rlp, usize)> {
    let start = offset + header;
    // Validate the payload bounds up front so item decoding cannot read
    // past a truncated list.
    read_payload(data, start, payload_len)?;
    let end = start + payload_len;

    let mut items = Vec::new();
    let mut cursor = start;
    while cursor < end {
        let (item, used) = decode_at(data, cursor)?;
        cursor += used;
        if cursor > end {
            return Err(RlpError::ListItemOverrun { offset: cursor - used });
        }
        items.push(item);
    }
    Ok((Rlp::List(items), header + payload_len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_string_is_rejected() {
        // Header claims 3 bytes, only 2 present.
        assert!(matches!(
            decode(&[0x83, 0x64, 0x6f]),
            Err(RlpError::Truncated { .. })
        ));
    }

    #[test]
    fn truncated_long_length_is_rejected() {
        assert!(matches!(decode(&[0xb9, 0x04]), Err(RlpError::Truncated { .. })));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        assert!(matches!(
            decode(&[0x83, 0x64, 0x6f, 0x67, 0x00]),
            Err(RlpError::TrailingBytes { .. })
        ));
    }

    #[test]
    fn non_canonical_single_byte_is_rejected() {
        // 0x0f wrapped in a one-byte string header.
        assert!(matches!(
            decode(&[0x81, 0x0f]),
            Err(RlpError::NonCanonical { .. })
        ));
    }

    #[test]
    fn non_canonical_long_form_is_rejected() {
        // 3-byte payload announced through the long form.
        assert!(matches!(
            decode(&[0xb8, 0x03, 0x64, 0x6f, 0x67]),
            Err(RlpError::NonCanonical { .. })
        ));
    }

    #[test]
    fn list_item_cannot_overrun_its_list() {
        // List payload of 1 byte containing a header that wants 2 more.
        assert!(decode(&[0xc1, 0x82, 0x61, 0x61]).is_err());
    }

    #[test]
    fn empty_input_is_truncated() {
        assert!(matches!(decode(&[]), Err(RlpError::Truncated { .. })));
    }
}
