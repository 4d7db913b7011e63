//! RLP encoding.

use crate::value::Rlp;

/// Serializes an item to its canonical wire form.
///
/// Single bytes below 0x80 encode as themselves; short strings and lists use
/// the `0x80 + len` / `0xC0 + len` headers; longer payloads use the
/// `0xB7 + len_of_len` / `0xF7 + len_of_len` long forms with a minimal
/// big-endian length.
#[must_use]
pub fn encode(item: &Rlp) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(item, &mut out);
    out
}

/// Appends the wire form of `item` to `out`.
pub fn encode_into(item: &Rlp, out: &mut Vec<u8>) {
    match item {
        Rlp::Bytes(data) => {
            if data.len() == 1 && data[0] < 0x80 {
                out.push(data[0]);
            } else {
                write_header(0x80, data.len(), out);
                out.extend_from_slice(data);
            }
        }
        Rlp::List(items) => {
            let mut payload = Vec::new();
            for child in items {
                encode_into(child, &mut payload);
            }
            write_header(0xC0, payload.len(), out);
            out.extend_from_slice(&payload);
        }
    }
}

/// Writes a string (base 0x80) or list (base 0xC0) header for `len` payload
/// bytes.
fn write_header(base: u8, len: usize, out: &mut Vec<u8>) {
    if len < 56 {
        out.push(base + len as u8);
    } else {
        let len_bytes = minimal_be(len as u64);
        out.push(base + 55 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
}

/// Minimal big-endian form of a non-zero length.
fn minimal_be(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(7);
    bytes[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_low_byte_encodes_as_itself() {
        assert_eq!(vec![0x00], encode(&Rlp::bytes(vec![0x00])));
        assert_eq!(vec![0x0f], encode(&Rlp::bytes(vec![0x0f])));
        assert_eq!(vec![0x7f], encode(&Rlp::bytes(vec![0x7f])));
    }

    #[test]
    fn boundary_byte_gets_a_header() {
        assert_eq!(vec![0x81, 0x80], encode(&Rlp::bytes(vec![0x80])));
        assert_eq!(vec![0x81, 0xff], encode(&Rlp::bytes(vec![0xff])));
    }

    #[test]
    fn fifty_five_and_fifty_six_byte_strings() {
        let fifty_five = vec![0xaa; 55];
        let mut expected = vec![0x80 + 55];
        expected.extend_from_slice(&fifty_five);
        assert_eq!(expected, encode(&Rlp::bytes(fifty_five)));

        let fifty_six = vec![0xaa; 56];
        let mut expected = vec![0xb8, 56];
        expected.extend_from_slice(&fifty_six);
        assert_eq!(expected, encode(&Rlp::bytes(fifty_six)));
    }

    #[test]
    fn long_length_uses_minimal_bytes() {
        let kilobyte = vec![0x55; 1024];
        let encoded = encode(&Rlp::bytes(kilobyte));
        assert_eq!(&[0xb9, 0x04, 0x00], &encoded[..3]);
        assert_eq!(3 + 1024, encoded.len());
    }
}
