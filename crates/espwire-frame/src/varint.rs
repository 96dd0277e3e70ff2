//! Unsigned base-128 varints, least significant group first.

use bytes::BufMut;

use crate::error::{FrameError, Result};

/// Longest encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Append `value` to `dst`.
pub fn encode_varint(mut value: u64, dst: &mut impl BufMut) {
    while value >= 0x80 {
        dst.put_u8((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    dst.put_u8(value as u8);
}

/// Number of bytes `encode_varint` emits for `value`.
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Decode a varint from the front of `src`.
///
/// Returns the value and the number of bytes it occupied, or `Ok(None)` if
/// `src` ends before the final group.
pub fn decode_varint(src: &[u8]) -> Result<Option<(u64, usize)>> {
    let mut value = 0u64;
    for (i, &byte) in src.iter().enumerate().take(MAX_VARINT_LEN) {
        // The tenth group only has room for the top bit of a u64.
        if i == MAX_VARINT_LEN - 1 && byte > 0x01 {
            return Err(FrameError::InvalidVarint);
        }
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(Some((value, i + 1)));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;

    fn encode(value: u64) -> Vec<u8> {
        let mut buf = BytesMut::new();
        encode_varint(value, &mut buf);
        buf.to_vec()
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(1), vec![0x01]);
        assert_eq!(encode(127), vec![0x7F]);
        assert_eq!(encode(128), vec![0x80, 0x01]);
        assert_eq!(encode(300), vec![0xAC, 0x02]);
        assert_eq!(encode(u64::MAX).len(), MAX_VARINT_LEN);
    }

    #[test]
    fn encoded_len_matches_encoding() {
        for value in [0, 1, 127, 128, 16_383, 16_384, u32::MAX as u64, u64::MAX] {
            assert_eq!(encoded_len(value), encode(value).len(), "value {value}");
        }
    }

    #[test]
    fn decode_reports_consumed_bytes() {
        assert_eq!(decode_varint(&[0xAC, 0x02, 0xFF]).unwrap(), Some((300, 2)));
        assert_eq!(decode_varint(&encode(u64::MAX)).unwrap(), Some((u64::MAX, 10)));
    }

    #[test]
    fn decode_incomplete() {
        assert_eq!(decode_varint(&[]).unwrap(), None);
        assert_eq!(decode_varint(&[0x80, 0x80]).unwrap(), None);
    }

    #[test]
    fn decode_rejects_overlong() {
        let overlong = [0xFF; 11];
        assert!(matches!(
            decode_varint(&overlong),
            Err(FrameError::InvalidVarint)
        ));
    }
}
