//! Canonical integer codec.
//!
//! Integers on the wire are unsigned, big-endian and minimal: zero is the empty byte string and
//! no encoding starts with `0x00`.

use crate::IntCodecError;
use alloy_primitives::{Bytes, U256};

/// Encodes `value` as its minimal big-endian byte string.
pub fn encode_int(value: &U256) -> Bytes {
    let skip = value.leading_zeros() / 8;
    Bytes::copy_from_slice(&value.to_be_bytes::<32>()[skip..])
}

/// Decodes a minimal big-endian byte string into a [U256].
///
/// The empty string decodes to zero. Any encoding starting with `0x00`, including the single
/// byte `[0x00]`, is rejected since zero has exactly one canonical form.
pub fn decode_int(bytes: &[u8]) -> Result<U256, IntCodecError> {
    match bytes {
        [] => Ok(U256::ZERO),
        [0, ..] => Err(IntCodecError::NonCanonicalInteger),
        _ => U256::try_from_be_slice(bytes).ok_or(IntCodecError::Overflow(bytes.len())),
    }
}

/// Parses a textual quantity, either decimal or `0x`-prefixed hexadecimal.
///
/// `"0x"` is accepted as zero, matching the JSON-RPC quantity convention.
pub fn parse_quantity(input: &str) -> Result<U256, IntCodecError> {
    let input = input.trim();
    if input.starts_with('-') {
        return Err(IntCodecError::NegativeValue);
    }

    let parsed = match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some("") => return Ok(U256::ZERO),
        Some(hex) => U256::from_str_radix(hex, 16),
        None if input.is_empty() => return Err(IntCodecError::InvalidQuantity),
        None => U256::from_str_radix(input, 10),
    };
    parsed.map_err(|_| IntCodecError::InvalidQuantity)
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::vec;
    use alloy_primitives::hex;
    use proptest::{prelude::any, proptest};

    #[test]
    fn test_encode_zero_is_empty() {
        assert!(encode_int(&U256::ZERO).is_empty());
    }

    #[test]
    fn test_encode_strips_leading_zeros() {
        assert_eq!(&encode_int(&U256::from(256))[..], &[0x01, 0x00]);
        assert_eq!(&encode_int(&U256::from(0x7f))[..], &[0x7f]);
        assert_eq!(encode_int(&U256::MAX).len(), 32);
        assert_eq!(
            &encode_int(&U256::from(1_000_000_000_000_000_000u128))[..],
            &hex!("0de0b6b3a7640000")
        );
    }

    #[test]
    fn test_decode_empty_is_zero() {
        assert_eq!(decode_int(&[]).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_decode_rejects_leading_zero() {
        assert_eq!(decode_int(&[0x00, 0x01]), Err(IntCodecError::NonCanonicalInteger));
        assert_eq!(decode_int(&[0x00]), Err(IntCodecError::NonCanonicalInteger));
    }

    #[test]
    fn test_decode_rejects_overflow() {
        let wide = [0x01; 33];
        assert_eq!(decode_int(&wide), Err(IntCodecError::Overflow(33)));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("21000").unwrap(), U256::from(21_000));
        assert_eq!(parse_quantity("0x5208").unwrap(), U256::from(21_000));
        assert_eq!(parse_quantity("0x").unwrap(), U256::ZERO);
        assert_eq!(parse_quantity(" 7 ").unwrap(), U256::from(7));
        assert_eq!(parse_quantity("-1"), Err(IntCodecError::NegativeValue));
        assert_eq!(parse_quantity(""), Err(IntCodecError::InvalidQuantity));
        assert_eq!(parse_quantity("0xzz"), Err(IntCodecError::InvalidQuantity));
        assert_eq!(parse_quantity("12ab"), Err(IntCodecError::InvalidQuantity));
    }

    proptest! {
        #[test]
        fn test_int_codec_is_minimal_and_invertible(limbs in any::<[u64; 4]>()) {
            let value = U256::from_limbs(limbs);
            let encoded = encode_int(&value);
            assert!(encoded.first() != Some(&0));
            assert_eq!(decode_int(&encoded).unwrap(), value);
        }

        #[test]
        fn test_padded_encodings_are_rejected(value in 1u64..u64::MAX, pad in 1usize..8) {
            let mut padded = vec![0u8; pad];
            padded.extend_from_slice(&encode_int(&U256::from(value)));
            assert_eq!(decode_int(&padded), Err(IntCodecError::NonCanonicalInteger));
        }
    }
}
