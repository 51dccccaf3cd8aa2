//! Generic base-N (2–64) text codec, built on [`crate::bigint::BigInt`].
//!
//! The five named alphabets below match the ones the original CLI's menu
//! offers, byte for byte, including the non-Bitcoin base-58 variant (which
//! keeps `0`) alongside Bitcoin's own (which drops `0`, `O`, `I`, `l` to
//! avoid visual confusion).

use crate::bigint::BigInt;
use crate::error::CoreError;

pub const HEX: &[u8] = b"0123456789ABCDEF";
pub const GENERIC_BASE32: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";
pub const BECH32: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
pub const GENERIC_BASE58: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuv";
pub const BITCOIN_BASE58: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
pub const STANDARD_BASE64: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
pub const GENERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_";

/// Picks the alphabet the original CLI's "base converter" menu would use
/// for a given base, for bases with an unambiguous canonical choice.
/// Base 58 is ambiguous (Bitcoin vs. generic) so callers needing it pick
/// [`BITCOIN_BASE58`] or [`GENERIC_BASE58`] directly.
pub fn default_alphabet(base: u32) -> Result<&'static [u8], CoreError> {
    match base {
        16 => Ok(HEX),
        32 => Ok(GENERIC_BASE32),
        64 => Ok(STANDARD_BASE64),
        2..=62 => Ok(GENERIC),
        _ => Err(CoreError::InvalidInput("no default alphabet for this base")),
    }
}

/// Parses a numeral in `base` written with `alphabet`.
pub fn decode(s: &str, base: u32, alphabet: &[u8]) -> Result<BigInt, CoreError> {
    BigInt::from_str_radix(s, base, &alphabet[..base as usize])
}

/// Renders `value` in `base` using `alphabet`.
pub fn encode(value: &BigInt, base: u32, alphabet: &[u8]) -> String {
    value.to_str_radix(base, &alphabet[..base as usize])
}

/// Bitcoin's Base58Check: base-58 encode `payload || checksum[0..4]`,
/// where `checksum = SHA256d(payload)`. Leading zero bytes in `payload`
/// become leading `'1'` characters, since a leading zero byte would
/// otherwise vanish as a leading zero digit.
pub fn base58check_encode(payload: &[u8]) -> String {
    let checksum = crate::hash::sha256d(payload);
    let mut full = payload.to_vec();
    full.extend_from_slice(&checksum[..4]);

    let leading_zeros = full.iter().take_while(|&&b| b == 0).count();
    let value = BigInt::from_bytes_be(&full);
    let digits = if value.is_zero() { String::new() } else { encode(&value, 58, BITCOIN_BASE58) };
    let zero_char = BITCOIN_BASE58[0] as char;
    format!("{}{}", zero_char.to_string().repeat(leading_zeros), digits)
}

/// Decodes a Base58Check string, verifying the trailing 4-byte checksum.
pub fn base58check_decode(s: &str) -> Result<Vec<u8>, CoreError> {
    if s.is_empty() {
        return Err(CoreError::InvalidInput("empty Base58Check string"));
    }
    let zero_char = BITCOIN_BASE58[0];
    let leading_zeros = s.bytes().take_while(|&b| b == zero_char).count();
    let rest = &s[leading_zeros..];

    let mut full = if rest.is_empty() { vec![] } else { decode(rest, 58, BITCOIN_BASE58)?.to_bytes_be() };
    let mut padded = vec![0u8; leading_zeros];
    padded.append(&mut full);

    if padded.len() < 4 {
        return Err(CoreError::InvalidInput("Base58Check string too short for a checksum"));
    }
    let (payload, checksum) = padded.split_at(padded.len() - 4);
    let expected = crate::hash::sha256d(payload);
    crate::error::check_checksum(&expected[..4], checksum)?;
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips() {
        let n = decode("DEADBEEF", 16, HEX).unwrap();
        assert_eq!(encode(&n, 16, HEX), "DEADBEEF");
    }

    #[test]
    fn base58check_round_trips() {
        let payload = vec![0x00u8; 21];
        let encoded = base58check_encode(&payload);
        assert_eq!(base58check_decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn base58check_preserves_leading_zero_bytes() {
        let payload = vec![0x00, 0x00, 0x01, 0x02];
        let encoded = base58check_encode(&payload);
        assert!(encoded.starts_with("11"));
        assert_eq!(base58check_decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn base58check_rejects_bad_checksum() {
        let payload = vec![1, 2, 3];
        let mut encoded = base58check_encode(&payload);
        encoded.push('1');
        assert!(base58check_decode(&encoded).is_err());
    }

    #[test]
    fn bitcoin_alphabet_excludes_confusable_characters() {
        for forbidden in [b'0', b'O', b'I', b'l'] {
            assert!(!BITCOIN_BASE58.contains(&forbidden));
        }
    }
}
