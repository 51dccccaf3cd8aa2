//! Wallet Import Format: a raw 32-byte private key wrapped in a version
//! byte, an optional compression flag, and a Base58Check checksum.
//!
//! Ported from `menu_4_3_private_key_to_WIF`/`menu_4_4_WIF_to_private_key`
//! in the original C source.

use crate::base::{base58check_decode, base58check_encode};
use crate::bigint::BigInt;
use crate::error::CoreError;

/// Mainnet WIF version byte.
pub const VERSION: u8 = 0x80;
/// Appended after the private key when the corresponding public key is
/// used in compressed form (the only form this kernel produces).
const COMPRESSION_FLAG: u8 = 0x01;

/// Encodes a 32-byte private key as mainnet WIF. `compressed` controls
/// whether the `0x01` compression flag byte is appended before the
/// checksum — Bitcoin Core always sets this for freshly generated keys.
pub fn encode(private_key: &BigInt, compressed: bool) -> String {
    let mut payload = Vec::with_capacity(34);
    payload.push(VERSION);
    payload.extend_from_slice(&private_key.to_bytes_be_padded(32));
    if compressed {
        payload.push(COMPRESSION_FLAG);
    }
    base58check_encode(&payload)
}

/// Decodes a WIF string, returning the raw 32-byte private key and
/// whether the compression flag was present.
pub fn decode(s: &str) -> Result<(BigInt, bool), CoreError> {
    let payload = base58check_decode(s)?;
    if payload.len() < 33 {
        return Err(CoreError::InvalidInput("WIF payload has the wrong length"));
    }
    if payload[0] != VERSION {
        return Err(CoreError::InvalidInput("WIF version byte is not 0x80 (mainnet)"));
    }
    let body = &payload[1..];
    let (key_bytes, compressed) = match body.len() {
        33 if body[32] == COMPRESSION_FLAG => (&body[..32], true),
        32 => (body, false),
        _ => return Err(CoreError::InvalidInput("WIF payload has the wrong length")),
    };
    Ok((BigInt::from_bytes_be(key_bytes), compressed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_compressed() {
        let key = BigInt::from_str_radix("deadbeef", 16, b"0123456789abcdef").unwrap();
        let wif = encode(&key, true);
        let (decoded, compressed) = decode(&wif).unwrap();
        assert_eq!(decoded, key);
        assert!(compressed);
    }

    #[test]
    fn round_trips_uncompressed() {
        let key = BigInt::from_str_radix("1", 16, b"0123456789abcdef").unwrap();
        let wif = encode(&key, false);
        let (decoded, compressed) = decode(&wif).unwrap();
        assert_eq!(decoded, key);
        assert!(!compressed);
    }

    #[test]
    fn rejects_wrong_version_byte() {
        // Flip the version byte by re-encoding a payload that starts 0x00
        // (testnet-style) instead of 0x80.
        let mut payload = vec![0x00u8];
        payload.extend_from_slice(&[0u8; 32]);
        let s = base58check_encode(&payload);
        assert!(decode(&s).is_err());
    }

    #[test]
    fn rejects_undersized_payload_without_panicking() {
        // base58check_decode can return a payload as short as zero bytes
        // (an input that decodes to just the 4 checksum bytes); decode
        // must report this as an error, not index off the end of it.
        let s = base58check_encode(&[]);
        assert_eq!(decode(&s).unwrap_err(), CoreError::InvalidInput("WIF payload has the wrong length"));
    }
}
