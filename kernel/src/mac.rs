//! HMAC-SHA-512 (RFC 2104), the single MAC this kernel needs: BIP32 child
//! derivation and the BIP39 PBKDF2 seed both key off it.

use crate::hash::sha512::{sha512, Sha512State};

const BLOCK_LEN: usize = 128;
const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

fn block_sized_key(key: &[u8]) -> [u8; BLOCK_LEN] {
    let mut block = [0u8; BLOCK_LEN];
    if key.len() > BLOCK_LEN {
        let digest = sha512(key);
        block[..digest.len()].copy_from_slice(&digest);
    } else {
        block[..key.len()].copy_from_slice(key);
    }
    block
}

/// `HMAC-SHA512(key, message)`, producing a 64-byte tag.
pub fn hmac_sha512(key: &[u8], message: &[u8]) -> [u8; 64] {
    let key_block = block_sized_key(key);

    let mut inner_pad = [0u8; BLOCK_LEN];
    let mut outer_pad = [0u8; BLOCK_LEN];
    for i in 0..BLOCK_LEN {
        inner_pad[i] = key_block[i] ^ IPAD;
        outer_pad[i] = key_block[i] ^ OPAD;
    }

    let mut inner = Sha512State::new();
    inner.update(&inner_pad);
    inner.update(message);
    let inner_digest = inner.finalize();

    let mut outer = Sha512State::new();
    outer.update(&outer_pad);
    outer.update(&inner_digest);
    outer.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_hex(s: &str) -> Vec<u8> {
        (0..s.len()).step_by(2).map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap()).collect()
    }

    #[test]
    fn rfc4231_case_1() {
        // RFC 4231 §4.2, HMAC-SHA-512 test case 1.
        let key = [0x0bu8; 20];
        let data = b"Hi There";
        let expected = from_hex(
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cdedaa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854",
        );
        assert_eq!(hmac_sha512(&key, data).to_vec(), expected);
    }

    #[test]
    fn rfc4231_case_2() {
        // RFC 4231 §4.3: key shorter than a block, ASCII "Jefe"/"what do ya want for nothing?".
        let key = b"Jefe";
        let data = b"what do ya want for nothing?";
        let expected = from_hex(
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea2505549758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737",
        );
        assert_eq!(hmac_sha512(key, data).to_vec(), expected);
    }

    #[test]
    fn long_key_is_hashed_down() {
        // A key longer than the 128-byte block size must be pre-hashed.
        let key = vec![0xaa; 200];
        let a = hmac_sha512(&key, b"message");
        let b = hmac_sha512(&key, b"message");
        assert_eq!(a, b);
    }
}
