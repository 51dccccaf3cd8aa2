//! BIP-39: 256-bit entropy ↔ 24-word mnemonic, and mnemonic → seed via
//! PBKDF2-HMAC-SHA512 (2048 iterations, single 64-byte block).
//!
//! Only the 256-bit/24-word case is supported, matching the original
//! `get_bip39_word_ids_bnz`/`get_mnemonic_phrase` pair, which hard-code a
//! 33-byte (32 entropy + 1 checksum) input.

pub mod wordlist;

pub use wordlist::WORDLIST;

use crate::error::CoreError;
use crate::hash::sha256;
use crate::mac::hmac_sha512;

pub const ENTROPY_BYTES: usize = 32;
pub const WORD_COUNT: usize = 24;

/// Appends the one-byte checksum (the first byte of `SHA256(entropy)`) to
/// 32 bytes of entropy, producing the 33-byte string BIP-39 encodes as 24
/// eleven-bit word indices.
pub fn entropy_with_checksum(entropy: &[u8; ENTROPY_BYTES]) -> [u8; ENTROPY_BYTES + 1] {
    let digest = sha256::sha256(entropy);
    let mut out = [0u8; ENTROPY_BYTES + 1];
    out[..ENTROPY_BYTES].copy_from_slice(entropy);
    out[ENTROPY_BYTES] = digest[0];
    out
}

/// Splits 33 bytes (32 entropy + 1 checksum byte) into 24 eleven-bit word
/// indices, three words (33 bits) at a time.
pub fn word_ids_from_entropy_checksum(bytes: &[u8; ENTROPY_BYTES + 1]) -> [u16; WORD_COUNT] {
    let mut ids = [0u16; WORD_COUNT];
    for i in 0..3 {
        let d = &bytes[i * 11..i * 11 + 11];
        let w = |idx: usize| d[idx] as u32;
        ids[i * 8] = (((w(0) << 3) & 2040) + ((w(1) >> 5) & 7)) as u16;
        ids[i * 8 + 1] = (((w(1) << 6) & 1984) + ((w(2) >> 2) & 63)) as u16;
        ids[i * 8 + 2] = (((w(2) << 9) & 1536) + ((w(3) << 1) & 510) + ((w(4) >> 7) & 1)) as u16;
        ids[i * 8 + 3] = (((w(4) << 4) & 2032) + ((w(5) >> 4) & 15)) as u16;
        ids[i * 8 + 4] = (((w(5) << 7) & 1920) + ((w(6) >> 1) & 127)) as u16;
        ids[i * 8 + 5] = (((w(6) << 10) & 1024) + ((w(7) << 2) & 2044) + ((w(8) >> 6) & 3)) as u16;
        ids[i * 8 + 6] = (((w(8) << 5) & 2016) + ((w(9) >> 3) & 31)) as u16;
        ids[i * 8 + 7] = (((w(9) << 8) & 1792) + w(10)) as u16;
    }
    ids
}

/// Inverse of [`word_ids_from_entropy_checksum`]: packs 24 eleven-bit
/// indices back into 33 bytes.
pub fn entropy_checksum_from_word_ids(ids: &[u16; WORD_COUNT]) -> [u8; ENTROPY_BYTES + 1] {
    let mut out = [0u8; ENTROPY_BYTES + 1];
    for i in 0..3 {
        let id = |idx: usize| ids[i * 8 + idx] as u32;
        out[i * 11] = ((id(0) >> 3) & 255) as u8;
        out[i * 11 + 1] = ((((id(0) & 7) << 5) + (id(1) >> 6)) & 255) as u8;
        out[i * 11 + 2] = ((((id(1) & 63) << 2) + (id(2) >> 9)) & 255) as u8;
        out[i * 11 + 3] = ((id(2) >> 1) & 255) as u8;
        out[i * 11 + 4] = ((((id(2) & 1) << 7) + (id(3) >> 4)) & 255) as u8;
        out[i * 11 + 5] = ((((id(3) & 15) << 4) + (id(4) >> 7)) & 255) as u8;
        out[i * 11 + 6] = ((((id(4) & 127) << 1) + (id(5) >> 10)) & 255) as u8;
        out[i * 11 + 7] = ((id(5) >> 2) & 255) as u8;
        out[i * 11 + 8] = ((((id(5) & 3) << 6) + (id(6) >> 5)) & 255) as u8;
        out[i * 11 + 9] = ((((id(6) & 31) << 3) + (id(7) >> 8)) & 255) as u8;
        out[i * 11 + 10] = (id(7) & 255) as u8;
    }
    out
}

/// Builds the space-separated 24-word mnemonic for 256 bits of entropy.
pub fn mnemonic_from_entropy(entropy: &[u8; ENTROPY_BYTES]) -> String {
    let with_checksum = entropy_with_checksum(entropy);
    let ids = word_ids_from_entropy_checksum(&with_checksum);
    ids.iter().map(|&id| WORDLIST[id as usize]).collect::<Vec<_>>().join(" ")
}

/// Parses a 24-word mnemonic back into entropy, verifying the embedded
/// checksum against a freshly computed `SHA256(entropy)`.
pub fn entropy_from_mnemonic(mnemonic: &str) -> Result<[u8; ENTROPY_BYTES], CoreError> {
    let words: Vec<&str> = mnemonic.split_whitespace().collect();
    if words.len() != WORD_COUNT {
        return Err(CoreError::InvalidInput("mnemonic must have exactly 24 words"));
    }

    let mut ids = [0u16; WORD_COUNT];
    for (i, word) in words.iter().enumerate() {
        ids[i] = WORDLIST
            .iter()
            .position(|&w| w == *word)
            .ok_or(CoreError::InvalidInput("word not found in BIP-39 wordlist"))? as u16;
    }

    let with_checksum = entropy_checksum_from_word_ids(&ids);
    let mut entropy = [0u8; ENTROPY_BYTES];
    entropy.copy_from_slice(&with_checksum[..ENTROPY_BYTES]);

    let expected_checksum = sha256::sha256(&entropy)[0];
    let found_checksum = with_checksum[ENTROPY_BYTES];
    crate::error::check_checksum(&[expected_checksum], &[found_checksum])?;

    Ok(entropy)
}

/// PBKDF2-HMAC-SHA512 salt: `"mnemonic" || passphrase || 0x00000001`
/// (the big-endian block-index suffix BIP-39 always uses, since the
/// 64-byte seed is exactly one PBKDF2 block).
fn salt(passphrase: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + passphrase.len() + 4);
    out.extend_from_slice(b"mnemonic");
    out.extend_from_slice(passphrase.as_bytes());
    out.extend_from_slice(&1u32.to_be_bytes());
    out
}

/// Derives the 64-byte BIP-39 seed from a mnemonic phrase and optional
/// passphrase, via PBKDF2-HMAC-SHA512 with 2048 iterations.
pub fn seed_from_mnemonic(mnemonic: &str, passphrase: &str) -> [u8; 64] {
    let salt = salt(passphrase);
    let mut block = hmac_sha512(mnemonic.as_bytes(), &salt);
    let mut seed = block;
    for _ in 1..2048 {
        block = hmac_sha512(mnemonic.as_bytes(), &block);
        for j in 0..64 {
            seed[j] ^= block[j];
        }
    }
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_entropy_vector() {
        // Well-known BIP-39 test vector: 32 zero bytes of entropy.
        let entropy = [0u8; 32];
        let mnemonic = mnemonic_from_entropy(&entropy);
        assert_eq!(
            mnemonic,
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art"
        );
    }

    #[test]
    fn mnemonic_round_trips() {
        let entropy: [u8; 32] = std::array::from_fn(|i| i as u8);
        let mnemonic = mnemonic_from_entropy(&entropy);
        assert_eq!(entropy_from_mnemonic(&mnemonic).unwrap(), entropy);
    }

    #[test]
    fn rejects_wrong_word_count() {
        assert!(entropy_from_mnemonic("abandon abandon abandon").is_err());
    }

    #[test]
    fn rejects_bad_checksum_word() {
        let entropy = [0u8; 32];
        let mut mnemonic = mnemonic_from_entropy(&entropy);
        // Swap the last (checksum-bearing) word for a different valid word.
        mnemonic = mnemonic.rsplit_once(' ').map(|(rest, _)| format!("{rest} zoo")).unwrap();
        assert!(entropy_from_mnemonic(&mnemonic).is_err());
    }

    #[test]
    fn seed_is_64_bytes_and_deterministic() {
        let mnemonic = mnemonic_from_entropy(&[0u8; 32]);
        let seed_a = seed_from_mnemonic(&mnemonic, "");
        let seed_b = seed_from_mnemonic(&mnemonic, "");
        assert_eq!(seed_a, seed_b);
        assert_eq!(seed_a.len(), 64);
    }

    #[test]
    fn seed_changes_with_passphrase() {
        let mnemonic = mnemonic_from_entropy(&[0u8; 32]);
        assert_ne!(seed_from_mnemonic(&mnemonic, ""), seed_from_mnemonic(&mnemonic, "TREZOR"));
    }

    #[test]
    fn seed_derivation_is_word_count_agnostic() {
        // Seed derivation only cares about the mnemonic string and salt
        // construction, not the word count — exercise it with the
        // well-known 12-word all-"abandon" mnemonic too.
        let mnemonic = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        let seed = seed_from_mnemonic(mnemonic, "TREZOR");
        assert_eq!(seed.len(), 64);
        assert_eq!(seed, seed_from_mnemonic(mnemonic, "TREZOR"));
    }
}
