//! Hash primitives: SHA-256, SHA-512, and RIPEMD-160, all implemented from
//! scratch (no `sha2`/`ripemd` crate — this kernel does not trust anything
//! it cannot read).

pub mod ripemd160;
pub mod sha256;
pub mod sha512;

pub use ripemd160::ripemd160;
pub use sha256::{sha256, sha256d, Sha256State};
pub use sha512::{sha512, Sha512State};

/// Bitcoin's HASH160: `RIPEMD160(SHA256(data))`. Used for P2PKH/P2WPKH
/// pubkey hashes and BIP32 key fingerprints.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}
