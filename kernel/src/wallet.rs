//! BIP-44/BIP-84 receive-address enumeration: a block of 20 addresses at
//! `m/44'/0'/0'/0/i` (P2PKH) and `m/84'/0'/0'/0/i` (P2WPKH), ported from
//! `get_wallet_p2pkh_addresses`/`get_wallet_p2wpkh_addresses`.

use crate::addr::{p2pkh_address, p2wpkh_address};
use crate::bip32::{derive_hardened_child, derive_normal_child, ExtendedPrivateKey};
use crate::error::CoreError;

/// Number of receive addresses enumerated per wallet block, matching the
/// original source's hardcoded `for (i = 0; i < 20; i++)` loop.
pub const ADDRESS_COUNT: u32 = 20;

/// One enumerated receive address: its derivation index and address text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletAddress {
    pub index: u32,
    pub address: String,
}

/// Walks `m/purpose'/0'/0'/0` from the master key and returns the
/// extended private key at that branch (the common prefix both BIP-44
/// and BIP-84 share before enumerating the 20 leaf addresses).
fn derive_branch(master: &ExtendedPrivateKey, purpose: u32) -> Result<ExtendedPrivateKey, CoreError> {
    let purpose_key = derive_hardened_child(master, purpose)?;
    let coin_key = derive_hardened_child(&purpose_key, 0)?;
    let account_key = derive_hardened_child(&coin_key, 0)?;
    derive_normal_child(&account_key, 0)
}

/// BIP-44 P2PKH wallet: 20 legacy Base58Check addresses at
/// `m/44'/0'/0'/0/0..19`.
pub fn p2pkh_wallet(master: &ExtendedPrivateKey) -> Result<Vec<WalletAddress>, CoreError> {
    let branch = derive_branch(master, 44)?;
    (0..ADDRESS_COUNT)
        .map(|i| {
            let child = derive_normal_child(&branch, i)?;
            let public_key = child.public_key_compressed()?;
            Ok(WalletAddress { index: i, address: p2pkh_address(&public_key) })
        })
        .collect()
}

/// BIP-84 P2WPKH wallet: 20 native SegWit addresses at
/// `m/84'/0'/0'/0/0..19`.
pub fn p2wpkh_wallet(master: &ExtendedPrivateKey) -> Result<Vec<WalletAddress>, CoreError> {
    let branch = derive_branch(master, 84)?;
    (0..ADDRESS_COUNT)
        .map(|i| {
            let child = derive_normal_child(&branch, i)?;
            let public_key = child.public_key_compressed()?;
            Ok(WalletAddress { index: i, address: p2wpkh_address("bc", &public_key)? })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bip32::master_key;
    use crate::bip39;

    fn master_from_zero_entropy() -> ExtendedPrivateKey {
        let mnemonic = bip39::mnemonic_from_entropy(&[0u8; 32]);
        let seed = bip39::seed_from_mnemonic(&mnemonic, "");
        master_key(&seed).unwrap()
    }

    #[test]
    fn p2pkh_wallet_has_twenty_distinct_addresses() {
        let master = master_from_zero_entropy();
        let wallet = p2pkh_wallet(&master).unwrap();
        assert_eq!(wallet.len(), 20);
        assert!(wallet.iter().all(|w| w.address.starts_with('1')));
        let mut addrs: Vec<_> = wallet.iter().map(|w| w.address.clone()).collect();
        addrs.dedup();
        assert_eq!(addrs.len(), 20);
    }

    #[test]
    fn p2wpkh_wallet_has_twenty_distinct_addresses() {
        let master = master_from_zero_entropy();
        let wallet = p2wpkh_wallet(&master).unwrap();
        assert_eq!(wallet.len(), 20);
        assert!(wallet.iter().all(|w| w.address.starts_with("bc1q")));
        let mut addrs: Vec<_> = wallet.iter().map(|w| w.address.clone()).collect();
        addrs.dedup();
        assert_eq!(addrs.len(), 20);
    }

    #[test]
    fn wallets_are_deterministic() {
        let master = master_from_zero_entropy();
        assert_eq!(p2pkh_wallet(&master).unwrap(), p2pkh_wallet(&master).unwrap());
    }
}
