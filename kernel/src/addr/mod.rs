//! Bitcoin address encodings derived from a compressed public key:
//! legacy P2PKH (Base58Check) and native SegWit P2WPKH (Bech32).

pub mod bech32;

use crate::base::base58check_encode;
use crate::error::CoreError;
use crate::hash::hash160;

/// Mainnet P2PKH version byte.
pub const P2PKH_VERSION: u8 = 0x00;

/// `base58check(0x00 || HASH160(compressed_pubkey))`.
pub fn p2pkh_address(public_key_compressed: &[u8]) -> String {
    let hash = hash160(public_key_compressed);
    let mut payload = vec![P2PKH_VERSION];
    payload.extend_from_slice(&hash);
    base58check_encode(&payload)
}

/// `bech32("bc", 0x00 || HASH160(compressed_pubkey))`: a mainnet native
/// SegWit v0 P2WPKH address.
pub fn p2wpkh_address(hrp: &str, public_key_compressed: &[u8]) -> Result<String, CoreError> {
    let hash = hash160(public_key_compressed);
    let program = bech32::convert_bits(&hash, 8, 5, true)?;
    let mut data = Vec::with_capacity(1 + program.len());
    data.push(0); // witness version 0
    data.extend_from_slice(&program);
    Ok(bech32::encode(hrp, &data))
}

/// Decodes a SegWit address, returning `(witness_version, program)`.
pub fn decode_segwit_address(address: &str) -> Result<(u8, Vec<u8>), CoreError> {
    let (_, data) = bech32::decode(address)?;
    let (version, program_5bit) = data.split_first().ok_or(CoreError::InvalidInput("empty witness program"))?;
    let program = bech32::convert_bits(program_5bit, 5, 8, false)?;
    Ok((*version, program))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn p2pkh_is_deterministic_and_starts_with_1() {
        let pubkey = [0x02u8; 33];
        let address = p2pkh_address(&pubkey);
        assert!(address.starts_with('1'));
        assert_eq!(address, p2pkh_address(&pubkey));
    }

    #[test]
    fn p2wpkh_round_trips_through_decode() {
        let pubkey = [0x03u8; 33];
        let address = p2wpkh_address("bc", &pubkey).unwrap();
        assert!(address.starts_with("bc1q"));
        let (version, program) = decode_segwit_address(&address).unwrap();
        assert_eq!(version, 0);
        assert_eq!(program, hash160(&pubkey).to_vec());
    }

    #[test]
    fn p2wpkh_honors_a_different_hrp() {
        let pubkey = [0x02u8; 33];
        let address = p2wpkh_address("tb", &pubkey).unwrap();
        assert!(address.starts_with("tb1q"));
    }
}
