//! Bech32 (BIP-173): the checksum/expansion machinery behind native
//! SegWit addresses.
//!
//! Implemented directly over 5-bit groups rather than the original's
//! route through a numeric `bnz_t` (which loses leading zero digits and
//! needed a `'q'`-padding workaround when printing). Encoding the witness
//! program as 5-bit groups up front sidesteps that class of bug entirely
//! — see spec open question on HRP parametrization, resolved by taking
//! the HRP as a parameter instead of hardcoding `"bc"`.

use crate::error::CoreError;

const CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x1ffffff) << 5) ^ (v as u32);
        for i in 0..5 {
            if (top >> i) & 1 == 1 {
                chk ^= GENERATOR[i];
            }
        }
    }
    chk
}

fn hrp_expand(hrp: &str) -> Vec<u8> {
    let mut out: Vec<u8> = hrp.bytes().map(|b| b >> 5).collect();
    out.push(0);
    out.extend(hrp.bytes().map(|b| b & 31));
    out
}

fn create_checksum(hrp: &str, data: &[u8]) -> [u8; 6] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0u8; 6]);
    let polymod_value = polymod(&values) ^ 1;
    std::array::from_fn(|i| ((polymod_value >> (5 * (5 - i))) & 31) as u8)
}

/// Repacks a byte string into 5-bit groups (MSB first), as BIP-173
/// requires before Bech32-encoding a witness program.
pub fn convert_bits(data: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> Result<Vec<u8>, CoreError> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::new();
    let max_value = (1u32 << to_bits) - 1;
    for &b in data {
        acc = (acc << from_bits) | b as u32;
        bits += from_bits;
        while bits >= to_bits {
            bits -= to_bits;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }
    if pad {
        if bits > 0 {
            out.push(((acc << (to_bits - bits)) & max_value) as u8);
        }
    } else if bits >= from_bits || (acc << (to_bits - bits)) & max_value != 0 {
        return Err(CoreError::InvalidInput("non-zero padding in bit conversion"));
    }
    Ok(out)
}

/// Encodes `witness_version || witness_program` (already expressed as
/// 5-bit groups, version first) under `hrp` as a Bech32 string.
pub fn encode(hrp: &str, data: &[u8]) -> String {
    let checksum = create_checksum(hrp, data);
    let mut out = String::with_capacity(hrp.len() + 1 + data.len() + 6);
    out.push_str(hrp);
    out.push('1');
    for &d in data {
        out.push(CHARSET[d as usize] as char);
    }
    for &d in &checksum {
        out.push(CHARSET[d as usize] as char);
    }
    out
}

/// Decodes a Bech32 string, verifying its checksum, and returns
/// `(hrp, data)` where `data` is the 5-bit-group payload (version byte
/// included) with the checksum stripped off.
pub fn decode(s: &str) -> Result<(String, Vec<u8>), CoreError> {
    let pos = s.rfind('1').ok_or(CoreError::InvalidInput("bech32 string missing separator"))?;
    let (hrp, data_part) = s.split_at(pos);
    let data_part = &data_part[1..];
    if data_part.len() < 6 {
        return Err(CoreError::InvalidInput("bech32 string too short for a checksum"));
    }

    let mut values = Vec::with_capacity(data_part.len());
    for ch in data_part.bytes() {
        let lower = ch.to_ascii_lowercase();
        let value = CHARSET
            .iter()
            .position(|&c| c == lower)
            .ok_or(CoreError::InvalidInput("character outside bech32 charset"))?;
        values.push(value as u8);
    }

    let mut check_input = hrp_expand(hrp);
    check_input.extend_from_slice(&values);
    if polymod(&check_input) != 1 {
        return Err(CoreError::InvalidInput("bech32 checksum mismatch"));
    }

    let data = values[..values.len() - 6].to_vec();
    Ok((hrp.to_string(), data))
}
