//! Interactive menu driver for the Bitcoin HD wallet math kernel.
//!
//! Owns every bit of I/O and the only source of randomness the core
//! needs (`rand::rngs::OsRng`). The kernel library itself never reaches
//! for an RNG or touches a terminal — this binary just calls pure
//! functions and formats their output, per spec §1's "driver is an
//! external collaborator" boundary.

use std::io::{self, Write};

use bitcoin_math_kernel::bigint::BigInt;
use bitcoin_math_kernel::secp256k1::Point;
use bitcoin_math_kernel::{addr, base, bip32, bip39, secp256k1, wallet, wif};
use rand::rngs::OsRng;
use rand::RngCore;

const HEX: &[u8] = b"0123456789abcdef";

fn main() {
    loop {
        print_header();
        println!("1) Master keys");
        println!("2) Child keys");
        println!("3) Base converter");
        println!("4) Functions");
        println!("0) Exit");
        match prompt("Choice: ").trim() {
            "1" => menu_master_keys(),
            "2" => menu_child_keys(),
            "3" => menu_base_converter(),
            "4" => menu_functions(),
            "0" => break,
            _ => println!("Unrecognized choice.\n"),
        }
    }
}

fn print_header() {
    println!("\n=== bitcoin-math-cli ===\n");
}

fn prompt(label: &str) -> String {
    print!("{label}");
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line).ok();
    line.trim_end_matches(['\n', '\r']).to_string()
}

fn random_entropy() -> [u8; 32] {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

fn parse_hex_32(s: &str) -> Option<[u8; 32]> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.len() != 64 {
        return None;
    }
    let mut out = [0u8; 32];
    for i in 0..32 {
        out[i] = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(out)
}

/// Retries master-key derivation with fresh entropy whenever the derived
/// private key is out of range, per spec §5's driver-level retry loop.
fn derive_master_retrying(entropy: [u8; 32], passphrase: &str) -> ([u8; 32], bip32::ExtendedPrivateKey, String) {
    let mut entropy = entropy;
    loop {
        let mnemonic = bip39::mnemonic_from_entropy(&entropy);
        let seed = bip39::seed_from_mnemonic(&mnemonic, passphrase);
        match bip32::master_key(&seed) {
            Ok(master) => return (entropy, master, mnemonic),
            Err(_) => entropy = random_entropy(),
        }
    }
}

fn menu_master_keys() {
    print_header();
    let input = prompt("Entropy as 64 hex chars (press Enter for random): ");
    let entropy = if input.trim().is_empty() { random_entropy() } else {
        match parse_hex_32(input.trim()) {
            Some(e) => e,
            None => {
                println!("Invalid entropy: need exactly 64 hex characters.\n");
                return;
            }
        }
    };
    let passphrase = prompt("Passphrase (optional): ");

    let (entropy, master, mnemonic) = derive_master_retrying(entropy, &passphrase);
    let seed = bip39::seed_from_mnemonic(&mnemonic, &passphrase);

    println!("\nEntropy: {}", BigInt::from_bytes_be(&entropy).to_str_radix(16, HEX));
    println!("Mnemonic: {mnemonic}");
    println!("Seed: {}", BigInt::from_bytes_be(&seed).to_str_radix(16, HEX));
    println!("Master private key: {}", master.private_key.to_str_radix(16, HEX));
    println!("Master chain code: {}", BigInt::from_bytes_be(&master.chain_code).to_str_radix(16, HEX));
    match master.to_xprv() {
        Ok(xprv) => println!("Master xprv: {xprv}"),
        Err(e) => println!("Master xprv: error ({e:?})"),
    }

    println!("\nBIP-44 P2PKH wallet (m/44'/0'/0'/0/i):");
    match wallet::p2pkh_wallet(&master) {
        Ok(addrs) => for a in addrs { println!("  m/44'/0'/0'/0/{}: {}", a.index, a.address); },
        Err(e) => println!("  error: {e:?}"),
    }

    println!("\nBIP-84 P2WPKH wallet (m/84'/0'/0'/0/i):");
    match wallet::p2wpkh_wallet(&master) {
        Ok(addrs) => for a in addrs { println!("  m/84'/0'/0'/0/{}: {}", a.index, a.address); },
        Err(e) => println!("  error: {e:?}"),
    }
    println!();
}

fn menu_child_keys() {
    print_header();
    println!("1) Normal child");
    println!("2) Hardened child");
    println!("3) Child from public key only");
    println!("4) Full HDK path expansion");
    let choice = prompt("Choice: ");

    let (_, master, _) = derive_master_retrying(random_entropy(), "");

    match choice.trim() {
        "1" | "2" => {
            let index: u32 = match prompt("Child index: ").trim().parse() {
                Ok(i) => i,
                Err(_) => { println!("Invalid index.\n"); return; }
            };
            let result = if choice.trim() == "1" {
                bip32::derive_normal_child(&master, index)
            } else {
                bip32::derive_hardened_child(&master, index)
            };
            match result {
                Ok(child) => print_extended_private_key(&child),
                Err(e) => println!("Derivation failed: {e:?}"),
            }
        }
        "3" => {
            let index: u32 = match prompt("Child index: ").trim().parse() {
                Ok(i) => i,
                Err(_) => { println!("Invalid index.\n"); return; }
            };
            let Ok(parent_public) = master.neuter() else { println!("Could not neuter parent key.\n"); return; };
            match bip32::derive_normal_child_public(&parent_public, index) {
                Ok(child) => println!("Child xpub: {}", child.to_xpub()),
                Err(e) => println!("Derivation failed: {e:?}"),
            }
        }
        "4" => {
            let path = prompt("HDK path (e.g. m/44'/0'/0'/0/0): ");
            match bip32::path::derive_path(&master, path.trim()) {
                Ok(steps) => for step in steps {
                    println!("{:?} (depth {}):", step.index, step.key.depth);
                    print_extended_private_key(&step.key);
                },
                Err(e) => println!("Path parse/derivation failed: {e:?}"),
            }
        }
        _ => println!("Unrecognized choice."),
    }
    println!();
}

fn print_extended_private_key(key: &bip32::ExtendedPrivateKey) {
    println!("  private key: {}", key.private_key.to_str_radix(16, HEX));
    match key.to_xprv() {
        Ok(xprv) => println!("  xprv: {xprv}"),
        Err(e) => println!("  xprv: error ({e:?})"),
    }
    if let Ok(xpub) = key.neuter().map(|p| p.to_xpub()) {
        println!("  xpub: {xpub}");
    }
}

fn menu_base_converter() {
    print_header();
    let number = prompt("Number: ");
    let base_str = prompt("Source base (2-64): ");
    let Ok(source_base) = base_str.trim().parse::<u32>() else { println!("Invalid base.\n"); return; };
    let alphabet = match alphabet_for_base(source_base) {
        Some(a) => a,
        None => { println!("No alphabet for base {source_base}.\n"); return; }
    };
    let value = match base::decode(number.trim(), source_base, alphabet) {
        Ok(v) => v,
        Err(e) => { println!("Could not parse number in base {source_base}: {e:?}\n"); return; }
    };
    println!();
    for target in 2..=64u32 {
        let Some(target_alphabet) = alphabet_for_base(target) else { continue };
        println!("base {target:>2}: {}", base::encode(&value, target, target_alphabet));
    }
    println!();
}

/// Picks the alphabet the base-converter menu uses for each base,
/// preferring Bitcoin's own Base58 alphabet at base 58 (spec §6's
/// "base converter" prints every base with a single canonical alphabet
/// per base, and this kernel's one Base58Check consumer is Bitcoin's).
fn alphabet_for_base(base: u32) -> Option<&'static [u8]> {
    if base == 58 {
        return Some(base::BITCOIN_BASE58);
    }
    base::default_alphabet(base).ok()
}

fn menu_functions() {
    print_header();
    println!("1) Public key -> address");
    println!("2) Mnemonic checksum validation");
    println!("3) Private key -> WIF");
    println!("4) WIF -> private key");
    println!("5) secp256k1 point addition");
    println!("6) secp256k1 point doubling");
    println!("7) secp256k1 scalar multiplication");
    match prompt("Choice: ").trim() {
        "1" => function_public_key_to_address(),
        "2" => function_validate_mnemonic(),
        "3" => function_private_key_to_wif(),
        "4" => function_wif_to_private_key(),
        "5" => function_point_addition(),
        "6" => function_point_doubling(),
        "7" => function_scalar_multiplication(),
        _ => println!("Unrecognized choice."),
    }
    println!();
}

fn function_public_key_to_address() {
    let pubkey_hex = prompt("Compressed public key (66 hex chars): ");
    let Ok(pubkey) = BigInt::from_str_radix(pubkey_hex.trim(), 16, HEX) else {
        println!("Invalid hex.\n");
        return;
    };
    let bytes = pubkey.to_bytes_be_padded(33);
    println!("P2PKH: {}", addr::p2pkh_address(&bytes));
    match addr::p2wpkh_address("bc", &bytes) {
        Ok(address) => println!("P2WPKH: {address}"),
        Err(e) => println!("P2WPKH error: {e:?}"),
    }
}

fn function_validate_mnemonic() {
    let mnemonic = prompt("Mnemonic (24 words): ");
    match bip39::entropy_from_mnemonic(mnemonic.trim()) {
        Ok(entropy) => {
            println!("Valid. Entropy: {}", BigInt::from_bytes_be(&entropy).to_str_radix(16, HEX));
        }
        Err(e) => println!("Invalid: {e:?}"),
    }
}

fn function_private_key_to_wif() {
    let input = prompt("Private key as hex (press Enter for random): ");
    let private_key = if input.trim().is_empty() {
        BigInt::from_bytes_be(&random_entropy())
    } else {
        match BigInt::from_str_radix(input.trim(), 16, HEX) {
            Ok(k) => k,
            Err(e) => { println!("{e:?}\n"); return; }
        }
    };
    if BigInt::cmp(&private_key, &secp256k1::order()) != std::cmp::Ordering::Less || private_key.is_zero() {
        println!("Private key must be in [1, n).\n");
        return;
    }
    println!("WIF: {}", wif::encode(&private_key, true));
}

fn function_wif_to_private_key() {
    let s = prompt("WIF (Bitcoin Base58): ");
    match wif::decode(s.trim()) {
        Ok((key, compressed)) => {
            println!("Private key: {}", key.to_str_radix(16, HEX));
            println!("Compressed: {compressed}");
        }
        Err(e) => println!("{e:?}"),
    }
}

fn prompt_point(label: &str) -> Option<Point> {
    let x = prompt(&format!("{label} x (hex): "));
    let y = prompt(&format!("{label} y (hex): "));
    let x = BigInt::from_str_radix(x.trim(), 16, HEX).ok()?;
    let y = BigInt::from_str_radix(y.trim(), 16, HEX).ok()?;
    Some(Point::Affine { x, y })
}

fn function_point_addition() {
    let (Some(a), Some(b)) = (prompt_point("A"), prompt_point("B")) else {
        println!("Invalid point coordinates.");
        return;
    };
    match secp256k1::add(&a, &b) {
        Ok(sum) => print_point(&sum),
        Err(e) => println!("{e:?}"),
    }
}

fn function_point_doubling() {
    let Some(a) = prompt_point("A") else { println!("Invalid point coordinates."); return; };
    match secp256k1::double(&a) {
        Ok(doubled) => print_point(&doubled),
        Err(e) => println!("{e:?}"),
    }
}

fn function_scalar_multiplication() {
    let scalar_str = prompt("Scalar (hex): ");
    let Ok(scalar) = BigInt::from_str_radix(scalar_str.trim(), 16, HEX) else {
        println!("Invalid scalar.");
        return;
    };
    let Some(point) = prompt_point("Point") else { println!("Invalid point coordinates."); return; };
    match secp256k1::scalar_mul(&scalar, &point) {
        Ok(result) => print_point(&result),
        Err(e) => println!("{e:?}"),
    }
}

fn print_point(point: &Point) {
    match point {
        Point::Infinity => println!("Point at infinity."),
        Point::Affine { x, y } => {
            println!("x: {}", x.to_str_radix(16, HEX));
            println!("y: {}", y.to_str_radix(16, HEX));
        }
    }
}
