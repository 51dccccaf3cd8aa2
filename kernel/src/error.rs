//! The canonical error type for every fallible operation in the kernel.
//!
//! INVARIANTS:
//! 1. The core never panics on malformed or attacker-controlled input.
//! 2. Division by zero in `bigint` is a contract violation, not a panic —
//!    it is surfaced as `CoreError::DivisionByZero`.
//! 3. Checksum failures carry the recomputed expected value for diagnostics.

use crate::bigint::BigInt;

/// Every in-band failure the kernel can report, grouped per the four
/// categories this system recognizes: invalid input, out-of-range keys,
/// bad checksums, and division by zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Malformed hex, a character outside the target base's alphabet, a
    /// mnemonic with the wrong word count, or an unrecognized BIP39 word.
    InvalidInput(&'static str),
    /// A derived or supplied private key scalar was zero or `>= n`.
    OutOfRange(&'static str),
    /// A checksum (Base58Check, Bech32 polymod, BIP39 entropy checksum)
    /// did not match. Carries both values for diagnostics.
    ChecksumMismatch { expected: Vec<u8>, found: Vec<u8> },
    /// `BigInt` division or modulus by zero.
    DivisionByZero,
}

/// Compare a freshly computed checksum against the one embedded in encoded
/// data, returning the typed mismatch error spec §7 asks for.
pub fn check_checksum(expected: &[u8], found: &[u8]) -> Result<(), CoreError> {
    if expected == found {
        Ok(())
    } else {
        Err(CoreError::ChecksumMismatch {
            expected: expected.to_vec(),
            found: found.to_vec(),
        })
    }
}

/// Convenience used throughout `bip32`/`secp256k1`: reject a scalar that is
/// zero or not strictly less than the curve order.
pub fn require_in_range(scalar: &BigInt, n: &BigInt, what: &'static str) -> Result<(), CoreError> {
    if scalar.is_zero() || BigInt::cmp(scalar, n) != std::cmp::Ordering::Less {
        return Err(CoreError::OutOfRange(what));
    }
    Ok(())
}
