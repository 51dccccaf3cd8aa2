//! Modular exponentiation and modular multiplicative inverse.
//!
//! Ported from `bnz_mod_pow` (right-to-left binary exponentiation) and
//! `bnz_modular_multiplicative_inverse` (extended Euclidean algorithm) in
//! the original C source.

use super::BigInt;
use crate::error::CoreError;

/// `base^exponent mod modulus`, via right-to-left binary exponentiation.
/// `exponent` must be non-negative; `modulus` must be non-zero.
pub fn mod_pow(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> Result<BigInt, CoreError> {
    if modulus.is_zero() {
        return Err(CoreError::DivisionByZero);
    }
    if exponent.is_negative() {
        return Err(CoreError::InvalidInput("mod_pow exponent must be non-negative"));
    }
    let mut result = BigInt::from_u32(1).min_mod(modulus)?;
    let mut base = BigInt::modulo(base, modulus)?;
    let bits = exponent.bit_length();
    for i in 0..bits {
        if exponent.bit(i) {
            result = BigInt::modulo(&BigInt::mul(&result, &base), modulus)?;
        }
        base = BigInt::modulo(&BigInt::mul(&base, &base), modulus)?;
    }
    Ok(result)
}

trait ModOne {
    fn min_mod(self, modulus: &BigInt) -> Result<BigInt, CoreError>;
}

impl ModOne for BigInt {
    fn min_mod(self, modulus: &BigInt) -> Result<BigInt, CoreError> {
        BigInt::modulo(&self, modulus)
    }
}

/// Multiplicative inverse of `a` modulo `modulus`, via the extended
/// Euclidean algorithm. Returns `CoreError::OutOfRange` if `a` and
/// `modulus` are not coprime (no inverse exists).
pub fn mod_inverse(a: &BigInt, modulus: &BigInt) -> Result<BigInt, CoreError> {
    if modulus.is_zero() {
        return Err(CoreError::DivisionByZero);
    }
    let (mut old_r, mut r) = (BigInt::modulo(a, modulus)?, modulus.clone());
    let (mut old_s, mut s) = (BigInt::from_u32(1), BigInt::zero());

    while !r.is_zero() {
        let (q, rem) = BigInt::divmod(&old_r, &r)?;
        old_r = std::mem::replace(&mut r, rem);
        let s_next = BigInt::sub(&old_s, &BigInt::mul(&q, &s));
        old_s = std::mem::replace(&mut s, s_next);
    }

    if BigInt::cmp(&old_r, &BigInt::from_u32(1)) != std::cmp::Ordering::Equal {
        return Err(CoreError::OutOfRange("value has no modular inverse"));
    }
    BigInt::modulo(&old_s, modulus)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEC: &[u8] = b"0123456789";
    fn dec(s: &str) -> BigInt {
        BigInt::from_str_radix(s, 10, DEC).unwrap()
    }

    #[test]
    fn mod_pow_small_case() {
        // 4^13 mod 497 = 445 (textbook RSA example).
        let result = mod_pow(&dec("4"), &dec("13"), &dec("497")).unwrap();
        assert_eq!(result, dec("445"));
    }

    #[test]
    fn mod_pow_rejects_zero_modulus() {
        assert_eq!(
            mod_pow(&dec("2"), &dec("3"), &BigInt::zero()).unwrap_err(),
            CoreError::DivisionByZero
        );
    }

    #[test]
    fn mod_inverse_matches_known_value() {
        // 3 * 4 = 12 = 1 mod 11.
        let inv = mod_inverse(&dec("3"), &dec("11")).unwrap();
        assert_eq!(inv, dec("4"));
    }

    #[test]
    fn mod_inverse_rejects_non_coprime() {
        assert_eq!(
            mod_inverse(&dec("4"), &dec("8")).unwrap_err(),
            CoreError::OutOfRange("value has no modular inverse")
        );
    }

    #[test]
    fn mod_inverse_round_trips_with_mod_pow_via_fermat() {
        // For prime p, a^(p-2) mod p is also the inverse (Fermat's little
        // theorem) — cross-check the extended-Euclidean result against it.
        let p = dec("1000000007");
        let a = dec("123456789");
        let via_euclid = mod_inverse(&a, &p).unwrap();
        let via_fermat = mod_pow(&a, &dec("1000000005"), &p).unwrap();
        assert_eq!(via_euclid, via_fermat);
    }
}
