//! Recovering the y-coordinate of a compressed public key.
//!
//! `secp256k1.p ≡ 3 (mod 4)`, so a square root of a quadratic residue `a`
//! is `a^((p+1)/4) mod p` directly — no general Tonelli-Shanks search
//! loop is needed. The original C computes exactly this exponent in
//! `get_public_key_xy`.

use super::{p, Point};
use crate::bigint::BigInt;
use crate::error::CoreError;

/// The parity byte prefixing a compressed public key: `0x02` for an even
/// y-coordinate, `0x03` for odd.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompressedParity {
    Even,
    Odd,
}

impl CompressedParity {
    pub fn from_prefix(byte: u8) -> Result<Self, CoreError> {
        match byte {
            0x02 => Ok(CompressedParity::Even),
            0x03 => Ok(CompressedParity::Odd),
            _ => Err(CoreError::InvalidInput("compressed public key prefix must be 0x02 or 0x03")),
        }
    }

    pub fn prefix_byte(self) -> u8 {
        match self {
            CompressedParity::Even => 0x02,
            CompressedParity::Odd => 0x03,
        }
    }

    fn matches(self, y: &BigInt) -> bool {
        let is_even = !y.bit(0);
        matches!((self, is_even), (CompressedParity::Even, true) | (CompressedParity::Odd, false))
    }
}

/// Recovers the full point from an x-coordinate and the parity of y.
pub fn decompress(x: &BigInt, parity: CompressedParity) -> Result<Point, CoreError> {
    let modulus = p();
    let y_squared = BigInt::modulo(
        &BigInt::add(&BigInt::mul(x, &BigInt::mul(x, x)), &BigInt::from_u32(7)),
        &modulus,
    )?;

    // exponent = (p + 1) / 4
    let exponent = {
        let (q, _) = BigInt::divmod(&BigInt::add(&modulus, &BigInt::from_u32(1)), &BigInt::from_u32(4))?;
        q
    };
    let candidate = BigInt::mod_pow(&y_squared, &exponent, &modulus)?;

    if BigInt::modulo(&BigInt::mul(&candidate, &candidate), &modulus)? != y_squared {
        return Err(CoreError::InvalidInput("x is not on the curve"));
    }

    let y = if parity.matches(&candidate) {
        candidate
    } else {
        BigInt::modulo(&candidate.negate(), &modulus)?
    };
    Ok(Point::Affine { x: x.clone(), y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secp256k1::{generator, scalar_mul_generator};

    #[test]
    fn recovers_generator_from_its_own_compressed_form() {
        let g = generator();
        let (x, y) = match &g {
            Point::Affine { x, y } => (x.clone(), y.clone()),
            Point::Infinity => unreachable!(),
        };
        let parity = if y.bit(0) { CompressedParity::Odd } else { CompressedParity::Even };
        assert_eq!(decompress(&x, parity).unwrap(), g);
    }

    #[test]
    fn recovers_either_parity_for_a_derived_point() {
        let point = scalar_mul_generator(&BigInt::from_u32(12345)).unwrap();
        let (x, y) = match &point {
            Point::Affine { x, y } => (x.clone(), y.clone()),
            Point::Infinity => unreachable!(),
        };
        let even = decompress(&x, CompressedParity::Even).unwrap();
        let odd = decompress(&x, CompressedParity::Odd).unwrap();
        let recovered = if y.bit(0) { odd } else { even };
        assert_eq!(recovered, point);
    }

    #[test]
    fn rejects_x_not_on_curve() {
        let result = decompress(&BigInt::from_u32(4), CompressedParity::Even);
        assert!(result.is_err());
    }
}
