//! The secp256k1 curve: `y^2 = x^3 + 7 (mod p)`.
//!
//! Curve parameters, point doubling/addition, and scalar multiplication
//! ported from the original `SECP256K1`/`PT`/`secp256k1_*` routines. The
//! infinity point is represented as its own enum variant rather than the
//! original's `(0, 0)` sentinel — `(0, 0)` does not lie on the curve, so
//! an explicit variant rules out ever mistaking it for an affine point.

mod recovery;

pub use recovery::{decompress, CompressedParity};

use crate::bigint::BigInt;
use crate::error::CoreError;

pub fn p() -> BigInt {
    BigInt::from_str_radix(
        "115792089237316195423570985008687907853269984665640564039457584007908834671663",
        10,
        DEC,
    )
    .expect("curve prime is valid")
}

pub fn order() -> BigInt {
    BigInt::from_str_radix(
        "115792089237316195423570985008687907852837564279074904382605163141518161494337",
        10,
        DEC,
    )
    .expect("curve order is valid")
}

pub fn generator() -> Point {
    Point::Affine {
        x: BigInt::from_str_radix(
            "55066263022277343669578718895168534326250603453777594175500187360389116729240",
            10,
            DEC,
        )
        .expect("Gx is valid"),
        y: BigInt::from_str_radix(
            "32670510020758816978083085130507043184471273380659243275938904335757337482424",
            10,
            DEC,
        )
        .expect("Gy is valid"),
    }
}

const DEC: &[u8] = b"0123456789";

/// A point on the curve, or the point at infinity (the group identity).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine { x: BigInt, y: BigInt },
}

impl Point {
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    fn xy(&self) -> Option<(&BigInt, &BigInt)> {
        match self {
            Point::Affine { x, y } => Some((x, y)),
            Point::Infinity => None,
        }
    }
}

/// `2p mod p`.
pub fn double(point: &Point) -> Result<Point, CoreError> {
    let p_modulus = p();
    let Some((x, y)) = point.xy() else {
        return Ok(Point::Infinity);
    };
    if y.is_zero() {
        return Ok(Point::Infinity);
    }

    let two_y_inv = BigInt::mod_inverse(&BigInt::mul(&BigInt::from_u32(2), y), &p_modulus)?;
    let numerator = BigInt::mul(&BigInt::from_u32(3), &BigInt::mul(x, x));
    let slope = BigInt::modulo(&BigInt::mul(&numerator, &two_y_inv), &p_modulus)?;

    let rx = BigInt::modulo(&BigInt::sub(&BigInt::mul(&slope, &slope), &BigInt::mul(&BigInt::from_u32(2), x)), &p_modulus)?;
    let ry = BigInt::modulo(&BigInt::sub(&BigInt::mul(&slope, &BigInt::sub(x, &rx)), y), &p_modulus)?;
    Ok(Point::Affine { x: rx, y: ry })
}

/// `p + q mod p`, handling the infinity/negation/doubling special cases
/// the original `secp256k1_point_addition` enumerates explicitly.
pub fn add(p_point: &Point, q_point: &Point) -> Result<Point, CoreError> {
    let modulus = p();

    match (p_point, q_point) {
        (Point::Infinity, _) => return Ok(q_point.clone()),
        (_, Point::Infinity) => return Ok(p_point.clone()),
        _ => {}
    }

    let (px, py) = p_point.xy().expect("checked above");
    let (qx, qy) = q_point.xy().expect("checked above");

    let neg_qy = BigInt::modulo(&BigInt::sub(&modulus, qy), &modulus)?;
    if BigInt::cmp(py, &neg_qy) == std::cmp::Ordering::Equal && BigInt::cmp(px, qx) == std::cmp::Ordering::Equal {
        return Ok(Point::Infinity);
    }

    if BigInt::cmp(px, qx) == std::cmp::Ordering::Equal && BigInt::cmp(py, qy) == std::cmp::Ordering::Equal {
        return double(p_point);
    }

    let dx = BigInt::modulo(&BigInt::sub(px, qx), &modulus)?;
    let dx_inv = BigInt::mod_inverse(&dx, &modulus)?;
    let dy = BigInt::sub(py, qy);
    let slope = BigInt::modulo(&BigInt::mul(&dy, &dx_inv), &modulus)?;

    let rx = BigInt::modulo(&BigInt::sub(&BigInt::sub(&BigInt::mul(&slope, &slope), px), qx), &modulus)?;
    let ry = BigInt::modulo(&BigInt::sub(&BigInt::mul(&slope, &BigInt::sub(px, &rx)), py), &modulus)?;
    Ok(Point::Affine { x: rx, y: ry })
}

/// `scalar * G`, via double-and-add over the scalar's bits, least
/// significant first.
pub fn scalar_mul_generator(scalar: &BigInt) -> Result<Point, CoreError> {
    scalar_mul(scalar, &generator())
}

/// `scalar * point`, via double-and-add.
pub fn scalar_mul(scalar: &BigInt, point: &Point) -> Result<Point, CoreError> {
    if scalar.is_zero() {
        return Ok(Point::Infinity);
    }
    let mut result = Point::Infinity;
    let mut addend = point.clone();
    let bits = scalar.bit_length();
    for i in 0..bits {
        if scalar.bit(i) {
            result = add(&result, &addend)?;
        }
        addend = double(&addend)?;
    }
    Ok(result)
}

/// SEC1 compressed encoding: `0x02`/`0x03` parity prefix + 32-byte x.
pub fn compressed_bytes(point: &Point) -> Result<Vec<u8>, CoreError> {
    let (x, y) = point.xy().ok_or(CoreError::InvalidInput("point at infinity has no encoding"))?;
    let prefix = if y.bit(0) { 0x03 } else { 0x02 };
    let mut out = vec![prefix];
    out.extend_from_slice(&x.to_bytes_be_padded(32));
    Ok(out)
}

/// SEC1 uncompressed encoding: `0x04` + 32-byte x + 32-byte y.
pub fn uncompressed_bytes(point: &Point) -> Result<Vec<u8>, CoreError> {
    let (x, y) = point.xy().ok_or(CoreError::InvalidInput("point at infinity has no encoding"))?;
    let mut out = vec![0x04];
    out.extend_from_slice(&x.to_bytes_be_padded(32));
    out.extend_from_slice(&y.to_bytes_be_padded(32));
    Ok(out)
}

/// Derives the public key point for a private key scalar (`scalar * G`).
pub fn public_key(private_key: &BigInt) -> Result<Point, CoreError> {
    scalar_mul_generator(private_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_lies_on_curve() {
        let g = generator();
        let (x, y) = g.xy().unwrap();
        let p_modulus = p();
        let lhs = BigInt::modulo(&BigInt::mul(y, y), &p_modulus).unwrap();
        let rhs = BigInt::modulo(
            &BigInt::add(&BigInt::mul(x, &BigInt::mul(x, x)), &BigInt::from_u32(7)),
            &p_modulus,
        )
        .unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn double_generator_matches_scalar_mul_by_two() {
        let g = generator();
        let doubled = double(&g).unwrap();
        let via_scalar = scalar_mul_generator(&BigInt::from_u32(2)).unwrap();
        assert_eq!(doubled, via_scalar);
    }

    #[test]
    fn add_is_commutative_for_distinct_points() {
        let g = generator();
        let two_g = scalar_mul_generator(&BigInt::from_u32(2)).unwrap();
        assert_eq!(add(&g, &two_g).unwrap(), add(&two_g, &g).unwrap());
    }

    #[test]
    fn point_plus_its_negation_is_infinity() {
        let g = generator();
        let (x, y) = g.xy().unwrap();
        let neg = Point::Affine { x: x.clone(), y: BigInt::modulo(&y.negate(), &p()).unwrap() };
        assert_eq!(add(&g, &neg).unwrap(), Point::Infinity);
    }

    #[test]
    fn scalar_mul_by_order_is_infinity() {
        let g = generator();
        assert_eq!(scalar_mul(&order(), &g).unwrap(), Point::Infinity);
    }

    #[test]
    fn scalar_mul_by_zero_is_infinity() {
        let g = generator();
        assert_eq!(scalar_mul(&BigInt::zero(), &g).unwrap(), Point::Infinity);
    }

    #[test]
    fn compressed_round_trips_through_decompress() {
        let point = public_key(&BigInt::from_u32(777)).unwrap();
        let bytes = compressed_bytes(&point).unwrap();
        let parity = CompressedParity::from_prefix(bytes[0]).unwrap();
        let x = BigInt::from_bytes_be(&bytes[1..]);
        assert_eq!(decompress(&x, parity).unwrap(), point);
    }

    #[test]
    fn public_key_cannot_be_computed_for_infinity_point() {
        assert!(compressed_bytes(&Point::Infinity).is_err());
    }
}
