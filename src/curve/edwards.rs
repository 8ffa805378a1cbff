//! Points of the prime-order Edwards25519 group in extended coordinates.
//!
//! An [`EdwardsPoint`] `(X : Y : Z : T)` represents the affine point
//! `(X/Z, Y/Z)` with the extra coordinate `T = XY/Z`. It is the form every
//! multiplication returns and the only one exposed by the crate.
//!
//! The 32-byte wire form is [`CompressedEdwardsY`]: the little-endian
//! encoding of `y` with the parity of `x` stored in bit 255.

use std::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::constants::{BASEPOINT_ORDER_BYTES, ED25519_BASEPOINT_POINT, EDWARDS_D, SQRT_M1};
use super::field::FieldElement;
use super::models::{GeCached, GeP1, GeP2};
use super::scalar::Scalar;
use super::traits::{Identity, ValidityCheck};
use crate::error::PointError;
use crate::scalar_mul::{basepoint, variable_base, vartime_double_base};

/// A point on Edwards25519 in extended twisted Edwards coordinates.
#[derive(Clone, Copy, Debug)]
pub struct EdwardsPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

impl Identity for EdwardsPoint {
    fn identity() -> Self {
        EdwardsPoint {
            x: FieldElement::ZERO,
            y: FieldElement::ONE,
            z: FieldElement::ONE,
            t: FieldElement::ZERO,
        }
    }
}

impl Default for EdwardsPoint {
    fn default() -> Self {
        EdwardsPoint::identity()
    }
}

impl EdwardsPoint {
    /// The standard Ed25519 generator.
    pub fn generator() -> Self {
        ED25519_BASEPOINT_POINT
    }

    /// Recovers the extended form from completed coordinates. Costs 4M.
    pub(crate) fn from_gep1(g: &GeP1) -> Self {
        let x = g.x * g.t;
        let y = g.y * g.z;
        let z = g.z * g.t;
        let t = g.x * g.y;

        EdwardsPoint { x, y, z, t }
    }

    /// Computes `2·self`.
    pub fn double(&self) -> EdwardsPoint {
        EdwardsPoint::from_gep1(&GeP2::from_p3(self).double())
    }

    /// Encodes the point as `y` with the sign of `x` in the top bit.
    pub fn compress(&self) -> CompressedEdwardsY {
        let recip = self.z.invert();
        let x = self.x * recip;
        let y = self.y * recip;

        let mut bytes = y.to_bytes();
        bytes[31] ^= x.is_negative().unwrap_u8() << 7;

        CompressedEdwardsY(bytes)
    }

    /// Decodes a point and checks that it lies in the prime-order subgroup.
    ///
    /// This is the constructor to use for untrusted input. Use
    /// [`CompressedEdwardsY::decompress`] to accept points with a
    /// small-order component.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<EdwardsPoint, PointError> {
        let point = CompressedEdwardsY(*bytes).decompress()?;

        if !point.is_torsion_free() {
            return Err(PointError::NotInPrimeSubgroup);
        }

        Ok(point)
    }

    /// Returns `true` if `ℓ·self` is the identity.
    ///
    /// Runs in variable time. Only meant for public points.
    pub fn is_torsion_free(&self) -> bool {
        self.mul_by_order_vartime().is_identity()
    }

    fn mul_by_order_vartime(&self) -> EdwardsPoint {
        let cached = GeCached::from_p3(self);
        let mut acc = EdwardsPoint::identity();

        for i in (0..256).rev() {
            acc = acc.double();

            if (BASEPOINT_ORDER_BYTES[i >> 3] >> (i & 7)) & 1 == 1 {
                acc = EdwardsPoint::from_gep1(&GeP1::from_sum(&acc, &cached));
            }
        }

        acc
    }

    /// Returns `true` if this is the neutral element.
    pub fn is_identity(&self) -> bool {
        self.ct_eq(&EdwardsPoint::identity()).into()
    }

    /// Computes `scalar · B` for the standard generator `B`.
    ///
    /// Constant time in `scalar`. Uses the shared basepoint table, building
    /// it on first use.
    pub fn mul_base(scalar: &Scalar) -> EdwardsPoint {
        basepoint::mul_base(scalar)
    }

    /// Computes `a·A + b·B` for the standard generator `B`.
    ///
    /// Runs in variable time and leaks the bit length of `max(a, b)`.
    /// Never use it with secret scalars.
    #[allow(non_snake_case)]
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        vartime_double_base::mul(a, A, b)
    }
}

impl ValidityCheck for EdwardsPoint {
    /// Checks `Z ≠ 0`, the curve equation, and the Segre relation `XY = ZT`.
    fn is_valid(&self) -> bool {
        let z_nonzero = !bool::from(self.z.is_zero());
        let on_curve = GeP2::from_p3(self).is_valid();
        let segre = self.x * self.y == self.z * self.t;

        z_nonzero && on_curve && segre
    }
}

impl ConstantTimeEq for EdwardsPoint {
    /// Compares affine coordinates by cross-multiplying with `Z`.
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.x * other.z).ct_eq(&(other.x * self.z))
            & (self.y * other.z).ct_eq(&(other.y * self.z))
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for EdwardsPoint {}

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        EdwardsPoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            t: FieldElement::conditional_select(&a.t, &b.t, choice),
        }
    }
}

impl<'a> Add<&'a EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn add(self, rhs: &'a EdwardsPoint) -> EdwardsPoint {
        EdwardsPoint::from_gep1(&GeP1::from_sum(self, &GeCached::from_p3(rhs)))
    }
}

impl<'a> Sub<&'a EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn sub(self, rhs: &'a EdwardsPoint) -> EdwardsPoint {
        EdwardsPoint::from_gep1(&GeP1::from_difference(self, &GeCached::from_p3(rhs)))
    }
}

impl Add for EdwardsPoint {
    type Output = EdwardsPoint;

    fn add(self, rhs: EdwardsPoint) -> EdwardsPoint {
        &self + &rhs
    }
}

impl Sub for EdwardsPoint {
    type Output = EdwardsPoint;

    fn sub(self, rhs: EdwardsPoint) -> EdwardsPoint {
        &self - &rhs
    }
}

impl Neg for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

impl<'a> Mul<&'a Scalar> for &EdwardsPoint {
    type Output = EdwardsPoint;

    /// Constant-time `scalar · self` without any caching.
    fn mul(self, scalar: &'a Scalar) -> EdwardsPoint {
        variable_base::mul(self, scalar)
    }
}

impl<'a> Mul<&'a EdwardsPoint> for &Scalar {
    type Output = EdwardsPoint;

    fn mul(self, point: &'a EdwardsPoint) -> EdwardsPoint {
        variable_base::mul(point, self)
    }
}

impl Mul<Scalar> for EdwardsPoint {
    type Output = EdwardsPoint;

    fn mul(self, scalar: Scalar) -> EdwardsPoint {
        variable_base::mul(&self, &scalar)
    }
}

impl Mul<EdwardsPoint> for Scalar {
    type Output = EdwardsPoint;

    fn mul(self, point: EdwardsPoint) -> EdwardsPoint {
        variable_base::mul(&point, &self)
    }
}

/// The 32-byte compressed encoding of an Edwards point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl CompressedEdwardsY {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Recovers `x` from `y` and the sign bit.
    ///
    /// Solves `x² = (y² − 1) / (d·y² + 1)` with a single exponentiation,
    /// then fixes the sign. Rejects encodings of `y ≥ p` and the negative
    /// zero `x = 0, sign = 1`. Does not check subgroup membership.
    pub fn decompress(&self) -> Result<EdwardsPoint, PointError> {
        let mut y_bytes = self.0;
        y_bytes[31] &= 0x7f;

        let y = FieldElement::from_bytes(&y_bytes);
        if y.to_bytes() != y_bytes {
            return Err(PointError::NonCanonicalEncoding);
        }

        let z = FieldElement::ONE;
        let yy = y.square();
        let u = yy - z;
        let v = yy * EDWARDS_D + z;

        // x = u·v³·(u·v⁷)^((p−5)/8)
        let v3 = v.square() * v;
        let v7 = v3.square() * v;
        let mut x = u * v3 * (u * v7).pow_p58();

        let vxx = v * x.square();
        if vxx != u {
            if vxx != -u {
                return Err(PointError::NotOnCurve);
            }
            x = x * SQRT_M1;
        }

        let sign = Choice::from(self.0[31] >> 7);
        if bool::from(x.is_zero() & sign) {
            return Err(PointError::NonCanonicalEncoding);
        }

        let flip = x.is_negative() ^ sign;
        x = FieldElement::conditional_select(&x, &-x, flip);

        Ok(EdwardsPoint {
            x,
            y,
            z,
            t: x * y,
        })
    }
}

impl From<[u8; 32]> for CompressedEdwardsY {
    fn from(bytes: [u8; 32]) -> Self {
        CompressedEdwardsY(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::models::GePrecomp;

    fn three_b() -> EdwardsPoint {
        let b = EdwardsPoint::generator();
        &b.double() + &b
    }

    #[test]
    fn mixed_and_cached_addition_agree() {
        let b = EdwardsPoint::generator();
        let p = three_b();

        let cached = EdwardsPoint::from_gep1(&GeP1::from_sum(&p, &GeCached::from_p3(&b)));
        let mixed = EdwardsPoint::from_gep1(&GeP1::from_mixed_sum(&p, &GePrecomp::from_p3(&b)));

        assert_eq!(cached, mixed);
        assert_eq!(cached, b.double().double());
    }

    #[test]
    fn mixed_difference_undoes_mixed_sum() {
        let b = EdwardsPoint::generator();
        let p = three_b();
        let q = GePrecomp::from_p3(&b);

        let sum = EdwardsPoint::from_gep1(&GeP1::from_mixed_sum(&p, &q));
        let back = EdwardsPoint::from_gep1(&GeP1::from_mixed_difference(&sum, &q));

        assert_eq!(back, p);
    }

    #[test]
    fn negated_cached_forms_subtract() {
        let b = EdwardsPoint::generator();
        let p = three_b();

        let via_neg = EdwardsPoint::from_gep1(&GeP1::from_sum(&p, &-&GeCached::from_p3(&b)));
        let via_neg_precomp =
            EdwardsPoint::from_gep1(&GeP1::from_mixed_sum(&p, &-&GePrecomp::from_p3(&b)));

        assert_eq!(via_neg, b.double());
        assert_eq!(via_neg_precomp, b.double());
    }

    #[test]
    fn intermediate_forms_stay_on_curve() {
        let p = three_b();

        assert!(p.is_valid());
        assert!(GeP2::from_p3(&p).is_valid());
        assert!(GeP2::from_gep1(&GeP2::from_p3(&p).double()).is_valid());
    }

    #[test]
    fn generator_is_torsion_free_and_valid() {
        let b = EdwardsPoint::generator();

        assert!(b.is_valid());
        assert!(b.is_torsion_free());
        assert!(!b.is_identity());
    }

    #[test]
    fn broken_segre_relation_is_invalid() {
        let mut p = three_b();
        p.t = p.t + FieldElement::ONE;

        assert!(!p.is_valid());
    }
}
