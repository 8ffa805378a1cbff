//! Transient point representations used inside scalar multiplication.
//!
//! [`EdwardsPoint`] (extended coordinates) is the only representation that
//! leaves the crate. The forms defined here each exist to make one step of
//! a double-and-add loop cheaper:
//!
//! - **GeP1**: completed coordinates `((X : Z), (Y : T))`
//!   - Output of every addition and doubling
//!   - Converted to `GeP2` (3M) or `EdwardsPoint` (4M) before reuse
//!
//! - **GeP2**: projective coordinates `(X : Y : Z)`
//!   - Cheapest input to doubling
//!
//! - **GeCached**: projective Niels form `(Y + X, Y − X, Z, 2·d·T)`
//!   - Second operand of additions against tables built on the fly
//!   - Negation is a swap and one field negation
//!
//! - **GePrecomp**: affine Niels form `(y + x, y − x, 2·d·x·y)`
//!   - Second operand of additions against long-lived tables
//!   - One multiplication cheaper per addition than `GeCached`, at the cost
//!     of one inversion when the entry is built
//!
//! The addition formulas are those of Hisil, Wong, Carter and Dawson for
//! `a = −1` twisted Edwards curves, in the layout used by the Ed25519
//! reference implementation.

use std::ops::Neg;

use subtle::{Choice, ConditionallySelectable};

use super::constants::{EDWARDS_D, EDWARDS_D2};
use super::edwards::EdwardsPoint;
use super::field::FieldElement;
use super::traits::{Identity, ValidityCheck};

/// A point in completed coordinates.
///
/// Represents the affine point `(X/Z, Y/T)`. Never stored.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GeP1 {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

impl GeP1 {
    /// Computes `a + b` for a cached second operand.
    pub(crate) fn from_sum(a: &EdwardsPoint, b: &GeCached) -> Self {
        let mut x = a.y + a.x;
        let mut y = a.y - a.x;
        let mut z = x * b.yplusx;
        let mut t = b.t2d * a.t;

        y = y * b.yminusx;
        x = a.z * b.z;

        let sumx = x + x;

        x = z - y;
        y = z + y;
        z = sumx + t;
        t = sumx - t;

        Self { x, y, z, t }
    }

    /// Computes `a − b` for a cached second operand.
    ///
    /// Same formula as [`GeP1::from_sum`] with the roles of `Y + X` and
    /// `Y − X` swapped and the sign of the `T` term flipped.
    pub(crate) fn from_difference(a: &EdwardsPoint, b: &GeCached) -> Self {
        let mut x = a.y + a.x;
        let mut y = a.y - a.x;
        let mut z = x * b.yminusx;
        let mut t = b.t2d * a.t;

        y = y * b.yplusx;
        x = a.z * b.z;

        let sumx = x + x;

        x = z - y;
        y = z + y;
        z = sumx - t;
        t = sumx + t;

        Self { x, y, z, t }
    }

    /// Computes `a + b` for an affine second operand (`Z₂ = 1`).
    pub(crate) fn from_mixed_sum(a: &EdwardsPoint, b: &GePrecomp) -> Self {
        let mut x = a.y + a.x;
        let mut y = a.y - a.x;
        let mut z = x * b.yplusx;
        let mut t = b.xy2d * a.t;
        let sumz = a.z + a.z;

        y = y * b.yminusx;
        x = z - y;
        y = z + y;
        z = sumz + t;
        t = sumz - t;

        Self { x, y, z, t }
    }

    /// Computes `a − b` for an affine second operand.
    pub(crate) fn from_mixed_difference(a: &EdwardsPoint, b: &GePrecomp) -> Self {
        let mut x = a.y + a.x;
        let mut y = a.y - a.x;
        let mut z = x * b.yminusx;
        let mut t = b.xy2d * a.t;
        let sumz = a.z + a.z;

        y = y * b.yplusx;
        x = z - y;
        y = z + y;
        z = sumz - t;
        t = sumz + t;

        Self { x, y, z, t }
    }
}

/// A point in projective coordinates `(X : Y : Z)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GeP2 {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl Identity for GeP2 {
    fn identity() -> Self {
        GeP2 {
            x: FieldElement::ZERO,
            y: FieldElement::ONE,
            z: FieldElement::ONE,
        }
    }
}

impl GeP2 {
    /// Drops the `T` coordinate of a completed point. Costs 3M.
    pub(crate) fn from_gep1(g: &GeP1) -> Self {
        let x = g.x * g.t;
        let y = g.y * g.z;
        let z = g.z * g.t;

        GeP2 { x, y, z }
    }

    /// Projects an extended point by dropping `T`. Free.
    pub(crate) fn from_p3(g: &EdwardsPoint) -> Self {
        GeP2 {
            x: g.x,
            y: g.y,
            z: g.z,
        }
    }

    /// Computes `2·self` into completed coordinates.
    ///
    /// ```text
    /// X' = (X + Y)² − X² − Y²     Z' = Y² − X²
    /// Y' = Y² + X²                T' = 2Z² − (Y² − X²)
    /// ```
    pub(crate) fn double(&self) -> GeP1 {
        let xx = self.x.square();
        let yy = self.y.square();
        let zz2 = self.z.double_square();
        let x_plus_y_sq = (self.x + self.y).square();

        let y = yy + xx;
        let z = yy - xx;
        let x = x_plus_y_sq - y;
        let t = zz2 - z;

        GeP1 { x, y, z, t }
    }
}

impl ValidityCheck for GeP2 {
    /// Checks the homogenized curve equation
    /// `(−X² + Y²)·Z² = Z⁴ + d·X²·Y²`.
    fn is_valid(&self) -> bool {
        let xx = self.x.square();
        let yy = self.y.square();
        let zz = self.z.square();
        let zzzz = zz.square();

        let lhs = (yy - xx) * zz;
        let rhs = zzzz + EDWARDS_D * (xx * yy);

        lhs == rhs
    }
}

/// A point in projective Niels form `(Y + X, Y − X, Z, 2·d·T)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GeCached {
    pub(crate) yplusx: FieldElement,
    pub(crate) yminusx: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t2d: FieldElement,
}

impl GeCached {
    pub(crate) fn from_p3(g: &EdwardsPoint) -> Self {
        GeCached {
            yplusx: g.y + g.x,
            yminusx: g.y - g.x,
            z: g.z,
            t2d: g.t * EDWARDS_D2,
        }
    }
}

impl Identity for GeCached {
    fn identity() -> Self {
        GeCached {
            yplusx: FieldElement::ONE,
            yminusx: FieldElement::ONE,
            z: FieldElement::ONE,
            t2d: FieldElement::ZERO,
        }
    }
}

impl ConditionallySelectable for GeCached {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        GeCached {
            yplusx: FieldElement::conditional_select(&a.yplusx, &b.yplusx, choice),
            yminusx: FieldElement::conditional_select(&a.yminusx, &b.yminusx, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            t2d: FieldElement::conditional_select(&a.t2d, &b.t2d, choice),
        }
    }
}

impl Neg for &GeCached {
    type Output = GeCached;

    fn neg(self) -> GeCached {
        GeCached {
            yplusx: self.yminusx,
            yminusx: self.yplusx,
            z: self.z,
            t2d: -self.t2d,
        }
    }
}

/// A point in affine Niels form `(y + x, y − x, 2·d·x·y)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GePrecomp {
    pub(crate) yplusx: FieldElement,
    pub(crate) yminusx: FieldElement,
    pub(crate) xy2d: FieldElement,
}

impl GePrecomp {
    /// Normalizes an extended point to affine coordinates. Costs one
    /// inversion, so this is only used when building long-lived tables.
    pub(crate) fn from_p3(g: &EdwardsPoint) -> Self {
        let recip = g.z.invert();
        let x = g.x * recip;
        let y = g.y * recip;

        GePrecomp {
            yplusx: y + x,
            yminusx: y - x,
            xy2d: (x * y) * EDWARDS_D2,
        }
    }
}

impl Identity for GePrecomp {
    fn identity() -> Self {
        GePrecomp {
            yplusx: FieldElement::ONE,
            yminusx: FieldElement::ONE,
            xy2d: FieldElement::ZERO,
        }
    }
}

impl ConditionallySelectable for GePrecomp {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        GePrecomp {
            yplusx: FieldElement::conditional_select(&a.yplusx, &b.yplusx, choice),
            yminusx: FieldElement::conditional_select(&a.yminusx, &b.yminusx, choice),
            xy2d: FieldElement::conditional_select(&a.xy2d, &b.xy2d, choice),
        }
    }
}

impl Neg for &GePrecomp {
    type Output = GePrecomp;

    fn neg(self) -> GePrecomp {
        GePrecomp {
            yplusx: self.yminusx,
            yminusx: self.yplusx,
            xy2d: -self.xy2d,
        }
    }
}
