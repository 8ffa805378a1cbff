//! Lookup tables of small multiples of a point.
//!
//! - [`LookupTable`] holds `[P, 2P, …, 8P]` and is indexed by a signed
//!   radix-16 digit in constant time.
//! - [`NafLookupTable5`] holds the odd multiples `[P, 3P, …, 15P]`.
//! - [`NafLookupTable8`] holds the odd multiples `[P, 3P, …, 127P]`.
//!
//! The NAF tables are indexed directly and are only used on variable-time
//! paths.

use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq};

use crate::curve::edwards::EdwardsPoint;
use crate::curve::models::{GeCached, GeP1, GePrecomp};
use crate::curve::traits::Identity;

/// `[P, 2P, 3P, 4P, 5P, 6P, 7P, 8P]` in a cached form.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LookupTable<T>(pub(crate) [T; 8]);

impl<T> LookupTable<T>
where
    T: Identity + ConditionallySelectable + ConditionallyNegatable,
{
    /// Returns `x·P` for `x ∈ [−8, 8]`.
    ///
    /// Every entry is read and the sign is applied with a conditional
    /// negation, so neither timing nor memory access depends on `x`.
    pub(crate) fn select(&self, x: i8) -> T {
        debug_assert!(x >= -8);
        debug_assert!(x <= 8);

        // All ones if x < 0, zero otherwise.
        let xmask = (x as i16) >> 7;
        let xabs = ((x as i16 + xmask) ^ xmask) as u16;

        let mut t = T::identity();
        for j in 1..9 {
            let c = xabs.ct_eq(&(j as u16));
            t.conditional_assign(&self.0[j - 1], c);
        }

        let neg_mask = Choice::from((xmask & 1) as u8);
        t.conditional_negate(neg_mask);

        t
    }
}

impl From<&EdwardsPoint> for LookupTable<GeCached> {
    fn from(p: &EdwardsPoint) -> Self {
        let mut points = [GeCached::from_p3(p); 8];

        for j in 0..7 {
            let next = EdwardsPoint::from_gep1(&GeP1::from_sum(p, &points[j]));
            points[j + 1] = GeCached::from_p3(&next);
        }

        LookupTable(points)
    }
}

impl From<&EdwardsPoint> for LookupTable<GePrecomp> {
    fn from(p: &EdwardsPoint) -> Self {
        let base = GePrecomp::from_p3(p);
        let mut points = [base; 8];
        let mut acc = *p;

        for point in points.iter_mut().skip(1) {
            acc = EdwardsPoint::from_gep1(&GeP1::from_mixed_sum(&acc, &base));
            *point = GePrecomp::from_p3(&acc);
        }

        LookupTable(points)
    }
}

/// `[P, 3P, 5P, …, 15P]`, for width-5 NAF digits.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NafLookupTable5<T>(pub(crate) [T; 8]);

impl<T: Copy> NafLookupTable5<T> {
    /// Returns `x·P` for odd `x < 16`. Variable time.
    pub(crate) fn select(&self, x: usize) -> T {
        debug_assert_eq!(x & 1, 1);
        debug_assert!(x < 16);

        self.0[x / 2]
    }
}

impl From<&EdwardsPoint> for NafLookupTable5<GeCached> {
    fn from(p: &EdwardsPoint) -> Self {
        let mut ai = [GeCached::from_p3(p); 8];
        let p2 = p.double();

        for i in 0..7 {
            ai[i + 1] = GeCached::from_p3(&EdwardsPoint::from_gep1(&GeP1::from_sum(&p2, &ai[i])));
        }

        NafLookupTable5(ai)
    }
}

/// `[P, 3P, 5P, …, 127P]`, for width-8 NAF digits.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NafLookupTable8<T>(pub(crate) [T; 64]);

impl<T: Copy> NafLookupTable8<T> {
    /// Returns `x·P` for odd `x < 128`. Variable time.
    pub(crate) fn select(&self, x: usize) -> T {
        debug_assert_eq!(x & 1, 1);
        debug_assert!(x < 128);

        self.0[x / 2]
    }
}

impl From<&EdwardsPoint> for NafLookupTable8<GePrecomp> {
    fn from(p: &EdwardsPoint) -> Self {
        let mut ai = [GePrecomp::from_p3(p); 64];
        let p2 = GeCached::from_p3(&p.double());
        let mut acc = *p;

        for entry in ai.iter_mut().skip(1) {
            acc = EdwardsPoint::from_gep1(&GeP1::from_sum(&acc, &p2));
            *entry = GePrecomp::from_p3(&acc);
        }

        NafLookupTable8(ai)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lift_cached(c: &GeCached) -> EdwardsPoint {
        EdwardsPoint::from_gep1(&GeP1::from_sum(&EdwardsPoint::identity(), c))
    }

    fn lift_precomp(c: &GePrecomp) -> EdwardsPoint {
        EdwardsPoint::from_gep1(&GeP1::from_mixed_sum(&EdwardsPoint::identity(), c))
    }

    fn multiples(p: &EdwardsPoint, n: usize) -> Vec<EdwardsPoint> {
        let mut out = Vec::with_capacity(n + 1);
        let mut acc = EdwardsPoint::identity();
        for _ in 0..=n {
            out.push(acc);
            acc = &acc + p;
        }
        out
    }

    #[test]
    fn lookup_table_selects_signed_multiples() {
        let b = EdwardsPoint::generator();
        let expected = multiples(&b, 8);
        let cached = LookupTable::<GeCached>::from(&b);
        let precomp = LookupTable::<GePrecomp>::from(&b);

        for x in -8i8..=8 {
            let k = x.unsigned_abs() as usize;
            let want = if x < 0 { -expected[k] } else { expected[k] };

            assert_eq!(lift_cached(&cached.select(x)), want, "cached digit {x}");
            assert_eq!(lift_precomp(&precomp.select(x)), want, "precomp digit {x}");
        }
    }

    #[test]
    fn naf_tables_hold_odd_multiples() {
        let b = EdwardsPoint::generator();
        let expected = multiples(&b, 127);
        let naf5 = NafLookupTable5::<GeCached>::from(&b);
        let naf8 = NafLookupTable8::<GePrecomp>::from(&b);

        for x in (1..16).step_by(2) {
            assert_eq!(lift_cached(&naf5.select(x)), expected[x], "naf5 entry {x}");
        }
        for x in (1..128).step_by(2) {
            assert_eq!(lift_precomp(&naf8.select(x)), expected[x], "naf8 entry {x}");
        }
    }
}
