//! Radix-16 precomputation for a fixed point.

use std::fmt;

use crate::curve::edwards::EdwardsPoint;
use crate::curve::models::{GeP1, GeP2, GePrecomp};
use crate::curve::scalar::Scalar;
use crate::curve::traits::{Identity, ValidityCheck};

use super::window::LookupTable;

/// Precomputed multiples of a point for constant-time multiplication.
///
/// Sub-table `i` holds `[1·256ⁱ·P, …, 8·256ⁱ·P]` in affine Niels form, for
/// `i ∈ [0, 32)`. The table is immutable once built and building it twice
/// from the same point yields identical entries.
///
/// Building costs 224 additions, 256 doublings and 256 inversions. A table
/// pays for itself after a handful of multiplications, which is why the
/// basepoint and any point passed to
/// [`PrecomputeCache`](super::cache::PrecomputeCache) get one.
#[derive(Clone)]
pub struct EdwardsPointTable(pub(crate) [LookupTable<GePrecomp>; 32]);

impl EdwardsPointTable {
    /// Builds the table for `point`.
    ///
    /// # Panics
    ///
    /// If `point` fails [`ValidityCheck::is_valid`].
    #[tracing::instrument(skip_all, name = "EdwardsPointTable.create")]
    pub fn create(point: &EdwardsPoint) -> EdwardsPointTable {
        assert!(
            point.is_valid(),
            "EdwardsPointTable::create called with an invalid point"
        );

        let mut p = *point;
        let tables = std::array::from_fn(|_| {
            let table = LookupTable::<GePrecomp>::from(&p);
            p = mul_by_pow_2(&p, 8);
            table
        });

        EdwardsPointTable(tables)
    }

    /// Computes `scalar · P` in constant time.
    ///
    /// With `s = Σ aᵢ·16ⁱ`, digit `a₂ᵢ₊₁` is read from sub-table `i` and
    /// the whole odd half is scaled by 16 at once:
    ///
    /// ```text
    /// s·P = 16·Σ a₂ᵢ₊₁·256ⁱ·P + Σ a₂ᵢ·256ⁱ·P
    /// ```
    ///
    /// costs 64 table additions and a single block of 4 doublings.
    pub fn mul(&self, scalar: &Scalar) -> EdwardsPoint {
        let a = scalar.to_radix_16();
        let tables = &self.0;
        let mut acc = EdwardsPoint::identity();

        for i in (1..64).step_by(2) {
            acc = EdwardsPoint::from_gep1(&GeP1::from_mixed_sum(&acc, &tables[i / 2].select(a[i])));
        }

        acc = mul_by_pow_2(&acc, 4);

        for i in (0..64).step_by(2) {
            acc = EdwardsPoint::from_gep1(&GeP1::from_mixed_sum(&acc, &tables[i / 2].select(a[i])));
        }

        acc
    }

    /// Returns the point this table was built from.
    pub fn basepoint(&self) -> EdwardsPoint {
        EdwardsPoint::from_gep1(&GeP1::from_mixed_sum(&EdwardsPoint::identity(), &self.0[0].0[0]))
    }
}

impl fmt::Debug for EdwardsPointTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdwardsPointTable")
            .field("basepoint", &self.basepoint().compress())
            .field("subtables", &self.0.len())
            .finish()
    }
}

/// Computes `2ᵏ·p` with `k ≥ 1`, staying in projective form between
/// doublings.
pub(crate) fn mul_by_pow_2(p: &EdwardsPoint, k: u32) -> EdwardsPoint {
    debug_assert!(k > 0);

    let mut s = GeP2::from_p3(p);
    for _ in 0..(k - 1) {
        s = GeP2::from_gep1(&s.double());
    }

    EdwardsPoint::from_gep1(&s.double())
}
