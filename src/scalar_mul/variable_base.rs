use crate::curve::edwards::EdwardsPoint;
use crate::curve::models::{GeCached, GeP1, GeP2};
use crate::curve::scalar::Scalar;
use crate::curve::traits::{Identity, ValidityCheck};

use super::window::LookupTable;

/// Constant-time `scalar · point` for a point used once.
///
/// Builds `[P, …, 8P]` and walks the 64 radix-16 digits from the top:
///
/// ```text
/// s·P = P·s₀ + 16·(P·s₁ + 16·(… + 16·P·s₆₃))
/// ```
pub(crate) fn mul(point: &EdwardsPoint, scalar: &Scalar) -> EdwardsPoint {
    assert!(point.is_valid(), "scalar multiplication of an invalid point");

    let lookup_table = LookupTable::<GeCached>::from(point);
    let scalar_digits = scalar.to_radix_16();

    // Digit 63 first, skipping 16·identity.
    let mut acc = EdwardsPoint::identity();
    let mut sum = GeP1::from_sum(&acc, &lookup_table.select(scalar_digits[63]));

    for i in (0..63).rev() {
        let mut s = GeP2::from_gep1(&sum);
        sum = s.double();
        s = GeP2::from_gep1(&sum);
        sum = s.double();
        s = GeP2::from_gep1(&sum);
        sum = s.double();
        s = GeP2::from_gep1(&sum);
        sum = s.double();

        acc = EdwardsPoint::from_gep1(&sum);
        sum = GeP1::from_sum(&acc, &lookup_table.select(scalar_digits[i]));
    }

    EdwardsPoint::from_gep1(&sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::constants::BASEPOINT_ORDER_BYTES;

    #[test]
    fn literal_group_order_gives_identity() {
        // Bypasses reduction: ℓ itself has a valid radix-16 expansion.
        let order = Scalar {
            bytes: BASEPOINT_ORDER_BYTES,
        };
        let p = EdwardsPoint::generator().double();

        assert!(mul(&p, &order).is_identity());
    }

    #[test]
    #[should_panic(expected = "invalid point")]
    fn invalid_point_panics() {
        let mut p = EdwardsPoint::generator();
        p.z = crate::curve::field::FieldElement::ZERO;

        let _ = mul(&p, &Scalar::ONE);
    }

    #[test]
    fn zero_gives_identity() {
        let p = EdwardsPoint::generator();

        assert!(mul(&p, &Scalar::ZERO).is_identity());
    }

    #[test]
    fn small_scalars_match_repeated_addition() {
        let b = EdwardsPoint::generator();
        let mut expected = EdwardsPoint::identity();

        for k in 0u64..20 {
            assert_eq!(mul(&b, &Scalar::from(k)), expected, "k = {k}");
            expected = &expected + &b;
        }
    }
}
