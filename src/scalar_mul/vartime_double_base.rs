#![allow(non_snake_case)]

use std::cmp::Ordering;

use crate::curve::edwards::EdwardsPoint;
use crate::curve::models::{GeCached, GeP1, GeP2};
use crate::curve::scalar::Scalar;
use crate::curve::traits::{Identity, ValidityCheck};

use super::basepoint::basepoint_naf_table;
use super::window::NafLookupTable5;

/// Computes `a·A + b·B` in variable time, where `B` is the generator.
///
/// `a` is recoded as width-5 NAF against a fresh table for `A` and `b` as
/// width-8 NAF against the shared basepoint table. The loop starts at the
/// highest nonzero digit of either recoding, so the running time reveals
/// the bit length of `max(a, b)`. Only use this with public scalars.
pub(crate) fn mul(a: &Scalar, A: &EdwardsPoint, b: &Scalar) -> EdwardsPoint {
    assert!(A.is_valid(), "double-base multiplication of an invalid point");

    let a_naf = a.non_adjacent_form(5);
    let b_naf = b.non_adjacent_form(8);

    // Find the starting index.
    let mut i: usize = 255;
    for j in (0..256).rev() {
        i = j;
        if a_naf[i] != 0 || b_naf[i] != 0 {
            break;
        }
    }

    let table_A = NafLookupTable5::<GeCached>::from(A);
    let table_B = basepoint_naf_table();

    let mut r = GeP2::identity();
    loop {
        let mut t = r.double();

        match a_naf[i].cmp(&0) {
            Ordering::Greater => {
                t = GeP1::from_sum(&EdwardsPoint::from_gep1(&t), &table_A.select(a_naf[i] as usize))
            }
            Ordering::Less => {
                t = GeP1::from_difference(
                    &EdwardsPoint::from_gep1(&t),
                    &table_A.select(-a_naf[i] as usize),
                )
            }
            Ordering::Equal => {}
        }

        match b_naf[i].cmp(&0) {
            Ordering::Greater => {
                t = GeP1::from_mixed_sum(
                    &EdwardsPoint::from_gep1(&t),
                    &table_B.select(b_naf[i] as usize),
                )
            }
            Ordering::Less => {
                t = GeP1::from_mixed_difference(
                    &EdwardsPoint::from_gep1(&t),
                    &table_B.select(-b_naf[i] as usize),
                )
            }
            Ordering::Equal => {}
        }

        if i == 0 {
            return EdwardsPoint::from_gep1(&t);
        }

        r = GeP2::from_gep1(&t);
        i -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_scalars_give_identity() {
        let A = EdwardsPoint::generator().double();

        assert!(mul(&Scalar::ZERO, &A, &Scalar::ZERO).is_identity());
    }

    #[test]
    fn matches_separate_multiplications() {
        let A = EdwardsPoint::generator().double().double();
        let a = Scalar::from(0xdead_beef_u64);
        let b = Scalar::from(0x1234_5678_9abc_u64);

        let expected = &(&A * &a) + &EdwardsPoint::mul_base(&b);

        assert_eq!(mul(&a, &A, &b), expected);
    }

    #[test]
    fn order_minus_one_negates() {
        let minus_one = -Scalar::ONE;
        let A = EdwardsPoint::generator();

        let got = mul(&minus_one, &A, &minus_one);

        assert_eq!(got, -(A.double()));
    }

    #[test]
    #[should_panic(expected = "invalid point")]
    fn invalid_point_panics() {
        let mut A = EdwardsPoint::generator();
        A.x = A.y;

        let _ = mul(&Scalar::ONE, &A, &Scalar::ONE);
    }
}
