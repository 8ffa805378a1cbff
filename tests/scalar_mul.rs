mod common;

use common::{A_SCALAR, A_TIMES_BASEPOINT, B_SCALAR, DOUBLE_SCALAR_MULT_RESULT, random_point, random_scalar, rng};
use edwards_scalarmul::{
    BASEPOINT_ORDER_BYTES, EdwardsPoint, EdwardsPointTable, Engine, Identity, Scalar, basepoint_table, scalar_mul,
    scalar_mul_base, scalar_mul_cached, vartime_double_scalar_mul_base,
};

fn a_scalar() -> Scalar {
    Scalar::from_canonical_bytes(A_SCALAR).unwrap()
}

fn b_scalar() -> Scalar {
    Scalar::from_canonical_bytes(B_SCALAR).unwrap()
}

#[test]
fn test_fixed_base_known_vector() {
    let p = scalar_mul_base(&a_scalar());

    assert_eq!(p.compress().to_bytes(), A_TIMES_BASEPOINT);
}

#[test]
fn test_variable_base_known_vector() {
    let b = EdwardsPoint::generator();
    let engine = Engine::new();

    assert_eq!(engine.mul(&a_scalar(), &b).compress().to_bytes(), A_TIMES_BASEPOINT);
    assert_eq!(engine.mul_cached(&a_scalar(), &b).compress().to_bytes(), A_TIMES_BASEPOINT);
    assert_eq!((&b * &a_scalar()).compress().to_bytes(), A_TIMES_BASEPOINT);
    assert_eq!((&a_scalar() * &b).compress().to_bytes(), A_TIMES_BASEPOINT);
}

#[test]
fn test_double_base_known_vector() {
    let a_point = EdwardsPoint::from_bytes(&A_TIMES_BASEPOINT).unwrap();
    let result = vartime_double_scalar_mul_base(&a_scalar(), &a_point, &b_scalar());

    assert_eq!(result.compress().to_bytes(), DOUBLE_SCALAR_MULT_RESULT);
    assert_eq!(
        EdwardsPoint::vartime_double_scalar_mul_basepoint(&a_scalar(), &a_point, &b_scalar()),
        result
    );
}

#[test]
fn test_algorithms_agree_on_random_inputs() {
    let mut rng = rng(0xa9ee);
    let engine = Engine::new();

    for _ in 0..16 {
        let s = random_scalar(&mut rng);
        let p = random_point(&mut rng);

        let plain = engine.mul(&s, &p);
        let cached = engine.mul_cached(&s, &p);

        assert_eq!(plain, cached, "cached and uncached multiplication must agree");
        assert_eq!(engine.precompute(&p).mul(&s), plain);
    }
}

#[test]
fn test_fixed_base_agrees_with_variable_base_on_generator() {
    let mut rng = rng(0xb45e);
    let b = EdwardsPoint::generator();
    let engine = Engine::new();

    for _ in 0..16 {
        let s = random_scalar(&mut rng);
        let fixed = engine.mul_base(&s);

        assert_eq!(fixed, engine.mul(&s, &b));
        assert_eq!(fixed, engine.mul_cached(&s, &b));
        assert_eq!(fixed, EdwardsPoint::mul_base(&s));
    }
}

#[test]
fn test_double_base_agrees_with_separate_products() {
    let mut rng = rng(0xd0b1e);
    let engine = Engine::new();

    for _ in 0..16 {
        let a = random_scalar(&mut rng);
        let b = random_scalar(&mut rng);
        let big_a = random_point(&mut rng);

        let expected = &engine.mul(&a, &big_a) + &engine.mul_base(&b);

        assert_eq!(engine.vartime_double_base_mul(&a, &big_a, &b), expected);
    }
}

#[test]
fn test_double_base_with_one_zero_scalar() {
    let mut rng = rng(0x2e70);
    let a = random_scalar(&mut rng);
    let b = random_scalar(&mut rng);
    let big_a = random_point(&mut rng);

    assert_eq!(
        vartime_double_scalar_mul_base(&a, &big_a, &Scalar::ZERO),
        scalar_mul(&a, &big_a)
    );
    assert_eq!(
        vartime_double_scalar_mul_base(&Scalar::ZERO, &big_a, &b),
        scalar_mul_base(&b)
    );
    assert!(vartime_double_scalar_mul_base(&Scalar::ZERO, &big_a, &Scalar::ZERO).is_identity());
}

#[test]
fn test_boundaries() {
    let mut rng = rng(0xb0b);
    let b = EdwardsPoint::generator();
    let minus_one = -Scalar::ONE;

    for _ in 0..4 {
        let p = random_point(&mut rng);
        assert!(scalar_mul(&Scalar::ZERO, &p).is_identity(), "0·P is the identity");
        assert!(scalar_mul_cached(&Scalar::ZERO, &p).is_identity());
        assert_eq!(scalar_mul(&Scalar::ONE, &p), p, "1·P is P");
        assert_eq!(scalar_mul(&minus_one, &p), -p, "(ℓ − 1)·P is −P");
    }

    assert!(scalar_mul_base(&Scalar::ZERO).is_identity());
    assert_eq!(scalar_mul_base(&Scalar::ONE), b);
    assert_eq!(scalar_mul_base(&Scalar::from(2u64)), &b + &b);
    assert_eq!(scalar_mul_base(&minus_one), -b);
    assert!(scalar_mul_base(&Scalar::from_bytes_mod_order(BASEPOINT_ORDER_BYTES)).is_identity());
}

#[test]
fn test_small_multiples() {
    let b = EdwardsPoint::generator();
    let mut expected = EdwardsPoint::identity();

    for k in 0u64..40 {
        let s = Scalar::from(k);
        assert_eq!(scalar_mul_base(&s), expected, "{k}·B fixed base");
        assert_eq!(scalar_mul_cached(&s, &b), expected, "{k}·B cached");
        expected = &expected + &b;
    }
}

#[test]
fn test_multiplication_is_linear() {
    let mut rng = rng(0x11ea);
    let p = random_point(&mut rng);
    let a = random_scalar(&mut rng);
    let b = random_scalar(&mut rng);

    assert_eq!(scalar_mul(&(a + b), &p), &scalar_mul(&a, &p) + &scalar_mul(&b, &p));
    assert_eq!(scalar_mul(&(a * b), &p), scalar_mul(&a, &scalar_mul(&b, &p)));
}

#[test]
fn test_basepoint_table_handle() {
    let table = basepoint_table();
    let s = a_scalar();

    assert_eq!(table.basepoint(), EdwardsPoint::generator());
    assert_eq!(table.mul(&s).compress().to_bytes(), A_TIMES_BASEPOINT);

    let rebuilt = EdwardsPointTable::create(&EdwardsPoint::generator());
    assert_eq!(rebuilt.mul(&s), table.mul(&s));
}
