//! Curve parameters and fixed field elements for Edwards25519.
//!
//! Limb values are in the radix-2⁵¹ layout of [`FieldElement`] and the
//! radix-2⁵² layout used internally by [`super::scalar`].

use super::edwards::EdwardsPoint;
use super::field::FieldElement;

/// Edwards `d`, equal to `−121665/121666 mod p`.
pub(crate) const EDWARDS_D: FieldElement = FieldElement([
    929955233495203,
    466365720129213,
    1662059464998953,
    2033849074728123,
    1442794654840575,
]);

/// `2·d`, folded into the cached point forms.
pub(crate) const EDWARDS_D2: FieldElement = FieldElement([
    1859910466990425,
    932731440258426,
    1072319116312658,
    1815898335770999,
    633789495995903,
]);

/// One of the square roots of −1 modulo `p`.
pub(crate) const SQRT_M1: FieldElement = FieldElement([
    1718705420411056,
    234908883556509,
    2233514472574048,
    2117202627021982,
    765476049583133,
]);

/// The Ed25519 generator, `y = 4/5` with positive `x`.
pub(crate) const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    x: FieldElement([
        1738742601995546,
        1146398526822698,
        2070867633025821,
        562264141797630,
        587772402128613,
    ]),
    y: FieldElement([
        1801439850948184,
        1351079888211148,
        450359962737049,
        900719925474099,
        1801439850948198,
    ]),
    z: FieldElement([1, 0, 0, 0, 0]),
    t: FieldElement([
        1841354044333475,
        16398895984059,
        755974180946558,
        900171276175154,
        1821297809914039,
    ]),
};

/// The group order `ℓ = 2²⁵² + 27742317777372353535851937790883648493`,
/// little-endian.
pub const BASEPOINT_ORDER_BYTES: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

/// `ℓ` in radix 2⁵².
pub(crate) const L: [u64; 5] = [
    0x0002631a5cf5d3ed,
    0x000dea2f79cd6581,
    0x000000000014def9,
    0x0000000000000000,
    0x0000100000000000,
];

/// `ℓ · LFACTOR ≡ −1 (mod 2⁵²)`.
pub(crate) const LFACTOR: u64 = 0x51da312547e1b;

/// `R = 2²⁶⁰ mod ℓ`.
pub(crate) const R: [u64; 5] = [
    0x000f48bd6721e6ed,
    0x0003bab5ac67e45a,
    0x000fffffeb35e51b,
    0x000fffffffffffff,
    0x00000fffffffffff,
];

/// `R² = 2⁵²⁰ mod ℓ`.
pub(crate) const RR: [u64; 5] = [
    0x0009d265e952d13b,
    0x000d63c715bea69f,
    0x0005be65cb687604,
    0x0003dceec73d217f,
    0x000009411b7c309a,
];
