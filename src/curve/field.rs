//! Finite field arithmetic for Edwards25519.
//!
//! This module implements arithmetic in the prime field
//!
//! ```text
//! 𝔽ₚ where p = 2²⁵⁵ − 19
//! ```
//!
//! ## Representation
//!
//! Field elements are stored as five unsigned 64-bit limbs in radix 2⁵¹:
//!
//! ```text
//! x = x₀ + x₁·2⁵¹ + x₂·2¹⁰² + x₃·2¹⁵³ + x₄·2²⁰⁴
//! ```
//!
//! Limbs are allowed to grow slightly beyond 51 bits between reductions.
//! Additions never reduce; subtractions, negations and multiplications
//! always return limbs bounded by `2⁵¹ + ε`. Products are accumulated in
//! `u128`, so no intermediate value can overflow as long as every input
//! limb stays below `2⁵⁴`.
//!
//! ## Security properties
//!
//! - No secret-dependent branches
//! - No secret-dependent memory access
//! - Equality and selection go through `subtle`
//!
//! The only canonical form is the 32-byte encoding produced by
//! [`FieldElement::to_bytes`]. Two elements with different limbs may be
//! equal, so comparisons always go through the encoding.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// `16·p`, limb by limb. Added before subtracting so limbs never underflow.
const SIXTEEN_P: [u64; 5] = [
    36028797018963664,
    36028797018963952,
    36028797018963952,
    36028797018963952,
    36028797018963952,
];

/// Widening limb product.
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

/// Field element modulo `2²⁵⁵ − 19` in radix `2⁵¹`.
#[derive(Clone, Copy)]
pub(crate) struct FieldElement(pub(crate) [u64; 5]);

impl FieldElement {
    /// The additive identity (0).
    pub(crate) const ZERO: Self = FieldElement([0, 0, 0, 0, 0]);

    /// The multiplicative identity (1).
    pub(crate) const ONE: Self = FieldElement([1, 0, 0, 0, 0]);

    /// Carries each limb into the next one, folding the top carry back
    /// into the lowest limb multiplied by 19.
    ///
    /// Input limbs may be up to 64 bits; output limbs are below `2⁵¹ + 2¹⁵`.
    #[inline(always)]
    fn reduce(mut limbs: [u64; 5]) -> Self {
        let c0 = limbs[0] >> 51;
        let c1 = limbs[1] >> 51;
        let c2 = limbs[2] >> 51;
        let c3 = limbs[3] >> 51;
        let c4 = limbs[4] >> 51;

        limbs[0] &= LOW_51_BIT_MASK;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        limbs[0] += c4 * 19;
        limbs[1] += c0;
        limbs[2] += c1;
        limbs[3] += c2;
        limbs[4] += c3;

        FieldElement(limbs)
    }

    /// Carries a five-term wide accumulator down to 51-bit limbs.
    ///
    /// Shared by [`Mul`] and [`FieldElement::square`], which only differ in
    /// how the `cᵢ` coefficients are formed.
    #[inline(always)]
    fn carry_wide(c: [u128; 5]) -> Self {
        let [c0, mut c1, mut c2, mut c3, mut c4] = c;
        let mut out = [0u64; 5];

        c1 += ((c0 >> 51) as u64) as u128;
        out[0] = (c0 as u64) & LOW_51_BIT_MASK;

        c2 += ((c1 >> 51) as u64) as u128;
        out[1] = (c1 as u64) & LOW_51_BIT_MASK;

        c3 += ((c2 >> 51) as u64) as u128;
        out[2] = (c2 as u64) & LOW_51_BIT_MASK;

        c4 += ((c3 >> 51) as u64) as u128;
        out[3] = (c3 as u64) & LOW_51_BIT_MASK;

        let carry = (c4 >> 51) as u64;
        out[4] = (c4 as u64) & LOW_51_BIT_MASK;

        out[0] += carry * 19;
        out[1] += out[0] >> 51;
        out[0] &= LOW_51_BIT_MASK;

        FieldElement(out)
    }

    /// Decodes a field element from 32 little-endian bytes.
    ///
    /// The most significant bit (bit 255) is ignored, as required by the
    /// Ed25519 point encoding, which stores the sign of `x` there. The
    /// result is not necessarily reduced: inputs in `[p, 2²⁵⁵)` are
    /// accepted and behave as their residue.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> Self {
        let load8 = |offset: usize| -> u64 {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[offset..offset + 8]);
            u64::from_le_bytes(word)
        };

        FieldElement([
            load8(0) & LOW_51_BIT_MASK,
            (load8(6) >> 3) & LOW_51_BIT_MASK,
            (load8(12) >> 6) & LOW_51_BIT_MASK,
            (load8(19) >> 1) & LOW_51_BIT_MASK,
            (load8(24) >> 12) & LOW_51_BIT_MASK,
        ])
    }

    /// Encodes the element into its canonical 32-byte little-endian form.
    ///
    /// The value is fully reduced into `[0, p)` first:
    ///
    /// 1. A weak reduction brings every limb below `2⁵¹ + ε`.
    /// 2. The quotient `q ∈ {0, 1}` of `(x + 19) / 2²⁵⁵` is computed by
    ///    rippling a carry through the limbs.
    /// 3. `19·q` is added and the bit at position 255 is dropped, which
    ///    subtracts `q·p`.
    ///
    /// The top bit of the output is always zero.
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        let mut limbs = FieldElement::reduce(self.0).0;

        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        limbs[0] += 19 * q;

        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        // Repack 5 × 51 bits into 32 bytes. The accumulator never holds
        // more than 58 bits, and the loop bounds are public.
        let mut output = [0u8; 32];
        let mut acc: u64 = 0;
        let mut acc_bits = 0;
        let mut index = 0;

        for limb in limbs {
            acc |= limb << acc_bits;
            acc_bits += 51;

            while acc_bits >= 8 {
                output[index] = acc as u8;
                acc >>= 8;
                acc_bits -= 8;
                index += 1;
            }
        }

        output[index] = acc as u8;

        output
    }

    /// Returns `1` if the canonical encoding is odd.
    ///
    /// This is the "sign" of a field element in the Ed25519 encoding.
    pub(crate) fn is_negative(&self) -> Choice {
        Choice::from(self.to_bytes()[0] & 1)
    }

    /// Returns `1` if the element is zero.
    pub(crate) fn is_zero(&self) -> Choice {
        self.to_bytes()[..].ct_eq(&[0u8; 32][..])
    }

    /// Computes `self²`.
    ///
    /// Cross terms are doubled once instead of being computed twice, and
    /// terms wrapping past `2²⁵⁵` are pre-multiplied by 19.
    pub(crate) fn square(&self) -> Self {
        let a = &self.0;

        let a3_19 = 19 * a[3];
        let a4_19 = 19 * a[4];

        let c0 = m(a[0], a[0]) + 2 * (m(a[1], a4_19) + m(a[2], a3_19));
        let c1 = m(a[3], a3_19) + 2 * (m(a[0], a[1]) + m(a[2], a4_19));
        let c2 = m(a[1], a[1]) + 2 * (m(a[0], a[2]) + m(a[4], a3_19));
        let c3 = m(a[4], a4_19) + 2 * (m(a[0], a[3]) + m(a[1], a[2]));
        let c4 = m(a[2], a[2]) + 2 * (m(a[0], a[4]) + m(a[1], a[3]));

        FieldElement::carry_wide([c0, c1, c2, c3, c4])
    }

    /// Computes `2·self²`, used by the doubling formula.
    pub(crate) fn double_square(&self) -> Self {
        let square = self.square();
        square + square
    }

    /// Computes `self^(2^k)` by `k` successive squarings.
    pub(crate) fn pow2k(&self, k: u32) -> Self {
        debug_assert!(k > 0);

        let mut output = *self;
        for _ in 0..k {
            output = output.square();
        }

        output
    }

    /// Computes `(self^(2²⁵⁰ − 1), self¹¹)`.
    ///
    /// This is the shared prefix of the addition chains used by
    /// [`FieldElement::invert`] and [`FieldElement::pow_p58`].
    fn pow22501(&self) -> (Self, Self) {
        let t0 = self.square(); // 2
        let t1 = t0.square().square(); // 8
        let t2 = *self * t1; // 9
        let t3 = t0 * t2; // 11
        let t4 = t3.square(); // 22
        let t5 = t2 * t4; // 2^5 - 1
        let t6 = t5.pow2k(5); // 2^10 - 2^5
        let t7 = t6 * t5; // 2^10 - 1
        let t8 = t7.pow2k(10); // 2^20 - 2^10
        let t9 = t8 * t7; // 2^20 - 1
        let t10 = t9.pow2k(20); // 2^40 - 2^20
        let t11 = t10 * t9; // 2^40 - 1
        let t12 = t11.pow2k(10); // 2^50 - 2^10
        let t13 = t12 * t7; // 2^50 - 1
        let t14 = t13.pow2k(50); // 2^100 - 2^50
        let t15 = t14 * t13; // 2^100 - 1
        let t16 = t15.pow2k(100); // 2^200 - 2^100
        let t17 = t16 * t15; // 2^200 - 1
        let t18 = t17.pow2k(50); // 2^250 - 2^50
        let t19 = t18 * t13; // 2^250 - 1

        (t19, t3)
    }

    /// Computes the multiplicative inverse `self^(p − 2)`.
    ///
    /// The inverse of zero is zero. Runs in constant time.
    pub(crate) fn invert(&self) -> Self {
        let (t19, t3) = self.pow22501();
        let t20 = t19.pow2k(5); // 2^255 - 2^5

        t20 * t3 // 2^255 - 21
    }

    /// Computes `self^((p − 5) / 8) = self^(2²⁵² − 3)`.
    ///
    /// Used by point decompression to extract square roots.
    pub(crate) fn pow_p58(&self) -> Self {
        let (t19, _) = self.pow22501();
        let t20 = t19.pow2k(2); // 2^252 - 4

        *self * t20 // 2^252 - 3
    }
}

impl Add for FieldElement {
    type Output = Self;

    /// Limb-wise addition without reduction.
    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        FieldElement([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
            self.0[3] + rhs.0[3],
            self.0[4] + rhs.0[4],
        ])
    }
}

impl Sub for FieldElement {
    type Output = Self;

    /// Subtraction via `(self + 16·p) − rhs`, followed by a weak reduction.
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        FieldElement::reduce([
            (self.0[0] + SIXTEEN_P[0]) - rhs.0[0],
            (self.0[1] + SIXTEEN_P[1]) - rhs.0[1],
            (self.0[2] + SIXTEEN_P[2]) - rhs.0[2],
            (self.0[3] + SIXTEEN_P[3]) - rhs.0[3],
            (self.0[4] + SIXTEEN_P[4]) - rhs.0[4],
        ])
    }
}

impl Mul for FieldElement {
    type Output = Self;

    /// Schoolbook multiplication with the `2²⁵⁵ ≡ 19` fold applied to the
    /// high half before accumulation.
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        let a = &self.0;
        let b = &rhs.0;

        let b1_19 = b[1] * 19;
        let b2_19 = b[2] * 19;
        let b3_19 = b[3] * 19;
        let b4_19 = b[4] * 19;

        let c0 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
        let c1 = m(a[1], b[0]) + m(a[0], b[1]) + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
        let c2 = m(a[2], b[0]) + m(a[1], b[1]) + m(a[0], b[2]) + m(a[4], b3_19) + m(a[3], b4_19);
        let c3 = m(a[3], b[0]) + m(a[2], b[1]) + m(a[1], b[2]) + m(a[0], b[3]) + m(a[4], b4_19);
        let c4 = m(a[4], b[0]) + m(a[3], b[1]) + m(a[2], b[2]) + m(a[1], b[3]) + m(a[0], b[4]);

        FieldElement::carry_wide([c0, c1, c2, c3, c4])
    }
}

impl Neg for FieldElement {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        FieldElement::reduce([
            SIXTEEN_P[0] - self.0[0],
            SIXTEEN_P[1] - self.0[1],
            SIXTEEN_P[2] - self.0[2],
            SIXTEEN_P[3] - self.0[3],
            SIXTEEN_P[4] - self.0[4],
        ])
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        FieldElement([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement {
    /// Compares canonical encodings, since limbs are not unique.
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes()[..].ct_eq(&other.to_bytes()[..])
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({:?})", &self.0)
    }
}
