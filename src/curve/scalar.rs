//! Scalar arithmetic modulo the Edwards25519 group order.
//!
//! Scalars are integers modulo
//!
//! ```text
//! ℓ = 2²⁵² + 27742317777372353535851937790883648493
//! ```
//!
//! ## Representation
//!
//! A [`Scalar`] is stored as its canonical 32-byte little-endian encoding.
//! Every constructor reduces modulo `ℓ`, so a `Scalar` value is always in
//! `[0, ℓ)` and its top bit is always clear.
//!
//! Arithmetic unpacks into five 52-bit limbs and uses Montgomery
//! multiplication with `R = 2²⁶⁰`.
//!
//! ## Digit views
//!
//! Scalar multiplication never consumes the bytes directly. It consumes
//! one of two recodings:
//!
//! - [`Scalar::to_radix_16`]: 64 signed digits in `[-8, 8]`, used by every
//!   constant-time algorithm.
//! - [`Scalar::non_adjacent_form`]: 256 sparse signed digits, used by the
//!   variable-time double-base algorithm.
//!
//! The radix-16 recoding is branch-free. The NAF recoding branches on the
//! scalar and must only be applied to public values.

use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

use subtle::{Choice, ConstantTimeEq};

use super::constants;
use crate::error::ScalarError;

/// An integer modulo the group order `ℓ`.
#[derive(Clone, Copy, Default, Hash)]
pub struct Scalar {
    pub(crate) bytes: [u8; 32],
}

impl Scalar {
    /// The scalar `0`.
    pub const ZERO: Self = Scalar { bytes: [0u8; 32] };

    /// The scalar `1`.
    pub const ONE: Self = Scalar {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    };

    /// Reduces a 256-bit little-endian integer modulo `ℓ`.
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Self {
        let unreduced = UnpackedScalar::from_bytes(&bytes);
        let x_r = UnpackedScalar::mul_internal(&unreduced, &UnpackedScalar(constants::R));

        UnpackedScalar::montgomery_reduce(&x_r).pack()
    }

    /// Reduces a 512-bit little-endian integer modulo `ℓ`.
    ///
    /// This is the constructor to use for hash outputs and for uniformly
    /// random scalars: reducing 64 random bytes gives a distribution that
    /// is statistically indistinguishable from uniform.
    pub fn from_bytes_mod_order_wide(bytes: &[u8; 64]) -> Self {
        UnpackedScalar::from_bytes_wide(bytes).pack()
    }

    /// Decodes a canonical scalar encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ScalarError::NonCanonical`] if the encoded integer is not
    /// strictly less than `ℓ`.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> Result<Self, ScalarError> {
        let candidate = Scalar::from_bytes_mod_order(bytes);

        if bool::from(candidate.bytes[..].ct_eq(&bytes[..])) {
            Ok(candidate)
        } else {
            Err(ScalarError::NonCanonical)
        }
    }

    /// Returns the canonical little-endian encoding.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// Borrows the canonical little-endian encoding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Writes the scalar in signed radix 16.
    ///
    /// Returns `a₀ … a₆₃` such that
    ///
    /// ```text
    /// self = a₀ + a₁·16 + a₂·16² + … + a₆₃·16⁶³
    /// ```
    ///
    /// with `−8 ≤ aᵢ < 8` for `i < 63` and `0 ≤ a₆₃ ≤ 8`.
    ///
    /// ## Algorithm
    ///
    /// 1. Split each byte into two nibbles in `[0, 15]`.
    /// 2. Recenter nibbles 0 through 62 into `[−8, 8)` by carrying `1` into
    ///    the next nibble whenever a nibble is at least 8.
    /// 3. The final carry lands in `a₆₃`, which started at most at 7
    ///    because the top bit of a reduced scalar is clear.
    ///
    /// The carry is computed arithmetically, so the recoding is
    /// constant-time.
    pub fn to_radix_16(&self) -> [i8; 64] {
        debug_assert!(self.bytes[31] <= 127);

        let mut output = [0i8; 64];

        for (i, &byte) in self.bytes.iter().enumerate() {
            output[2 * i] = (byte & 15) as i8;
            output[2 * i + 1] = ((byte >> 4) & 15) as i8;
        }

        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }

        output
    }

    /// Computes the width-`w` non-adjacent form of the scalar.
    ///
    /// Returns `n₀ … n₂₅₅` such that
    ///
    /// ```text
    /// self = Σ nᵢ·2ⁱ
    /// ```
    ///
    /// where every nonzero `nᵢ` is odd with `|nᵢ| < 2^(w−1)`, and any two
    /// nonzero digits are at least `w` positions apart.
    ///
    /// ## Algorithm
    ///
    /// The scalar is scanned low to high. When the `w`-bit window at the
    /// current position (plus a pending carry) is even, the digit is left
    /// at zero and the scan advances by one bit. When it is odd, the window
    /// is reduced into `(−2^(w−1), 2^(w−1))`; a negative digit leaves a
    /// carry of one for the next window. The scan then skips `w` bits.
    ///
    /// # Panics
    ///
    /// In debug builds, if `w` is outside `2..=8`.
    ///
    /// # Security
    ///
    /// Branches on the scalar. Only use on public scalars.
    pub fn non_adjacent_form(&self, w: usize) -> [i8; 256] {
        debug_assert!(w >= 2);
        debug_assert!(w <= 8);

        let mut naf = [0i8; 256];

        let mut x_u64 = [0u64; 5];
        for (word, chunk) in x_u64.iter_mut().zip(self.bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_le_bytes(buf);
        }

        let width = 1u64 << w;
        let window_mask = width - 1;

        let mut pos = 0;
        let mut carry = 0;
        while pos < 256 {
            let u64_idx = pos / 64;
            let bit_idx = pos % 64;

            // Read a window that may straddle two words.
            let bit_buf = if bit_idx < 64 - w {
                x_u64[u64_idx] >> bit_idx
            } else {
                (x_u64[u64_idx] >> bit_idx) | (x_u64[1 + u64_idx] << (64 - bit_idx))
            };

            let window = carry + (bit_buf & window_mask);

            if window & 1 == 0 {
                pos += 1;
                continue;
            }

            if window < width / 2 {
                carry = 0;
                naf[pos] = window as i8;
            } else {
                carry = 1;
                naf[pos] = (window as i8).wrapping_sub(width as i8);
            }

            pos += w;
        }

        naf
    }

    fn unpack(&self) -> UnpackedScalar {
        UnpackedScalar::from_bytes(&self.bytes)
    }
}

impl Index<usize> for Scalar {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&value.to_le_bytes());

        Scalar { bytes }
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes[..].ct_eq(&other.bytes[..])
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar{{ bytes: {:?} }}", &self.bytes)
    }
}

impl<'a> Add<&'a Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, rhs: &'a Scalar) -> Scalar {
        UnpackedScalar::add(&self.unpack(), &rhs.unpack()).pack()
    }
}

impl<'a> Sub<&'a Scalar> for &Scalar {
    type Output = Scalar;

    fn sub(self, rhs: &'a Scalar) -> Scalar {
        UnpackedScalar::sub(&self.unpack(), &rhs.unpack()).pack()
    }
}

impl<'a> Mul<&'a Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &'a Scalar) -> Scalar {
        UnpackedScalar::mul(&self.unpack(), &rhs.unpack()).pack()
    }
}

impl Neg for &Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        UnpackedScalar::sub(&UnpackedScalar::ZERO, &self.unpack()).pack()
    }
}

macro_rules! define_owned_scalar_ops {
    ($($trait:ident, $method:ident);* $(;)?) => {
        $(
            impl $trait<Scalar> for Scalar {
                type Output = Scalar;

                fn $method(self, rhs: Scalar) -> Scalar {
                    (&self).$method(&rhs)
                }
            }
        )*
    };
}

define_owned_scalar_ops! {
    Add, add;
    Sub, sub;
    Mul, mul;
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        -&self
    }
}

/// A scalar unpacked into five 52-bit limbs.
#[derive(Clone, Copy)]
struct UnpackedScalar([u64; 5]);

const LOW_52_BIT_MASK: u64 = (1u64 << 52) - 1;

#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

impl UnpackedScalar {
    const ZERO: Self = UnpackedScalar([0, 0, 0, 0, 0]);

    fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_le_bytes(buf);
        }

        let top_mask = (1u64 << 48) - 1;

        UnpackedScalar([
            words[0] & LOW_52_BIT_MASK,
            ((words[0] >> 52) | (words[1] << 12)) & LOW_52_BIT_MASK,
            ((words[1] >> 40) | (words[2] << 24)) & LOW_52_BIT_MASK,
            ((words[2] >> 28) | (words[3] << 36)) & LOW_52_BIT_MASK,
            (words[3] >> 16) & top_mask,
        ])
    }

    /// Splits a 512-bit integer into `lo + hi·2²⁶⁰` and reduces both halves
    /// with Montgomery multiplications.
    fn from_bytes_wide(bytes: &[u8; 64]) -> Self {
        let mut words = [0u64; 8];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_le_bytes(buf);
        }

        let lo = UnpackedScalar([
            words[0] & LOW_52_BIT_MASK,
            ((words[0] >> 52) | (words[1] << 12)) & LOW_52_BIT_MASK,
            ((words[1] >> 40) | (words[2] << 24)) & LOW_52_BIT_MASK,
            ((words[2] >> 28) | (words[3] << 36)) & LOW_52_BIT_MASK,
            ((words[3] >> 16) | (words[4] << 48)) & LOW_52_BIT_MASK,
        ]);

        let hi = UnpackedScalar([
            (words[4] >> 4) & LOW_52_BIT_MASK,
            ((words[4] >> 56) | (words[5] << 8)) & LOW_52_BIT_MASK,
            ((words[5] >> 44) | (words[6] << 20)) & LOW_52_BIT_MASK,
            ((words[6] >> 32) | (words[7] << 32)) & LOW_52_BIT_MASK,
            words[7] >> 20,
        ]);

        // (lo·R)/R = lo and (hi·R²)/R = hi·R
        let lo = UnpackedScalar::montgomery_mul(&lo, &UnpackedScalar(constants::R));
        let hi = UnpackedScalar::montgomery_mul(&hi, &UnpackedScalar(constants::RR));

        UnpackedScalar::add(&hi, &lo)
    }

    /// Packs 5 × 52 bits back into 32 bytes. Only the low 256 bits are kept,
    /// which is lossless for any reduced value.
    fn pack(&self) -> Scalar {
        let mut bytes = [0u8; 32];
        let mut acc: u64 = 0;
        let mut acc_bits = 0;
        let mut index = 0;

        for &limb in self.0.iter() {
            acc |= limb << acc_bits;
            acc_bits += 52;

            while acc_bits >= 8 && index < 32 {
                bytes[index] = acc as u8;
                acc >>= 8;
                acc_bits -= 8;
                index += 1;
            }
        }

        Scalar { bytes }
    }

    /// Computes `a + b mod ℓ` for reduced inputs.
    fn add(a: &Self, b: &Self) -> Self {
        let mut sum = UnpackedScalar::ZERO;
        let mut carry: u64 = 0;

        for i in 0..5 {
            carry = a.0[i] + b.0[i] + (carry >> 52);
            sum.0[i] = carry & LOW_52_BIT_MASK;
        }

        UnpackedScalar::sub(&sum, &UnpackedScalar(constants::L))
    }

    /// Computes `a − b mod ℓ`, adding `ℓ` back in constant time on borrow.
    fn sub(a: &Self, b: &Self) -> Self {
        let mut difference = UnpackedScalar::ZERO;
        let mut borrow: u64 = 0;

        for i in 0..5 {
            borrow = a.0[i].wrapping_sub(b.0[i] + (borrow >> 63));
            difference.0[i] = borrow & LOW_52_BIT_MASK;
        }

        let underflow_mask = ((borrow >> 63) ^ 1).wrapping_sub(1);
        let mut carry: u64 = 0;

        for i in 0..5 {
            carry = (carry >> 52) + difference.0[i] + (constants::L[i] & underflow_mask);
            difference.0[i] = carry & LOW_52_BIT_MASK;
        }

        difference
    }

    /// Schoolbook product into nine 104-bit-ish coefficients.
    #[inline(always)]
    fn mul_internal(a: &Self, b: &Self) -> [u128; 9] {
        let a = &a.0;
        let b = &b.0;

        [
            m(a[0], b[0]),
            m(a[0], b[1]) + m(a[1], b[0]),
            m(a[0], b[2]) + m(a[1], b[1]) + m(a[2], b[0]),
            m(a[0], b[3]) + m(a[1], b[2]) + m(a[2], b[1]) + m(a[3], b[0]),
            m(a[0], b[4]) + m(a[1], b[3]) + m(a[2], b[2]) + m(a[3], b[1]) + m(a[4], b[0]),
            m(a[1], b[4]) + m(a[2], b[3]) + m(a[3], b[2]) + m(a[4], b[1]),
            m(a[2], b[4]) + m(a[3], b[3]) + m(a[4], b[2]),
            m(a[3], b[4]) + m(a[4], b[3]),
            m(a[4], b[4]),
        ]
    }

    /// Montgomery reduction: computes `limbs / R mod ℓ`.
    ///
    /// `ℓ[3]` is zero, so its terms are omitted.
    #[inline(always)]
    fn montgomery_reduce(limbs: &[u128; 9]) -> Self {
        #[inline(always)]
        fn part1(sum: u128) -> (u128, u64) {
            let p = (sum as u64).wrapping_mul(constants::LFACTOR) & LOW_52_BIT_MASK;
            ((sum + m(p, constants::L[0])) >> 52, p)
        }

        #[inline(always)]
        fn part2(sum: u128) -> (u128, u64) {
            let w = (sum as u64) & LOW_52_BIT_MASK;
            (sum >> 52, w)
        }

        let l = &constants::L;

        let (carry, n0) = part1(limbs[0]);
        let (carry, n1) = part1(carry + limbs[1] + m(n0, l[1]));
        let (carry, n2) = part1(carry + limbs[2] + m(n0, l[2]) + m(n1, l[1]));
        let (carry, n3) = part1(carry + limbs[3] + m(n1, l[2]) + m(n2, l[1]));
        let (carry, n4) = part1(carry + limbs[4] + m(n0, l[4]) + m(n2, l[2]) + m(n3, l[1]));

        let (carry, r0) = part2(carry + limbs[5] + m(n1, l[4]) + m(n3, l[2]) + m(n4, l[1]));
        let (carry, r1) = part2(carry + limbs[6] + m(n2, l[4]) + m(n4, l[2]));
        let (carry, r2) = part2(carry + limbs[7] + m(n3, l[4]));
        let (carry, r3) = part2(carry + limbs[8] + m(n4, l[4]));
        let r4 = carry as u64;

        UnpackedScalar::sub(&UnpackedScalar([r0, r1, r2, r3, r4]), &UnpackedScalar(*l))
    }

    fn montgomery_mul(a: &Self, b: &Self) -> Self {
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(a, b))
    }

    /// Computes `a·b mod ℓ`: one Montgomery product gives `ab/R`, a second
    /// one against `R²` restores the factor.
    fn mul(a: &Self, b: &Self) -> Self {
        let ab = UnpackedScalar::montgomery_mul(a, b);
        UnpackedScalar::montgomery_mul(&ab, &UnpackedScalar(constants::RR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_reduces_to_zero() {
        assert_eq!(
            Scalar::from_bytes_mod_order(constants::BASEPOINT_ORDER_BYTES),
            Scalar::ZERO
        );
    }

    #[test]
    fn pack_unpack_is_lossless() {
        let s = Scalar::from(0x0123_4567_89ab_cdefu64);
        assert_eq!(s.unpack().pack(), s);
    }

    #[test]
    fn order_plus_one_reduces_to_one() {
        let mut l_plus_one = constants::BASEPOINT_ORDER_BYTES;
        l_plus_one[0] += 1;
        assert_eq!(Scalar::from_bytes_mod_order(l_plus_one), Scalar::ONE);
    }
}
