//! Edwards25519 arithmetic
//!
//! This module holds the algebra that scalar multiplication is built on:
//! the prime field, scalars modulo the group order, and the point
//! representations connected by the group law.
//!
//! Only the extended point form, its compressed encoding, and scalars are
//! public. The intermediate forms in `models` exist for the inner loops of
//! [`crate::scalar_mul`] and never escape it.
//!
//! Operations that touch secret data (field arithmetic, conditional
//! selection, scalar digit recoding) run in constant time. Point decoding
//! and subgroup checks are variable time and intended for public inputs.

pub(crate) mod constants;
pub(crate) mod edwards;
pub(crate) mod field;
pub(crate) mod models;
pub(crate) mod scalar;
pub(crate) mod traits;

pub use constants::BASEPOINT_ORDER_BYTES;
pub use edwards::{CompressedEdwardsY, EdwardsPoint};
pub use scalar::Scalar;
pub use traits::{Identity, ValidityCheck};
