//! Scalar multiplication on Edwards25519
//!
//! This crate computes multiples of points in the prime-order subgroup of
//! the twisted Edwards curve behind Ed25519, with constant-time execution
//! on every path that can see a secret scalar.
//!
//! The focus is on **predictable cost and auditability** of the inner
//! loops rather than on a broad curve API. Signing, key exchange, and key
//! management belong to higher layers.
//!
//! # Module overview
//!
//! - `curve`
//!   Field arithmetic modulo `2²⁵⁵ − 19`, scalars modulo the group order
//!   `ℓ`, and the point representations connected by the group law. Only
//!   [`EdwardsPoint`], [`CompressedEdwardsY`], and [`Scalar`] are public.
//!
//! - `scalar_mul`
//!   The multiplication algorithms and the tables they consume: the
//!   per-call radix-16 window, the width-5 and width-8 NAF tables, the
//!   32-entry radix-16 table-of-tables, the two lazily built basepoint
//!   tables, and the [`PrecomputeCache`].
//!
//! - `engine`
//!   [`Engine`] owns a cache and exposes the four multiplications. A
//!   process-wide default is available through [`Engine::global`], and
//!   the free functions below delegate to it.
//!
//! # Choosing an entry point
//!
//! | Operation | Function | Timing |
//! |---|---|---|
//! | `s·B` | [`scalar_mul_base`] | constant |
//! | `s·P`, `P` used once | [`scalar_mul`] | constant |
//! | `s·P`, `P` reused | [`scalar_mul_cached`] | constant |
//! | `a·A + b·B` | [`vartime_double_scalar_mul_base`] | variable |
//!
//! The variable-time routine leaks the bit length of its scalars and must
//! only be used with public values, such as signature verification
//! coefficients.
//!
//! # Preconditions
//!
//! Every routine that takes a point asserts that it is a valid curve point
//! and panics otherwise. Points decoded with [`EdwardsPoint::from_bytes`]
//! or produced by this crate always satisfy this.
//!
//! # Logging
//!
//! Table builds and cache activity emit [`tracing`] events and spans. No
//! event carries a scalar. The crate installs no subscriber.

pub mod curve;
pub mod engine;
pub mod error;
pub mod scalar_mul;

pub use curve::{BASEPOINT_ORDER_BYTES, CompressedEdwardsY, EdwardsPoint, Identity, Scalar, ValidityCheck};
pub use engine::{Engine, EngineConfig, MAX_INITIAL_CACHE_CAPACITY};
pub use error::{ConfigError, PointError, ScalarError};
pub use scalar_mul::{EdwardsPointTable, PrecomputeCache, basepoint_table};

/// Computes `scalar · B` for the standard generator `B`.
pub fn scalar_mul_base(scalar: &Scalar) -> EdwardsPoint {
    Engine::global().mul_base(scalar)
}

/// Computes `scalar · point` without caching.
pub fn scalar_mul(scalar: &Scalar, point: &EdwardsPoint) -> EdwardsPoint {
    Engine::global().mul(scalar, point)
}

/// Computes `scalar · point` through the global point cache.
pub fn scalar_mul_cached(scalar: &Scalar, point: &EdwardsPoint) -> EdwardsPoint {
    Engine::global().mul_cached(scalar, point)
}

/// Computes `a·A + b·B` in variable time. Public scalars only.
#[allow(non_snake_case)]
pub fn vartime_double_scalar_mul_base(a: &Scalar, A: &EdwardsPoint, b: &Scalar) -> EdwardsPoint {
    Engine::global().vartime_double_base_mul(a, A, b)
}
