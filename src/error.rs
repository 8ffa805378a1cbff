//! Error types for decoding points and scalars and for engine setup.
//!
//! Multiplication itself has no failure path: every algorithm is total on
//! valid inputs. Errors only arise at the boundary, when untrusted bytes
//! are turned into curve points or scalars.

use thiserror::Error;

/// Errors that can occur while decoding an Edwards point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PointError {
    /// The y-coordinate is not reduced modulo `p`, or `x = 0` was encoded
    /// with its sign bit set.
    #[error("point encoding is not canonical")]
    NonCanonicalEncoding,

    /// No x-coordinate satisfies the curve equation for the encoded y.
    #[error("encoding does not correspond to a point on the curve")]
    NotOnCurve,

    /// The point lies on the curve but has a small-order component.
    #[error("point is not in the prime-order subgroup")]
    NotInPrimeSubgroup,
}

/// Errors that can occur while decoding a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScalarError {
    /// The encoded integer is not strictly less than the group order `ℓ`.
    #[error("scalar encoding is not reduced modulo the group order")]
    NonCanonical,
}

/// Errors that can occur while validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested pre-sizing exceeds
    /// [`MAX_INITIAL_CACHE_CAPACITY`](crate::engine::MAX_INITIAL_CACHE_CAPACITY).
    #[error("initial cache capacity {requested} exceeds the maximum of {max}")]
    CapacityTooLarge { requested: usize, max: usize },
}
