//! The owned entry point for scalar multiplication.
//!
//! An [`Engine`] holds a [`PrecomputeCache`] and routes each multiplication
//! to the right algorithm. Engines are cheap to create and independent of
//! each other, except that they all share the process-wide basepoint
//! tables. [`Engine::global`] is a lazily created default engine for
//! callers that want one cache for the whole process.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::curve::{EdwardsPoint, Scalar};
use crate::error::ConfigError;
use crate::scalar_mul::{EdwardsPointTable, PrecomputeCache, basepoint, variable_base, vartime_double_base};

/// Largest accepted [`EngineConfig::initial_cache_capacity`].
pub const MAX_INITIAL_CACHE_CAPACITY: usize = 1 << 16;

static GLOBAL_ENGINE: Lazy<Engine> = Lazy::new(Engine::new);

/// Construction parameters for an [`Engine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of points the cache map is sized for up front.
    pub initial_cache_capacity: usize,
    /// Build the basepoint tables during construction instead of on the
    /// first fixed-base or double-base multiplication.
    pub prewarm_basepoint: bool,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_cache_capacity > MAX_INITIAL_CACHE_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                requested: self.initial_cache_capacity,
                max: MAX_INITIAL_CACHE_CAPACITY,
            });
        }

        Ok(())
    }
}

/// Scalar multiplication with an owned point cache.
#[derive(Debug, Default)]
pub struct Engine {
    cache: PrecomputeCache,
}

impl Engine {
    /// Creates an engine with an empty cache and default settings.
    pub fn new() -> Self {
        Engine {
            cache: PrecomputeCache::new(),
        }
    }

    /// Creates an engine from a validated configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        if config.prewarm_basepoint {
            basepoint::prewarm();
        }

        tracing::debug!(
            initial_cache_capacity = config.initial_cache_capacity,
            prewarm_basepoint = config.prewarm_basepoint,
            "created engine"
        );

        Ok(Engine {
            cache: PrecomputeCache::with_capacity(config.initial_cache_capacity),
        })
    }

    /// The process-wide default engine.
    pub fn global() -> &'static Engine {
        &GLOBAL_ENGINE
    }

    /// Computes `scalar · B` for the standard generator, in constant time.
    pub fn mul_base(&self, scalar: &Scalar) -> EdwardsPoint {
        basepoint::mul_base(scalar)
    }

    /// Computes `scalar · point` in constant time without caching.
    ///
    /// # Panics
    ///
    /// If `point` is not a valid curve point.
    pub fn mul(&self, scalar: &Scalar, point: &EdwardsPoint) -> EdwardsPoint {
        variable_base::mul(point, scalar)
    }

    /// Computes `scalar · point` in constant time, caching a table for
    /// `point` on first use.
    ///
    /// Same result as [`Engine::mul`]. Worth it when `point` is multiplied
    /// more than a few times.
    ///
    /// # Panics
    ///
    /// If `point` is not a valid curve point.
    pub fn mul_cached(&self, scalar: &Scalar, point: &EdwardsPoint) -> EdwardsPoint {
        self.cache.mul(scalar, point)
    }

    /// Computes `a·A + b·B` in variable time.
    ///
    /// The running time depends on the scalars. Never pass secrets.
    ///
    /// # Panics
    ///
    /// If `A` is not a valid curve point.
    #[allow(non_snake_case)]
    pub fn vartime_double_base_mul(&self, a: &Scalar, A: &EdwardsPoint, b: &Scalar) -> EdwardsPoint {
        vartime_double_base::mul(a, A, b)
    }

    /// Returns the cached table for `point`, building it if needed.
    ///
    /// The handle multiplies directly with [`EdwardsPointTable::mul`] and
    /// stays valid after [`Engine::reset`].
    pub fn precompute(&self, point: &EdwardsPoint) -> Arc<EdwardsPointTable> {
        self.cache.precompute(point)
    }

    pub fn cache(&self) -> &PrecomputeCache {
        &self.cache
    }

    /// Empties the point cache. The basepoint tables are kept.
    pub fn reset(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn oversized_capacity_is_rejected() {
        let config = EngineConfig {
            initial_cache_capacity: MAX_INITIAL_CACHE_CAPACITY + 1,
            ..EngineConfig::default()
        };

        assert_eq!(
            Engine::with_config(config).unwrap_err(),
            ConfigError::CapacityTooLarge {
                requested: MAX_INITIAL_CACHE_CAPACITY + 1,
                max: MAX_INITIAL_CACHE_CAPACITY,
            }
        );
    }

    #[test]
    fn engines_have_separate_caches() {
        let e1 = Engine::new();
        let e2 = Engine::with_config(EngineConfig {
            initial_cache_capacity: 8,
            prewarm_basepoint: true,
        })
        .unwrap();
        let p = EdwardsPoint::generator();

        let _ = e1.mul_cached(&Scalar::ONE, &p);

        assert_eq!(e1.cache().len(), 1);
        assert!(e2.cache().is_empty());
    }
}
