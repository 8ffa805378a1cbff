//! A shared map from points to their radix-16 tables.
//!
//! Entries are keyed by the compressed encoding, so equal points share one
//! table no matter how they were computed. Each key owns a [`OnceCell`]:
//! the map lock is only held long enough to find or insert the cell, and
//! the table is built outside it. Threads racing on the same new key all
//! wait on that cell, so every key is built at most once.
//!
//! Nothing is ever evicted. Only cache points that live as long as the
//! cache does.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::OnceCell;

use crate::curve::edwards::EdwardsPoint;
use crate::curve::scalar::Scalar;
use crate::curve::traits::ValidityCheck;

use super::table::EdwardsPointTable;

type Slot = Arc<OnceCell<Arc<EdwardsPointTable>>>;

/// Thread-safe, grow-only cache of [`EdwardsPointTable`]s.
pub struct PrecomputeCache {
    entries: RwLock<HashMap<[u8; 32], Slot>>,
    #[cfg(test)]
    builds: std::sync::atomic::AtomicUsize,
}

impl PrecomputeCache {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a cache whose map can hold `capacity` points before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        PrecomputeCache {
            entries: RwLock::new(HashMap::with_capacity(capacity)),
            #[cfg(test)]
            builds: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Returns the table for `point`, building it on first request.
    ///
    /// # Panics
    ///
    /// If `point` fails [`ValidityCheck::is_valid`].
    #[tracing::instrument(skip_all, name = "PrecomputeCache.precompute")]
    pub fn precompute(&self, point: &EdwardsPoint) -> Arc<EdwardsPointTable> {
        assert!(
            point.is_valid(),
            "PrecomputeCache::precompute called with an invalid point"
        );

        let key = point.compress().to_bytes();
        let slot = self.slot(&key);

        let mut built = false;
        let table = slot.get_or_init(|| {
            built = true;

            #[cfg(test)]
            self.builds.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

            Arc::new(EdwardsPointTable::create(point))
        });

        if built {
            tracing::debug!(key = ?&key[..4], entries = self.len(), "cache miss, built table");
        } else {
            tracing::trace!(key = ?&key[..4], "cache hit");
        }

        Arc::clone(table)
    }

    /// Computes `scalar · point` through the cached table of `point`.
    pub fn mul(&self, scalar: &Scalar, point: &EdwardsPoint) -> EdwardsPoint {
        self.precompute(point).mul(scalar)
    }

    /// Number of points with a finished table.
    pub fn len(&self) -> usize {
        self.read().values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if a finished table for `point` is cached.
    pub fn contains(&self, point: &EdwardsPoint) -> bool {
        let key = point.compress().to_bytes();

        self.read()
            .get(&key)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Drops every cached table.
    ///
    /// Handles returned earlier stay usable. A build in flight on another
    /// thread completes, but its table is not reinserted.
    pub fn clear(&self) {
        let mut entries = self.write();
        let removed = entries.len();
        entries.clear();

        tracing::debug!(removed, "cleared precompute cache");
    }

    fn slot(&self, key: &[u8; 32]) -> Slot {
        if let Some(slot) = self.read().get(key) {
            return Arc::clone(slot);
        }

        Arc::clone(self.write().entry(*key).or_default())
    }

    // The map only ever holds fully inserted cells, so a panic while the
    // lock was held cannot leave it inconsistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<[u8; 32], Slot>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<[u8; 32], Slot>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PrecomputeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PrecomputeCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrecomputeCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;

    #[test]
    fn concurrent_misses_build_once() {
        let cache = PrecomputeCache::new();
        let p = EdwardsPoint::generator().double().double();
        let s = Scalar::from(1234567u64);
        let expected = &p * &s;

        std::thread::scope(|scope| {
            for _ in 0..16 {
                scope.spawn(|| assert_eq!(cache.mul(&s, &p), expected));
            }
        });

        assert_eq!(cache.builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn equal_points_share_an_entry() {
        let cache = PrecomputeCache::new();
        let b = EdwardsPoint::generator();
        let two_b = b.double();
        let also_two_b = &b + &b;

        let t1 = cache.precompute(&two_b);
        let t2 = cache.precompute(&also_two_b);

        assert!(Arc::ptr_eq(&t1, &t2));
        assert_eq!(cache.builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_forces_a_rebuild() {
        let cache = PrecomputeCache::with_capacity(4);
        let b = EdwardsPoint::generator();

        let before = cache.precompute(&b);
        cache.clear();
        assert!(cache.is_empty());

        let after = cache.precompute(&b);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(cache.builds.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let cache = PrecomputeCache::new();

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = cache.entries.write().unwrap();
            panic!("poison the map");
        }));

        assert!(cache.entries.is_poisoned());
        let b = EdwardsPoint::generator();
        assert_eq!(cache.mul(&Scalar::ONE, &b), b);
        assert!(cache.contains(&b));
    }
}
