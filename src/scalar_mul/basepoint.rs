//! Process-wide tables for the standard generator.
//!
//! Both tables are built on first use behind a [`Lazy`] barrier: concurrent
//! first callers block until one build finishes, later reads take no lock.

use once_cell::sync::Lazy;

use crate::curve::constants::ED25519_BASEPOINT_POINT;
use crate::curve::edwards::EdwardsPoint;
use crate::curve::models::GePrecomp;
use crate::curve::scalar::Scalar;

use super::table::EdwardsPointTable;
use super::window::NafLookupTable8;

#[cfg(test)]
pub(crate) static BUILDS: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

static BASEPOINT_TABLE: Lazy<EdwardsPointTable> = Lazy::new(|| {
    #[cfg(test)]
    BUILDS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

    let table = EdwardsPointTable::create(&ED25519_BASEPOINT_POINT);
    tracing::debug!("built basepoint radix-16 table");
    table
});

static BASEPOINT_NAF_TABLE: Lazy<NafLookupTable8<GePrecomp>> = Lazy::new(build_naf_table);

#[tracing::instrument(skip_all, name = "NafLookupTable8.basepoint")]
fn build_naf_table() -> NafLookupTable8<GePrecomp> {
    #[cfg(test)]
    BUILDS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

    let table = NafLookupTable8::from(&ED25519_BASEPOINT_POINT);
    tracing::debug!(entries = table.0.len(), "built basepoint width-8 NAF table");
    table
}

/// The radix-16 table for the standard generator.
pub fn basepoint_table() -> &'static EdwardsPointTable {
    &BASEPOINT_TABLE
}

/// The odd multiples `[B, 3B, …, 127B]` of the standard generator.
pub(crate) fn basepoint_naf_table() -> &'static NafLookupTable8<GePrecomp> {
    &BASEPOINT_NAF_TABLE
}

/// Builds both tables now instead of on first use.
pub(crate) fn prewarm() {
    Lazy::force(&BASEPOINT_TABLE);
    Lazy::force(&BASEPOINT_NAF_TABLE);
}

/// Computes `scalar · B` in constant time.
pub(crate) fn mul_base(scalar: &Scalar) -> EdwardsPoint {
    basepoint_table().mul(scalar)
}
