//! Scalar multiplication
//!
//! This module turns the group law of [`crate::curve`] into the four
//! multiplications the crate exists for:
//!
//! - fixed-base `s·B`, constant time, over the shared basepoint table
//! - variable-base `s·P`, constant time, building a small table per call
//! - cached variable-base `s·P`, constant time, through a
//!   [`PrecomputeCache`] entry for `P`
//! - double-base `a·A + b·B`, variable time, for public scalars only
//!
//! Every routine is a windowed double-and-add over a digit recoding of the
//! scalar, processed from the most significant digit down. The constant-
//! time routines read every table entry on every lookup and run the same
//! number of iterations for every scalar.
//!
//! Tables are immutable once built. The shared ones (basepoint tables and
//! cache entries) are handed out as `&'static` or `Arc` references and read
//! without locking.

pub(crate) mod basepoint;
mod cache;
mod table;
pub(crate) mod variable_base;
pub(crate) mod vartime_double_base;
mod window;

pub use basepoint::basepoint_table;
pub use cache::PrecomputeCache;
pub use table::EdwardsPointTable;
