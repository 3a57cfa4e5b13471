// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `rtree`: dynamic R-tree (`T: Scalar`) with quadratic splits and
//!   condense-on-remove (aliases: `RTreeF32`, `RTreeF64`, `RTreeI64`).
//! - `flatvec`: flat vector with linear scans (small, simple).
//!
//! Choose-subtree note
//! -------------------
//! The R-tree descends into the child whose bounding box grows the least when
//! extended to cover the new entry. Growth is measured as area in the scalar's
//! widened accumulator (`f32`→`f64`, `f64`→`f64`, `i64`→`i128`).

pub(crate) mod flatvec;
pub(crate) mod rtree;

pub use flatvec::FlatVec;
pub use rtree::{ConfigError, RTree, RTreeConfig, RTreeF32, RTreeF64, RTreeI64};
