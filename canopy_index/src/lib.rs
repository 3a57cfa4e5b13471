// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Index: a mutable 2D AABB index.
//!
//! Canopy Index is the spatial building block under the collision layer.
//!
//! - Insert, update, and remove axis-aligned bounding boxes (AABBs) with user payloads.
//! - Query by point or overlapping rectangle; edges are closed, so touching boxes match.
//! - Every mutation is visible to the next query; there is no commit step.
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//!
//! Backends are pluggable via the [`Backend`] trait. The default backend is a
//! dynamic R-tree ([`backends::RTree`]); a flat vector ([`backends::FlatVec`])
//! is available for tiny sets and as a reference in tests.
//!
//! # Example
//!
//! ```rust
//! use canopy_index::{Index, Aabb2D};
//!
//! let mut idx: Index<f64, u32> = Index::new();
//! let k1 = idx.insert(Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0), 1);
//! let _k2 = idx.insert(Aabb2D::from_xywh(10.0, 0.0, 5.0, 5.0), 2);
//!
//! // Touching edges count as overlap.
//! let hits: Vec<_> = idx.query_rect(Aabb2D::from_xywh(10.0, 2.0, 0.0, 0.0)).collect();
//! assert_eq!(hits.len(), 2);
//!
//! // Move the first box away; the next query sees it.
//! assert!(idx.update(k1, Aabb2D::from_xywh(100.0, 0.0, 10.0, 10.0)));
//! let hits: Vec<_> = idx.query_point(12.0, 2.0).collect();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].1, 2);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates.
//! Area metrics use widened accumulators to reduce precision pitfalls.

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod backend;
pub mod backends;
mod index;
mod types;

pub use backend::Backend;
pub use backends::{ConfigError, RTreeConfig};
pub use index::{Index, IndexGeneric, Key};
pub use types::{Aabb2D, Scalar, ScalarAcc};
