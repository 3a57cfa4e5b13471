// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Collision: collision spaces, a per-scene R-tree of them, and
//! stepwise ray and cone casting.
//!
//! ## Overview
//!
//! - [`Space`]: a rectangle plus the [`EntityId`] that owns it and an optional [`Label`].
//! - [`Tree`]: indexes spaces; every insert, update, removal, or clear is
//!   visible to the next query. Returns a [`SpaceId`] per insertion.
//! - [`SharedTree`]: the same tree behind a reader/writer lock for scenes
//!   that are queried off the simulation thread.
//! - Casting: [`Tree::ray_cast`] and its single-hit variants, plus
//!   [`Tree::cone_cast`] fans. See the [`raycast`] module for the sampling
//!   model and the angle convention.
//!
//! "No hit" is never an error: single-hit casts return `None`, multi-hit
//! queries return an empty `Vec`, and operations on an id that is not in the
//! tree return `false` or `None`.
//!
//! ## Example
//!
//! ```
//! use canopy_collision::{EntityId, Label, Space, Tree};
//!
//! let mut tree = Tree::new();
//! let player = EntityId(1);
//! tree.insert(Space::new(0.0, 0.0, 1.0, 1.0, player));
//! let crate_id = tree.insert(Space::labeled(3.0, 0.0, 1.0, 1.0, EntityId(2), Label(5)));
//!
//! // Shoot right, skipping our own space. Samples sit at x = 0.5, 1.5, ...
//! let hit = tree.ray_cast_single(0.5, 0.5, 0.0, 10.0, &[player]).unwrap();
//! assert_eq!(hit.id, crate_id);
//! assert_eq!(hit.point.x, 3.5);
//! assert_eq!(hit.pixel(), (4, 1));
//! ```
//!
//! Logging goes through the `log` facade; install any logger to see it.

pub mod raycast;
mod shared;
mod space;
mod tree;

pub use canopy_index::{Aabb2D, RTreeConfig};
pub use raycast::{CastFilter, CastPoint, Cone, PROBE_SIZE, Ray};
pub use shared::SharedTree;
pub use space::{EntityId, Label, Space, SpaceId};
pub use tree::Tree;
