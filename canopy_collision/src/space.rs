// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision spaces and the identifiers attached to them.

use canopy_index::{Aabb2D, Key};
use kurbo::Point;

/// Opaque identifier of the entity that owns a [`Space`].
///
/// The collision layer never interprets it; it is handed back to the event
/// layer when a space is hit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// The id of spaces that belong to no entity (probes, scratch queries).
    pub const NONE: Self = Self(0);
}

/// Opaque classification tag used by label-filtered queries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub i32);

impl Label {
    /// The unset label.
    pub const NONE: Self = Self(0);

    /// Whether a label other than [`Label::NONE`] is set.
    pub const fn is_set(self) -> bool {
        self.0 != Self::NONE.0
    }
}

/// Identity of a space inside one [`Tree`](crate::Tree).
///
/// Two spaces with equal bounds are still distinct: each insertion gets its
/// own id. Ids from a tree that has since been cleared never resolve again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId(pub(crate) Key);

/// A rectangular collision region tied to an owning entity and a label.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Space {
    /// Axis-aligned bounds. Width and height are never negative.
    pub bounds: Aabb2D<f64>,
    /// Owning entity.
    pub cid: EntityId,
    /// Classification tag, [`Label::NONE`] when unset.
    pub label: Label,
}

impl Space {
    /// A space at `(x, y)` of size `w` x `h` owned by `cid`.
    pub fn new(x: f64, y: f64, w: f64, h: f64, cid: EntityId) -> Self {
        Self::labeled(x, y, w, h, cid, Label::NONE)
    }

    /// A space with an explicit label.
    pub fn labeled(x: f64, y: f64, w: f64, h: f64, cid: EntityId, label: Label) -> Self {
        debug_assert!(w >= 0.0 && h >= 0.0, "space size must not be negative");
        Self {
            bounds: Aabb2D::from_xywh(x, y, w, h),
            cid,
            label,
        }
    }

    /// A space owned by no entity.
    pub fn unassigned(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, w, h, EntityId::NONE)
    }

    /// A zero-area probe at `(x, y)`.
    pub fn point(x: f64, y: f64) -> Self {
        Self::unassigned(x, y, 0.0, 0.0)
    }

    /// Build a space from existing bounds.
    pub fn from_bounds(bounds: Aabb2D<f64>, cid: EntityId, label: Label) -> Self {
        Self { bounds, cid, label }
    }

    /// Left edge.
    pub fn x(&self) -> f64 {
        self.bounds.min_x
    }

    /// Top edge.
    pub fn y(&self) -> f64 {
        self.bounds.min_y
    }

    /// Width.
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    /// Height.
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// Center of the bounds.
    pub fn center(&self) -> Point {
        Point::new(
            0.5 * (self.bounds.min_x + self.bounds.max_x),
            0.5 * (self.bounds.min_y + self.bounds.max_y),
        )
    }

    /// Whether the bounds overlap, edges included.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.bounds.overlaps(&other.bounds)
    }

    /// Whether `other` lies entirely within these bounds, edges included.
    pub fn contains(&self, other: &Self) -> bool {
        self.bounds.contains(&other.bounds)
    }
}
