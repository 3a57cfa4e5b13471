// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stepwise ray and cone casting against a [`Tree`].
//!
//! A ray is not intersected analytically. It is sampled: starting at its
//! origin, the caster takes one unit step along the ray's direction per
//! iteration while the step count is below the ray's length, and at every
//! step queries the tree with a [`PROBE_SIZE`]-wide square centered on the
//! current position.
//!
//! Consequences callers rely on:
//!
//! - A space thinner than the gap between two probes can be stepped over.
//! - When one probe hits several spaces, the tree's return order decides which
//!   one a single-hit cast reports, not which one is closer inside the probe.
//!
//! ## Angles
//!
//! Angles are degrees. The direction of a ray at `θ` is `(cos θ, sin θ)`:
//! 0° points along +x and 90° along +y. With screen coordinates (y grows
//! downward) positive angles therefore turn clockwise.

use hashbrown::HashSet;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use canopy_index::Aabb2D;

use crate::space::{EntityId, Label, Space, SpaceId};
use crate::tree::Tree;

/// Side length of the square probe queried at each ray step.
pub const PROBE_SIZE: f64 = 0.1;

/// A ray: origin, heading in degrees, and number of unit steps.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Where the first probe is taken.
    pub origin: Point,
    /// Heading in degrees; see the module docs for the convention.
    pub degrees: f64,
    /// Steps are taken at `0, 1, 2, ...` while below this value.
    pub length: f64,
}

impl Ray {
    /// A ray from `(x, y)`.
    pub fn new(x: f64, y: f64, degrees: f64, length: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            degrees,
            length,
        }
    }

    /// Unit vector of the ray's heading.
    pub fn direction(&self) -> Vec2 {
        let (sin, cos) = self.degrees.to_radians().sin_cos();
        Vec2::new(cos, sin)
    }

    /// The same ray turned by `degrees`.
    pub fn rotated(&self, degrees: f64) -> Self {
        Self {
            degrees: self.degrees + degrees,
            ..*self
        }
    }

    /// Number of samples: the integers `i >= 0` with `i < length`.
    ///
    /// Zero when `length <= 0` or is not finite.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The value is clamped to the u32 range before the cast."
    )]
    pub fn step_count(&self) -> u32 {
        if !self.length.is_finite() || self.length <= 0.0 {
            return 0;
        }
        self.length.ceil().min(f64::from(u32::MAX)) as u32
    }

    /// The sample positions, in marching order. Empty when `length <= 0` or
    /// is not finite.
    pub fn steps(&self) -> impl Iterator<Item = Point> + use<> {
        let origin = self.origin;
        let dir = self.direction();
        (0..self.step_count()).map(move |i| origin + dir * f64::from(i))
    }
}

/// The probe rectangle sampled at `p`.
pub fn probe(p: Point) -> Aabb2D<f64> {
    let half = PROBE_SIZE / 2.0;
    Aabb2D::new(p.x - half, p.y - half, p.x + half, p.y + half)
}

/// A fan of rays spanning `width` degrees from the base ray's heading.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cone {
    /// The first ray of the fan.
    pub ray: Ray,
    /// Angular width in degrees.
    pub width: f64,
    /// Number of rays.
    pub rays: u32,
}

impl Cone {
    /// The rays of the fan: ray `k` is turned by `k * width / rays`.
    ///
    /// ```
    /// use canopy_collision::{Cone, Ray};
    ///
    /// let cone = Cone { ray: Ray::new(0.0, 0.0, 10.0, 5.0), width: 90.0, rays: 3 };
    /// let angles: Vec<f64> = cone.rays().map(|r| r.degrees).collect();
    /// assert_eq!(angles, [10.0, 40.0, 70.0]);
    /// ```
    pub fn rays(&self) -> impl Iterator<Item = Ray> + use<> {
        let base = self.ray;
        let step = if self.rays == 0 {
            0.0
        } else {
            self.width / f64::from(self.rays)
        };
        (0..self.rays).map(move |k| base.rotated(step * f64::from(k)))
    }
}

/// Which spaces a single-hit cast may stop at.
#[derive(Copy, Clone, Debug, Default)]
pub enum CastFilter<'a> {
    /// Any space.
    #[default]
    Any,
    /// Spaces not owned by any of these entities.
    IgnoreIds(&'a [EntityId]),
    /// Spaces whose label is one of these.
    Labels(&'a [Label]),
    /// Spaces whose label is none of these.
    IgnoreLabels(&'a [Label]),
    /// Spaces owned by none of `ids` and labeled none of `labels`.
    Ignore {
        /// Owners to skip.
        ids: &'a [EntityId],
        /// Labels to skip.
        labels: &'a [Label],
    },
}

impl CastFilter<'_> {
    /// Whether a cast may stop at `space`.
    pub fn accepts(&self, space: &Space) -> bool {
        match *self {
            Self::Any => true,
            Self::IgnoreIds(ids) => !ids.contains(&space.cid),
            Self::Labels(labels) => labels.contains(&space.label),
            Self::IgnoreLabels(labels) => !labels.contains(&space.label),
            Self::Ignore { ids, labels } => {
                !labels.contains(&space.label) && !ids.contains(&space.cid)
            }
        }
    }
}

/// A space touched by a cast and the ray position where it was first touched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CastPoint {
    /// Which space was hit.
    pub id: SpaceId,
    /// The space as it was when hit.
    pub space: Space,
    /// The ray sample position of the hit.
    pub point: Point,
}

impl CastPoint {
    /// The hit position rounded to whole pixels, halves away from zero.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Pixel coordinates of on-screen hits fit in i64."
    )]
    pub fn pixel(&self) -> (i64, i64) {
        (self.point.x.round() as i64, self.point.y.round() as i64)
    }
}

impl Tree {
    /// March `ray` and return the first accepted hit.
    ///
    /// Within one step, candidates are tried in the tree's return order.
    pub fn cast_first(&self, ray: Ray, filter: CastFilter<'_>) -> Option<CastPoint> {
        let mut step_hits: SmallVec<[(SpaceId, Space); 4]> = SmallVec::new();
        for point in ray.steps() {
            step_hits.clear();
            self.visit_intersect(probe(point), |id, space| step_hits.push((id, space)));
            if let Some(&(id, space)) = step_hits.iter().find(|(_, s)| filter.accepts(s)) {
                log::trace!("{ray:?} hit {id:?} at {point:?}");
                return Some(CastPoint { id, space, point });
            }
        }
        None
    }

    /// March the full length of `ray` and return every space touched, once
    /// each, at the first position it was touched, in touch order.
    pub fn cast_all(&self, ray: Ray) -> Vec<CastPoint> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for point in ray.steps() {
            self.visit_intersect(probe(point), |id, space| {
                if seen.insert(id) {
                    out.push(CastPoint { id, space, point });
                }
            });
        }
        log::trace!("{ray:?} touched {} spaces", out.len());
        out
    }

    /// Every space a ray from `(x, y)` touches.
    pub fn ray_cast(&self, x: f64, y: f64, degrees: f64, length: f64) -> Vec<CastPoint> {
        self.cast_all(Ray::new(x, y, degrees, length))
    }

    /// The first space a ray touches that is not owned by one of `ignore`.
    ///
    /// Typical use: a bullet that should hit the first thing that isn't its shooter.
    pub fn ray_cast_single(
        &self,
        x: f64,
        y: f64,
        degrees: f64,
        length: f64,
        ignore: &[EntityId],
    ) -> Option<CastPoint> {
        self.cast_first(Ray::new(x, y, degrees, length), CastFilter::IgnoreIds(ignore))
    }

    /// The first space a ray touches whose label is one of `labels`.
    pub fn ray_cast_single_labels(
        &self,
        x: f64,
        y: f64,
        degrees: f64,
        length: f64,
        labels: &[Label],
    ) -> Option<CastPoint> {
        self.cast_first(Ray::new(x, y, degrees, length), CastFilter::Labels(labels))
    }

    /// The first space a ray touches whose label is none of `labels`.
    pub fn ray_cast_single_ignore_labels(
        &self,
        x: f64,
        y: f64,
        degrees: f64,
        length: f64,
        labels: &[Label],
    ) -> Option<CastPoint> {
        self.cast_first(
            Ray::new(x, y, degrees, length),
            CastFilter::IgnoreLabels(labels),
        )
    }

    /// The first space a ray touches that is owned by none of `ids` and
    /// labeled none of `labels`.
    pub fn ray_cast_single_ignore(
        &self,
        x: f64,
        y: f64,
        degrees: f64,
        length: f64,
        ids: &[EntityId],
        labels: &[Label],
    ) -> Option<CastPoint> {
        self.cast_first(
            Ray::new(x, y, degrees, length),
            CastFilter::Ignore { ids, labels },
        )
    }

    /// [`ray_cast`](Self::ray_cast) over each ray of a cone, concatenated.
    ///
    /// A space touched by several rays appears once per ray.
    pub fn cone_cast(
        &self,
        x: f64,
        y: f64,
        angle: f64,
        width: f64,
        rays: u32,
        length: f64,
    ) -> Vec<CastPoint> {
        let cone = Cone {
            ray: Ray::new(x, y, angle, length),
            width,
            rays,
        };
        cone.rays().flat_map(|ray| self.cast_all(ray)).collect()
    }

    /// [`ray_cast_single`](Self::ray_cast_single) over each ray of a cone,
    /// keeping the rays that hit.
    pub fn cone_cast_single(
        &self,
        x: f64,
        y: f64,
        angle: f64,
        width: f64,
        rays: u32,
        length: f64,
        ignore: &[EntityId],
    ) -> Vec<CastPoint> {
        self.cone_first(
            Cone {
                ray: Ray::new(x, y, angle, length),
                width,
                rays,
            },
            CastFilter::IgnoreIds(ignore),
        )
    }

    /// [`ray_cast_single_labels`](Self::ray_cast_single_labels) over each ray
    /// of a cone, keeping the rays that hit.
    pub fn cone_cast_single_labels(
        &self,
        x: f64,
        y: f64,
        angle: f64,
        width: f64,
        rays: u32,
        length: f64,
        labels: &[Label],
    ) -> Vec<CastPoint> {
        self.cone_first(
            Cone {
                ray: Ray::new(x, y, angle, length),
                width,
                rays,
            },
            CastFilter::Labels(labels),
        )
    }

    /// First accepted hit of every ray of `cone`, skipping rays that miss.
    pub fn cone_first(&self, cone: Cone, filter: CastFilter<'_>) -> Vec<CastPoint> {
        cone.rays()
            .filter_map(|ray| self.cast_first(ray, filter))
            .collect()
    }
}
