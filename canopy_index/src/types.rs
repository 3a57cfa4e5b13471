// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// Boxes are closed on every side: a box whose `max_x` equals another box's
/// `min_x` touches it, and touching counts as overlapping. Zero-area boxes are
/// valid and stand in for points.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    #[inline(always)]
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether this AABB contains the point (edges included).
    #[inline]
    pub fn contains_point(&self, x: T, y: T) -> bool {
        self.min_x <= x && self.min_y <= y && x <= self.max_x && y <= self.max_y
    }

    /// Whether `other` lies entirely within this AABB (edges included).
    ///
    /// ```
    /// use canopy_index::Aabb2D;
    ///
    /// let outer = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
    /// assert!(outer.contains(&Aabb2D::new(10.0, 10.0, 10.0, 10.0)));
    /// assert!(!outer.contains(&Aabb2D::new(5.0, 5.0, 11.0, 6.0)));
    /// ```
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Determines whether this AABB overlaps with another in any way.
    ///
    /// The edge of the AABB is part of itself, so two AABBs that share an
    /// edge (or a single corner) overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use canopy_index::Aabb2D;
    ///
    /// let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
    /// assert!(a.overlaps(&Aabb2D::new(5.0, 5.0, 15.0, 15.0)));
    /// assert!(a.overlaps(&Aabb2D::new(10.0, 0.0, 15.0, 5.0)));
    /// assert!(!a.overlaps(&Aabb2D::new(11.0, 0.0, 20.0, 10.0)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// The smallest AABB enclosing both AABBs.
    #[inline]
    pub fn union(&self, other: Self) -> Self {
        Self {
            min_x: min_t(self.min_x, other.min_x),
            min_y: min_t(self.min_y, other.min_y),
            max_x: max_t(self.max_x, other.max_x),
            max_y: max_t(self.max_y, other.max_y),
        }
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// Create an AABB from an origin and a size.
    #[inline]
    pub fn from_xywh(x: T, y: T, w: T, h: T) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: T::add(x, w),
            max_y: T::add(y, h),
        }
    }

    /// Width of the box (`max_x - min_x`).
    #[inline]
    pub fn width(&self) -> T {
        T::sub(self.max_x, self.min_x)
    }

    /// Height of the box (`max_y - min_y`).
    #[inline]
    pub fn height(&self) -> T {
        T::sub(self.max_y, self.min_y)
    }

    /// Translate the box by `(dx, dy)`.
    #[inline]
    pub fn translate(&self, dx: T, dy: T) -> Self {
        Self {
            min_x: T::add(self.min_x, dx),
            min_y: T::add(self.min_y, dy),
            max_x: T::add(self.max_x, dx),
            max_y: T::add(self.max_y, dy),
        }
    }

    /// Compute the area of an AABB using the scalar's widened accumulator type.
    ///
    /// Inverted boxes have zero area.
    #[inline]
    pub fn area(&self) -> T::Acc {
        let w = T::max(self.width(), T::zero());
        let h = T::max(self.height(), T::zero());
        T::widen(w) * T::widen(h)
    }

    /// How much the area grows when this box is extended to cover `other`.
    #[inline]
    pub fn enlargement(&self, other: &Self) -> T::Acc {
        self.union(*other).area() - self.area()
    }
}

/// Numeric scalar abstraction for 2D AABBs used by backends.
///
/// Area comparisons run in the associated widened accumulator type
/// (f32→f64, i64→i128) so that enlargement metrics stay robust.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for area/cost computations.
    type Acc: Copy
        + PartialOrd
        + core::ops::Add<Output = Self::Acc>
        + core::ops::Sub<Output = Self::Acc>
        + core::ops::Mul<Output = Self::Acc>
        + Debug;

    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Max of the two scalar values.
    fn max(a: Self, b: Self) -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        Self::max(a, b)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        f64::from(v)
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        Self::max(a, b)
    }

    #[inline(always)]
    fn widen(v: Self) -> Self::Acc {
        v
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline(always)]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        core::cmp::max(a, b)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        i128::from(v)
    }
}

/// Helper alias for the widened accumulator type `Scalar::Acc` associated with a `T: Scalar`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb2D;

    #[test]
    fn from_xywh_derives_max_corner() {
        let r = Aabb2D::<f64>::from_xywh(3.0, 4.0, 2.0, 0.0);
        assert_eq!(r, Aabb2D::new(3.0, 4.0, 5.0, 4.0));
        assert_eq!(r.width(), 2.0);
        assert_eq!(r.height(), 0.0);
    }

    #[test]
    fn touching_edges_overlap() {
        let a = Aabb2D::<f64>::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Aabb2D::<f64>::from_xywh(10.0, 0.0, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = Aabb2D::<f64>::from_xywh(10.5, 0.0, 5.0, 5.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn zero_area_probe_is_contained_on_border() {
        let a = Aabb2D::<f64>::from_xywh(0.0, 0.0, 10.0, 10.0);
        let probe = Aabb2D::<f64>::from_xywh(10.0, 5.0, 0.0, 0.0);
        assert!(a.contains(&probe));
        assert!(a.overlaps(&probe));
        let outside = Aabb2D::<f64>::from_xywh(10.01, 5.0, 0.0, 0.0);
        assert!(!a.contains(&outside));
    }

    #[test]
    fn area_and_enlargement() {
        const EPSILON: f64 = 1e-10;

        let mut aabb = Aabb2D::<f64>::new(5., 7., 10., 9.);
        assert!((aabb.area() - 5. * 2.).abs() < EPSILON);

        let grown = aabb.enlargement(&Aabb2D::new(5., 7., 12., 9.));
        assert!((grown - 4.).abs() < EPSILON);
        assert!(aabb.enlargement(&Aabb2D::new(6., 7., 7., 8.)).abs() < EPSILON);

        // Inverted boxes get zero area.
        aabb.max_x = -aabb.max_x;
        assert!(aabb.area() < EPSILON);
    }

    #[test]
    fn integer_area_is_widened() {
        let a = Aabb2D::<i64>::new(0, 0, i64::from(i32::MAX), i64::from(i32::MAX));
        let expected = i128::from(i32::MAX) * i128::from(i32::MAX);
        assert_eq!(a.area(), expected);
    }
}
