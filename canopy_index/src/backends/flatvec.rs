// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets
//! and as a reference when checking the tree backends.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Flat vector backend with linear scans.
///
/// Visits slots in ascending slot order.
pub struct FlatVec<T: Copy + PartialOrd + Debug> {
    slots: Vec<Option<Aabb2D<T>>>,
}

impl<T: Copy + PartialOrd + Debug> Default for FlatVec<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T: Copy + PartialOrd + Debug> Debug for FlatVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let live = self.slots.iter().flatten().count();
        f.debug_struct("FlatVec")
            .field("total_slots", &self.slots.len())
            .field("live_slots", &live)
            .finish_non_exhaustive()
    }
}

impl<T: Copy + PartialOrd + Debug> Backend<T> for FlatVec<T> {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) {
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
        self.slots[slot] = Some(aabb);
    }

    fn update(&mut self, slot: usize, aabb: Aabb2D<T>) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = Some(aabb);
        }
    }

    fn remove(&mut self, slot: usize) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = None;
        }
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
    }

    fn visit_point<F: FnMut(usize)>(&self, x: T, y: T, mut f: F) {
        for (i, aabb) in self.slots.iter().enumerate() {
            if let Some(a) = aabb
                && a.contains_point(x, y)
            {
                f(i);
            }
        }
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, mut f: F) {
        for (i, aabb) in self.slots.iter().enumerate() {
            if let Some(a) = aabb
                && a.overlaps(&rect)
            {
                f(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn visits_in_slot_order() {
        let mut b = FlatVec::<f64>::default();
        b.insert(2, Aabb2D::new(0.0, 0.0, 1.0, 1.0));
        b.insert(0, Aabb2D::new(0.5, 0.5, 2.0, 2.0));
        let mut seen = Vec::new();
        b.visit_rect(Aabb2D::new(0.0, 0.0, 5.0, 5.0), |s| seen.push(s));
        assert_eq!(seen, vec![0, 2]);
    }

    #[test]
    fn removed_slots_are_not_visited() {
        let mut b = FlatVec::<i64>::default();
        b.insert(0, Aabb2D::new(0, 0, 10, 10));
        b.insert(1, Aabb2D::new(0, 0, 10, 10));
        b.remove(1);
        let mut count = 0;
        b.visit_point(5, 5, |_| count += 1);
        assert_eq!(count, 1);
    }
}
