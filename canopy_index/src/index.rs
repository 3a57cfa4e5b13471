// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::rtree::{RTree, RTreeConfig};
use crate::types::{Aabb2D, Scalar};

/// Generational handle for entries.
///
/// A key stays valid until its entry is removed or the index is cleared;
/// after that it never matches again, even when the slot is reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(u32, u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Index keys are intentionally 32-bit; higher bits are truncated by design."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Slot<T, P> {
    generation: u32,
    entry: Option<(Aabb2D<T>, P)>,
}

/// A generic AABB index parameterized by a spatial backend.
///
/// Mutations reach the backend immediately: a query issued right after
/// [`insert`](Self::insert), [`update`](Self::update), [`remove`](Self::remove)
/// or [`clear`](Self::clear) observes it.
#[derive(Debug)]
pub struct IndexGeneric<T: Copy + PartialOrd + Debug, P: Copy + Debug, B: Backend<T>> {
    slots: Vec<Slot<T, P>>,
    free_list: Vec<usize>,
    len: usize,
    backend: B,
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T> + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self::with_backend(B::default())
    }
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T>,
{
    /// Create an empty index using an explicit backend instance.
    ///
    /// This is useful when higher layers want to choose a backend type or
    /// configure it before wiring it into the index.
    pub fn with_backend(backend: B) -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            backend,
        }
    }

    /// The backend, for inspection.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reserve space for at least `n` more entries.
    pub fn reserve(&mut self, n: usize) {
        self.slots.reserve(n);
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a new AABB with payload. Returns a stable handle `Key`.
    ///
    /// Equal boxes are distinct entries.
    pub fn insert(&mut self, aabb: Aabb2D<T>, payload: P) -> Key {
        let idx = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.wrapping_add(1);
            slot.entry = Some((aabb, payload));
            idx
        } else {
            self.slots.push(Slot {
                generation: 1,
                entry: Some((aabb, payload)),
            });
            self.slots.len() - 1
        };
        self.len += 1;
        self.backend.insert(idx, aabb);
        Key::new(idx, self.slots[idx].generation)
    }

    /// Move an existing entry to a new AABB.
    ///
    /// Returns `false` if the key is stale. Updating to the same AABB leaves
    /// the backend untouched.
    pub fn update(&mut self, key: Key, aabb: Aabb2D<T>) -> bool {
        let Some((current, _)) = self.entry_mut(key) else {
            return false;
        };
        if *current == aabb {
            return true;
        }
        *current = aabb;
        self.backend.update(key.idx(), aabb);
        true
    }

    /// Remove an existing entry, returning its payload.
    ///
    /// Returns `None` if the key is stale.
    pub fn remove(&mut self, key: Key) -> Option<P> {
        let (_, payload) = self.entry_mut(key)?;
        let payload = *payload;
        self.slots[key.idx()].entry = None;
        self.free_list.push(key.idx());
        self.len -= 1;
        self.backend.remove(key.idx());
        Some(payload)
    }

    /// Remove every entry. Keys handed out before the call go stale.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.entry = None;
        }
        self.free_list.clear();
        self.free_list.extend((0..self.slots.len()).rev());
        self.len = 0;
        self.backend.clear();
    }

    /// Whether the key refers to a live entry.
    pub fn contains_key(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// The AABB and payload of a live entry.
    pub fn get(&self, key: Key) -> Option<(Aabb2D<T>, P)> {
        let slot = self.slots.get(key.idx())?;
        if slot.generation != key.1 {
            return None;
        }
        slot.entry
    }

    /// Mutable access to a live entry's payload.
    ///
    /// The payload is not seen by the backend, so changing it never moves the entry.
    pub fn payload_mut(&mut self, key: Key) -> Option<&mut P> {
        self.entry_mut(key).map(|(_, p)| p)
    }

    /// Query for entries whose AABB contains the point.
    pub fn query_point(&self, x: T, y: T) -> impl Iterator<Item = (Key, P)> + '_ {
        let mut out = Vec::new();
        self.visit_point(x, y, |k, p| out.push((k, p)));
        out.into_iter()
    }

    /// Visit entries whose AABB contains the point (does not allocate result storage).
    ///
    /// Calls `f(key, payload)` for each match. The order is backend-dependent
    /// but fixed for a given sequence of mutations.
    pub fn visit_point<F: FnMut(Key, P)>(&self, x: T, y: T, mut f: F) {
        self.backend.visit_point(x, y, |i| {
            if let Some((k, p)) = self.live(i) {
                f(k, p);
            }
        });
    }

    /// Query for entries whose AABB overlaps the given rectangle.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = (Key, P)> + '_ {
        let mut out = Vec::new();
        self.visit_rect(rect, |k, p| out.push((k, p)));
        out.into_iter()
    }

    /// Visit entries whose AABB overlaps the given rectangle (does not allocate result storage).
    ///
    /// Edges are closed: touching boxes are reported. Calls `f(key, payload)`
    /// for each match. The order is backend-dependent but fixed for a given
    /// sequence of mutations.
    pub fn visit_rect<F: FnMut(Key, P)>(&self, rect: Aabb2D<T>, mut f: F) {
        self.backend.visit_rect(rect, |i| {
            if let Some((k, p)) = self.live(i) {
                f(k, p);
            }
        });
    }

    fn live(&self, idx: usize) -> Option<(Key, P)> {
        let slot = self.slots.get(idx)?;
        let (_, payload) = slot.entry?;
        Some((Key::new(idx, slot.generation), payload))
    }

    fn entry_mut(&mut self, key: Key) -> Option<&mut (Aabb2D<T>, P)> {
        let slot = self.slots.get_mut(key.idx())?;
        if slot.generation != key.1 {
            return None;
        }
        slot.entry.as_mut()
    }
}

/// Default index: an R-tree backend.
pub type Index<T, P> = IndexGeneric<T, P, RTree<T>>;

impl<T: Scalar, P: Copy + Debug> Default for Index<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar, P: Copy + Debug> Index<T, P> {
    /// Create an R-tree index with explicit node fill limits.
    pub fn with_config(config: RTreeConfig) -> Self {
        Self::with_backend(RTree::with_config(config))
    }
}
