// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Tree`] shared between the simulation thread and read-only queriers.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use canopy_index::Aabb2D;

use crate::space::{Space, SpaceId};
use crate::tree::Tree;

/// Clonable handle to a reader/writer locked [`Tree`].
///
/// Structural mutation (insert, remove, update, clear) takes the write lock.
/// Queries hold the read lock for their whole run, so a cast that started
/// before a [`clear`](Self::clear) finishes against the old tree, and one that
/// starts after it sees the empty tree; never a half-cleared one.
///
/// ```
/// use canopy_collision::{EntityId, SharedTree, Space};
///
/// let tree = SharedTree::default();
/// let reader = tree.clone();
/// tree.insert(Space::new(3.0, 0.0, 1.0, 1.0, EntityId(1)));
///
/// let hit = reader.read().ray_cast_single(0.0, 0.0, 0.0, 5.0, &[]);
/// assert!(hit.is_some());
///
/// tree.clear();
/// assert!(reader.read().is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedTree {
    inner: Arc<RwLock<Tree>>,
}

impl SharedTree {
    /// Share an existing tree.
    pub fn new(tree: Tree) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Acquire shared read access.
    ///
    /// A lock poisoned by a panicking writer is recovered: every tree
    /// operation leaves the structure consistent before it can panic.
    pub fn read(&self) -> RwLockReadGuard<'_, Tree> {
        self.inner.read().unwrap_or_else(|poisoned| {
            log::warn!("collision tree lock poisoned; continuing with last state");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Acquire exclusive write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, Tree> {
        self.inner.write().unwrap_or_else(|poisoned| {
            log::warn!("collision tree lock poisoned; continuing with last state");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Index a space.
    pub fn insert(&self, space: Space) -> SpaceId {
        self.write().insert(space)
    }

    /// Remove a space, or `None` if it is not in the tree.
    pub fn remove(&self, id: SpaceId) -> Option<Space> {
        self.write().remove(id)
    }

    /// Move a space. Returns `false` if it is not in the tree.
    pub fn update(&self, id: SpaceId, bounds: Aabb2D<f64>) -> bool {
        self.write().update(id, bounds)
    }

    /// Remove every space, atomically with respect to readers.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Every space overlapping `rect`, read under one lock acquisition.
    pub fn search_intersect(&self, rect: Aabb2D<f64>) -> Vec<(SpaceId, Space)> {
        self.read().search_intersect(rect)
    }

    /// The current state of a space.
    pub fn get(&self, id: SpaceId) -> Option<Space> {
        self.read().get(id)
    }
}
