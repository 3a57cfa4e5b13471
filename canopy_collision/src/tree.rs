// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-scene index of collision spaces.

use canopy_index::{Aabb2D, Index, RTreeConfig};

use crate::space::{EntityId, Label, Space, SpaceId};

/// An R-tree of [`Space`]s.
///
/// A tree belongs to one scene. It is not synchronized; wrap it in a
/// [`SharedTree`](crate::SharedTree) when other threads query it.
#[derive(Debug, Default)]
pub struct Tree {
    index: Index<f64, Space>,
}

impl Tree {
    /// Create an empty tree with default R-tree fill limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree with explicit R-tree fill limits.
    pub fn with_config(config: RTreeConfig) -> Self {
        Self {
            index: Index::with_config(config),
        }
    }

    /// Number of indexed spaces.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no space is indexed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Index a space. Equal bounds are allowed; each call yields a new id.
    pub fn insert(&mut self, space: Space) -> SpaceId {
        let id = SpaceId(self.index.insert(space.bounds, space));
        log::trace!("insert {id:?} for {:?} at {:?}", space.cid, space.bounds);
        id
    }

    /// Remove a space, returning it, or `None` if the id is not in the tree.
    pub fn remove(&mut self, id: SpaceId) -> Option<Space> {
        let removed = self.index.remove(id.0);
        if removed.is_none() {
            log::debug!("remove of unknown {id:?}");
        }
        removed
    }

    /// Move a space to new bounds. Returns `false` if the id is not in the tree.
    ///
    /// Moving a space to the bounds it already has changes nothing.
    pub fn update(&mut self, id: SpaceId, bounds: Aabb2D<f64>) -> bool {
        if !self.index.update(id.0, bounds) {
            log::debug!("update of unknown {id:?}");
            return false;
        }
        if let Some(space) = self.index.payload_mut(id.0) {
            space.bounds = bounds;
        }
        true
    }

    /// Translate a space by `(dx, dy)`. Returns `false` if the id is not in the tree.
    pub fn shift(&mut self, id: SpaceId, dx: f64, dy: f64) -> bool {
        match self.get(id) {
            Some(space) => self.update(id, space.bounds.translate(dx, dy)),
            None => false,
        }
    }

    /// Change a space's label in place. Returns `false` if the id is not in the tree.
    pub fn update_label(&mut self, id: SpaceId, label: Label) -> bool {
        match self.index.payload_mut(id.0) {
            Some(space) => {
                space.label = label;
                true
            }
            None => false,
        }
    }

    /// The current state of a space.
    pub fn get(&self, id: SpaceId) -> Option<Space> {
        self.index.get(id.0).map(|(_, space)| space)
    }

    /// Whether the id refers to an indexed space.
    pub fn contains(&self, id: SpaceId) -> bool {
        self.index.contains_key(id.0)
    }

    /// Remove every space. Ids handed out before the call stop resolving.
    pub fn clear(&mut self) {
        log::debug!("clear {} spaces", self.index.len());
        self.index.clear();
    }

    /// Every space whose bounds overlap `rect`, edges included.
    ///
    /// The order is fixed for a given sequence of mutations.
    pub fn search_intersect(&self, rect: Aabb2D<f64>) -> Vec<(SpaceId, Space)> {
        self.index
            .query_rect(rect)
            .map(|(k, space)| (SpaceId(k), space))
            .collect()
    }

    /// Visit every space whose bounds overlap `rect` without collecting.
    pub fn visit_intersect<F: FnMut(SpaceId, Space)>(&self, rect: Aabb2D<f64>, mut f: F) {
        self.index.visit_rect(rect, |k, space| f(SpaceId(k), space));
    }

    /// Every indexed space overlapping `space`.
    ///
    /// If `space` itself is indexed it is part of the result.
    pub fn hits(&self, space: &Space) -> Vec<(SpaceId, Space)> {
        self.search_intersect(space.bounds)
    }

    /// The first indexed space overlapping `space` whose label is one of `labels`.
    pub fn hit_label(&self, space: &Space, labels: &[Label]) -> Option<(SpaceId, Space)> {
        self.search_intersect(space.bounds)
            .into_iter()
            .find(|(_, hit)| labels.contains(&hit.label))
    }

    /// Ids of every space owned by `cid`.
    pub fn spaces_of(&self, cid: EntityId) -> Vec<SpaceId> {
        let mut out = Vec::new();
        if let Some(extent) = self.index.backend().bounds() {
            self.visit_intersect(extent, |id, space| {
                if space.cid == cid {
                    out.push(id);
                }
            });
        }
        out
    }
}
