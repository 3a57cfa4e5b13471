// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic R-tree backend for 2D AABBs.
//!
//! Nodes live in an arena and refer to each other by index. Leaves hold slot
//! numbers; the boxes themselves are kept in a per-slot table so that a slot can
//! find its leaf in O(1) on update and removal.
//!
//! - Insertion descends by least area enlargement (ties: smaller area, then the
//!   earlier child) and splits overfull nodes with a quadratic split.
//! - Removal condenses the tree: nodes that drop below `min_children` are
//!   dissolved and their entries reinserted; a root with a single child is
//!   collapsed.
//! - An update whose new box still fits inside its leaf's bounds is applied in
//!   place and only refits ancestors.
//!
//! All tie-breaks are positional, so query order is a pure function of the
//! sequence of operations applied.

use alloc::vec::Vec;
use core::fmt::{self, Debug};

use smallvec::{SmallVec, smallvec};

use crate::backend::Backend;
use crate::types::{Aabb2D, Scalar};

/// Error returned when an [`RTreeConfig`] would not keep the tree balanced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_children` must be at least 2.
    MinChildrenTooSmall {
        /// The rejected minimum.
        min_children: usize,
    },
    /// A split of `max_children + 1` entries must leave both halves with at
    /// least `min_children` entries.
    MinChildrenTooLarge {
        /// The rejected minimum.
        min_children: usize,
        /// The configured maximum.
        max_children: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinChildrenTooSmall { min_children } => {
                write!(f, "min_children must be at least 2, got {min_children}")
            }
            Self::MinChildrenTooLarge {
                min_children,
                max_children,
            } => write!(
                f,
                "min_children ({min_children}) too large for max_children ({max_children}); \
                 need 2 * min <= max + 1"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Node fill limits for [`RTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RTreeConfig {
    min_children: usize,
    max_children: usize,
}

impl RTreeConfig {
    /// Validate and build a configuration.
    ///
    /// ```
    /// use canopy_index::backends::RTreeConfig;
    ///
    /// assert!(RTreeConfig::new(2, 4).is_ok());
    /// assert!(RTreeConfig::new(1, 4).is_err());
    /// assert!(RTreeConfig::new(3, 4).is_err());
    /// ```
    pub const fn new(min_children: usize, max_children: usize) -> Result<Self, ConfigError> {
        if min_children < 2 {
            return Err(ConfigError::MinChildrenTooSmall { min_children });
        }
        if 2 * min_children > max_children + 1 {
            return Err(ConfigError::MinChildrenTooLarge {
                min_children,
                max_children,
            });
        }
        Ok(Self {
            min_children,
            max_children,
        })
    }

    /// Minimum number of children of a non-root node.
    pub const fn min_children(&self) -> usize {
        self.min_children
    }

    /// Maximum number of children of any node.
    pub const fn max_children(&self) -> usize {
        self.max_children
    }
}

impl Default for RTreeConfig {
    fn default() -> Self {
        Self {
            min_children: 3,
            max_children: 8,
        }
    }
}

type Children = SmallVec<[usize; 8]>;

#[derive(Clone, Debug)]
struct Node<T> {
    bounds: Aabb2D<T>,
    parent: Option<usize>,
    // Slots when `leaf`, node indices otherwise.
    leaf: bool,
    children: Children,
}

#[derive(Copy, Clone, Debug)]
struct SlotEntry<T> {
    aabb: Aabb2D<T>,
    leaf: usize,
}

/// R-tree backend.
pub struct RTree<T: Scalar> {
    config: RTreeConfig,
    nodes: Vec<Node<T>>,
    free_nodes: Vec<usize>,
    root: Option<usize>,
    slots: Vec<Option<SlotEntry<T>>>,
    len: usize,
}

/// R-tree over `f32` coordinates.
pub type RTreeF32 = RTree<f32>;
/// R-tree over `f64` coordinates.
pub type RTreeF64 = RTree<f64>;
/// R-tree over `i64` coordinates.
pub type RTreeI64 = RTree<i64>;

impl<T: Scalar> Debug for RTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RTree")
            .field("config", &self.config)
            .field("len", &self.len)
            .field("height", &self.height())
            .field("live_nodes", &(self.nodes.len() - self.free_nodes.len()))
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> Default for RTree<T> {
    fn default() -> Self {
        Self::with_config(RTreeConfig::default())
    }
}

impl<T: Scalar> RTree<T> {
    /// Create an empty tree with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree with explicit node fill limits.
    pub fn with_config(config: RTreeConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            free_nodes: Vec::new(),
            root: None,
            slots: Vec::new(),
            len: 0,
        }
    }

    /// The node fill limits in use.
    pub fn config(&self) -> RTreeConfig {
        self.config
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no slots.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels, counting the leaf level. An empty tree has height 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut cur = self.root;
        while let Some(n) = cur {
            height += 1;
            let node = &self.nodes[n];
            cur = if node.leaf {
                None
            } else {
                node.children.first().copied()
            };
        }
        height
    }

    /// Bounds of the whole tree, if any slot is present.
    pub fn bounds(&self) -> Option<Aabb2D<T>> {
        self.root.map(|r| self.nodes[r].bounds)
    }

    fn slot_entry(&self, slot: usize) -> &SlotEntry<T> {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .expect("rtree invariant violated: leaf references vacant slot")
    }

    fn child_bounds(&self, leaf: bool, child: usize) -> Aabb2D<T> {
        if leaf {
            self.slot_entry(child).aabb
        } else {
            self.nodes[child].bounds
        }
    }

    fn alloc_node(&mut self, node: Node<T>) -> usize {
        if let Some(i) = self.free_nodes.pop() {
            self.nodes[i] = node;
            i
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }

    fn free_node(&mut self, n: usize) {
        self.nodes[n].children.clear();
        self.nodes[n].parent = None;
        self.free_nodes.push(n);
    }

    fn choose_leaf(&self, root: usize, aabb: &Aabb2D<T>) -> usize {
        let mut node = root;
        while !self.nodes[node].leaf {
            let children = &self.nodes[node].children;
            let (&first, rest) = children
                .split_first()
                .expect("rtree invariant violated: empty internal node");
            let mut best = first;
            let mut best_grow = self.nodes[first].bounds.enlargement(aabb);
            let mut best_area = self.nodes[first].bounds.area();
            for &c in rest {
                let bounds = &self.nodes[c].bounds;
                let grow = bounds.enlargement(aabb);
                let area = bounds.area();
                if grow < best_grow || (grow <= best_grow && area < best_area) {
                    best = c;
                    best_grow = grow;
                    best_area = area;
                }
            }
            node = best;
        }
        node
    }

    /// Recompute a node's bounds from its children. Empty nodes keep their bounds.
    fn refit(&mut self, n: usize) {
        let node = &self.nodes[n];
        let mut iter = node
            .children
            .iter()
            .map(|&c| self.child_bounds(node.leaf, c));
        if let Some(first) = iter.next() {
            let bounds = iter.fold(first, |acc, b| acc.union(b));
            self.nodes[n].bounds = bounds;
        }
    }

    fn refit_upward(&mut self, n: usize) {
        let mut cur = Some(n);
        while let Some(node) = cur {
            self.refit(node);
            cur = self.nodes[node].parent;
        }
    }

    /// Place a slot into a leaf. The caller owns the `len` bookkeeping.
    fn place(&mut self, slot: usize, aabb: Aabb2D<T>) {
        let leaf = match self.root {
            Some(root) => self.choose_leaf(root, &aabb),
            None => {
                let n = self.alloc_node(Node {
                    bounds: aabb,
                    parent: None,
                    leaf: true,
                    children: SmallVec::new(),
                });
                self.root = Some(n);
                n
            }
        };
        self.nodes[leaf].children.push(slot);
        self.slots[slot] = Some(SlotEntry { aabb, leaf });
        self.refit_upward(leaf);
        self.split_overflowing(leaf);
    }

    fn split_overflowing(&mut self, mut node: usize) {
        while self.nodes[node].children.len() > self.config.max_children {
            let sibling = self.split(node);
            if let Some(parent) = self.nodes[node].parent {
                self.nodes[sibling].parent = Some(parent);
                let siblings = &mut self.nodes[parent].children;
                let pos = siblings
                    .iter()
                    .position(|&c| c == node)
                    .expect("rtree invariant violated: node missing from its parent");
                siblings.insert(pos + 1, sibling);
                node = parent;
            } else {
                let bounds = self.nodes[node].bounds.union(self.nodes[sibling].bounds);
                let root = self.alloc_node(Node {
                    bounds,
                    parent: None,
                    leaf: false,
                    children: smallvec![node, sibling],
                });
                self.nodes[node].parent = Some(root);
                self.nodes[sibling].parent = Some(root);
                self.root = Some(root);
                break;
            }
        }
    }

    /// Split `n` in two. `n` keeps one group; the returned sibling gets the other
    /// and has no parent yet.
    fn split(&mut self, n: usize) -> usize {
        let leaf = self.nodes[n].leaf;
        let items: Vec<(usize, Aabb2D<T>)> = self.nodes[n]
            .children
            .iter()
            .map(|&c| (c, self.child_bounds(leaf, c)))
            .collect();
        let ((keep, keep_bounds), (moved, moved_bounds)) = self.partition(&items);

        let sibling = self.alloc_node(Node {
            bounds: moved_bounds,
            parent: None,
            leaf,
            children: moved,
        });
        for i in 0..self.nodes[sibling].children.len() {
            let c = self.nodes[sibling].children[i];
            if leaf {
                if let Some(entry) = self.slots[c].as_mut() {
                    entry.leaf = sibling;
                }
            } else {
                self.nodes[c].parent = Some(sibling);
            }
        }
        let node = &mut self.nodes[n];
        node.children = keep;
        node.bounds = keep_bounds;
        sibling
    }

    /// Quadratic split: seed the two groups with the pair that wastes the most
    /// area together, then assign the rest by least enlargement while making
    /// sure both groups reach `min_children`.
    fn partition(
        &self,
        items: &[(usize, Aabb2D<T>)],
    ) -> ((Children, Aabb2D<T>), (Children, Aabb2D<T>)) {
        let (s1, s2) = pick_seeds(items);
        let mut left: Children = smallvec![items[s1].0];
        let mut right: Children = smallvec![items[s2].0];
        let mut left_bounds = items[s1].1;
        let mut right_bounds = items[s2].1;

        let min = self.config.min_children;
        let rest: Vec<&(usize, Aabb2D<T>)> = items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != s1 && *i != s2)
            .map(|(_, item)| item)
            .collect();
        for (pos, &&(id, bounds)) in rest.iter().enumerate() {
            let remaining = rest.len() - pos;
            let to_left = if left.len() + remaining <= min {
                true
            } else if right.len() + remaining <= min {
                false
            } else {
                let grow_left = left_bounds.enlargement(&bounds);
                let grow_right = right_bounds.enlargement(&bounds);
                if grow_left < grow_right {
                    true
                } else if grow_right < grow_left {
                    false
                } else {
                    let (area_left, area_right) = (left_bounds.area(), right_bounds.area());
                    area_left < area_right || (area_left <= area_right && left.len() <= right.len())
                }
            };
            if to_left {
                left.push(id);
                left_bounds = left_bounds.union(bounds);
            } else {
                right.push(id);
                right_bounds = right_bounds.union(bounds);
            }
        }
        ((left, left_bounds), (right, right_bounds))
    }

    /// Walk up from a leaf that lost an entry, dissolving underfull nodes and
    /// reinserting their slots.
    fn condense(&mut self, leaf: usize) {
        let mut orphans = Vec::new();
        let mut node = leaf;
        while let Some(parent) = self.nodes[node].parent {
            if self.nodes[node].children.len() < self.config.min_children {
                let siblings = &mut self.nodes[parent].children;
                if let Some(pos) = siblings.iter().position(|&c| c == node) {
                    siblings.remove(pos);
                }
                self.release_subtree(node, &mut orphans);
            } else {
                self.refit(node);
            }
            node = parent;
        }
        self.refit(node);
        self.shrink_root();

        for slot in orphans {
            let aabb = self.slot_entry(slot).aabb;
            self.place(slot, aabb);
        }
    }

    fn release_subtree(&mut self, n: usize, orphans: &mut Vec<usize>) {
        let mut stack: SmallVec<[usize; 16]> = smallvec![n];
        while let Some(cur) = stack.pop() {
            let node = &self.nodes[cur];
            if node.leaf {
                orphans.extend(node.children.iter().copied());
            } else {
                stack.extend(node.children.iter().copied());
            }
            self.free_node(cur);
        }
    }

    fn shrink_root(&mut self) {
        while let Some(root) = self.root {
            let node = &self.nodes[root];
            if node.children.is_empty() {
                self.free_node(root);
                self.root = None;
            } else if !node.leaf && node.children.len() == 1 {
                let child = node.children[0];
                self.free_node(root);
                self.nodes[child].parent = None;
                self.root = Some(child);
            } else {
                break;
            }
        }
    }

    fn visit<F, G>(&self, mut prune: G, mut f: F)
    where
        G: FnMut(&Aabb2D<T>) -> bool,
        F: FnMut(usize),
    {
        let Some(root) = self.root else {
            return;
        };
        let mut stack: SmallVec<[usize; 32]> = smallvec![root];
        while let Some(n) = stack.pop() {
            let node = &self.nodes[n];
            if !prune(&node.bounds) {
                continue;
            }
            if node.leaf {
                for &slot in &node.children {
                    if prune(&self.slot_entry(slot).aabb) {
                        f(slot);
                    }
                }
            } else {
                // Reversed so that children pop in their stored order.
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }
}

fn pick_seeds<T: Scalar>(items: &[(usize, Aabb2D<T>)]) -> (usize, usize) {
    let waste = |a: &Aabb2D<T>, b: &Aabb2D<T>| a.union(*b).area() - a.area() - b.area();
    let mut seeds = (0, 1);
    let mut max_waste = waste(&items[0].1, &items[1].1);
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            let w = waste(&items[i].1, &items[j].1);
            if w > max_waste {
                max_waste = w;
                seeds = (i, j);
            }
        }
    }
    seeds
}

impl<T: Scalar> Backend<T> for RTree<T> {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) {
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
        if self.slots[slot].is_some() {
            self.update(slot, aabb);
            return;
        }
        self.len += 1;
        self.place(slot, aabb);
    }

    fn update(&mut self, slot: usize, aabb: Aabb2D<T>) {
        let Some(entry) = self.slots.get(slot).and_then(Option::as_ref) else {
            self.insert(slot, aabb);
            return;
        };
        let leaf = entry.leaf;
        if self.nodes[leaf].bounds.contains(&aabb) {
            if let Some(entry) = self.slots[slot].as_mut() {
                entry.aabb = aabb;
            }
            self.refit_upward(leaf);
        } else {
            self.remove(slot);
            self.insert(slot, aabb);
        }
    }

    fn remove(&mut self, slot: usize) {
        let Some(entry) = self.slots.get_mut(slot).and_then(Option::take) else {
            return;
        };
        self.len -= 1;
        let children = &mut self.nodes[entry.leaf].children;
        if let Some(pos) = children.iter().position(|&s| s == slot) {
            children.remove(pos);
        }
        self.condense(entry.leaf);
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.free_nodes.clear();
        self.slots.clear();
        self.root = None;
        self.len = 0;
    }

    fn visit_point<F: FnMut(usize)>(&self, x: T, y: T, f: F) {
        self.visit(|b| b.contains_point(x, y), f);
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, f: F) {
        self.visit(|b| b.overlaps(&rect), f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use proptest::prelude::*;

    impl<T: Scalar> RTree<T> {
        /// Check structural invariants, panicking with a description on failure.
        fn assert_invariants(&self) {
            let Some(root) = self.root else {
                assert_eq!(self.len, 0, "empty tree must have len 0");
                return;
            };
            assert!(self.nodes[root].parent.is_none(), "root has a parent");
            let mut leaf_depth = None;
            let mut slots_seen = 0;
            let mut stack = vec![(root, 1_usize)];
            while let Some((n, depth)) = stack.pop() {
                let node = &self.nodes[n];
                let count = node.children.len();
                assert!(count <= self.config.max_children, "node overfull");
                if n != root {
                    assert!(count >= self.config.min_children, "node underfull");
                }
                for &c in &node.children {
                    let cb = self.child_bounds(node.leaf, c);
                    assert!(node.bounds.contains(&cb), "bounds do not cover child");
                    if node.leaf {
                        assert_eq!(self.slot_entry(c).leaf, n, "stale leaf pointer");
                        slots_seen += 1;
                    } else {
                        assert_eq!(self.nodes[c].parent, Some(n), "stale parent pointer");
                        stack.push((c, depth + 1));
                    }
                }
                if node.leaf {
                    match leaf_depth {
                        None => leaf_depth = Some(depth),
                        Some(d) => assert_eq!(d, depth, "leaves at different depths"),
                    }
                }
            }
            assert_eq!(slots_seen, self.len, "slot count mismatch");
        }
    }

    fn collect_rect(t: &RTreeF64, r: Aabb2D<f64>) -> Vec<usize> {
        let mut out = Vec::new();
        t.visit_rect(r, |s| out.push(s));
        out.sort_unstable();
        out
    }

    const WORLD: Aabb2D<f64> = Aabb2D::new(-1.0e9, -1.0e9, 1.0e9, 1.0e9);

    #[test]
    fn grows_and_stays_balanced() {
        let mut t = RTreeF64::with_config(RTreeConfig::new(2, 4).unwrap());
        for i in 0..200_u32 {
            let x = f64::from(i % 20) * 10.0;
            let y = f64::from(i / 20) * 10.0;
            t.insert(i as usize, Aabb2D::from_xywh(x, y, 5.0, 5.0));
            t.assert_invariants();
        }
        assert_eq!(t.len(), 200);
        assert!(t.height() >= 4, "200 entries at fanout 4 need several levels");
        assert_eq!(collect_rect(&t, WORLD).len(), 200);
        assert_eq!(collect_rect(&t, Aabb2D::from_xywh(0.0, 0.0, 5.0, 5.0)), vec![0]);
    }

    #[test]
    fn removal_condenses_and_collapses() {
        let mut t = RTreeF64::with_config(RTreeConfig::new(2, 4).unwrap());
        for i in 0..64 {
            let v = f64::from(i);
            t.insert(i as usize, Aabb2D::from_xywh(v, v, 1.0, 1.0));
        }
        for i in 0..63 {
            t.remove(i);
            t.assert_invariants();
        }
        assert_eq!(t.height(), 1);
        assert_eq!(collect_rect(&t, WORLD), vec![63]);
        t.remove(63);
        assert!(t.is_empty());
        assert_eq!(t.height(), 0);
        assert!(t.bounds().is_none());
    }

    #[test]
    fn update_in_place_keeps_leaf() {
        let mut t = RTreeF64::default();
        t.insert(0, Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0));
        t.insert(1, Aabb2D::from_xywh(20.0, 20.0, 10.0, 10.0));
        let leaf = t.slot_entry(0).leaf;
        t.update(0, Aabb2D::from_xywh(1.0, 1.0, 2.0, 2.0));
        assert_eq!(t.slot_entry(0).leaf, leaf);
        assert_eq!(collect_rect(&t, Aabb2D::from_xywh(5.0, 5.0, 1.0, 1.0)), vec![]);
        assert_eq!(collect_rect(&t, Aabb2D::from_xywh(2.0, 2.0, 0.0, 0.0)), vec![0]);
        t.assert_invariants();
    }

    #[test]
    fn update_outside_leaf_reinserts() {
        let mut t = RTreeF64::with_config(RTreeConfig::new(2, 4).unwrap());
        for i in 0..16 {
            let v = f64::from(i) * 10.0;
            t.insert(i as usize, Aabb2D::from_xywh(v, 0.0, 5.0, 5.0));
        }
        t.update(3, Aabb2D::from_xywh(500.0, 500.0, 1.0, 1.0));
        t.assert_invariants();
        assert_eq!(
            collect_rect(&t, Aabb2D::from_xywh(499.0, 499.0, 2.0, 2.0)),
            vec![3]
        );
        assert_eq!(collect_rect(&t, Aabb2D::from_xywh(30.0, 0.0, 1.0, 1.0)), vec![]);
    }

    #[test]
    fn update_missing_slot_inserts() {
        let mut t = RTreeI64::default();
        t.update(5, Aabb2D::new(0, 0, 4, 4));
        assert_eq!(t.len(), 1);
        let mut hits = Vec::new();
        t.visit_point(2, 2, |s| hits.push(s));
        assert_eq!(hits, vec![5]);
    }

    #[test]
    fn visit_order_is_deterministic() {
        let build = || {
            let mut t = RTreeF64::with_config(RTreeConfig::new(2, 4).unwrap());
            for i in 0..40 {
                let v = f64::from(i % 7) * 3.0;
                t.insert(i as usize, Aabb2D::from_xywh(v, v, 4.0, 4.0));
            }
            for i in (0..40).step_by(3) {
                t.remove(i);
            }
            t
        };
        let (a, b) = (build(), build());
        let mut first = Vec::new();
        let mut second = Vec::new();
        a.visit_rect(WORLD, |s| first.push(s));
        b.visit_rect(WORLD, |s| second.push(s));
        assert_eq!(first, second);
    }

    #[test]
    fn clear_empties_everything() {
        let mut t = RTreeF32::default();
        for i in 0..30 {
            #[allow(clippy::cast_precision_loss, reason = "small test values")]
            let v = i as f32;
            t.insert(i, Aabb2D::from_xywh(v, v, 1.0, 1.0));
        }
        t.clear();
        assert!(t.is_empty());
        let mut count = 0;
        t.visit_rect(Aabb2D::new(-1e6, -1e6, 1e6, 1e6), |_| count += 1);
        assert_eq!(count, 0);
        t.insert(0, Aabb2D::from_xywh(0.0, 0.0, 1.0, 1.0));
        assert_eq!(t.len(), 1);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(usize, (i16, i16, u8, u8)),
        Update(usize, (i16, i16, u8, u8)),
        Remove(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let rect = (any::<i16>(), any::<i16>(), any::<u8>(), any::<u8>());
        prop_oneof![
            (0..48_usize, rect.clone()).prop_map(|(s, r)| Op::Insert(s, r)),
            (0..48_usize, rect).prop_map(|(s, r)| Op::Update(s, r)),
            (0..48_usize).prop_map(Op::Remove),
        ]
    }

    fn to_aabb((x, y, w, h): (i16, i16, u8, u8)) -> Aabb2D<f64> {
        Aabb2D::from_xywh(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
    }

    proptest! {
        #[test]
        fn invariants_hold_under_churn(ops in prop::collection::vec(op_strategy(), 1..200)) {
            let mut t = RTreeF64::with_config(RTreeConfig::new(2, 5).unwrap());
            let mut live = vec![None; 48];
            for op in ops {
                match op {
                    Op::Insert(s, r) | Op::Update(s, r) => {
                        t.update(s, to_aabb(r));
                        live[s] = Some(to_aabb(r));
                    }
                    Op::Remove(s) => {
                        t.remove(s);
                        live[s] = None;
                    }
                }
                t.assert_invariants();
            }
            let expected: Vec<usize> = live
                .iter()
                .enumerate()
                .filter_map(|(i, a)| a.map(|_| i))
                .collect();
            prop_assert_eq!(collect_rect(&t, WORLD), expected);
        }
    }
}
