// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Scene: the state one scene owns for collision and pointer input.
//!
//! A [`Scene`] holds a [`SharedTree`] and a [`MouseState`]. Switching scenes
//! means calling [`Scene::reset`] or building a fresh [`Scene`]; no state is
//! shared between two scenes unless a caller clones the tree handle.
//!
//! ```rust
//! use canopy_collision::{EntityId, Space};
//! use canopy_mouse::{Action, Button, EventTrigger, MouseEvent};
//! use canopy_scene::Scene;
//!
//! struct Log(Vec<EntityId>);
//! impl EventTrigger for Log {
//!     fn trigger(&mut self, cid: EntityId, _: &str, _: &MouseEvent) {
//!         self.0.push(cid);
//!     }
//! }
//!
//! let mut scene = Scene::new();
//! scene.tree().insert(Space::new(0.0, 0.0, 4.0, 4.0, EntityId(9)));
//!
//! let mut bus = Log(Vec::new());
//! let click = MouseEvent::new(2.0, 2.0, Button::Left, Action::Press);
//! assert_eq!(scene.pointer(&mut bus, click), 1);
//! assert_eq!(bus.0, [EntityId(9)]);
//!
//! scene.reset();
//! assert!(scene.tree().read().is_empty());
//! ```

use canopy_collision::{RTreeConfig, SharedTree, SpaceId, Tree};
use canopy_mouse::{
    EntityHost, EntityLookup, EventTrigger, MouseEvent, MouseState, PhaseError, fire, owners_under,
};

/// Collision tree and pointer state of one scene.
#[derive(Debug, Default)]
pub struct Scene {
    tree: SharedTree,
    mouse: MouseState,
}

impl Scene {
    /// An empty scene with default R-tree fill limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty scene with explicit R-tree fill limits.
    pub fn with_config(config: RTreeConfig) -> Self {
        Self {
            tree: SharedTree::new(Tree::with_config(config)),
            mouse: MouseState::new(),
        }
    }

    /// Handle to the scene's collision tree. Clone it to query from other threads.
    pub fn tree(&self) -> &SharedTree {
        &self.tree
    }

    /// Pointer and hover state.
    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    /// Mutable pointer and hover state.
    pub fn mouse_mut(&mut self) -> &mut MouseState {
        &mut self.mouse
    }

    /// Record a pointer event and fire its propagated name on every owner under it.
    ///
    /// Returns the number of triggers fired.
    pub fn pointer<B: EventTrigger + ?Sized>(&mut self, bus: &mut B, event: MouseEvent) -> usize {
        self.pointer_named(bus, event.action.on_event_name(), event)
    }

    /// Like [`pointer`](Self::pointer) with an explicit event name.
    ///
    /// The tree's read lock is released before the first trigger, so
    /// handlers may insert or remove spaces through the scene's tree.
    pub fn pointer_named<B: EventTrigger + ?Sized>(
        &mut self,
        bus: &mut B,
        event_name: &str,
        event: MouseEvent,
    ) -> usize {
        let owners = owners_under(&self.tree.read(), &event);
        self.mouse.record(event);
        fire(bus, event_name, &event, &owners)
    }

    /// Start hover tracking for the owner of `space`.
    pub fn track_hover<L: EntityLookup + ?Sized>(
        &mut self,
        space: SpaceId,
        host: &mut L,
    ) -> Result<(), PhaseError> {
        let cid = self.tree.get(space).ok_or(PhaseError::UnknownSpace)?.cid;
        self.mouse.register(space, cid, host)
    }

    /// Per-frame hover check. Returns the number of start/stop events fired.
    ///
    /// Events fire after the tree's read lock is released.
    pub fn tick<H: EntityHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let transitions = self.mouse.check_frame(&self.tree.read(), host);
        self.mouse.fire_transitions(host, &transitions)
    }

    /// Clear the collision tree and forget all pointer state.
    ///
    /// The tree is cleared under its write lock, so a cast running on another
    /// thread finishes against the old contents. Space ids from before the
    /// reset no longer resolve.
    pub fn reset(&mut self) {
        self.tree.clear();
        self.mouse.reset();
        log::debug!("scene reset");
    }
}
