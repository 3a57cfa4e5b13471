// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Mouse: pointer hit propagation and hover tracking.
//!
//! - [`propagate`] fires a named event on the owner of every collision
//!   space under the pointer. [`owners_under`] and [`fire`] are its two
//!   halves, for callers that must release the tree before handlers run.
//! - [`MouseState`] keeps the last pointer event for one scene and, once a
//!   frame, fires [`COLLISION_START`] and [`COLLISION_STOP`] on entities whose
//!   tracked space the pointer entered or left.
//!
//! The entity system is reached only through the [`EventTrigger`],
//! [`EntityLookup`], and [`PhaseEntity`] traits.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use canopy_collision::{EntityId, Space, Tree};
//! use canopy_mouse::{
//!     Action, Button, CollisionPhase, EntityLookup, EventTrigger, MouseEvent, MouseState,
//!     PhaseEntity,
//! };
//!
//! struct Hoverable(CollisionPhase);
//! impl PhaseEntity for Hoverable {
//!     fn collision_phase_mut(&mut self) -> Option<&mut CollisionPhase> {
//!         Some(&mut self.0)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct World {
//!     buttons: HashMap<EntityId, Hoverable>,
//!     log: Vec<String>,
//! }
//! impl EntityLookup for World {
//!     fn resolve(&mut self, cid: EntityId) -> Option<&mut dyn PhaseEntity> {
//!         self.buttons.get_mut(&cid).map(|b| b as &mut dyn PhaseEntity)
//!     }
//! }
//! impl EventTrigger for World {
//!     fn trigger(&mut self, cid: EntityId, event: &str, _: &MouseEvent) {
//!         self.log.push(format!("{event} {}", cid.0));
//!     }
//! }
//!
//! let mut world = World::default();
//! world.buttons.insert(EntityId(1), Hoverable(CollisionPhase::new()));
//! let mut tree = Tree::new();
//! let space = tree.insert(Space::new(0.0, 0.0, 10.0, 10.0, EntityId(1)));
//!
//! let mut mouse = MouseState::new();
//! mouse.phase_collision(space, &tree, &mut world)?;
//! mouse.record(MouseEvent::new(5.0, 5.0, Button::None, Action::Move));
//! mouse.enter_frame(&tree, &mut world);
//! assert_eq!(world.log, ["MouseCollisionStart 1"]);
//! # Ok::<(), canopy_mouse::PhaseError>(())
//! ```

mod event;
mod host;
mod phase;
mod propagate;
mod state;

pub use event::{Action, Button, COLLISION_START, COLLISION_STOP, MouseEvent};
pub use host::{EntityHost, EntityLookup, EventTrigger, PhaseEntity};
pub use phase::{CollisionPhase, Transition};
pub use propagate::{fire, owners_under, propagate};
pub use state::{MouseState, PhaseError};
