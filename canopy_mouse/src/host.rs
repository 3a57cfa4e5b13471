// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What the mouse layer needs from the surrounding entity system.

use canopy_collision::EntityId;

use crate::event::MouseEvent;
use crate::phase::CollisionPhase;

/// Delivers a named event to one entity.
pub trait EventTrigger {
    /// Fire `event` on `cid` with the pointer payload.
    ///
    /// Unknown ids are the implementor's concern; the mouse layer does not
    /// expect any feedback.
    fn trigger(&mut self, cid: EntityId, event: &str, payload: &MouseEvent);
}

/// An entity as seen by the hover tracker.
///
/// Entities opt in to hover tracking by returning their [`CollisionPhase`];
/// the default is to not support it.
pub trait PhaseEntity {
    /// The entity's hover tracker, if it has one.
    fn collision_phase_mut(&mut self) -> Option<&mut CollisionPhase> {
        None
    }
}

/// Resolves entity ids to live entities.
pub trait EntityLookup {
    /// The live entity behind `cid`, or `None` once it has been destroyed.
    fn resolve(&mut self, cid: EntityId) -> Option<&mut dyn PhaseEntity>;
}

/// Both halves of the entity system, as needed by per-frame tracking.
pub trait EntityHost: EntityLookup + EventTrigger {}

impl<H: EntityLookup + EventTrigger + ?Sized> EntityHost for H {}
