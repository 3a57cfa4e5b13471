// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-entity hover state.

use canopy_collision::SpaceId;

use crate::event::{COLLISION_START, COLLISION_STOP};

/// A change in whether the pointer is over a tracked space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The pointer entered the space.
    Start,
    /// The pointer left the space.
    Stop,
}

impl Transition {
    /// Name of the event fired for this transition.
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Start => COLLISION_START,
            Self::Stop => COLLISION_STOP,
        }
    }
}

/// Hover tracker embedded in an entity.
///
/// Starts out not touching and with no space; registration through
/// [`MouseState::phase_collision`](crate::MouseState::phase_collision)
/// assigns the space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionPhase {
    space: Option<SpaceId>,
    touching: bool,
}

impl CollisionPhase {
    /// A tracker with no space that is not touching.
    pub const fn new() -> Self {
        Self {
            space: None,
            touching: false,
        }
    }

    /// The tracked space.
    pub const fn space(&self) -> Option<SpaceId> {
        self.space
    }

    /// Whether the pointer was over the space at the last check.
    pub const fn is_touching(&self) -> bool {
        self.touching
    }

    pub(crate) fn track(&mut self, space: SpaceId) {
        self.space = Some(space);
    }

    /// Record whether the pointer is currently over the space, returning the
    /// transition if the state changed.
    pub fn check(&mut self, contains: bool) -> Option<Transition> {
        let transition = match (self.touching, contains) {
            (false, true) => Some(Transition::Start),
            (true, false) => Some(Transition::Stop),
            _ => None,
        };
        self.touching = contains;
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_fire_once_per_edge() {
        let mut phase = CollisionPhase::new();
        assert_eq!(phase.check(false), None);
        assert_eq!(phase.check(true), Some(Transition::Start));
        assert!(phase.is_touching());
        assert_eq!(phase.check(true), None);
        assert_eq!(phase.check(false), Some(Transition::Stop));
        assert_eq!(phase.check(false), None);
        assert!(!phase.is_touching());
    }

    #[test]
    fn event_names() {
        assert_eq!(Transition::Start.event_name(), "MouseCollisionStart");
        assert_eq!(Transition::Stop.event_name(), "MouseCollisionStop");
    }
}
