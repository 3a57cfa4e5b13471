// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events and the names they are broadcast under.

use canopy_collision::Space;
use kurbo::{Point, Vec2};

/// Fired on an entity when the pointer starts hovering one of its tracked spaces.
pub const COLLISION_START: &str = "MouseCollisionStart";
/// Fired on an entity when the pointer stops hovering its tracked space.
pub const COLLISION_STOP: &str = "MouseCollisionStop";

/// Mouse button identifier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Button {
    /// No button, e.g. a plain move.
    #[default]
    None,
    /// Primary button.
    Left,
    /// Wheel click.
    Middle,
    /// Secondary button.
    Right,
    /// Wheel scrolled away from the user.
    ScrollUp,
    /// Wheel scrolled toward the user.
    ScrollDown,
}

impl Button {
    /// Map a platform button code (`1`, `2`, `3`, `-1`, `-2`) to a button.
    /// Unknown codes map to [`Button::None`].
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Left,
            2 => Self::Middle,
            3 => Self::Right,
            -1 => Self::ScrollUp,
            -2 => Self::ScrollDown,
            _ => Self::None,
        }
    }

    /// The button's name as seen by event handlers; empty for [`Button::None`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Left => "LeftMouse",
            Self::Middle => "MiddleMouse",
            Self::Right => "RightMouse",
            Self::ScrollUp => "ScrollUpMouse",
            Self::ScrollDown => "ScrollDownMouse",
        }
    }
}

/// What the pointer did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Action {
    /// Moved with no button held.
    #[default]
    Move,
    /// Moved with a button held.
    Drag,
    /// Button went down.
    Press,
    /// Button went up.
    Release,
    /// Wheel up.
    ScrollUp,
    /// Wheel down.
    ScrollDown,
}

impl Action {
    /// Global event name for this action.
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Move => "MouseMove",
            Self::Drag => "MouseDrag",
            Self::Press => "MousePress",
            Self::Release => "MouseRelease",
            Self::ScrollUp => "MouseScrollUp",
            Self::ScrollDown => "MouseScrollDown",
        }
    }

    /// Event name used when this action is propagated to the entities under the pointer.
    pub const fn on_event_name(self) -> &'static str {
        match self {
            Self::Move => "MouseMoveOn",
            Self::Drag => "MouseDragOn",
            Self::Press => "MousePressOn",
            Self::Release => "MouseReleaseOn",
            Self::ScrollUp => "MouseScrollUpOn",
            Self::ScrollDown => "MouseScrollDownOn",
        }
    }
}

/// A pointer event: where, which button, and what happened.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MouseEvent {
    /// Pointer position in world coordinates.
    pub position: Point,
    /// Button involved.
    pub button: Button,
    /// What happened.
    pub action: Action,
}

impl MouseEvent {
    /// An event at `(x, y)`.
    pub fn new(x: f64, y: f64, button: Button, action: Action) -> Self {
        Self {
            position: Point::new(x, y),
            button,
            action,
        }
    }

    /// A zero-area, owner-less space at the pointer, for collision queries.
    pub fn to_space(&self) -> Space {
        Space::point(self.position.x, self.position.y)
    }

    /// The pointer position as a vector from the origin.
    pub fn to_vector(&self) -> Vec2 {
        self.position.to_vec2()
    }
}
