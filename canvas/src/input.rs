//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Modifiers`, `Button`, `Key` and `WheelDelta` are the host-neutral shape of
//! a browser event. `InputState` is the active gesture being tracked between
//! pointer-down and pointer-up, carrying the context needed to compute
//! incremental deltas and to restore the shape if the gesture is cancelled.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::ShapeId;
use crate::geometry::{Bounds, Corner};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    Secondary,
}

/// A keyboard key as reported by `KeyboardEvent.key` (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete"
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected shape, if any.
    pub selected_id: Option<ShapeId>,
    /// Draw with the dark palette.
    pub dark_mode: bool,
    /// The primary pointer is a finger rather than a mouse; handles get more slop.
    pub coarse_pointer: bool,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the view with the middle button.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// The user is moving a shape across the canvas.
    DraggingShape {
        id: ShapeId,
        /// World-space position of the pointer at the previous event.
        last_world: Point,
        /// Shape x at the start of the drag, restored on cancel.
        orig_x: f64,
        /// Shape y at the start of the drag, restored on cancel.
        orig_y: f64,
    },
    /// The user is resizing a shape by dragging one of its corner handles.
    ResizingShape {
        id: ShapeId,
        corner: Corner,
        /// World-space pointer position at the start of the resize.
        start_world: Point,
        /// Bounds at the start of the resize; every move is computed from these.
        orig: Bounds,
        /// Rotation of the shape, fixed for the duration of the gesture.
        rotation: f64,
    },
    /// The user is rotating a shape by dragging the rotate handle.
    RotatingShape {
        id: ShapeId,
        /// World-space center of the shape; the rotation pivot.
        center: Point,
        /// Pointer bearing from `center` when the gesture began.
        start_angle: f64,
        /// Rotation in degrees at the start of the gesture.
        orig_rotation: f64,
    },
}

impl InputState {
    /// Id of the shape the current gesture is acting on, if any.
    #[must_use]
    pub fn target(&self) -> Option<&ShapeId> {
        match self {
            Self::Idle | Self::Panning { .. } => None,
            Self::DraggingShape { id, .. } | Self::ResizingShape { id, .. } | Self::RotatingShape { id, .. } => {
                Some(id)
            }
        }
    }
}
