//! Shared numeric constants for the canvas crate.

// ── Shapes ──────────────────────────────────────────────────────

/// Smallest width or height a resize gesture may produce, in pixels.
pub const MIN_SHAPE_SIZE: f64 = 10.0;

/// World-space x of the top-left corner of a freshly generated shape.
pub const SPAWN_X: f64 = 50.0;

/// World-space y of the top-left corner of a freshly generated shape.
pub const SPAWN_Y: f64 = 50.0;

// ── Rotation ────────────────────────────────────────────────────

/// Degrees applied per step by the rotate buttons.
pub const ROTATE_STEP_DEG: f64 = 1.0;

/// Snap increment while Shift is held during a rotate gesture.
pub const ROTATE_SNAP_DEG: f64 = 15.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for handles with a fine pointer.
pub const HANDLE_RADIUS_PX: f64 = 6.0;

/// Screen-space hit slop in pixels for handles on touch devices.
pub const HANDLE_RADIUS_TOUCH_PX: f64 = 14.0;

/// Distance from the top edge to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

// ── Camera ──────────────────────────────────────────────────────

/// Lower zoom bound.
pub const MIN_ZOOM: f64 = 0.1;

/// Upper zoom bound.
pub const MAX_ZOOM: f64 = 10.0;

/// Multiplicative zoom change per wheel pixel.
pub const ZOOM_PER_WHEEL_PX: f64 = 0.002;
