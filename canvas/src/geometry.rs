//! Geometry helpers: corner resize, rotation wraparound, and point-in-shape tests.
//!
//! All functions are pure and work in world pixels with y pointing down, so a
//! positive rotation turns a shape clockwise on screen (matching
//! `CanvasRenderingContext2d::rotate`).

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::camera::Point;
use crate::doc::ShapeKind;

/// One of the four bounding-box corners a resize handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All corners in handle-drawing order.
    pub const ALL: [Self; 4] = [Self::TopLeft, Self::TopRight, Self::BottomRight, Self::BottomLeft];

    /// The diagonally opposite corner, which stays fixed while this one is dragged.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomLeft => Self::TopRight,
            Self::BottomRight => Self::TopLeft,
        }
    }

    /// Sign of the corner's offset from the center along (x, y).
    #[must_use]
    pub fn signs(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (-1.0, -1.0),
            Self::TopRight => (1.0, -1.0),
            Self::BottomLeft => (-1.0, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }

    /// CSS cursor shown while hovering or dragging this corner.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::TopLeft | Self::BottomRight => "nwse-resize",
            Self::TopRight | Self::BottomLeft => "nesw-resize",
        }
    }
}

/// Axis-aligned box: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Position of `corner` before any rotation.
    #[must_use]
    pub fn corner(&self, corner: Corner) -> Point {
        let (sx, sy) = corner.signs();
        let c = self.center();
        Point::new(c.x + sx * self.width / 2.0, c.y + sy * self.height / 2.0)
    }
}

/// Resize `bounds` by dragging `corner` by `(dx, dy)`.
///
/// The dragged corner's edges move; the opposite corner stays put. A dimension
/// that would drop below `min_size` is clamped to it, and the moving edge is
/// placed so the opposite corner is still where it was. A shape already
/// smaller than `min_size` may shrink no further, but is never grown by the
/// clamp.
#[must_use]
pub fn resize_from_corner(bounds: Bounds, corner: Corner, dx: f64, dy: f64, min_size: f64) -> Bounds {
    let right = bounds.x + bounds.width;
    let bottom = bounds.y + bounds.height;

    let (raw_w, raw_h) = match corner {
        Corner::TopLeft => (bounds.width - dx, bounds.height - dy),
        Corner::TopRight => (bounds.width + dx, bounds.height - dy),
        Corner::BottomLeft => (bounds.width - dx, bounds.height + dy),
        Corner::BottomRight => (bounds.width + dx, bounds.height + dy),
    };
    let floor_w = min_size.min(bounds.width);
    let floor_h = min_size.min(bounds.height);
    let width = raw_w.max(floor_w);
    let height = raw_h.max(floor_h);

    let x = match corner {
        Corner::TopLeft | Corner::BottomLeft => {
            if raw_w >= floor_w {
                bounds.x + dx
            } else {
                right - width
            }
        }
        Corner::TopRight | Corner::BottomRight => bounds.x,
    };
    let y = match corner {
        Corner::TopLeft | Corner::TopRight => {
            if raw_h >= floor_h {
                bounds.y + dy
            } else {
                bottom - height
            }
        }
        Corner::BottomLeft | Corner::BottomRight => bounds.y,
    };

    Bounds { x, y, width, height }
}

/// Resize a rotated shape from `corner` given a world-space drag delta.
///
/// The delta is projected onto the shape's own axes, then the result is
/// re-centred so the opposite corner keeps its on-screen position.
#[must_use]
pub fn resize_rotated(
    bounds: Bounds,
    rotation_deg: f64,
    corner: Corner,
    world_dx: f64,
    world_dy: f64,
    min_size: f64,
) -> Bounds {
    let rotation = normalize_degrees(rotation_deg);
    if rotation == 0.0 {
        return resize_from_corner(bounds, corner, world_dx, world_dy, min_size);
    }

    let local = to_local(world_dx, world_dy, rotation);
    let resized = resize_from_corner(bounds, corner, local.x, local.y, min_size);

    let fixed = corner.opposite();
    let center = bounds.center();
    let fixed_world = rotate_point(bounds.corner(fixed), center, rotation);

    let (sx, sy) = fixed.signs();
    let offset = rotate_point(
        Point::new(sx * resized.width / 2.0, sy * resized.height / 2.0),
        Point::new(0.0, 0.0),
        rotation,
    );
    let new_center = Point::new(fixed_world.x - offset.x, fixed_world.y - offset.y);

    Bounds {
        x: new_center.x - resized.width / 2.0,
        y: new_center.y - resized.height / 2.0,
        width: resized.width,
        height: resized.height,
    }
}

/// Wrap an angle into `[0, 360)`. Non-finite input maps to `0`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Add `delta` to `rotation` and wrap the sum into `[0, 360)`.
#[must_use]
pub fn rotate_by(rotation: f64, delta: f64) -> f64 {
    normalize_degrees(rotation + delta)
}

/// Shortest signed angle from `start` to `current`, in `(-180, 180]`.
#[must_use]
pub fn signed_angle_delta(current: f64, start: f64) -> f64 {
    let delta = current - start;
    if !delta.is_finite() {
        return 0.0;
    }
    let mut wrapped = delta.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// Round `deg` to the nearest multiple of `step`, wrapped into `[0, 360)`.
#[must_use]
pub fn snap_degrees(deg: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return normalize_degrees(deg);
    }
    normalize_degrees((deg / step).round() * step)
}

/// Bearing of `pointer` seen from `center`, clockwise from straight up, in `[0, 360)`.
#[must_use]
pub fn pointer_angle(center: Point, pointer: Point) -> f64 {
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    normalize_degrees(dy.atan2(dx).to_degrees() + 90.0)
}

/// Rotate `point` clockwise by `deg` around `center`.
#[must_use]
pub fn rotate_point(point: Point, center: Point, deg: f64) -> Point {
    if deg == 0.0 {
        return point;
    }
    let (sin, cos) = deg.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}

/// Express a world-space delta along the axes of a shape rotated by `rotation_deg`.
#[must_use]
pub fn to_local(dx: f64, dy: f64, rotation_deg: f64) -> Point {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    Point::new(dx * cos + dy * sin, -dx * sin + dy * cos)
}

/// Whether `point` lies inside a shape of `kind` occupying `bounds`, rotated by `rotation_deg`.
#[must_use]
pub fn contains(kind: ShapeKind, bounds: Bounds, rotation_deg: f64, point: Point) -> bool {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return false;
    }
    let center = bounds.center();
    let local = rotate_point(point, center, -rotation_deg);
    let lx = local.x - center.x;
    let ly = local.y - center.y;
    let hw = bounds.width / 2.0;
    let hh = bounds.height / 2.0;

    match kind {
        ShapeKind::Rectangle => lx.abs() <= hw && ly.abs() <= hh,
        ShapeKind::Circle => {
            let nx = lx / hw;
            let ny = ly / hh;
            nx * nx + ny * ny <= 1.0
        }
        ShapeKind::Triangle => {
            if ly < -hh || ly > hh {
                return false;
            }
            // Half-width grows linearly from 0 at the apex to hw at the base.
            let half_width_at_y = hw * (ly + hh) / bounds.height;
            lx.abs() <= half_width_at_y
        }
    }
}

/// The three triangle vertices (apex, bottom-right, bottom-left) relative to the center.
#[must_use]
pub fn triangle_vertices(width: f64, height: f64) -> [Point; 3] {
    let hw = width / 2.0;
    let hh = height / 2.0;
    [Point::new(0.0, -hh), Point::new(hw, hh), Point::new(-hw, hh)]
}
