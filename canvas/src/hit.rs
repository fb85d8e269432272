//! Hit-testing: which shape, and which part of it, lies under a world point.
//!
//! Handles of the selected shape win over any body, so a corner that overlaps
//! a neighbouring shape is still grabbable. Bodies are tested topmost first.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::{HANDLE_RADIUS_PX, HANDLE_RADIUS_TOUCH_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::doc::{Shape, ShapeId, ShapeStore};
use crate::geometry::{self, Corner};

/// Which part of a shape was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(Corner),
    RotateHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub shape_id: ShapeId,
    pub part: HitPart,
}

/// Handle hit radius in world units for the current zoom and pointer type.
#[must_use]
pub fn handle_radius(camera: &Camera, coarse_pointer: bool) -> f64 {
    let px = if coarse_pointer { HANDLE_RADIUS_TOUCH_PX } else { HANDLE_RADIUS_PX };
    camera.screen_dist_to_world(px)
}

/// World positions of the four resize handles, following the shape's rotation.
#[must_use]
pub fn corner_handle_positions(shape: &Shape) -> [(Corner, Point); 4] {
    let bounds = shape.bounds();
    let center = bounds.center();
    Corner::ALL.map(|c| (c, geometry::rotate_point(bounds.corner(c), center, shape.rotation)))
}

/// World position of the rotate handle: above the top edge's midpoint, in the shape's frame.
#[must_use]
pub fn rotate_handle_position(shape: &Shape, camera: &Camera) -> Point {
    let bounds = shape.bounds();
    let center = bounds.center();
    let offset = camera.screen_dist_to_world(ROTATE_HANDLE_OFFSET_PX);
    let unrotated = Point::new(center.x, bounds.y - offset);
    geometry::rotate_point(unrotated, center, shape.rotation)
}

/// Test which shape (if any) is under `world_pt`, checking the selected shape's handles first.
#[must_use]
pub fn hit_test(
    world_pt: Point,
    store: &ShapeStore,
    camera: &Camera,
    selected_id: Option<&ShapeId>,
    coarse_pointer: bool,
) -> Option<Hit> {
    if let Some(selected) = selected_id.and_then(|id| store.get(id)) {
        if let Some(part) = hit_handles(world_pt, selected, camera, coarse_pointer) {
            return Some(Hit { shape_id: selected.id.clone(), part });
        }
    }

    store
        .iter_topmost()
        .find(|s| geometry::contains(s.kind, s.bounds(), s.rotation, world_pt))
        .map(|s| Hit { shape_id: s.id.clone(), part: HitPart::Body })
}

fn hit_handles(world_pt: Point, shape: &Shape, camera: &Camera, coarse_pointer: bool) -> Option<HitPart> {
    let radius = handle_radius(camera, coarse_pointer);
    let within = |p: Point| {
        let (dx, dy) = world_pt.delta_from(p);
        dx * dx + dy * dy <= radius * radius
    };

    if let Some((corner, _)) = corner_handle_positions(shape).into_iter().find(|(_, p)| within(*p)) {
        return Some(HitPart::ResizeHandle(corner));
    }
    within(rotate_handle_position(shape, camera)).then_some(HitPart::RotateHandle)
}
