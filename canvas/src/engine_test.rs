#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{HANDLE_RADIUS_PX, MAX_ZOOM, ROTATE_HANDLE_OFFSET_PX};
use crate::palette::COLORS;

// =============================================================
// Helpers
// =============================================================

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn shift_modifier() -> Modifiers {
    Modifiers { shift: true, ..Default::default() }
}

fn ctrl_modifier() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn key(name: &str) -> Key {
    Key(name.to_owned())
}

fn request(kind: ShapeKind, width: f64, height: f64) -> GenerateShape {
    GenerateShape { kind, width, height, ..Default::default() }
}

/// Core with one 100x100 rectangle at the spawn point, (50, 50)..(150, 150).
fn core_with_square() -> (EngineCore, ShapeId) {
    let mut core = EngineCore::new();
    core.generate(request(ShapeKind::Rectangle, 100.0, 100.0)).unwrap();
    let id = core.shapes()[0].id.clone();
    (core, id)
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_render_needed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RenderNeeded))
}

fn has_shape_updated(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::ShapeUpdated { .. }))
}

fn updated_fields(actions: &[Action]) -> Option<&PartialShape> {
    actions.iter().find_map(|a| match a {
        Action::ShapeUpdated { fields, .. } => Some(fields),
        _ => None,
    })
}

fn cursor(actions: &[Action]) -> Option<&str> {
    actions.iter().rev().find_map(|a| match a {
        Action::SetCursor(c) => Some(c.as_str()),
        _ => None,
    })
}

// =============================================================
// Construction and defaults
// =============================================================

#[test]
fn core_new_is_empty() {
    let core = EngineCore::new();
    assert!(core.shapes().is_empty());
    assert!(core.selection().is_none());
    assert!(matches!(core.input, InputState::Idle));
    assert_eq!(core.camera(), Camera::default());
    assert_eq!(core.dpr, 1.0);
}

// =============================================================
// generate
// =============================================================

#[test]
fn generate_places_shape_at_spawn_point() {
    let mut core = EngineCore::new();
    let actions = core.generate(request(ShapeKind::Circle, 80.0, 40.0)).unwrap();

    let shape = &core.shapes()[0];
    assert_eq!(shape.id.as_str(), "shape-1");
    assert_eq!(shape.kind, ShapeKind::Circle);
    assert_eq!((shape.x, shape.y), (SPAWN_X, SPAWN_Y));
    assert_eq!((shape.width, shape.height), (80.0, 40.0));
    assert_eq!(actions, vec![Action::ShapeCreated(shape.clone()), Action::RenderNeeded]);
}

#[test]
fn generate_does_not_select() {
    let mut core = EngineCore::new();
    let actions = core.generate(request(ShapeKind::Triangle, 10.0, 10.0)).unwrap();
    assert!(core.selection().is_none());
    assert!(!has_action(&actions, |a| matches!(a, Action::SelectionChanged(_))));
}

#[test]
fn generate_normalizes_rotation() {
    let mut core = EngineCore::new();
    let req = GenerateShape { rotation: -30.0, ..request(ShapeKind::Rectangle, 10.0, 10.0) };
    core.generate(req).unwrap();
    assert_eq!(core.shapes()[0].rotation, 330.0);
}

#[test]
fn generate_rejects_bad_dimensions() {
    let mut core = EngineCore::new();
    for (w, h) in [(0.0, 10.0), (10.0, -1.0), (f64::NAN, 10.0), (10.0, f64::INFINITY)] {
        let err = core.generate(request(ShapeKind::Rectangle, w, h)).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidDimensions { .. }), "{w} x {h}");
    }
    assert!(core.shapes().is_empty());

    // Rejected requests don't consume ids or palette entries.
    core.generate(request(ShapeKind::Rectangle, 10.0, 10.0)).unwrap();
    assert_eq!(core.shapes()[0].id.as_str(), "shape-1");
    assert_eq!(core.shapes()[0].color.as_deref(), Some(COLORS[0]));
}

#[test]
fn generate_uses_palette_unless_color_given() {
    let mut core = EngineCore::new();
    core.generate(request(ShapeKind::Rectangle, 10.0, 10.0)).unwrap();
    let explicit = GenerateShape { color: Some("#000000".into()), ..request(ShapeKind::Circle, 10.0, 10.0) };
    core.generate(explicit).unwrap();
    core.generate(request(ShapeKind::Triangle, 10.0, 10.0)).unwrap();

    let colors: Vec<_> = core.shapes().iter().map(|s| s.color.as_deref()).collect();
    assert_eq!(colors, vec![Some(COLORS[0]), Some("#000000"), Some(COLORS[1])]);
}

#[test]
fn generate_appends_in_order_with_unique_ids() {
    let mut core = EngineCore::new();
    for kind in ShapeKind::ALL {
        core.generate(request(kind, 20.0, 20.0)).unwrap();
    }
    let ids: Vec<_> = core.shapes().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["shape-1", "shape-2", "shape-3"]);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut core = EngineCore::new();
    core.generate(request(ShapeKind::Rectangle, 20.0, 20.0)).unwrap();
    core.generate(request(ShapeKind::Rectangle, 20.0, 20.0)).unwrap();
    core.delete(&ShapeId::from("shape-1")).unwrap();
    core.generate(request(ShapeKind::Rectangle, 20.0, 20.0)).unwrap();

    let ids: Vec<_> = core.shapes().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["shape-2", "shape-3"]);
}

// =============================================================
// update_selected
// =============================================================

#[test]
fn update_selected_requires_selection() {
    let (mut core, _) = core_with_square();
    assert_eq!(core.update_selected(10.0, 10.0, 0.0), Err(ShapeError::NoSelection));
}

#[test]
fn update_selected_sets_size_and_rotation_keeping_position() {
    let (mut core, id) = core_with_square();
    core.select(Some(id.clone())).unwrap();
    let actions = core.update_selected(30.0, 40.0, 370.0).unwrap();

    let shape = core.shape(&id).unwrap();
    assert_eq!((shape.x, shape.y), (SPAWN_X, SPAWN_Y));
    assert_eq!((shape.width, shape.height, shape.rotation), (30.0, 40.0, 10.0));
    assert_eq!(updated_fields(&actions).and_then(|f| f.rotation), Some(10.0));
    assert!(has_render_needed(&actions));
}

#[test]
fn update_selected_rejects_bad_dimensions_unchanged() {
    let (mut core, id) = core_with_square();
    core.select(Some(id.clone())).unwrap();
    let err = core.update_selected(0.0, 40.0, 0.0).unwrap_err();
    assert_eq!(err, ShapeError::InvalidDimensions { width: 0.0, height: 40.0 });
    assert_eq!(core.shape(&id).unwrap().width, 100.0);
}

// =============================================================
// move / resize / rotate by id
// =============================================================

#[test]
fn move_shape_sets_position() {
    let (mut core, id) = core_with_square();
    let actions = core.move_shape(&id, 5.0, 7.0).unwrap();
    let shape = core.shape(&id).unwrap();
    assert_eq!((shape.x, shape.y), (5.0, 7.0));
    assert_eq!(
        actions[0],
        Action::ShapeUpdated { id, fields: PartialShape { x: Some(5.0), y: Some(7.0), ..Default::default() } }
    );
}

#[test]
fn move_shape_rejects_non_finite_position() {
    let (mut core, id) = core_with_square();
    for (x, y) in [(f64::NAN, 0.0), (0.0, f64::INFINITY), (f64::NEG_INFINITY, f64::NAN)] {
        assert!(matches!(core.move_shape(&id, x, y), Err(ShapeError::InvalidPosition { .. })));
    }
    let shape = core.shape(&id).unwrap();
    assert_eq!((shape.x, shape.y), (50.0, 50.0));
}

#[test]
fn unknown_id_is_not_found() {
    let mut core = EngineCore::new();
    let ghost = ShapeId::from("shape-99");
    assert_eq!(core.move_shape(&ghost, 0.0, 0.0), Err(ShapeError::NotFound(ghost.clone())));
    assert_eq!(core.resize_shape(&ghost, Corner::TopLeft, 1.0, 1.0), Err(ShapeError::NotFound(ghost.clone())));
    assert_eq!(core.rotate_shape(&ghost, 1.0), Err(ShapeError::NotFound(ghost.clone())));
    assert_eq!(core.delete(&ghost), Err(ShapeError::NotFound(ghost.clone())));
    assert_eq!(core.select(Some(ghost.clone())), Err(ShapeError::NotFound(ghost)));
}

#[test]
fn resize_top_left_by_delta() {
    let (mut core, id) = core_with_square();
    core.resize_shape(&id, Corner::TopLeft, 10.0, 20.0).unwrap();
    let shape = core.shape(&id).unwrap();
    assert_eq!(shape.bounds(), crate::geometry::Bounds { x: 60.0, y: 70.0, width: 90.0, height: 80.0 });
}

#[test]
fn resize_clamps_to_min_size_with_opposite_corner_fixed() {
    let (mut core, id) = core_with_square();
    core.resize_shape(&id, Corner::TopLeft, 500.0, 500.0).unwrap();
    let shape = core.shape(&id).unwrap();
    assert_eq!((shape.width, shape.height), (MIN_SHAPE_SIZE, MIN_SHAPE_SIZE));
    assert_eq!((shape.x + shape.width, shape.y + shape.height), (150.0, 150.0));
}

#[test]
fn resize_small_shape_without_drag_keeps_bounds() {
    let mut core = EngineCore::new();
    core.generate(request(ShapeKind::Rectangle, 4.0, 4.0)).unwrap();
    let id = core.shapes()[0].id.clone();
    let before = core.shape(&id).unwrap().bounds();
    for corner in Corner::ALL {
        core.resize_shape(&id, corner, 0.0, 0.0).unwrap();
        assert_eq!(core.shape(&id).unwrap().bounds(), before, "corner {corner:?}");
    }
}

#[test]
fn rotate_shape_wraps_both_directions() {
    let (mut core, id) = core_with_square();
    core.rotate_shape(&id, -10.0).unwrap();
    assert_eq!(core.shape(&id).unwrap().rotation, 350.0);
    core.rotate_shape(&id, 20.0).unwrap();
    assert_eq!(core.shape(&id).unwrap().rotation, 10.0);
}

#[test]
fn rotate_selected_steps_selection() {
    let (mut core, id) = core_with_square();
    assert_eq!(core.rotate_selected(1.0), Err(ShapeError::NoSelection));
    core.select(Some(id.clone())).unwrap();
    for _ in 0..361 {
        core.rotate_selected(1.0).unwrap();
    }
    assert_eq!(core.shape(&id).unwrap().rotation, 1.0);
}

// =============================================================
// delete / select / color
// =============================================================

#[test]
fn delete_selected_clears_selection() {
    let (mut core, id) = core_with_square();
    core.select(Some(id.clone())).unwrap();
    let actions = core.delete_selected().unwrap();
    assert_eq!(
        actions,
        vec![Action::ShapeDeleted { id }, Action::SelectionChanged(None), Action::RenderNeeded]
    );
    assert!(core.shapes().is_empty());
    assert!(core.selection().is_none());
}

#[test]
fn delete_unselected_leaves_selection() {
    let (mut core, first) = core_with_square();
    core.generate(request(ShapeKind::Circle, 10.0, 10.0)).unwrap();
    let second = core.shapes()[1].id.clone();
    core.select(Some(first.clone())).unwrap();

    let actions = core.delete(&second).unwrap();
    assert!(!has_action(&actions, |a| matches!(a, Action::SelectionChanged(_))));
    assert_eq!(core.selection(), Some(&first));
}

#[test]
fn delete_selected_without_selection_errors() {
    let (mut core, _) = core_with_square();
    assert_eq!(core.delete_selected(), Err(ShapeError::NoSelection));
    assert_eq!(core.shapes().len(), 1);
}

#[test]
fn select_same_shape_twice_is_noop() {
    let (mut core, id) = core_with_square();
    assert_eq!(core.select(Some(id.clone())).unwrap(), vec![Action::SelectionChanged(Some(id.clone()))]);
    assert!(core.select(Some(id)).unwrap().is_empty());
}

#[test]
fn select_none_deselects() {
    let (mut core, id) = core_with_square();
    core.select(Some(id)).unwrap();
    assert_eq!(core.select(None).unwrap(), vec![Action::SelectionChanged(None)]);
    assert!(core.selected_shape().is_none());
}

#[test]
fn cycle_color_advances_palette_entry() {
    let (mut core, id) = core_with_square();
    assert_eq!(core.cycle_selected_color(), Err(ShapeError::NoSelection));
    core.select(Some(id.clone())).unwrap();
    core.cycle_selected_color().unwrap();
    assert_eq!(core.shape(&id).unwrap().color.as_deref(), Some(COLORS[1]));
}

// =============================================================
// Presentation
// =============================================================

#[test]
fn set_viewport_sanitizes_input() {
    let mut core = EngineCore::new();
    core.set_viewport(800.0, 600.0, 2.0);
    assert_eq!((core.viewport_width, core.viewport_height, core.dpr), (800.0, 600.0, 2.0));
    core.set_viewport(-5.0, 10.0, 0.0);
    assert_eq!((core.viewport_width, core.viewport_height, core.dpr), (0.0, 10.0, 1.0));
}

#[test]
fn dark_mode_change_requests_render_once() {
    let mut core = EngineCore::new();
    assert_eq!(core.set_dark_mode(true), vec![Action::RenderNeeded]);
    assert!(core.set_dark_mode(true).is_empty());
    assert!(core.ui.dark_mode);
}

// =============================================================
// Pointer: selection and drag
// =============================================================

#[test]
fn pointer_down_on_body_selects_and_starts_drag() {
    let (mut core, id) = core_with_square();
    let actions = core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert!(has_action(&actions, |a| *a == Action::SelectionChanged(Some(id.clone()))));
    assert_eq!(cursor(&actions), Some("move"));
    assert!(matches!(core.input, InputState::DraggingShape { .. }));
}

#[test]
fn pointer_down_on_empty_space_deselects() {
    let (mut core, id) = core_with_square();
    core.select(Some(id)).unwrap();
    let actions = core.on_pointer_down(pt(400.0, 400.0), Button::Primary, no_modifiers());
    assert!(has_action(&actions, |a| *a == Action::SelectionChanged(None)));
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn drag_moves_shape_and_reports_once_on_release() {
    let (mut core, id) = core_with_square();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());

    let mid = core.on_pointer_move(pt(105.0, 110.0), no_modifiers());
    assert!(!has_shape_updated(&mid));
    assert!(has_render_needed(&mid));
    let mid = core.on_pointer_move(pt(110.0, 120.0), no_modifiers());
    assert!(!has_shape_updated(&mid));

    let shape = core.shape(&id).unwrap();
    assert_eq!((shape.x, shape.y), (60.0, 70.0));

    let up = core.on_pointer_up(pt(110.0, 120.0), Button::Primary, no_modifiers());
    assert_eq!(
        updated_fields(&up),
        Some(&PartialShape { x: Some(60.0), y: Some(70.0), ..Default::default() })
    );
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn click_without_move_reports_no_update() {
    let (mut core, _) = core_with_square();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    let up = core.on_pointer_up(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert!(!has_shape_updated(&up));
}

#[test]
fn drag_respects_zoom() {
    let (mut core, id) = core_with_square();
    core.camera.zoom = 2.0;
    // World (100, 100) is screen (200, 200).
    core.on_pointer_down(pt(200.0, 200.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(220.0, 200.0), no_modifiers());
    assert_eq!(core.shape(&id).unwrap().x, 60.0);
}

#[test]
fn topmost_shape_is_dragged() {
    let (mut core, first) = core_with_square();
    core.generate(request(ShapeKind::Rectangle, 100.0, 100.0)).unwrap();
    let second = core.shapes()[1].id.clone();

    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(110.0, 100.0), no_modifiers());
    assert_eq!(core.shape(&second).unwrap().x, 60.0);
    assert_eq!(core.shape(&first).unwrap().x, 50.0);
}

#[test]
fn pointer_leave_commits_gesture() {
    let (mut core, _) = core_with_square();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(120.0, 100.0), no_modifiers());
    let actions = core.on_pointer_leave();
    assert!(has_shape_updated(&actions));
    assert!(matches!(core.input, InputState::Idle));
}

// =============================================================
// Pointer: resize
// =============================================================

#[test]
fn corner_drag_resizes_selected_shape() {
    let (mut core, id) = core_with_square();
    core.select(Some(id.clone())).unwrap();

    let down = core.on_pointer_down(pt(150.0, 150.0), Button::Primary, no_modifiers());
    assert_eq!(cursor(&down), Some("nwse-resize"));
    assert!(matches!(core.input, InputState::ResizingShape { corner: Corner::BottomRight, .. }));

    core.on_pointer_move(pt(160.0, 160.0), no_modifiers());
    core.on_pointer_move(pt(170.0, 180.0), no_modifiers());
    let shape = core.shape(&id).unwrap();
    assert_eq!((shape.x, shape.y, shape.width, shape.height), (50.0, 50.0, 120.0, 130.0));

    let up = core.on_pointer_up(pt(170.0, 180.0), Button::Primary, no_modifiers());
    let fields = updated_fields(&up).unwrap();
    assert_eq!((fields.width, fields.height), (Some(120.0), Some(130.0)));
}

#[test]
fn top_left_drag_past_opposite_corner_clamps() {
    let (mut core, id) = core_with_square();
    core.select(Some(id.clone())).unwrap();
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(400.0, 400.0), no_modifiers());

    let shape = core.shape(&id).unwrap();
    assert_eq!((shape.width, shape.height), (MIN_SHAPE_SIZE, MIN_SHAPE_SIZE));
    assert_eq!((shape.x, shape.y), (140.0, 140.0));
}

#[test]
fn rotated_shape_resizes_along_its_own_axes() {
    let (mut core, id) = core_with_square();
    core.rotate_shape(&id, 90.0).unwrap();
    core.select(Some(id.clone())).unwrap();

    // Unrotated bottom-right (150, 150) turns a quarter clockwise to (50, 150).
    core.on_pointer_down(pt(50.0, 150.0), Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::ResizingShape { corner: Corner::BottomRight, .. }));
    core.on_pointer_move(pt(50.0, 170.0), no_modifiers());

    let shape = core.shape(&id).unwrap();
    assert!(approx_eq(shape.width, 120.0));
    assert!(approx_eq(shape.height, 100.0));

    // The opposite (top-left) corner stays at its on-screen position (150, 50).
    let fixed = crate::geometry::rotate_point(
        shape.bounds().corner(Corner::TopLeft),
        shape.bounds().center(),
        shape.rotation,
    );
    assert!(approx_eq(fixed.x, 150.0));
    assert!(approx_eq(fixed.y, 50.0));
}

#[test]
fn coarse_pointer_grabs_handle_from_further_away() {
    let (mut core, id) = core_with_square();
    core.select(Some(id.clone())).unwrap();
    let near = pt(150.0 + HANDLE_RADIUS_PX + 4.0, 150.0);

    // Outside the fine-pointer slop this is a click on empty space.
    core.on_pointer_down(near, Button::Primary, no_modifiers());
    assert!(!matches!(core.input, InputState::ResizingShape { .. }));
    core.on_pointer_up(near, Button::Primary, no_modifiers());

    core.set_coarse_pointer(true);
    core.select(Some(id)).unwrap();
    core.on_pointer_down(near, Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::ResizingShape { .. }));
}

// =============================================================
// Pointer: rotate
// =============================================================

#[test]
fn rotate_handle_drag_accumulates_angle() {
    let (mut core, id) = core_with_square();
    core.select(Some(id.clone())).unwrap();

    let handle = pt(100.0, 50.0 - ROTATE_HANDLE_OFFSET_PX);
    core.on_pointer_down(handle, Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::RotatingShape { .. }));

    // A quarter turn clockwise around the center (100, 100).
    core.on_pointer_move(pt(180.0, 100.0), no_modifiers());
    assert!(approx_eq(core.shape(&id).unwrap().rotation, 90.0));

    let up = core.on_pointer_up(pt(180.0, 100.0), Button::Primary, no_modifiers());
    let rotation = updated_fields(&up).and_then(|f| f.rotation).unwrap();
    assert!(approx_eq(rotation, 90.0));
}

#[test]
fn rotate_counterclockwise_wraps_below_zero() {
    let (mut core, id) = core_with_square();
    core.select(Some(id.clone())).unwrap();
    core.on_pointer_down(pt(100.0, 50.0 - ROTATE_HANDLE_OFFSET_PX), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(20.0, 100.0), no_modifiers());
    assert!(approx_eq(core.shape(&id).unwrap().rotation, 270.0));
}

#[test]
fn shift_snaps_rotation() {
    let (mut core, id) = core_with_square();
    core.select(Some(id.clone())).unwrap();
    core.on_pointer_down(pt(100.0, 50.0 - ROTATE_HANDLE_OFFSET_PX), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(180.0, 106.0), shift_modifier());
    assert_eq!(core.shape(&id).unwrap().rotation, 90.0);
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn delete_key_removes_selection() {
    let (mut core, id) = core_with_square();
    core.select(Some(id.clone())).unwrap();
    let actions = core.on_key_down(key("Delete"), no_modifiers());
    assert!(has_action(&actions, |a| *a == Action::ShapeDeleted { id: id.clone() }));
    assert!(core.shapes().is_empty());
}

#[test]
fn delete_key_without_selection_does_nothing() {
    let (mut core, _) = core_with_square();
    assert!(core.on_key_down(key("Delete"), no_modifiers()).is_empty());
    assert_eq!(core.shapes().len(), 1);
}

#[test]
fn backspace_does_not_delete() {
    let (mut core, id) = core_with_square();
    core.select(Some(id)).unwrap();
    assert!(core.on_key_down(key("Backspace"), no_modifiers()).is_empty());
    assert_eq!(core.shapes().len(), 1);
}

#[test]
fn escape_cancels_drag_and_restores_position() {
    let (mut core, id) = core_with_square();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(140.0, 140.0), no_modifiers());

    let actions = core.on_key_down(key("Escape"), no_modifiers());
    assert!(!has_shape_updated(&actions));
    let shape = core.shape(&id).unwrap();
    assert_eq!((shape.x, shape.y), (50.0, 50.0));
    assert!(matches!(core.input, InputState::Idle));
    // Selection made by the press survives the cancel.
    assert_eq!(core.selection(), Some(&id));
}

#[test]
fn escape_cancels_resize_and_rotate() {
    let (mut core, id) = core_with_square();
    core.select(Some(id.clone())).unwrap();

    core.on_pointer_down(pt(150.0, 150.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(200.0, 200.0), no_modifiers());
    core.on_key_down(key("Escape"), no_modifiers());
    assert_eq!(core.shape(&id).unwrap().width, 100.0);

    core.on_pointer_down(pt(100.0, 50.0 - ROTATE_HANDLE_OFFSET_PX), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(180.0, 100.0), no_modifiers());
    core.on_key_down(key("Escape"), no_modifiers());
    assert_eq!(core.shape(&id).unwrap().rotation, 0.0);
}

#[test]
fn escape_when_idle_deselects() {
    let (mut core, id) = core_with_square();
    core.select(Some(id)).unwrap();
    let actions = core.on_key_down(key("Escape"), no_modifiers());
    assert!(has_action(&actions, |a| *a == Action::SelectionChanged(None)));
    assert!(core.on_key_down(key("Escape"), no_modifiers()).is_empty());
}

// =============================================================
// Camera: pan and zoom
// =============================================================

#[test]
fn middle_drag_pans() {
    let mut core = EngineCore::new();
    let down = core.on_pointer_down(pt(10.0, 10.0), Button::Middle, no_modifiers());
    assert_eq!(cursor(&down), Some("grabbing"));
    core.on_pointer_move(pt(30.0, 15.0), no_modifiers());
    assert_eq!((core.camera.pan_x, core.camera.pan_y), (20.0, 5.0));
    core.on_pointer_up(pt(30.0, 15.0), Button::Middle, no_modifiers());
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn wheel_pans_without_modifier() {
    let mut core = EngineCore::new();
    let actions = core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 5.0, dy: 10.0 }, no_modifiers());
    assert!(has_render_needed(&actions));
    assert_eq!((core.camera.pan_x, core.camera.pan_y), (-5.0, -10.0));
    assert_eq!(core.camera.zoom, 1.0);
}

#[test]
fn ctrl_wheel_zooms_about_cursor() {
    let mut core = EngineCore::new();
    let anchor = pt(200.0, 100.0);
    let before = core.camera.screen_to_world(anchor);
    core.on_wheel(anchor, WheelDelta { dx: 0.0, dy: -100.0 }, ctrl_modifier());
    assert!(core.camera.zoom > 1.0);
    let after = core.camera.screen_to_world(anchor);
    assert!(approx_eq(before.x, after.x));
    assert!(approx_eq(before.y, after.y));
}

#[test]
fn ctrl_wheel_zoom_is_clamped() {
    let mut core = EngineCore::new();
    for _ in 0..50 {
        core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: -1000.0 }, ctrl_modifier());
    }
    assert_eq!(core.camera.zoom, MAX_ZOOM);
}

// =============================================================
// Hover cursor
// =============================================================

#[test]
fn hover_cursor_reflects_target() {
    let (mut core, id) = core_with_square();
    assert_eq!(cursor(&core.on_pointer_move(pt(100.0, 100.0), no_modifiers())), Some("move"));
    assert_eq!(cursor(&core.on_pointer_move(pt(300.0, 300.0), no_modifiers())), Some("default"));

    core.select(Some(id)).unwrap();
    assert_eq!(cursor(&core.on_pointer_move(pt(150.0, 50.0), no_modifiers())), Some("nesw-resize"));
    let rotate = pt(100.0, 50.0 - ROTATE_HANDLE_OFFSET_PX);
    assert_eq!(cursor(&core.on_pointer_move(rotate, no_modifiers())), Some("grab"));
}

#[test]
fn secondary_button_is_ignored() {
    let (mut core, _) = core_with_square();
    assert!(core.on_pointer_down(pt(100.0, 100.0), Button::Secondary, no_modifiers()).is_empty());
    assert!(core.selection().is_none());
}

#[test]
fn deleting_dragged_shape_resets_gesture() {
    let (mut core, id) = core_with_square();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    core.delete(&id).unwrap();
    assert!(matches!(core.input, InputState::Idle));
    let up = core.on_pointer_up(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert!(!has_shape_updated(&up));
}
