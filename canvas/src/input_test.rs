use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
    assert!(!m.command());
}

#[test]
fn command_accepts_ctrl_or_meta() {
    assert!(Modifiers { ctrl: true, ..Default::default() }.command());
    assert!(Modifiers { meta: true, ..Default::default() }.command());
    assert!(!Modifiers { shift: true, alt: true, ..Default::default() }.command());
}

// =============================================================
// Key
// =============================================================

#[test]
fn key_delete_is_exact() {
    assert!(Key("Delete".into()).is_delete());
    assert!(!Key("Backspace".into()).is_delete());
    assert!(!Key("delete".into()).is_delete());
}

#[test]
fn key_escape() {
    assert!(Key("Escape".into()).is_escape());
    assert!(!Key("Esc".into()).is_escape());
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_default() {
    let ui = UiState::default();
    assert!(ui.selected_id.is_none());
    assert!(!ui.dark_mode);
    assert!(!ui.coarse_pointer);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(matches!(InputState::default(), InputState::Idle));
}

#[test]
fn idle_and_panning_have_no_target() {
    assert!(InputState::Idle.target().is_none());
    let panning = InputState::Panning { last_screen: Point::new(1.0, 2.0) };
    assert!(panning.target().is_none());
}

#[test]
fn shape_gestures_report_target() {
    let id = ShapeId::from("shape-7");
    let states = [
        InputState::DraggingShape { id: id.clone(), last_world: Point::default(), orig_x: 0.0, orig_y: 0.0 },
        InputState::ResizingShape {
            id: id.clone(),
            corner: Corner::TopLeft,
            start_world: Point::default(),
            orig: Bounds::default(),
            rotation: 0.0,
        },
        InputState::RotatingShape {
            id: id.clone(),
            center: Point::default(),
            start_angle: 0.0,
            orig_rotation: 0.0,
        },
    ];
    for state in &states {
        assert_eq!(state.target(), Some(&id));
    }
}
