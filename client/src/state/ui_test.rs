use super::*;

// =============================================================
// UiState defaults
// =============================================================

#[test]
fn ui_state_default_dark_mode_off() {
    let state = UiState::default();
    assert!(!state.dark_mode);
    assert!(!state.coarse_pointer);
}

#[test]
fn ui_state_default_kind_is_rectangle() {
    let state = UiState::default();
    assert_eq!(state.shape_kind, ShapeKind::Rectangle);
}

// =============================================================
// Theme label
// =============================================================

#[test]
fn theme_toggle_label_names_the_other_mode() {
    let mut state = UiState::default();
    assert_eq!(state.theme_toggle_label(), "Switch to Dark Mode");
    state.dark_mode = true;
    assert_eq!(state.theme_toggle_label(), "Switch to Light Mode");
}

// =============================================================
// Kind selector
// =============================================================

#[test]
fn select_kind_replaces_current_kind() {
    let mut state = UiState::default();
    state.select_kind(ShapeKind::Triangle);
    assert_eq!(state.shape_kind, ShapeKind::Triangle);
    state.select_kind(ShapeKind::Circle);
    assert_eq!(state.shape_kind, ShapeKind::Circle);
}

#[test]
fn kind_label_covers_every_kind() {
    let labels: Vec<_> = ShapeKind::ALL.iter().map(|kind| kind_label(*kind)).collect();
    assert_eq!(labels, vec!["Rectangle", "Circle", "Triangle"]);
}
