//! Local UI chrome state (theme, shape-kind selector, pointer class).
//!
//! DESIGN
//! ======
//! Keeps presentation concerns out of the editor state so the panel and the
//! canvas host can read them without touching the shape snapshot.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use canvas::doc::ShapeKind;

/// UI state shared through a `RwSignal<UiState>` context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    pub dark_mode: bool,
    /// Kind used by the next Generate.
    pub shape_kind: ShapeKind,
    /// Set once on hydrate when the device reports a coarse (touch) pointer.
    pub coarse_pointer: bool,
}

impl UiState {
    /// Label for the theme toggle button, naming the mode it switches to.
    pub fn theme_toggle_label(&self) -> &'static str {
        if self.dark_mode { "Switch to Light Mode" } else { "Switch to Dark Mode" }
    }

    pub fn select_kind(&mut self, kind: ShapeKind) {
        self.shape_kind = kind;
    }
}

/// Display name for a shape-kind selector button.
pub fn kind_label(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::Rectangle => "Rectangle",
        ShapeKind::Circle => "Circle",
        ShapeKind::Triangle => "Triangle",
    }
}
