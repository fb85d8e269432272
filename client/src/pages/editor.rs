//! Editor page: the single-screen shape workspace.
//!
//! ARCHITECTURE
//! ============
//! Lays out the theme toggle, the control panel and the canvas host, and
//! restores the stored theme preference once the page hydrates.

use leptos::prelude::*;

use crate::components::canvas_host::CanvasHost;
use crate::components::control_panel::ControlPanel;
use crate::components::theme_toggle::ThemeToggle;
use crate::state::editor::EditorState;
use crate::state::ui::UiState;

/// Status line text: shape count plus the selected id, if any.
pub fn status_text(state: &EditorState) -> String {
    let count = state.shapes.len();
    let noun = if count == 1 { "shape" } else { "shapes" };
    match &state.selection {
        Some(id) => format!("{count} {noun} · {id} selected"),
        None => format!("{count} {noun}"),
    }
}

#[component]
pub fn EditorPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let editor = expect_context::<RwSignal<EditorState>>();

    // Effects only run in the browser, so SSR always renders the light theme.
    Effect::new(move || {
        let dark = crate::util::dark_mode::read_preference();
        crate::util::dark_mode::apply(dark);
        ui.update(|u| u.dark_mode = dark);
    });

    view! {
        <div class=move || if ui.with(|u| u.dark_mode) { "editor-page dark" } else { "editor-page light" }>
            <header class="editor-page__header">
                <ThemeToggle/>
            </header>
            <ControlPanel/>
            <main class="editor-page__canvas">
                <CanvasHost/>
            </main>
            <footer class="editor-page__status">{move || editor.with(status_text)}</footer>
        </div>
    }
}

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;
