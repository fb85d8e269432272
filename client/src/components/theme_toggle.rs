//! Light/dark theme switch.

use leptos::prelude::*;

use crate::state::ui::UiState;

/// Button naming the mode it switches to. Persists the choice and updates
/// the `data-theme` attribute; the canvas host picks the change up from
/// [`UiState::dark_mode`].
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <div class="theme-toggle">
            <button
                class="btn theme-toggle__button"
                on:click=move |_| {
                    let current = ui.get().dark_mode;
                    let next = crate::util::dark_mode::toggle(current);
                    ui.update(|u| u.dark_mode = next);
                }
            >
                {move || ui.with(UiState::theme_toggle_label)}
            </button>
        </div>
    }
}
