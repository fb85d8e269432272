//! Control panel: shape-kind selector, W/H/rotation inputs and lifecycle buttons.
//!
//! ARCHITECTURE
//! ============
//! Inputs keep a draft string while focused and commit into
//! [`EditorState::fields`] on blur or Enter. Buttons and Enter enqueue
//! [`EditorCommand`]s; the canvas host runs them against the engine.

use leptos::prelude::*;

use canvas::doc::ShapeKind;

use crate::state::editor::{EditorCommand, EditorState, Field};
use crate::state::ui::{UiState, kind_label};
use crate::util::field::format_field;

#[cfg(feature = "hydrate")]
use gloo_timers::callback::{Interval, Timeout};

/// Delay before Enter with no selection generates a shape.
#[cfg(feature = "hydrate")]
const GENERATE_DEBOUNCE_MS: u32 = 300;

/// Repeat period while a rotate button is held.
#[cfg(feature = "hydrate")]
const ROTATE_REPEAT_MS: u32 = 100;

/// Degrees applied per rotate-button press or repeat.
const ROTATE_BUTTON_STEP_DEG: f64 = 1.0;

fn queue_generate(editor: RwSignal<EditorState>, ui: RwSignal<UiState>) {
    let kind = ui.with_untracked(|u| u.shape_kind);
    editor.update(|state| {
        let command = state.generate_command(kind);
        state.queue(command);
    });
}

#[component]
pub fn ControlPanel() -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    #[cfg(feature = "hydrate")]
    let generate_timer = StoredValue::new_local(None::<Timeout>);
    #[cfg(feature = "hydrate")]
    let rotate_timer = StoredValue::new_local(None::<Interval>);

    // Enter: update the selection now, or generate after a short debounce.
    let on_submit = Callback::new(move |()| {
        let kind = ui.with_untracked(|u| u.shape_kind);
        match editor.with_untracked(|state| state.submit_command(kind)) {
            EditorCommand::Generate(_) => {
                #[cfg(feature = "hydrate")]
                {
                    let timeout = Timeout::new(GENERATE_DEBOUNCE_MS, move || queue_generate(editor, ui));
                    // Replacing the previous timeout cancels it.
                    generate_timer.set_value(Some(timeout));
                }
                #[cfg(not(feature = "hydrate"))]
                queue_generate(editor, ui);
            }
            command => editor.update(|state| state.queue(command)),
        }
    });

    let start_rotate = move |delta: f64| {
        editor.update(|state| state.rotate_step(delta));
        #[cfg(feature = "hydrate")]
        {
            let interval = Interval::new(ROTATE_REPEAT_MS, move || editor.update(|state| state.rotate_step(delta)));
            rotate_timer.set_value(Some(interval));
        }
    };

    let stop_rotate = move || {
        #[cfg(feature = "hydrate")]
        rotate_timer.set_value(None);
    };

    let on_generate = move |_| queue_generate(editor, ui);
    let on_delete = move |_| editor.update(|state| state.queue(EditorCommand::DeleteSelected));
    let on_recolor = move |_| editor.update(|state| state.queue(EditorCommand::CycleColor));

    view! {
        <div class="control-panel">
            <div class="control-panel__kinds">
                {ShapeKind::ALL
                    .into_iter()
                    .map(|kind| {
                        view! {
                            <button
                                class=move || {
                                    if ui.with(|u| u.shape_kind == kind) {
                                        format!("control-panel__kind control-panel__kind--{} selected", kind.as_str())
                                    } else {
                                        format!("control-panel__kind control-panel__kind--{}", kind.as_str())
                                    }
                                }
                                title=kind_label(kind)
                                on:click=move |_| ui.update(|u| u.select_kind(kind))
                            ></button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="control-panel__dimensions">
                <NumberField label="W (px)" id="field-width" field=Field::Width on_submit=on_submit/>
                <NumberField label="H (px)" id="field-height" field=Field::Height on_submit=on_submit/>
            </div>

            <div class="control-panel__rotation">
                <span class="control-panel__label">"Rotation (°)"</span>
                <div class="control-panel__rotation-controls">
                    <button
                        class="control-panel__rotate control-panel__rotate--inc"
                        on:pointerdown=move |_| start_rotate(ROTATE_BUTTON_STEP_DEG)
                        on:pointerup=move |_| stop_rotate()
                        on:pointerleave=move |_| stop_rotate()
                        on:pointercancel=move |_| stop_rotate()
                    >
                        "+"
                    </button>
                    <NumberField label="" id="field-rotation" field=Field::Rotation on_submit=on_submit/>
                    <button
                        class="control-panel__rotate control-panel__rotate--dec"
                        on:pointerdown=move |_| start_rotate(-ROTATE_BUTTON_STEP_DEG)
                        on:pointerup=move |_| stop_rotate()
                        on:pointerleave=move |_| stop_rotate()
                        on:pointercancel=move |_| stop_rotate()
                    >
                        "-"
                    </button>
                </div>
            </div>

            <div class="control-panel__lifecycle">
                <button class="btn control-panel__generate" on:click=on_generate>
                    "Generate"
                </button>
                <button
                    class="btn control-panel__recolor"
                    disabled=move || !editor.with(EditorState::has_selection)
                    on:click=on_recolor
                >
                    "Recolor"
                </button>
                <button class="btn control-panel__delete" on:click=on_delete>
                    "Delete"
                </button>
            </div>

            {move || {
                editor
                    .with(|state| state.last_error.clone())
                    .map(|message| view! { <p class="control-panel__error">{message}</p> })
            }}
        </div>
    }
}

/// One numeric input bound to a committed field value.
#[component]
fn NumberField(label: &'static str, id: &'static str, field: Field, on_submit: Callback<()>) -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let committed = Memo::new(move |_| editor.with(|state| state.field(field)));
    let draft = RwSignal::new(format_field(committed.get_untracked()));

    // Mirror committed values (selection changes, rotate buttons) into the draft.
    Effect::new(move || draft.set(format_field(committed.get())));

    let commit = move || {
        let text = draft.get_untracked();
        let value = editor.try_update(|state| state.commit_field(field, &text)).unwrap_or(0.0);
        draft.set(format_field(value));
    };

    view! {
        <label class="control-panel__label" for=id>
            {label}
            <input
                id=id
                class="control-panel__input"
                type="number"
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
                on:focus=move |_| draft.set(String::new())
                on:blur=move |_| commit()
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        commit();
                        on_submit.run(());
                    }
                }
            />
        </label>
    }
}
