//! Bridge component between Leptos state and the imperative `canvas::Engine`.
//!
//! ARCHITECTURE
//! ============
//! The canvas crate owns geometry, hit-testing and drawing. This host feeds it
//! DOM events, runs the commands the control panel queues, and mirrors the
//! resulting shape list and selection back into [`EditorState`].

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

use leptos::prelude::*;

use crate::state::editor::EditorState;
use crate::state::ui::UiState;

#[cfg(feature = "hydrate")]
use canvas::engine::{Action, Engine};
#[cfg(feature = "hydrate")]
use canvas::input::{Key as CanvasKey, WheelDelta};
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, closure::Closure};

#[cfg(feature = "hydrate")]
use crate::state::editor::ActionSummary;
#[cfg(feature = "hydrate")]
use crate::util::canvas_input::{
    is_touch_device, map_button, map_modifiers, pointer_point, should_prevent_default_key, viewport_of, wheel_point,
};

#[cfg(feature = "hydrate")]
type EngineCell = Rc<RefCell<Option<Engine>>>;

#[cfg(feature = "hydrate")]
fn render_now(engine: &Engine) {
    if let Err(err) = engine.render() {
        log::error!("canvas render failed: {err:?}");
    }
}

/// Schedule one render on the next animation frame. Repeated requests before
/// the frame fires collapse into one.
#[cfg(feature = "hydrate")]
fn request_render(engine: &EngineCell, raf_pending: RwSignal<bool>) {
    if raf_pending.get_untracked() {
        return;
    }
    raf_pending.set(true);

    let Some(window) = web_sys::window() else {
        raf_pending.set(false);
        if let Some(engine) = engine.borrow().as_ref() {
            render_now(engine);
        }
        return;
    };

    let engine_for_cb = Rc::clone(engine);
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        raf_pending.set(false);
        if let Some(engine) = engine_for_cb.borrow().as_ref() {
            render_now(engine);
        }
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    if window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .is_ok()
    {
        *holder.borrow_mut() = Some(cb);
    } else {
        raf_pending.set(false);
        if let Some(engine) = engine.borrow().as_ref() {
            render_now(engine);
        }
    }
}

#[cfg(feature = "hydrate")]
fn sync_viewport(engine: &mut Engine, canvas_ref: &NodeRef<leptos::html::Canvas>) {
    if let Some(canvas) = canvas_ref.get_untracked() {
        let (width, height, dpr) = viewport_of(&canvas);
        engine.set_viewport(width, height, dpr);
    }
}

#[cfg(feature = "hydrate")]
fn set_cursor(canvas_ref: &NodeRef<leptos::html::Canvas>, cursor: &str) {
    if let Some(canvas) = canvas_ref.get_untracked() {
        if let Err(err) = canvas.style().set_property("cursor", cursor) {
            log::warn!("could not set cursor {cursor}: {err:?}");
        }
    }
}

/// Apply the side effects of an engine batch. Returns whether a render is due.
#[cfg(feature = "hydrate")]
fn process_actions(
    actions: &[Action],
    engine: &Engine,
    editor: RwSignal<EditorState>,
    canvas_ref: &NodeRef<leptos::html::Canvas>,
) -> bool {
    let summary = ActionSummary::from_actions(actions);
    if summary.sync {
        editor.update(|state| state.sync(engine.shapes(), engine.selection()));
    }
    if let Some(cursor) = summary.cursor.as_deref() {
        set_cursor(canvas_ref, cursor);
    }
    summary.render
}

/// Run every queued panel command against the engine.
#[cfg(feature = "hydrate")]
fn drain_commands(
    engine: &mut Engine,
    editor: RwSignal<EditorState>,
    canvas_ref: &NodeRef<leptos::html::Canvas>,
) -> bool {
    let commands = editor.try_update(EditorState::take_pending).unwrap_or_default();
    let mut render = false;
    for command in commands {
        let outcome = command.clone().apply(&mut engine.core);
        match &outcome {
            Ok(actions) => render |= process_actions(actions, engine, editor, canvas_ref),
            Err(err) => log::warn!("{command:?} rejected: {err}"),
        }
        editor.update(|state| state.record_outcome(&command, outcome.as_ref().map(|_| ())));
    }
    render
}

/// Canvas host component.
///
/// On hydration, this mounts `canvas::engine::Engine` on the `<canvas>`
/// element and keeps it in step with the theme, the window size and the
/// control panel's command queue.
#[component]
pub fn CanvasHost() -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    #[cfg(feature = "hydrate")]
    let render_raf_pending = RwSignal::new(false);
    #[cfg(feature = "hydrate")]
    let engine: EngineCell = Rc::new(RefCell::new(None::<Engine>));

    // Mount.
    #[cfg(feature = "hydrate")]
    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if engine.borrow().is_some() {
                return;
            }

            let coarse = is_touch_device();
            let mut instance = Engine::new(canvas);
            sync_viewport(&mut instance, &canvas_ref);
            instance.set_coarse_pointer(coarse);
            instance.set_dark_mode(ui.get_untracked().dark_mode);
            ui.update(|u| u.coarse_pointer = coarse);
            drain_commands(&mut instance, editor, &canvas_ref);
            editor.update(|state| state.sync(instance.shapes(), instance.selection()));
            render_now(&instance);
            log::info!("canvas engine mounted (coarse pointer: {coarse})");
            *engine.borrow_mut() = Some(instance);
        });
    }

    // Theme.
    #[cfg(feature = "hydrate")]
    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            let dark = ui.with(|u| u.dark_mode);
            let render = engine
                .borrow_mut()
                .as_mut()
                .is_some_and(|engine| ActionSummary::from_actions(&engine.set_dark_mode(dark)).render);
            if render {
                request_render(&engine, render_raf_pending);
            }
        });
    }

    // Panel commands.
    #[cfg(feature = "hydrate")]
    {
        let engine = Rc::clone(&engine);
        let command_seq = Memo::new(move |_| editor.with(EditorState::command_seq));
        Effect::new(move || {
            command_seq.track();
            let render = engine
                .borrow_mut()
                .as_mut()
                .is_some_and(|engine| drain_commands(engine, editor, &canvas_ref));
            if render {
                request_render(&engine, render_raf_pending);
            }
        });
    }

    // Window resize.
    #[cfg(feature = "hydrate")]
    {
        let engine = Rc::clone(&engine);
        let resize = window_event_listener(leptos::ev::resize, move |_| {
            let resized = engine.borrow_mut().as_mut().is_some_and(|engine| {
                sync_viewport(engine, &canvas_ref);
                true
            });
            if resized {
                request_render(&engine, render_raf_pending);
            }
        });
        on_cleanup(move || resize.remove());
    }

    let on_pointer_down = {
        #[cfg(feature = "hydrate")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                ev.prevent_default();
                if let Some(canvas) = canvas_ref.get_untracked() {
                    if let Err(err) = canvas.focus() {
                        log::debug!("canvas focus failed: {err:?}");
                    }
                    if let Err(err) = canvas.set_pointer_capture(ev.pointer_id()) {
                        log::debug!("pointer capture failed: {err:?}");
                    }
                }
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    sync_viewport(engine, &canvas_ref);
                    let button = map_button(ev.button());
                    let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                    let actions = engine.on_pointer_down(pointer_point(&ev), button, modifiers);
                    if process_actions(&actions, engine, editor, &canvas_ref) {
                        render_now(engine);
                    }
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "hydrate")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                    let actions = engine.on_pointer_move(pointer_point(&ev), modifiers);
                    if process_actions(&actions, engine, editor, &canvas_ref) {
                        render_now(engine);
                    }
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "hydrate")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                if let Some(canvas) = canvas_ref.get_untracked() {
                    if canvas.has_pointer_capture(ev.pointer_id()) {
                        if let Err(err) = canvas.release_pointer_capture(ev.pointer_id()) {
                            log::debug!("pointer release failed: {err:?}");
                        }
                    }
                }
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let button = map_button(ev.button());
                    let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                    let actions = engine.on_pointer_up(pointer_point(&ev), button, modifiers);
                    if process_actions(&actions, engine, editor, &canvas_ref) {
                        render_now(engine);
                    }
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_leave = {
        #[cfg(feature = "hydrate")]
        {
            let engine = Rc::clone(&engine);
            move |_ev: leptos::ev::PointerEvent| {
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let actions = engine.on_pointer_leave();
                    if process_actions(&actions, engine, editor, &canvas_ref) {
                        render_now(engine);
                    }
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_wheel = {
        #[cfg(feature = "hydrate")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::WheelEvent| {
                ev.prevent_default();
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
                    let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                    let actions = engine.on_wheel(wheel_point(&ev), delta, modifiers);
                    if process_actions(&actions, engine, editor, &canvas_ref) {
                        render_now(engine);
                    }
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::WheelEvent| {}
        }
    };

    let on_key_down = {
        #[cfg(feature = "hydrate")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::KeyboardEvent| {
                let key = ev.key();
                if should_prevent_default_key(&key) {
                    ev.prevent_default();
                }
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                    let actions = engine.on_key_down(CanvasKey(key), modifiers);
                    if process_actions(&actions, engine, editor, &canvas_ref) {
                        render_now(engine);
                    }
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::KeyboardEvent| {}
        }
    };

    #[cfg(not(feature = "hydrate"))]
    let _ = (editor, ui);

    view! {
        <canvas
            class="canvas-host"
            node_ref=canvas_ref
            tabindex="0"
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointerleave=on_pointer_leave
            on:wheel=on_wheel
            on:keydown=on_key_down
            on:contextmenu=move |ev: leptos::ev::MouseEvent| ev.prevent_default()
        >
            "Your browser does not support canvas."
        </canvas>
    }
}
