//! Canvas input mapping and pointer helper utilities.

#[cfg(test)]
#[path = "canvas_input_test.rs"]
mod canvas_input_test;

use canvas::input::{Button as CanvasButton, Modifiers as CanvasModifiers};

#[cfg(feature = "hydrate")]
use canvas::camera::Point as CanvasPoint;

/// Map a DOM `PointerEvent.button` value to an engine button.
pub fn map_button(button: i16) -> CanvasButton {
    match button {
        1 => CanvasButton::Middle,
        2 => CanvasButton::Secondary,
        _ => CanvasButton::Primary,
    }
}

pub fn map_modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> CanvasModifiers {
    CanvasModifiers { shift, ctrl, alt, meta }
}

/// Keys the canvas consumes; the browser default is suppressed for them.
pub fn should_prevent_default_key(key: &str) -> bool {
    matches!(key, "Delete" | "Escape")
}

#[cfg(feature = "hydrate")]
pub fn pointer_point(ev: &leptos::ev::PointerEvent) -> CanvasPoint {
    CanvasPoint::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[cfg(feature = "hydrate")]
pub fn wheel_point(ev: &leptos::ev::WheelEvent) -> CanvasPoint {
    CanvasPoint::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

/// Whether the primary pointer is coarse (a finger rather than a mouse).
#[cfg(feature = "hydrate")]
pub fn is_touch_device() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let coarse = window
        .match_media("(pointer: coarse)")
        .ok()
        .flatten()
        .is_some_and(|mq| mq.matches());
    coarse || window.navigator().max_touch_points() > 0
}

/// CSS size of the canvas element and the window's device pixel ratio.
#[cfg(feature = "hydrate")]
pub fn viewport_of(canvas: &web_sys::HtmlCanvasElement) -> (f64, f64, f64) {
    let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
    (f64::from(canvas.client_width()), f64::from(canvas.client_height()), dpr)
}
