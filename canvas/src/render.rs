//! Rendering: draws the full canvas scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of the shape store, camera and UI state and
//! produces pixels; it does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{Shape, ShapeKind, ShapeStore};
use crate::geometry;
use crate::hit;
use crate::input::UiState;

/// Selection dash segment length in screen pixels.
const SELECTION_DASH_PX: f64 = 4.0;

/// Colors that change with the light/dark theme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: &'static str,
    pub shape_fill: &'static str,
    pub shape_stroke: &'static str,
    pub accent: &'static str,
    pub handle_fill: &'static str,
}

impl Theme {
    #[must_use]
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                background: "#1E1E1E",
                shape_fill: "#B0B0B0",
                shape_stroke: "#E0E0E0",
                accent: "#4FA3FF",
                handle_fill: "#2A2A2A",
            }
        } else {
            Self {
                background: "#FFFFFF",
                shape_fill: "#555555",
                shape_stroke: "#222222",
                accent: "#1E90FF",
                handle_fill: "#FFFFFF",
            }
        }
    }
}

/// Draw the full scene: background, shapes in store order, then selection UI.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    store: &ShapeStore,
    camera: &Camera,
    ui: &UiState,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    let theme = Theme::for_mode(ui.dark_mode);

    // Layer 1: clear to the theme background in screen space.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    ctx.set_fill_style_str(theme.background);
    ctx.fill_rect(0.0, 0.0, viewport_w, viewport_h);

    // Layer 2: world transform, then shapes bottom first.
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;

    for shape in store.iter() {
        draw_shape(ctx, shape, &theme, camera.zoom)?;
    }

    // Layer 3: selection UI.
    if let Some(shape) = ui.selected_id.as_ref().and_then(|id| store.get(id)) {
        draw_selection(ctx, shape, camera, &theme)?;
    }

    Ok(())
}

// =============================================================
// Shapes
// =============================================================

fn draw_shape(ctx: &CanvasRenderingContext2d, shape: &Shape, theme: &Theme, zoom: f64) -> Result<(), JsValue> {
    if shape.width <= 0.0 || shape.height <= 0.0 {
        return Ok(());
    }
    ctx.save();
    translate_and_rotate(ctx, shape)?;

    let hw = shape.width / 2.0;
    let hh = shape.height / 2.0;

    ctx.begin_path();
    match shape.kind {
        ShapeKind::Rectangle => ctx.rect(-hw, -hh, shape.width, shape.height),
        ShapeKind::Circle => ctx.ellipse(0.0, 0.0, hw, hh, 0.0, 0.0, 2.0 * PI)?,
        ShapeKind::Triangle => {
            let [apex, right, left] = geometry::triangle_vertices(shape.width, shape.height);
            ctx.move_to(apex.x, apex.y);
            ctx.line_to(right.x, right.y);
            ctx.line_to(left.x, left.y);
            ctx.close_path();
        }
    }

    ctx.set_fill_style_str(shape.color.as_deref().unwrap_or(theme.shape_fill));
    ctx.fill();
    ctx.set_stroke_style_str(theme.shape_stroke);
    ctx.set_line_width(1.0 / zoom);
    ctx.stroke();

    ctx.restore();
    Ok(())
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(
    ctx: &CanvasRenderingContext2d,
    shape: &Shape,
    camera: &Camera,
    theme: &Theme,
) -> Result<(), JsValue> {
    let zoom = camera.zoom;

    // Dashed bounding box, rotated with the shape.
    ctx.save();
    translate_and_rotate(ctx, shape)?;
    let dash_world = SELECTION_DASH_PX / zoom;
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash_world.into());
    dash_array.push(&dash_world.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.set_stroke_style_str(theme.accent);
    ctx.set_line_width(1.0 / zoom);
    ctx.stroke_rect(-shape.width / 2.0, -shape.height / 2.0, shape.width, shape.height);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();

    // Handles are drawn in world coordinates at their rotated positions.
    let handle = HANDLE_RADIUS_PX / zoom;
    let rotate_handle = hit::rotate_handle_position(shape, camera);
    let top_mid = geometry::rotate_point(
        Point::new(shape.x + shape.width / 2.0, shape.y),
        shape.bounds().center(),
        shape.rotation,
    );

    ctx.save();
    ctx.set_fill_style_str(theme.handle_fill);
    ctx.set_stroke_style_str(theme.accent);
    ctx.set_line_width(1.0 / zoom);

    for (_, pos) in hit::corner_handle_positions(shape) {
        ctx.fill_rect(pos.x - handle, pos.y - handle, handle * 2.0, handle * 2.0);
        ctx.stroke_rect(pos.x - handle, pos.y - handle, handle * 2.0, handle * 2.0);
    }

    // Stem from the top edge to the rotate handle.
    ctx.begin_path();
    ctx.move_to(top_mid.x, top_mid.y);
    ctx.line_to(rotate_handle.x, rotate_handle.y);
    ctx.stroke();

    ctx.begin_path();
    ctx.arc(rotate_handle.x, rotate_handle.y, handle, 0.0, 2.0 * PI)?;
    ctx.fill();
    ctx.stroke();

    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Translate to the shape's center and rotate by its rotation angle.
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, shape: &Shape) -> Result<(), JsValue> {
    let center = shape.bounds().center();
    ctx.translate(center.x, center.y)?;
    ctx.rotate(shape.rotation.to_radians())?;
    Ok(())
}
