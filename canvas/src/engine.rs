//! Editor engine: shape operations, the gesture state machine, and the canvas wrapper.
//!
//! `EngineCore` holds everything that does not need a browser and is what the
//! tests drive. `Engine` adds the `HtmlCanvasElement` and rendering.
//!
//! Every mutating entry point returns a list of [`Action`]s for the host to
//! mirror into its own state. During a pointer gesture only `RenderNeeded` is
//! emitted; the final geometry is reported once, on release.

use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::consts::{MIN_SHAPE_SIZE, ROTATE_SNAP_DEG, SPAWN_X, SPAWN_Y, ZOOM_PER_WHEEL_PX};
use crate::doc::{PartialShape, Shape, ShapeId, ShapeIdAllocator, ShapeKind, ShapeStore};
use crate::error::ShapeError;
use crate::geometry::{self, Corner};
use crate::hit::{self, Hit, HitPart};
use crate::input::{Button, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::palette::Palette;
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    ShapeCreated(Shape),
    ShapeUpdated { id: ShapeId, fields: PartialShape },
    ShapeDeleted { id: ShapeId },
    SelectionChanged(Option<ShapeId>),
    SetCursor(String),
    RenderNeeded,
}

/// Parameters for a new shape. Position is always the spawn point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateShape {
    pub kind: ShapeKind,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    /// Explicit fill; the next palette color when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug)]
pub struct EngineCore {
    pub store: ShapeStore,
    pub ids: ShapeIdAllocator,
    pub palette: Palette,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            store: ShapeStore::new(),
            ids: ShapeIdAllocator::new(),
            palette: Palette::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =============================================================
    // Shape operations
    // =============================================================

    /// Create a shape at the spawn point.
    ///
    /// The new shape is not selected.
    ///
    /// # Errors
    ///
    /// [`ShapeError::InvalidDimensions`] if width or height is not a positive finite number.
    pub fn generate(&mut self, request: GenerateShape) -> Result<Vec<Action>, ShapeError> {
        validate_dimensions(request.width, request.height)?;

        let color = match request.color {
            Some(c) => c,
            None => self.palette.next_color().to_owned(),
        };
        let shape = Shape {
            id: self.ids.next_id(),
            kind: request.kind,
            x: SPAWN_X,
            y: SPAWN_Y,
            width: request.width,
            height: request.height,
            rotation: geometry::normalize_degrees(request.rotation),
            color: Some(color),
        };
        self.store.insert(shape.clone())?;
        log::debug!("generated {} {} ({} x {})", shape.kind.as_str(), shape.id, shape.width, shape.height);

        Ok(vec![Action::ShapeCreated(shape), Action::RenderNeeded])
    }

    /// Set width, height and rotation of the selected shape, keeping its position.
    ///
    /// # Errors
    ///
    /// [`ShapeError::NoSelection`] when nothing is selected, or
    /// [`ShapeError::InvalidDimensions`] for a non-positive or non-finite size.
    pub fn update_selected(&mut self, width: f64, height: f64, rotation: f64) -> Result<Vec<Action>, ShapeError> {
        let id = self.ui.selected_id.clone().ok_or(ShapeError::NoSelection)?;
        validate_dimensions(width, height)?;
        let fields = PartialShape {
            width: Some(width),
            height: Some(height),
            rotation: Some(geometry::normalize_degrees(rotation)),
            ..Default::default()
        };
        self.apply(&id, fields)
    }

    /// Place a shape's top-left corner at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`ShapeError::InvalidPosition`] if `x` or `y` is not finite, or
    /// [`ShapeError::NotFound`] if no shape has this id.
    pub fn move_shape(&mut self, id: &ShapeId, x: f64, y: f64) -> Result<Vec<Action>, ShapeError> {
        validate_position(x, y)?;
        let fields = PartialShape { x: Some(x), y: Some(y), ..Default::default() };
        self.apply(id, fields)
    }

    /// Drag `corner` of a shape by a world-space delta, honoring its rotation.
    ///
    /// # Errors
    ///
    /// [`ShapeError::NotFound`] if no shape has this id.
    pub fn resize_shape(&mut self, id: &ShapeId, corner: Corner, dx: f64, dy: f64) -> Result<Vec<Action>, ShapeError> {
        let shape = self.store.get(id).ok_or_else(|| ShapeError::NotFound(id.clone()))?;
        let bounds = geometry::resize_rotated(shape.bounds(), shape.rotation, corner, dx, dy, MIN_SHAPE_SIZE);
        self.apply(id, PartialShape::from_bounds(bounds))
    }

    /// Add `delta` degrees to a shape's rotation, wrapping into `[0, 360)`.
    ///
    /// # Errors
    ///
    /// [`ShapeError::NotFound`] if no shape has this id.
    pub fn rotate_shape(&mut self, id: &ShapeId, delta: f64) -> Result<Vec<Action>, ShapeError> {
        let shape = self.store.get(id).ok_or_else(|| ShapeError::NotFound(id.clone()))?;
        let rotation = geometry::rotate_by(shape.rotation, delta);
        self.apply(id, PartialShape { rotation: Some(rotation), ..Default::default() })
    }

    /// # Errors
    ///
    /// [`ShapeError::NoSelection`] when nothing is selected.
    pub fn rotate_selected(&mut self, delta: f64) -> Result<Vec<Action>, ShapeError> {
        let id = self.ui.selected_id.clone().ok_or(ShapeError::NoSelection)?;
        self.rotate_shape(&id, delta)
    }

    /// Remove a shape. Clears the selection and any gesture that referred to it.
    ///
    /// # Errors
    ///
    /// [`ShapeError::NotFound`] if no shape has this id.
    pub fn delete(&mut self, id: &ShapeId) -> Result<Vec<Action>, ShapeError> {
        if self.store.remove(id).is_none() {
            return Err(ShapeError::NotFound(id.clone()));
        }
        if self.input.target() == Some(id) {
            self.input = InputState::Idle;
        }

        let mut actions = vec![Action::ShapeDeleted { id: id.clone() }];
        if self.ui.selected_id.as_ref() == Some(id) {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        log::debug!("deleted {id}");
        Ok(actions)
    }

    /// # Errors
    ///
    /// [`ShapeError::NoSelection`] when nothing is selected.
    pub fn delete_selected(&mut self) -> Result<Vec<Action>, ShapeError> {
        let id = self.ui.selected_id.clone().ok_or(ShapeError::NoSelection)?;
        self.delete(&id)
    }

    /// Change the selection. Selecting the current selection is a no-op.
    ///
    /// # Errors
    ///
    /// [`ShapeError::NotFound`] when selecting an id that is not in the store.
    pub fn select(&mut self, id: Option<ShapeId>) -> Result<Vec<Action>, ShapeError> {
        if let Some(ref wanted) = id {
            if self.store.get(wanted).is_none() {
                return Err(ShapeError::NotFound(wanted.clone()));
            }
        }
        Ok(self.set_selection(id).into_iter().collect())
    }

    /// Give the selected shape the palette color after its current one.
    ///
    /// # Errors
    ///
    /// [`ShapeError::NoSelection`] when nothing is selected.
    pub fn cycle_selected_color(&mut self) -> Result<Vec<Action>, ShapeError> {
        let id = self.ui.selected_id.clone().ok_or(ShapeError::NoSelection)?;
        let shape = self.store.get(&id).ok_or_else(|| ShapeError::NotFound(id.clone()))?;
        let color = Palette::after(shape.color.as_deref()).to_owned();
        self.apply(&id, PartialShape { color: Some(color), ..Default::default() })
    }

    fn apply(&mut self, id: &ShapeId, fields: PartialShape) -> Result<Vec<Action>, ShapeError> {
        if !self.store.apply_partial(id, &fields) {
            return Err(ShapeError::NotFound(id.clone()));
        }
        Ok(vec![Action::ShapeUpdated { id: id.clone(), fields }, Action::RenderNeeded])
    }

    fn set_selection(&mut self, id: Option<ShapeId>) -> Option<Action> {
        if self.ui.selected_id == id {
            return None;
        }
        self.ui.selected_id.clone_from(&id);
        Some(Action::SelectionChanged(id))
    }

    // =============================================================
    // Presentation
    // =============================================================

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css.max(0.0);
        self.viewport_height = height_css.max(0.0);
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    }

    pub fn set_dark_mode(&mut self, dark: bool) -> Vec<Action> {
        if self.ui.dark_mode == dark {
            return Vec::new();
        }
        self.ui.dark_mode = dark;
        vec![Action::RenderNeeded]
    }

    /// Touch devices get wider handle hit areas.
    pub fn set_coarse_pointer(&mut self, coarse: bool) {
        self.ui.coarse_pointer = coarse;
    }

    // =============================================================
    // Pointer and keyboard input
    // =============================================================

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        match button {
            Button::Middle => {
                self.input = InputState::Panning { last_screen: screen_pt };
                vec![Action::SetCursor("grabbing".into())]
            }
            Button::Secondary => Vec::new(),
            Button::Primary => self.begin_primary(screen_pt),
        }
    }

    fn begin_primary(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        let mut actions = Vec::new();

        let Some(Hit { shape_id, part }) = self.hit_at(world) else {
            actions.extend(self.set_selection(None));
            actions.push(Action::RenderNeeded);
            return actions;
        };
        let Some(shape) = self.store.get(&shape_id) else {
            return actions;
        };

        let (state, cursor) = match part {
            HitPart::ResizeHandle(corner) => (
                InputState::ResizingShape {
                    id: shape_id.clone(),
                    corner,
                    start_world: world,
                    orig: shape.bounds(),
                    rotation: shape.rotation,
                },
                corner.cursor(),
            ),
            HitPart::RotateHandle => {
                let center = shape.bounds().center();
                (
                    InputState::RotatingShape {
                        id: shape_id.clone(),
                        center,
                        start_angle: geometry::pointer_angle(center, world),
                        orig_rotation: shape.rotation,
                    },
                    "grabbing",
                )
            }
            HitPart::Body => (
                InputState::DraggingShape {
                    id: shape_id.clone(),
                    last_world: world,
                    orig_x: shape.x,
                    orig_y: shape.y,
                },
                "move",
            ),
        };

        self.input = state;
        actions.extend(self.set_selection(Some(shape_id)));
        actions.push(Action::SetCursor(cursor.into()));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);

        match &mut self.input {
            InputState::Idle => vec![Action::SetCursor(self.hover_cursor(world).into())],
            InputState::Panning { last_screen } => {
                let (dx, dy) = screen_pt.delta_from(*last_screen);
                *last_screen = screen_pt;
                self.camera.pan_by(dx, dy);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingShape { id, last_world, .. } => {
                let (dx, dy) = world.delta_from(*last_world);
                *last_world = world;
                if let Some(shape) = self.store.get_mut(id) {
                    shape.x += dx;
                    shape.y += dy;
                }
                vec![Action::RenderNeeded]
            }
            InputState::ResizingShape { id, corner, start_world, orig, rotation } => {
                let (dx, dy) = world.delta_from(*start_world);
                let bounds = geometry::resize_rotated(*orig, *rotation, *corner, dx, dy, MIN_SHAPE_SIZE);
                if let Some(shape) = self.store.get_mut(id) {
                    shape.set_bounds(bounds);
                }
                vec![Action::RenderNeeded]
            }
            InputState::RotatingShape { id, center, start_angle, orig_rotation } => {
                let now = geometry::pointer_angle(*center, world);
                let mut rotation = geometry::rotate_by(*orig_rotation, geometry::signed_angle_delta(now, *start_angle));
                if modifiers.shift {
                    rotation = geometry::snap_degrees(rotation, ROTATE_SNAP_DEG);
                }
                if let Some(shape) = self.store.get_mut(id) {
                    shape.rotation = rotation;
                }
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = self.finish_gesture();
        let world = self.camera.screen_to_world(screen_pt);
        actions.push(Action::SetCursor(self.hover_cursor(world).into()));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// The pointer left the canvas: commit whatever gesture was in progress.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let mut actions = self.finish_gesture();
        actions.push(Action::SetCursor("default".into()));
        actions
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() {
            let factor = (-delta.dy * ZOOM_PER_WHEEL_PX).exp();
            self.camera.zoom_about(screen_pt, factor);
        } else {
            self.camera.pan_by(-delta.dx, -delta.dy);
        }
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_escape() {
            if matches!(self.input, InputState::Idle) {
                let mut actions: Vec<Action> = self.set_selection(None).into_iter().collect();
                if !actions.is_empty() {
                    actions.push(Action::RenderNeeded);
                }
                return actions;
            }
            return self.cancel_gesture();
        }

        if key.is_delete() && self.ui.selected_id.is_some() {
            self.input = InputState::Idle;
            return match self.delete_selected() {
                Ok(actions) => actions,
                Err(e) => {
                    log::warn!("delete key ignored: {e}");
                    Vec::new()
                }
            };
        }

        Vec::new()
    }

    /// End the active gesture, reporting the final geometry if it changed.
    fn finish_gesture(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        let Some(id) = state.target().cloned() else {
            return Vec::new();
        };
        let Some(shape) = self.store.get(&id) else {
            return Vec::new();
        };

        let fields = match state {
            InputState::DraggingShape { orig_x, orig_y, .. } if shape.x != orig_x || shape.y != orig_y => {
                PartialShape { x: Some(shape.x), y: Some(shape.y), ..Default::default() }
            }
            InputState::ResizingShape { orig, .. } if shape.bounds() != orig => PartialShape::from_bounds(shape.bounds()),
            InputState::RotatingShape { orig_rotation, .. } if shape.rotation != orig_rotation => {
                PartialShape { rotation: Some(shape.rotation), ..Default::default() }
            }
            _ => return Vec::new(),
        };
        vec![Action::ShapeUpdated { id, fields }]
    }

    /// Abandon the active gesture and put the shape back where it started.
    fn cancel_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle | InputState::Panning { .. } => {}
            InputState::DraggingShape { id, orig_x, orig_y, .. } => {
                if let Some(shape) = self.store.get_mut(&id) {
                    shape.x = orig_x;
                    shape.y = orig_y;
                }
            }
            InputState::ResizingShape { id, orig, .. } => {
                if let Some(shape) = self.store.get_mut(&id) {
                    shape.set_bounds(orig);
                }
            }
            InputState::RotatingShape { id, orig_rotation, .. } => {
                if let Some(shape) = self.store.get_mut(&id) {
                    shape.rotation = orig_rotation;
                }
            }
        }
        vec![Action::SetCursor("default".into()), Action::RenderNeeded]
    }

    fn hit_at(&self, world: Point) -> Option<Hit> {
        hit::hit_test(world, &self.store, &self.camera, self.ui.selected_id.as_ref(), self.ui.coarse_pointer)
    }

    fn hover_cursor(&self, world: Point) -> &'static str {
        match self.hit_at(world).map(|h| h.part) {
            Some(HitPart::ResizeHandle(corner)) => corner.cursor(),
            Some(HitPart::RotateHandle) => "grab",
            Some(HitPart::Body) => "move",
            None => "default",
        }
    }

    // =============================================================
    // Queries
    // =============================================================

    #[must_use]
    pub fn selection(&self) -> Option<&ShapeId> {
        self.ui.selected_id.as_ref()
    }

    #[must_use]
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.ui.selected_id.as_ref().and_then(|id| self.store.get(id))
    }

    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.store.get(id)
    }

    /// All shapes in draw order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        self.store.shapes()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }
}

fn validate_dimensions(width: f64, height: f64) -> Result<(), ShapeError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        log::warn!("rejected dimensions {width} x {height}");
        Err(ShapeError::InvalidDimensions { width, height })
    }
}

fn validate_position(x: f64, y: f64) -> Result<(), ShapeError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        log::warn!("rejected position ({x}, {y})");
        Err(ShapeError::InvalidPosition { x, y })
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Presentation ---

    pub fn set_dark_mode(&mut self, dark: bool) -> Vec<Action> {
        self.core.set_dark_mode(dark)
    }

    pub fn set_coarse_pointer(&mut self, coarse: bool) {
        self.core.set_coarse_pointer(coarse);
    }

    // --- Viewport ---

    /// Update viewport dimensions and size the backing store to match the device pixel ratio.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((self.core.viewport_width * self.core.dpr).round() as u32);
        self.canvas.set_height((self.core.viewport_height * self.core.dpr).round() as u32);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Err(JsValue::from_str("2d context unavailable"));
        };
        let ctx: CanvasRenderingContext2d = ctx.dyn_into()?;
        render::draw(
            &ctx,
            &self.core.store,
            &self.core.camera,
            &self.core.ui,
            self.core.viewport_width,
            self.core.viewport_height,
            self.core.dpr,
        )
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&ShapeId> {
        self.core.selection()
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        self.core.shapes()
    }
}
