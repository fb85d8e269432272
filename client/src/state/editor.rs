//! Editor state: the Leptos-side projection of the canvas engine.
//!
//! SYSTEM CONTEXT
//! ==============
//! The engine owns the authoritative shape list. This module keeps a snapshot
//! of it for the control panel, holds the committed W/H/rotation field values,
//! and queues panel commands for the canvas host to run against the engine.
//!
//! DESIGN
//! ======
//! Commands flow one way (panel -> queue -> host -> engine) and results flow
//! back through [`EditorState::sync`]. The panel never mutates shapes itself.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use canvas::doc::{Shape, ShapeId, ShapeKind};
use canvas::engine::{Action, EngineCore, GenerateShape};
use canvas::error::ShapeError;
use canvas::geometry::normalize_degrees;

use crate::util::field::parse_field;

/// One of the three numeric inputs on the control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Width,
    Height,
    Rotation,
}

/// Committed numeric values behind the panel inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldValues {
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl FieldValues {
    fn from_shape(shape: &Shape) -> Self {
        Self { width: shape.width, height: shape.height, rotation: shape.rotation }
    }
}

/// A panel request waiting for the canvas host.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorCommand {
    Generate(GenerateShape),
    UpdateSelected { width: f64, height: f64, rotation: f64 },
    RotateSelected(f64),
    DeleteSelected,
    CycleColor,
}

impl EditorCommand {
    /// Run the command against the engine.
    ///
    /// # Errors
    ///
    /// Propagates the engine's [`ShapeError`].
    pub fn apply(self, core: &mut EngineCore) -> Result<Vec<Action>, ShapeError> {
        match self {
            Self::Generate(request) => core.generate(request),
            Self::UpdateSelected { width, height, rotation } => core.update_selected(width, height, rotation),
            Self::RotateSelected(delta) => core.rotate_selected(delta),
            Self::DeleteSelected => core.delete_selected(),
            Self::CycleColor => core.cycle_selected_color(),
        }
    }

    /// Whether a failure of this command is worth showing to the user.
    ///
    /// Rotate/delete/color with nothing selected are silent no-ops.
    pub fn reports_errors(&self) -> bool {
        matches!(self, Self::Generate(_) | Self::UpdateSelected { .. })
    }
}

/// Editor state shared through a `RwSignal<EditorState>` context.
#[derive(Clone, Debug, Default)]
pub struct EditorState {
    /// Snapshot of the engine's shapes in draw order.
    pub shapes: Vec<Shape>,
    pub selection: Option<ShapeId>,
    pub fields: FieldValues,
    /// Validation message from the last rejected generate/update.
    pub last_error: Option<String>,
    pending: Vec<EditorCommand>,
    command_seq: u64,
}

impl EditorState {
    pub fn selected_shape(&self) -> Option<&Shape> {
        let id = self.selection.as_ref()?;
        self.shapes.iter().find(|shape| &shape.id == id)
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    pub fn field(&self, field: Field) -> f64 {
        match field {
            Field::Width => self.fields.width,
            Field::Height => self.fields.height,
            Field::Rotation => self.fields.rotation,
        }
    }

    /// Commit the text of a field. Empty text is `0`; unparsable text keeps
    /// the previous value. Returns the value now held.
    pub fn commit_field(&mut self, field: Field, text: &str) -> f64 {
        let Some(value) = parse_field(text) else {
            return self.field(field);
        };
        match field {
            Field::Width => self.fields.width = value,
            Field::Height => self.fields.height = value,
            Field::Rotation => self.fields.rotation = value,
        }
        value
    }

    /// One press (or repeat tick) of a rotate button.
    ///
    /// Rotates the selected shape, or steps the rotation field when nothing
    /// is selected.
    pub fn rotate_step(&mut self, delta: f64) {
        if self.has_selection() {
            self.queue(EditorCommand::RotateSelected(delta));
        } else {
            self.fields.rotation = normalize_degrees(self.fields.rotation + delta);
        }
    }

    pub fn generate_command(&self, kind: ShapeKind) -> EditorCommand {
        EditorCommand::Generate(GenerateShape {
            kind,
            width: self.fields.width,
            height: self.fields.height,
            rotation: self.fields.rotation,
            color: None,
        })
    }

    /// What Enter in a field means: update the selection, or generate.
    pub fn submit_command(&self, kind: ShapeKind) -> EditorCommand {
        if self.has_selection() {
            let FieldValues { width, height, rotation } = self.fields;
            EditorCommand::UpdateSelected { width, height, rotation }
        } else {
            self.generate_command(kind)
        }
    }

    // =============================================================
    // Command queue
    // =============================================================

    pub fn queue(&mut self, command: EditorCommand) {
        self.pending.push(command);
        self.command_seq = self.command_seq.wrapping_add(1);
    }

    pub fn take_pending(&mut self) -> Vec<EditorCommand> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Bumped on every [`EditorState::queue`]; the host watches it.
    pub fn command_seq(&self) -> u64 {
        self.command_seq
    }

    /// Record the outcome of a command the host just ran.
    pub fn record_outcome(&mut self, command: &EditorCommand, outcome: Result<(), &ShapeError>) {
        match outcome {
            Ok(()) => {
                if command.reports_errors() {
                    self.last_error = None;
                }
            }
            Err(err) if command.reports_errors() => self.last_error = Some(err.to_string()),
            Err(_) => {}
        }
    }

    // =============================================================
    // Engine mirror
    // =============================================================

    /// Refresh the snapshot from the engine.
    ///
    /// A selected shape's geometry is mirrored into the fields. Clearing the
    /// selection resets the fields to zero; with no selection before or after,
    /// typed values are left alone.
    pub fn sync(&mut self, shapes: &[Shape], selection: Option<&ShapeId>) {
        let was_selected = self.selection.is_some();
        self.shapes = shapes.to_vec();
        self.selection = selection.cloned();

        if let Some(fields) = self.selected_shape().map(FieldValues::from_shape) {
            self.fields = fields;
        } else if was_selected {
            self.fields = FieldValues::default();
        }
    }
}

/// What the host has to do after processing a batch of engine actions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionSummary {
    pub render: bool,
    /// Shapes or selection changed; the snapshot must be refreshed.
    pub sync: bool,
    /// Last cursor requested in the batch.
    pub cursor: Option<String>,
}

impl ActionSummary {
    pub fn from_actions(actions: &[Action]) -> Self {
        let mut summary = Self::default();
        for action in actions {
            match action {
                Action::None => {}
                Action::ShapeCreated(_)
                | Action::ShapeUpdated { .. }
                | Action::ShapeDeleted { .. }
                | Action::SelectionChanged(_) => summary.sync = true,
                Action::SetCursor(cursor) => summary.cursor = Some(cursor.clone()),
                Action::RenderNeeded => summary.render = true,
            }
        }
        summary
    }
}
