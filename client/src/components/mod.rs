//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the editor chrome and the canvas surface while
//! reading/writing shared state from Leptos context providers.

pub mod canvas_host;
pub mod control_panel;
pub mod theme_toggle;
