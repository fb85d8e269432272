//! Reactive application state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides one `RwSignal` per module; components read them with
//! `expect_context`.

pub mod editor;
pub mod ui;
