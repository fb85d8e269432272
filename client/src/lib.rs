//! # client
//!
//! Leptos + WASM frontend for the shape editor.
//!
//! This crate contains the page, components and application state. It drives
//! the `canvas` crate, which owns shapes, hit-testing and drawing, through the
//! `CanvasHost` bridge component.

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger unavailable: {err}").into());
    }
    leptos::mount::hydrate_body(app::App);
}
