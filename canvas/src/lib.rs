//! Canvas engine for the shape editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! shape list and everything that happens on the drawing surface: translating
//! raw pointer/keyboard input into shape mutations, hit-testing handles and
//! bodies, the resize/rotate arithmetic, and drawing the scene. The Leptos host
//! is responsible only for wiring DOM events to the engine and mirroring the
//! resulting [`engine::Action`]s into UI state.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Shape records and the ordered in-memory store |
//! | [`geometry`] | Corner resize, rotation wraparound, point-in-shape tests |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against shapes and selection handles |
//! | [`render`] | Scene rendering onto a 2D context |
//! | [`palette`] | Display color cycling |
//! | [`error`] | Validation and lookup errors |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod palette;
pub mod render;
