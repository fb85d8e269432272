//! Route-level page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages compose components into the screens the router mounts.

pub mod editor;
