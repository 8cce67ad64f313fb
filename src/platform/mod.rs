//! Platform abstraction layer
//!
//! Turns raw browser key names into deterministic tick input. Kept free of
//! `web_sys` so it runs under native tests.

pub mod input;

pub use input::{Binding, Command, KeyboardState, UiCommand, binding_for};
