//! WebGPU rendering module
//!
//! Each frame is a flat list of colored triangles built from the game state.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, stage_to_ndc};
