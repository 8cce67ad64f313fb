//! Axis-aligned rectangle geometry
//!
//! Everything on the stage is a rectangle: fighter bodies, attack boxes and
//! the stage itself. Coordinates follow the canvas (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::STAGE_WIDTH;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn from_pos_size(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }
}

/// Whether two boxes share a region of positive area.
///
/// Boxes that only touch along an edge do not overlap.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && b.min.x < a_max.x && a.min.y < b_max.y && b.min.y < a_max.y
}

/// X position that keeps `body` inside the stage horizontally
pub fn clamp_to_stage(body: &Aabb) -> f32 {
    body.min.x.clamp(0.0, (STAGE_WIDTH - body.size.x).max(0.0))
}
