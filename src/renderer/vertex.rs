//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.05, 0.05, 0.09, 1.0];
    pub const GROUND: [f32; 4] = [0.22, 0.17, 0.12, 1.0];
    pub const PLAYER: [f32; 4] = [0.9, 0.15, 0.15, 1.0];
    pub const ENEMY: [f32; 4] = [0.2, 0.35, 0.95, 1.0];
    pub const ATTACK_BOX: [f32; 4] = [0.2, 0.9, 0.3, 0.55];
    pub const HIT_FLASH: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const DIM_OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.55];
    pub const LETTERBOX: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
