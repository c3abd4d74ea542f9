//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in canvas units (y down) with a straight-alpha color
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

/// Colors for game elements (sRGB)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.04, 1.0];
    pub const BACKGROUND_STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// #00ff88
    pub const PLAYER: [f32; 4] = [0.0, 1.0, 0.533, 1.0];
    pub const PLAYER_OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// #00aaff
    pub const ENGINE_GLOW: [f32; 4] = [0.0, 0.667, 1.0, 1.0];
    /// #333
    pub const METEOR_OUTLINE: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const METEOR_CRATER: [f32; 4] = [0.0, 0.0, 0.0, 0.3];
    /// #ffeb3b
    pub const STAR: [f32; 4] = [1.0, 0.922, 0.231, 1.0];
    pub const STAR_OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const STAR_SPARKLE: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
}
