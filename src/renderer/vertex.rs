//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

/// Fixed sprite colors; scenery colors come from the theme palette instead
pub mod colors {
    pub const SPANIEL_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Deep reddish brown, Blenheim patches
    pub const SPANIEL_BROWN: [f32; 4] = [0.847, 0.263, 0.082, 1.0];
    pub const SPANIEL_EAR: [f32; 4] = [0.749, 0.212, 0.047, 1.0];
    pub const INK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BONE: [f32; 4] = [1.0, 0.976, 0.769, 1.0];
    pub const PUDDLE: [f32; 4] = [0.310, 0.765, 0.969, 1.0];
    pub const SQUIRREL: [f32; 4] = [0.902, 0.318, 0.0, 1.0];
    pub const BUSH: [f32; 4] = [0.180, 0.490, 0.196, 1.0];
    pub const POOP: [f32; 4] = [0.365, 0.251, 0.216, 1.0];
    pub const STINK: [f32; 4] = [0.553, 0.431, 0.388, 1.0];
    pub const GOLDEN_DOG: [f32; 4] = [1.0, 0.702, 0.0, 1.0];
    pub const GOLDEN_EAR: [f32; 4] = [0.902, 0.318, 0.0, 1.0];
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
    pub const GROUND_STRIPE: [f32; 4] = [0.0, 0.0, 0.0, 0.05];
}
