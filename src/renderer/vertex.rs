//! Vertex type for flat-colored 2D triangles

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::color::Rgba;

/// 2D vertex with position and color
///
/// Positions are in field space until [`Vertex::to_ndc`] maps them for the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Rgba) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(p: Vec2, color: Rgba) -> Self {
        Self::new(p.x, p.y, color)
    }

    /// Map from field space (origin top-left, y down) to normalized device
    /// coordinates (origin center, y up)
    pub fn to_ndc(self, field: Vec2) -> Self {
        let [x, y] = self.position;
        Self::new(x / field.x * 2.0 - 1.0, 1.0 - y / field.y * 2.0, self.color)
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
