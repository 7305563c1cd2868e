//! CPU-side frame batch
//!
//! Collects one frame's draw calls as a triangle list ready for upload.

use glam::Vec2;

use super::Renderer;
use super::shapes;
use super::vertex::Vertex;
use crate::color::{Rgba, colors};
use crate::sim::Rect;

/// Segments used to approximate the ball
pub const CIRCLE_SEGMENTS: u32 = 24;

/// A frame's worth of triangles plus its clear color
#[derive(Debug, Clone)]
pub struct ShapeBatch {
    pub clear_color: Rgba,
    vertices: Vec<Vertex>,
    circle_segments: u32,
}

impl Default for ShapeBatch {
    fn default() -> Self {
        Self::new(colors::BACKGROUND)
    }
}

impl ShapeBatch {
    pub fn new(clear_color: Rgba) -> Self {
        Self {
            clear_color,
            vertices: Vec::new(),
            circle_segments: CIRCLE_SEGMENTS,
        }
    }

    pub fn with_circle_segments(mut self, segments: u32) -> Self {
        self.circle_segments = segments;
        self
    }

    /// Triangle list in field space
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl Renderer for ShapeBatch {
    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn fill_rect(&mut self, rect: &Rect, color: Rgba) {
        self.vertices.extend_from_slice(&shapes::rect(rect, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.vertices
            .extend(shapes::circle(center, radius, color, self.circle_segments));
    }
}
