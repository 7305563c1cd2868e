//! Triangle tessellation for rectangles and disks

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::color::Rgba;
use crate::sim::Rect;

/// Two triangles covering `rect`
pub fn rect(rect: &Rect, color: Rgba) -> [Vertex; 6] {
    let tl = Vertex::new(rect.x, rect.y, color);
    let tr = Vertex::new(rect.right(), rect.y, color);
    let bl = Vertex::new(rect.x, rect.bottom(), color);
    let br = Vertex::new(rect.right(), rect.bottom(), color);

    [tl, bl, tr, tr, bl, br]
}

/// Triangle fan (as a list) approximating a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(
            center + radius * Vec2::new(theta1.cos(), theta1.sin()),
            color,
        ));
        vertices.push(Vertex::at(
            center + radius * Vec2::new(theta2.cos(), theta2.sin()),
            color,
        ));
    }

    vertices
}
