//! Rendering
//!
//! The simulation is drawn through the [`Renderer`] contract. [`ShapeBatch`]
//! turns those calls into triangles, and [`RenderState`] presents a batch
//! with WebGPU.

pub mod batch;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use batch::ShapeBatch;
pub use pipeline::RenderState;
pub use vertex::Vertex;

use glam::Vec2;

use crate::color::{Rgba, colors};
use crate::sim::{GameState, Rect};

/// Drawing surface for one frame
pub trait Renderer {
    /// Wipe the whole field
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: &Rect, color: Rgba);
    /// Filled disk of `radius` centered at `center`
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
}

/// Draw live bricks, then the paddle, then the ball
pub fn draw_frame<R: Renderer>(state: &GameState, renderer: &mut R) {
    renderer.clear();

    for brick in state.bricks.iter() {
        renderer.fill_rect(&brick.rect, brick.color.to_rgba());
    }

    renderer.fill_rect(&state.paddle.rect, colors::PADDLE);
    renderer.fill_circle(state.ball.pos, state.ball.radius, colors::BALL);
}
