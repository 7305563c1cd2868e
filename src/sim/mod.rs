//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no time scaling
//! - Stable iteration order (row by row, left to right)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::{
    Axis, BrickFace, brick_collision, classify_brick_hit, paddle_collision, reflect_angle,
};
pub use geometry::{Rect, point_in_rect};
pub use grid::{Brick, BrickGrid, GridLayout};
pub use state::{Ball, BallState, GameState, Paddle};
pub use tick::{RemovalPolicy, TickOutcome, tick};
