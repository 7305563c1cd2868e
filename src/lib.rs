//! Hue Bricks - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, brick grid, ball physics, tick)
//! - `platform`: Input events from the host
//! - `renderer`: Renderer contract, CPU shape batching and WebGPU presentation
//! - `settings`: Data-driven layout and tuning

pub mod color;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::Error;
pub use platform::InputEvent;
pub use renderer::Renderer;
pub use settings::Settings;

use sim::{GameState, TickOutcome, tick};

/// Game configuration constants
pub mod consts {
    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Brick grid: 20 layout columns, outermost column on each side left empty
    pub const GRID_ROWS: usize = 18;
    pub const GRID_LAYOUT_COLUMNS: usize = 20;
    pub const GRID_MARGIN_COLUMNS: usize = 1;
    /// Empty brick rows above the grid
    pub const GRID_TOP_ROWS: f32 = 2.0;

    /// Ball defaults (speed is per tick, not per second)
    pub const BALL_RADIUS: f32 = 5.0;
    pub const BALL_START_SPEED: f32 = 4.0;
    pub const BALL_START_ANGLE: f32 = -45.0;
    /// Idle ball sits this far along the paddle's top edge
    pub const BALL_ANCHOR_FRACTION: f32 = 0.75;

    /// Paddle defaults
    pub const PADDLE_WIDTH_RATIO: f32 = 0.1;
    pub const PADDLE_ASPECT: f32 = 4.0;
    /// Deflection at the paddle's left edge (shallow, up and to the left)
    pub const PADDLE_MIN_ANGLE: f32 = -175.0;
    /// Deflection at the paddle's right edge (shallow, up and to the right)
    pub const PADDLE_MAX_ANGLE: f32 = -5.0;

    /// Brick palette
    pub const PALETTE_HUE_SPAN: f32 = 340.0;
    pub const PALETTE_SATURATION: f32 = 50.0;
    pub const PALETTE_LIGHTNESS_START: f32 = 30.0;
    pub const PALETTE_LIGHTNESS_STEP: f32 = 2.0;
}

/// One display frame: simulate a tick, then draw the result
pub fn run_frame<R: Renderer>(state: &mut GameState, renderer: &mut R) -> TickOutcome {
    let outcome = tick(state);
    renderer::draw_frame(state, renderer);
    outcome
}
