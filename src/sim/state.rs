//! Game state and core simulation types
//!
//! Everything the game loop and input handlers mutate lives in [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Axis, reflect_angle};
use super::geometry::Rect;
use super::grid::BrickGrid;
use super::tick::RemovalPolicy;
use crate::consts::*;
use crate::settings::Settings;

/// Ball state - riding the paddle or in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Pinned to the paddle anchor, waiting for launch
    Idle,
    /// In flight; never returns to Idle without an explicit reset
    Launched,
}

/// The ball
///
/// Velocity is derived from `speed` and `angle_deg` and is only ever
/// recomputed through [`Ball::adjust_angle`], so the two can't drift apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    state: BallState,
    speed: f32,
    /// Direction in degrees, 0° = +x, screen y grows downward
    angle_deg: f32,
    /// Per-tick displacement
    vel: Vec2,
    /// Speed and angle restored by [`Ball::reset`]
    serve_speed: f32,
    serve_angle_deg: f32,
    /// Paddle deflection range (left edge, right edge)
    min_angle: f32,
    max_angle: f32,
}

impl Ball {
    pub fn new(radius: f32, serve_speed: f32, serve_angle_deg: f32) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            radius,
            state: BallState::Idle,
            speed: serve_speed,
            angle_deg: serve_angle_deg,
            vel: Vec2::ZERO,
            serve_speed,
            serve_angle_deg,
            min_angle: PADDLE_MIN_ANGLE,
            max_angle: PADDLE_MAX_ANGLE,
        };
        ball.adjust_angle();
        ball
    }

    /// Override the paddle deflection range
    pub fn with_deflection(mut self, min_angle: f32, max_angle: f32) -> Self {
        self.min_angle = min_angle;
        self.max_angle = max_angle;
        self
    }

    pub fn state(&self) -> BallState {
        self.state
    }

    pub fn is_moving(&self) -> bool {
        self.state == BallState::Launched
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    /// Per-tick displacement
    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn deflection_range(&self) -> (f32, f32) {
        (self.min_angle, self.max_angle)
    }

    pub fn set_angle_deg(&mut self, angle_deg: f32) {
        self.angle_deg = angle_deg;
        self.adjust_angle();
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.adjust_angle();
    }

    /// Reflect the direction across `axis`
    pub fn reflect(&mut self, axis: Axis) {
        self.set_angle_deg(reflect_angle(self.angle_deg, axis));
    }

    /// Recompute velocity from speed and angle
    pub fn adjust_angle(&mut self) {
        let angle_rad = self.angle_deg.to_radians();
        self.vel = Vec2::new(angle_rad.cos(), angle_rad.sin()) * self.speed;
    }

    /// Back to the paddle anchor with serve speed and angle, not moving
    pub fn reset(&mut self, paddle: &Paddle) {
        self.pos = paddle.anchor();
        self.speed = self.serve_speed;
        self.angle_deg = self.serve_angle_deg;
        self.state = BallState::Idle;
        self.adjust_angle();
        log::info!("Ball reset to {:?}", self.pos);
    }

    /// Idle → Launched; a no-op once launched
    ///
    /// Returns true only on the transition.
    pub fn launch(&mut self) -> bool {
        if self.state == BallState::Launched {
            return false;
        }
        self.state = BallState::Launched;
        self.adjust_angle();
        log::info!("Ball launched at {:.1}°", self.angle_deg);
        true
    }

    /// Advance one tick
    ///
    /// In flight: move, then reflect off at most one field boundary (x takes
    /// precedence). Idle: snap back to the paddle anchor. Returns the axis
    /// reflected, if any.
    pub fn update(&mut self, paddle: &Paddle, field: Vec2) -> Option<Axis> {
        if self.state == BallState::Idle {
            self.pos = paddle.anchor();
            return None;
        }

        self.pos += self.vel;

        let axis = if self.pos.x > field.x || self.pos.x < 0.0 {
            Some(Axis::X)
        } else if self.pos.y > field.y || self.pos.y < 0.0 {
            Some(Axis::Y)
        } else {
            None
        };

        if let Some(axis) = axis {
            self.reflect(axis);
            log::trace!("Wall bounce on {:?} at {:?}", axis, self.pos);
        }
        axis
    }
}

/// The player's paddle
///
/// Only `rect.x` changes after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Where an idle ball sits: three quarters along the top edge
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.rect.x + self.rect.w * BALL_ANCHOR_FRACTION, self.rect.y)
    }

    /// Follow a pointer at `input_x` on a field whose left edge is `field_left`
    pub fn move_to(&mut self, input_x: f32, field_left: f32) {
        self.rect.x = input_x - field_left;
    }

    /// Keep the paddle fully on a field of width `field_width`
    pub fn clamp_to(&mut self, field_width: f32) {
        self.rect.x = self.rect.x.clamp(0.0, (field_width - self.rect.w).max(0.0));
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Field size (width, height)
    pub field: Vec2,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    /// How the loop continues after removing a brick mid-row
    pub removal: RemovalPolicy,
    /// Keep the paddle inside the field on pointer moves
    pub clamp_paddle: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Whether the cleared grid has already been reported
    #[serde(default)]
    pub(crate) cleared_logged: bool,
}

impl GameState {
    /// Build the starting layout; `settings` must already be validated
    pub fn new(settings: &Settings) -> Self {
        let paddle = Paddle::new(settings.paddle_rect());
        let mut ball = Ball::new(
            settings.ball_radius,
            settings.ball_speed,
            settings.ball_angle_deg,
        )
        .with_deflection(settings.paddle_min_angle, settings.paddle_max_angle);
        ball.reset(&paddle);

        let bricks = BrickGrid::build(&settings.grid_layout(), &settings.palette());
        log::info!(
            "Game initialized: {}x{} field, {} bricks",
            settings.field_width,
            settings.field_height,
            bricks.live_count()
        );

        Self {
            field: Vec2::new(settings.field_width, settings.field_height),
            paddle,
            ball,
            bricks,
            removal: settings.removal,
            clamp_paddle: settings.clamp_paddle,
            time_ticks: 0,
            cleared_logged: false,
        }
    }

    /// Put the ball back on the paddle
    pub fn reset_ball(&mut self) {
        self.ball.reset(&self.paddle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paddle() -> Paddle {
        Paddle::new(Rect::new(360.0, 560.0, 80.0, 20.0))
    }

    const FIELD: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_reset_then_launch_velocity() {
        let paddle = paddle();
        let mut ball = Ball::new(5.0, 4.0, -45.0);
        ball.set_angle_deg(120.0);
        ball.reset(&paddle);
        assert!(!ball.is_moving());
        assert_eq!(ball.pos, Vec2::new(420.0, 560.0));

        assert!(ball.launch());
        assert!((ball.velocity().x - 2.828).abs() < 1e-3);
        assert!((ball.velocity().y + 2.828).abs() < 1e-3);

        let start = ball.pos;
        assert_eq!(ball.update(&paddle, FIELD), None);
        assert!((ball.pos.x - (start.x + 2.828)).abs() < 1e-3);
        assert!((ball.pos.y - (start.y - 2.828)).abs() < 1e-3);
    }

    #[test]
    fn test_launch_is_idempotent() {
        let mut ball = Ball::new(5.0, 4.0, -45.0);
        assert!(ball.launch());
        let vel = ball.velocity();
        let angle = ball.angle_deg();

        assert!(!ball.launch());
        assert!(ball.is_moving());
        assert_eq!(ball.velocity(), vel);
        assert_eq!(ball.angle_deg(), angle);
    }

    #[test]
    fn test_idle_ball_rides_paddle() {
        let mut paddle = paddle();
        let mut ball = Ball::new(5.0, 4.0, -45.0);
        ball.reset(&paddle);

        paddle.move_to(150.0, 10.0);
        assert_eq!(ball.update(&paddle, FIELD), None);
        assert_eq!(ball.pos, Vec2::new(140.0 + 60.0, 560.0));
        assert_eq!(ball.state(), BallState::Idle);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let paddle = paddle();
        let mut ball = Ball::new(5.0, 4.0, -45.0);
        ball.launch();
        ball.set_speed(9.0);
        ball.update(&paddle, FIELD);

        ball.reset(&paddle);
        assert_eq!(ball.state(), BallState::Idle);
        assert_eq!(ball.speed(), 4.0);
        assert_eq!(ball.angle_deg(), -45.0);
        assert_eq!(ball.pos, paddle.anchor());
    }

    #[test]
    fn test_right_wall_reflects_x() {
        let paddle = paddle();
        let mut ball = Ball::new(5.0, 4.0, -45.0);
        ball.launch();
        ball.pos = Vec2::new(799.0, 300.0);

        assert_eq!(ball.update(&paddle, FIELD), Some(Axis::X));
        assert!((ball.angle_deg() - 225.0).abs() < 1e-4);
        assert!(ball.velocity().x < 0.0);
        assert!(ball.velocity().y < 0.0);
    }

    #[test]
    fn test_top_wall_reflects_y() {
        let paddle = paddle();
        let mut ball = Ball::new(5.0, 4.0, -45.0);
        ball.launch();
        ball.pos = Vec2::new(400.0, 1.0);

        assert_eq!(ball.update(&paddle, FIELD), Some(Axis::Y));
        assert!((ball.angle_deg() - 405.0).abs() < 1e-4);
        assert!(ball.velocity().x > 0.0);
        assert!(ball.velocity().y > 0.0);
    }

    #[test]
    fn test_left_wall_reflects_x() {
        let paddle = paddle();
        let mut ball = Ball::new(5.0, 4.0, 225.0);
        ball.launch();
        ball.pos = Vec2::new(1.0, 300.0);

        assert_eq!(ball.update(&paddle, FIELD), Some(Axis::X));
        assert!((ball.angle_deg() - (-45.0)).abs() < 1e-4);
        assert!(ball.velocity().x > 0.0);
        assert!(ball.velocity().y < 0.0);
    }

    #[test]
    fn test_bottom_wall_reflects_y() {
        let paddle = paddle();
        let mut ball = Ball::new(5.0, 4.0, 45.0);
        ball.launch();
        ball.pos = Vec2::new(400.0, 599.0);

        assert_eq!(ball.update(&paddle, FIELD), Some(Axis::Y));
        assert!((ball.angle_deg() - 315.0).abs() < 1e-4);
        assert!(ball.velocity().x > 0.0);
        assert!(ball.velocity().y < 0.0);
    }

    #[test]
    fn test_corner_reflects_only_x() {
        let paddle = paddle();
        let mut ball = Ball::new(5.0, 4.0, -45.0);
        ball.launch();
        ball.pos = Vec2::new(799.0, 1.0);

        // Both bounds are crossed, only x reflects this tick
        assert_eq!(ball.update(&paddle, FIELD), Some(Axis::X));
        assert!(ball.velocity().y < 0.0);
    }

    #[test]
    fn test_paddle_move_unclamped_and_clamped() {
        let mut paddle = paddle();
        paddle.move_to(-50.0, 8.0);
        assert_eq!(paddle.rect.x, -58.0);
        assert_eq!(paddle.rect.y, 560.0);

        paddle.clamp_to(800.0);
        assert_eq!(paddle.rect.x, 0.0);

        paddle.move_to(2000.0, 0.0);
        paddle.clamp_to(800.0);
        assert_eq!(paddle.rect.x, 720.0);
    }

    #[test]
    fn test_game_state_defaults() {
        let state = GameState::new(&Settings::default());
        assert_eq!(state.field, Vec2::new(800.0, 600.0));
        assert_eq!(state.bricks.live_count(), 324);
        assert_eq!(state.paddle.rect, Rect::new(360.0, 560.0, 80.0, 20.0));
        assert_eq!(state.ball.pos, Vec2::new(420.0, 560.0));
        assert!(!state.ball.is_moving());
        assert_eq!(state.ball.radius, 5.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_game_state_serde_snapshot() {
        let mut state = GameState::new(&Settings::default());
        state.ball.launch();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert!(restored.ball.is_moving());
        assert!((restored.ball.velocity() - state.ball.velocity()).length() < 1e-5);
        assert_eq!(restored.bricks, state.bricks);
    }

    proptest! {
        #[test]
        fn prop_velocity_magnitude_matches_speed(
            angle in -1080.0f32..1080.0,
            speed in 0.1f32..50.0,
        ) {
            let mut ball = Ball::new(5.0, speed, 0.0);
            ball.set_angle_deg(angle);
            let v = ball.velocity();
            let expected = speed * speed;
            prop_assert!((v.length_squared() - expected).abs() <= expected * 1e-4);
        }

        #[test]
        fn prop_speed_change_keeps_direction(angle in -360.0f32..360.0, speed in 0.5f32..20.0) {
            let mut ball = Ball::new(5.0, 1.0, angle);
            let dir = ball.velocity().normalize();
            ball.set_speed(speed);
            prop_assert!((ball.velocity().normalize() - dir).length() < 1e-3);
        }
    }
}
