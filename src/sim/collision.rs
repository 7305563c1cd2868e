//! Collision detection and response
//!
//! All tests are point-sampled: the ball's center is checked against a
//! rectangle at its current discrete position, with no swept test between
//! ticks. A fast enough ball can pass through thin targets.

use serde::{Deserialize, Serialize};

use super::geometry::point_in_rect;
use super::grid::Brick;
use super::state::{Ball, Paddle};

/// Which velocity component a reflection negates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Flip the x component: `180 - angle`
    X,
    /// Flip the y component: `360 - angle`
    Y,
}

/// Reflect a direction angle (degrees) across the given axis
#[inline]
pub fn reflect_angle(angle_deg: f32, axis: Axis) -> f32 {
    match axis {
        Axis::X => 180.0 - angle_deg,
        Axis::Y => 360.0 - angle_deg,
    }
}

/// Which brick face the ball is judged to have struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickFace {
    /// Near the left/right end of the brick, reflects across x
    Vertical,
    /// Anywhere else, reflects across y
    Horizontal,
}

impl BrickFace {
    pub fn axis(self) -> Axis {
        match self {
            BrickFace::Vertical => Axis::X,
            BrickFace::Horizontal => Axis::Y,
        }
    }
}

/// Guess the struck face from how close the ball sits to the brick's ends
///
/// The horizontal step size stands in for "close to the edge": within one
/// step of the left end or two steps of the right end counts as a side hit.
pub fn classify_brick_hit(ball: &Ball, brick: &Brick) -> BrickFace {
    let step = ball.velocity().x.abs();
    let x = ball.pos.x;
    if x < brick.rect.x + step || x > brick.rect.right() - 2.0 * step {
        BrickFace::Vertical
    } else {
        BrickFace::Horizontal
    }
}

/// Deflect the ball off the paddle if its center is inside the paddle
///
/// The new angle maps linearly from the paddle's left edge (`min_angle`) to
/// its right edge (`max_angle`). Nothing stops this from firing again on the
/// next tick while the ball is still inside the paddle.
pub fn paddle_collision(ball: &mut Ball, paddle: &Paddle) -> bool {
    if !point_in_rect(ball.pos, &paddle.rect) {
        return false;
    }

    let (min_angle, max_angle) = ball.deflection_range();
    let angle = min_angle + (ball.pos.x - paddle.rect.x) * (max_angle - min_angle) / paddle.rect.w;
    ball.set_angle_deg(angle);
    log::debug!("Paddle hit at x={:.1}, new angle {:.1}°", ball.pos.x, angle);
    true
}

/// Bounce the ball off `brick` if its center is inside it
///
/// Returns true when the brick was hit; the caller is responsible for
/// removing it from the grid.
pub fn brick_collision(ball: &mut Ball, brick: &Brick) -> bool {
    if !point_in_rect(ball.pos, &brick.rect) {
        return false;
    }

    let face = classify_brick_hit(ball, brick);
    ball.reflect(face.axis());
    true
}
