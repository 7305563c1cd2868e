//! Platform abstraction layer
//!
//! Input arrives as [`InputEvent`]s from whatever hosts the game (browser
//! listeners, a headless driver). Events are applied immediately and show up
//! on the next tick; nothing is queued or debounced.

use crate::sim::GameState;

/// Input from the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to `x`, on a field whose left edge sits at `field_left`
    /// in the same coordinate space
    PointerMove { x: f32, field_left: f32 },
    /// Launch request
    Click,
}

impl GameState {
    /// Apply one input event
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, field_left } => {
                self.paddle.move_to(x, field_left);
                if self.clamp_paddle {
                    self.paddle.clamp_to(self.field.x);
                }
            }
            InputEvent::Click => {
                self.ball.launch();
            }
        }
    }
}
