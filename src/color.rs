//! Brick palette and fixed entity colors
//!
//! Bricks carry an HSL color purely for display; it has no effect on physics.

use serde::{Deserialize, Serialize};

/// sRGB-encoded RGBA color as consumed by the renderer
pub type Rgba = [f32; 4];

/// Fixed colors for non-brick elements
pub mod colors {
    use super::Rgba;

    /// CSS `dimgray` (105, 105, 105)
    pub const PADDLE: Rgba = [0.412, 0.412, 0.412, 1.0];
    pub const BALL: Rgba = [1.0, 0.0, 0.0, 1.0];
    pub const BACKGROUND: Rgba = [1.0, 1.0, 1.0, 1.0];
}

/// A color in hue/saturation/lightness form
///
/// `hue` is in degrees, `saturation` and `lightness` in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Convert to opaque RGBA (components in 0..=1)
    pub fn to_rgba(&self) -> Rgba {
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let sector = self.hue.rem_euclid(360.0) / 60.0;
        let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        [r + m, g + m, b + m, 1.0]
    }

    /// CSS notation, e.g. `hsl(17,50%,32%)`
    pub fn css(&self) -> String {
        format!("hsl({},{}%,{}%)", self.hue, self.saturation, self.lightness)
    }
}

/// Procedural brick palette: hue advances per column, lightness per row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Hue increment between adjacent columns (degrees)
    pub hue_step: f32,
    pub saturation: f32,
    /// Lightness of the first row (percent)
    pub lightness_start: f32,
    /// Lightness increment per row (percent)
    pub lightness_step: f32,
}

impl Palette {
    /// Color of the brick at `row`, `col` (both 0-based over live bricks)
    pub fn color_at(&self, row: usize, col: usize) -> Hsl {
        Hsl::new(
            col as f32 * self.hue_step,
            self.saturation,
            self.lightness_start + row as f32 * self.lightness_step,
        )
    }
}
