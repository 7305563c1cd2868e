//! Game settings
//!
//! Every field defaults to the classic layout; any subset can be overridden
//! from JSON. Persisted in LocalStorage on the web, in a file natively.

use serde::{Deserialize, Serialize};

use crate::color::Palette;
use crate::consts::*;
use crate::error::Error;
use crate::sim::{GridLayout, Rect, RemovalPolicy};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Brick grid ===
    pub rows: usize,
    /// Columns in the full layout, margins included
    pub layout_columns: usize,
    /// Empty columns left on each side of the grid
    pub margin_columns: usize,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed: f32,
    pub ball_angle_deg: f32,

    // === Paddle ===
    /// Paddle width as a fraction of field width
    pub paddle_width_ratio: f32,
    /// Paddle width divided by its height
    pub paddle_aspect: f32,
    /// Deflection angle at the paddle's left edge
    pub paddle_min_angle: f32,
    /// Deflection angle at the paddle's right edge
    pub paddle_max_angle: f32,
    /// Keep the paddle inside the field (the classic game doesn't)
    pub clamp_paddle: bool,

    // === Loop ===
    pub removal: RemovalPolicy,

    // === Palette ===
    /// Total hue sweep across the layout columns (degrees)
    pub hue_span: f32,
    pub saturation: f32,
    pub lightness_start: f32,
    pub lightness_step: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            rows: GRID_ROWS,
            layout_columns: GRID_LAYOUT_COLUMNS,
            margin_columns: GRID_MARGIN_COLUMNS,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_START_SPEED,
            ball_angle_deg: BALL_START_ANGLE,

            paddle_width_ratio: PADDLE_WIDTH_RATIO,
            paddle_aspect: PADDLE_ASPECT,
            paddle_min_angle: PADDLE_MIN_ANGLE,
            paddle_max_angle: PADDLE_MAX_ANGLE,
            clamp_paddle: false,

            removal: RemovalPolicy::SkipShifted,

            hue_span: PALETTE_HUE_SPAN,
            saturation: PALETTE_SATURATION,
            lightness_start: PALETTE_LIGHTNESS_START,
            lightness_step: PALETTE_LIGHTNESS_STEP,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Same settings on a field of a different size
    pub fn with_field_size(mut self, width: f32, height: f32) -> Self {
        self.field_width = width;
        self.field_height = height;
        self
    }

    /// Reject settings that would break the geometry invariants
    pub fn validate(&self) -> Result<(), Error> {
        fn positive(name: &'static str, value: f32) -> Result<(), Error> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidSetting {
                    name,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("ball_radius", self.ball_radius)?;
        positive("ball_speed", self.ball_speed)?;
        positive("paddle_aspect", self.paddle_aspect)?;

        if self.rows == 0 {
            return Err(Error::InvalidSetting {
                name: "rows",
                reason: "need at least one row".into(),
            });
        }
        if self.brick_columns() == 0 {
            return Err(Error::InvalidSetting {
                name: "layout_columns",
                reason: format!(
                    "{} columns leave no room for bricks with {} margin columns per side",
                    self.layout_columns, self.margin_columns
                ),
            });
        }
        if !(self.paddle_width_ratio > 0.0 && self.paddle_width_ratio <= 1.0) {
            return Err(Error::InvalidSetting {
                name: "paddle_width_ratio",
                reason: format!("must be in (0, 1], got {}", self.paddle_width_ratio),
            });
        }
        if !(self.paddle_min_angle.is_finite()
            && self.paddle_max_angle.is_finite()
            && self.paddle_min_angle < self.paddle_max_angle)
        {
            return Err(Error::InvalidSetting {
                name: "paddle_min_angle",
                reason: format!(
                    "deflection range {}..{} is empty",
                    self.paddle_min_angle, self.paddle_max_angle
                ),
            });
        }
        if !self.ball_angle_deg.is_finite() {
            return Err(Error::InvalidSetting {
                name: "ball_angle_deg",
                reason: "must be finite".into(),
            });
        }

        Ok(())
    }

    /// Bricks per row
    pub fn brick_columns(&self) -> usize {
        self.layout_columns
            .saturating_sub(self.margin_columns.saturating_mul(2))
    }

    pub fn brick_width(&self) -> f32 {
        self.field_width / self.layout_columns as f32
    }

    pub fn brick_height(&self) -> f32 {
        self.brick_width() / 2.0
    }

    pub fn grid_layout(&self) -> GridLayout {
        let col_width = self.brick_width();
        let row_height = self.brick_height();
        GridLayout {
            rows: self.rows,
            cols: self.brick_columns(),
            row_height,
            col_width,
            x_offset: self.margin_columns as f32 * col_width,
            y_offset: GRID_TOP_ROWS * row_height,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette {
            hue_step: self.hue_span / self.layout_columns as f32,
            saturation: self.saturation,
            lightness_start: self.lightness_start,
            lightness_step: self.lightness_step,
        }
    }

    /// Starting paddle: centered, two paddle heights above the bottom
    pub fn paddle_rect(&self) -> Rect {
        let w = self.field_width * self.paddle_width_ratio;
        let h = w / self.paddle_aspect;
        Rect::new(
            self.field_width / 2.0 - w / 2.0,
            self.field_height - h * 2.0,
            w,
            h,
        )
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "hue_bricks_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), Error> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
