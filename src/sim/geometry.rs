//! Axis-aligned rectangle geometry for bricks and paddle
//!
//! Field space has its origin at the top-left corner with y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in field space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width (always > 0)
    pub w: f32,
    /// Height (always > 0)
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Inclusive containment test (edges count as inside)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        point_in_rect(p, self)
    }
}

/// True iff `p` lies inside `rect` or on its boundary
#[inline]
pub fn point_in_rect(p: Vec2, rect: &Rect) -> bool {
    p.x >= rect.x && p.x <= rect.x + rect.w && p.y >= rect.y && p.y <= rect.y + rect.h
}
