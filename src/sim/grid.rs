//! Brick grid: rows of destructible rectangular targets
//!
//! Rows keep insertion (left-to-right) order. Removing a brick compacts its
//! row, so every later brick in that row shifts down by one index.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::color::{Hsl, Palette};

/// A single destructible brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// Display color only
    pub color: Hsl,
}

/// Placement of the grid within the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    /// Bricks per row
    pub cols: usize,
    pub row_height: f32,
    pub col_width: f32,
    /// Left edge of the first column
    pub x_offset: f32,
    /// Top edge of the first row
    pub y_offset: f32,
}

impl GridLayout {
    /// Rectangle of the cell at `row`, `col`
    pub fn cell(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.x_offset + col as f32 * self.col_width,
            self.y_offset + row as f32 * self.row_height,
            self.col_width,
            self.row_height,
        )
    }
}

/// Ordered rows of live bricks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: Vec<Vec<Brick>>,
}

impl BrickGrid {
    /// Populate `layout.rows × layout.cols` bricks, colored by `palette`
    pub fn build(layout: &GridLayout, palette: &Palette) -> Self {
        let rows = (0..layout.rows)
            .map(|row| {
                (0..layout.cols)
                    .map(|col| Brick {
                        rect: layout.cell(row, col),
                        color: palette.color_at(row, col),
                    })
                    .collect()
            })
            .collect();

        Self { rows }
    }

    /// Number of rows (including rows that are now empty)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Live bricks in `row`, left to right
    pub fn row(&self, row: usize) -> &[Brick] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        self.rows.get(row)?.get(col)
    }

    /// Remove one brick, shifting later bricks in the row left by one
    pub fn remove_at(&mut self, row: usize, col: usize) -> Option<Brick> {
        let bricks = self.rows.get_mut(row)?;
        if col < bricks.len() {
            Some(bricks.remove(col))
        } else {
            None
        }
    }

    /// True once every row is empty
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// Total number of live bricks
    pub fn live_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// All live bricks in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.rows.iter().flatten()
    }
}
