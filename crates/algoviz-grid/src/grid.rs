//! Grid bounds and flattened indexing.

use crate::{GridCoord, Neighbors};
use thiserror::Error;

/// Errors from grid construction and addressing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height is zero
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    /// Cell count does not fit in `usize`
    #[error("grid of {width}x{height} cells is too large to index")]
    TooLarge { width: usize, height: usize },

    /// Coordinate or index outside the grid
    #[error("cell {0} is outside the grid")]
    OutOfBounds(String),
}

/// An implicit `width × height` grid with no walls.
///
/// Nothing is stored per cell; the grid only knows its bounds. Algorithms
/// keep their own per-cell state in a flat array addressed by [`Grid::index_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid. Both dimensions must be non-zero and every cell must
    /// have a flat index.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        if width.checked_mul(height).is_none() {
            return Err(GridError::TooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub const fn len(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Always false; a grid has at least one cell.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Top-left cell.
    pub const fn start(&self) -> GridCoord {
        GridCoord::ORIGIN
    }

    /// Bottom-right cell.
    pub const fn goal(&self) -> GridCoord {
        GridCoord::new(self.width - 1, self.height - 1)
    }

    /// Whether the coordinate lies on the grid.
    pub const fn contains(&self, coord: GridCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Row-major index `y * width + x`.
    pub fn index_of(&self, coord: GridCoord) -> Result<usize, GridError> {
        if !self.contains(coord) {
            return Err(GridError::OutOfBounds(coord.to_string()));
        }
        Ok(coord.y * self.width + coord.x)
    }

    /// Inverse of [`Grid::index_of`].
    pub fn coord_of(&self, index: usize) -> Result<GridCoord, GridError> {
        if index >= self.len() {
            return Err(GridError::OutOfBounds(format!("#{index}")));
        }
        Ok(GridCoord::new(index % self.width, index / self.width))
    }

    /// In-bounds neighbors of a cell, in the order up, down, left, right.
    pub fn neighbors(&self, coord: GridCoord) -> Neighbors {
        Neighbors::of(*self, coord)
    }

}
