//! 4-directional neighbor enumeration.
//!
//! The iteration order is fixed (up, down, left, right). Pathfinding traces
//! depend on it: the order neighbors are discovered decides the order of
//! `highlight` steps and the tie-break between equal f-scores.

use crate::{Grid, GridCoord};

/// One of the four unit moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in trace order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// `(dx, dy)` for this move. `y` grows downward.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Iterator over the in-bounds neighbors of a cell.
#[derive(Debug, Clone)]
pub struct Neighbors {
    grid: Grid,
    center: GridCoord,
    next: usize,
}

impl Neighbors {
    /// Neighbors of `center` on `grid`.
    pub fn of(grid: Grid, center: GridCoord) -> Self {
        Self {
            grid,
            center,
            next: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = GridCoord;

    fn next(&mut self) -> Option<GridCoord> {
        while let Some(dir) = Direction::ALL.get(self.next) {
            self.next += 1;
            let (dx, dy) = dir.delta();
            if let Some(coord) = self.center.offset(dx, dy) {
                if self.grid.contains(coord) {
                    return Some(coord);
                }
            }
        }
        None
    }
}
