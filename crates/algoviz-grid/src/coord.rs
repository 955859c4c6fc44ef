//! Cell coordinates on a rectangular grid.
//!
//! Coordinates are unsigned: `(0, 0)` is the top-left corner, `x` grows to
//! the right and `y` grows downward. Stepping off the top or left edge is
//! expressed with [`GridCoord::offset`] returning `None` rather than with
//! negative values.

use std::fmt;

/// A cell position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl GridCoord {
    /// Top-left corner.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new coordinate.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance `|dx| + |dy|`.
    ///
    /// With unit-cost 4-directional moves this is the exact distance on an
    /// empty grid, which makes it both admissible and consistent for A*.
    pub const fn manhattan(&self, other: &Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Shift by a signed delta. Returns `None` if either axis would go negative.
    ///
    /// The upper bound is not checked here; that is the grid's job.
    pub fn offset(&self, dx: isize, dy: isize) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_zero() {
        assert_eq!(GridCoord::ORIGIN, GridCoord::new(0, 0));
    }

    #[test]
    fn manhattan_distance() {
        let a = GridCoord::new(0, 0);
        let b = GridCoord::new(3, 4);
        assert_eq!(a.manhattan(&b), 7);
        assert_eq!(b.manhattan(&a), 7);
        assert_eq!(a.manhattan(&a), 0);
    }

    #[test]
    fn offset_stops_at_zero() {
        let origin = GridCoord::ORIGIN;
        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(0, -1), None);
        assert_eq!(origin.offset(1, 0), Some(GridCoord::new(1, 0)));
        assert_eq!(GridCoord::new(2, 2).offset(-1, -1), Some(GridCoord::new(1, 1)));
    }

    #[test]
    fn display_format() {
        assert_eq!(GridCoord::new(4, 7).to_string(), "(4, 7)");
    }
}
