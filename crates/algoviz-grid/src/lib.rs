//! Algoviz Grid
//!
//! Implicit rectangular grid used by the pathfinding visualizations.
//!
//! # Layout
//!
//! Cells are addressed either by a [`GridCoord`] `(x, y)` or by a flattened
//! row-major index `y * width + x`. Traces only ever carry the flattened
//! index, so the renderer can treat a grid exactly like a sequence.
//!
//! # Adjacency
//!
//! Every cell has up to 4 neighbors, always yielded in the order
//! up, down, left, right. Cells on the border simply have fewer.
//! Edges have unit cost and [`GridCoord::manhattan`] is the admissible
//! heuristic for that adjacency.

mod coord;
mod grid;
mod neighbors;

pub use coord::GridCoord;
pub use grid::{Grid, GridError};
pub use neighbors::{Direction, Neighbors};

/// Number of neighbors per interior cell.
pub const NEIGHBORS_PER_CELL: usize = 4;

const _: () = assert!(Direction::ALL.len() == NEIGHBORS_PER_CELL);
