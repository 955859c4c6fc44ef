//! Algoviz Engine
//!
//! Step traces for classic algorithms and deterministic replay of those
//! traces at any position.
//!
//! # Architecture
//!
//! - **Step model**: [`Step`], [`StepKind`] and the immutable [`Trace`]
//! - **Sorting**: bubble, selection and heap sort generators
//! - **Pathfinding**: grid A* generator
//! - **Replay**: rebuild the sequence and sorted-set (or grid search state)
//!   at a position, scrubbing backward as freely as forward
//! - **Registry**: closed mapping from algorithm id to generator
//! - **Playback**: cursor controller driven by a timer or by step/seek actions
//!
//! # Usage
//!
//! ```
//! use algoviz_engine::{reconstruct, sorting::bubble};
//!
//! let input = [5, 3, 8, 1];
//! let trace = bubble::generate(&input);
//!
//! let start = reconstruct(&input, &trace, -1);
//! assert_eq!(start.sequence, vec![5, 3, 8, 1]);
//!
//! let end = reconstruct(&input, &trace, trace.len() as isize - 1);
//! assert_eq!(end.sequence, vec![1, 3, 5, 8]);
//! ```

pub mod error;
pub mod pathfinding;
pub mod playback;
pub mod registry;
pub mod replay;
pub mod sorting;
pub mod step;

pub use error::{EngineError, Result};
pub use playback::{Playback, PlaybackSpeed, PlaybackState, PlaybackStatus};
pub use registry::{generate, AlgorithmId, AlgorithmKind, Generator, RunInput};
pub use replay::{clamp_position, reconstruct, CellScore, GridFrame, ReplayState, SequenceFrame};
pub use step::{Auxiliary, Step, StepKind, Trace, TraceBuilder, Value};
