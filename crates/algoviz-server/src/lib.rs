//! Algoviz Server
//!
//! Serves the algorithm catalog and drives one playback run at a time.
//!
//! A run is created by `POST /api/run`: the server draws fresh random input,
//! asks the engine for the full trace once, and from then on only moves a
//! cursor through it. Frames are rebuilt from the original input on every
//! request, so stepping backward or seeking costs the same as stepping
//! forward.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod session;
pub mod storage;

pub use api::build_router;
pub use config::{ServerConfig, MAX_ARRAY_LEN, MAX_GRID_SIDE};
pub use error::{Error, Result};
pub use models::Algorithm;
pub use server::{run_ticker, AlgovizServer, AppState};
pub use session::{random_input, Control, RunFrame, RunStatus, Session, StepDirection, TraceView};
pub use storage::{AlgorithmStore, MemoryStore};
