//! One run of an algorithm: its input, trace and playback cursor.

use algoviz_engine::{
    registry, AlgorithmKind, EngineError, GridFrame, Playback, PlaybackSpeed, PlaybackState,
    PlaybackStatus, RunInput, SequenceFrame, Trace, Value,
};
use algoviz_grid::Grid;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::models::Algorithm;

/// Draw a fresh input for an algorithm of `kind`.
pub fn random_input<R: Rng + ?Sized>(
    kind: AlgorithmKind,
    config: &ServerConfig,
    rng: &mut R,
) -> RunInput {
    match kind {
        AlgorithmKind::Sorting => {
            let (low, high) = if config.value_min <= config.value_max {
                (config.value_min, config.value_max)
            } else {
                (config.value_max, config.value_min)
            };
            let values: Vec<Value> = (0..config.array_len)
                .map(|_| rng.gen_range(low..=high))
                .collect();
            RunInput::Sequence(values)
        }
        AlgorithmKind::Pathfinding => RunInput::Grid {
            width: config.grid_width,
            height: config.grid_height,
        },
    }
}

/// Direction for a single manual step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    Forward,
    Backward,
}

/// Playback command applied to a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    Play,
    Pause,
    Toggle,
    Reset,
    Step(StepDirection),
    Seek(isize),
    Speed(PlaybackSpeed),
}

/// Rendered state at the cursor, tagged by input shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RunFrame {
    Sequence(SequenceFrame),
    Grid(GridFrame),
}

/// Summary of the current run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatus {
    pub algorithm_id: String,
    pub kind: AlgorithmKind,
    /// Whether a built-in generator produced the trace
    pub animated: bool,
    #[serde(flatten)]
    pub playback: PlaybackStatus,
}

/// Full trace of the current run, for clients that replay locally.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceView<'a> {
    pub algorithm_id: &'a str,
    pub input: &'a RunInput,
    pub steps: &'a Trace,
}

/// An active run. The trace is generated once, on creation.
#[derive(Debug, Clone)]
pub struct Session {
    algorithm_id: String,
    animated: bool,
    input: RunInput,
    playback: Playback,
}

impl Session {
    /// Generate the trace for `algorithm` over `input`.
    pub fn start(algorithm: &Algorithm, input: RunInput) -> Self {
        let animated = algorithm.generator_id().is_some();
        if !animated {
            tracing::warn!(id = %algorithm.id, "no generator registered; run has no steps");
        }

        let trace = registry::generate(&algorithm.id, &input);
        tracing::info!(id = %algorithm.id, steps = trace.len(), "run created");

        Self {
            algorithm_id: algorithm.id.clone(),
            animated,
            input,
            playback: Playback::new(trace),
        }
    }

    pub fn algorithm_id(&self) -> &str {
        &self.algorithm_id
    }

    pub fn input(&self) -> &RunInput {
        &self.input
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn status(&self) -> RunStatus {
        RunStatus {
            algorithm_id: self.algorithm_id.clone(),
            kind: self.input.kind(),
            animated: self.animated,
            playback: PlaybackStatus::from(&self.playback),
        }
    }

    pub fn trace_view(&self) -> TraceView<'_> {
        TraceView {
            algorithm_id: &self.algorithm_id,
            input: &self.input,
            steps: self.playback.trace(),
        }
    }

    /// Replay the trace up to the cursor.
    pub fn frame(&self) -> Result<RunFrame> {
        let trace = self.playback.trace();
        let position = self.playback.position();
        match &self.input {
            RunInput::Sequence(values) => {
                Ok(RunFrame::Sequence(SequenceFrame::at(values, trace, position)))
            }
            RunInput::Grid { width, height } => {
                let grid = Grid::new(*width, *height).map_err(EngineError::from)?;
                Ok(RunFrame::Grid(GridFrame::at(grid, trace, position)))
            }
        }
    }

    /// Apply a playback command and report the resulting status.
    pub fn apply(&mut self, control: Control) -> PlaybackStatus {
        let before = self.playback.state();
        match control {
            Control::Play => self.playback.play(),
            Control::Pause => self.playback.pause(),
            Control::Toggle => self.playback.toggle(),
            Control::Reset => self.playback.reset(),
            Control::Step(StepDirection::Forward) => {
                self.playback.step_forward();
            }
            Control::Step(StepDirection::Backward) => self.playback.step_backward(),
            Control::Seek(position) => self.playback.seek(position),
            Control::Speed(speed) => {
                self.playback.set_speed(speed);
                tracing::info!(id = %self.algorithm_id, speed = speed.multiplier(), "speed changed");
            }
        }
        self.log_transition(before);
        PlaybackStatus::from(&self.playback)
    }

    /// Timer advance. Returns whether the cursor moved.
    pub fn tick(&mut self) -> bool {
        let before = self.playback.state();
        let moved = self.playback.tick();
        self.log_transition(before);
        moved
    }

    pub fn is_playing(&self) -> bool {
        self.playback.state() == PlaybackState::Playing
    }

    fn log_transition(&self, before: PlaybackState) {
        let after = self.playback.state();
        if before != after {
            tracing::info!(
                id = %self.algorithm_id,
                from = ?before,
                to = ?after,
                position = self.playback.position(),
                "playback state changed"
            );
        }
    }
}
