//! Playback controls over a trace.
//!
//! The controller only moves a cursor through `[-1, len - 1]`. It never
//! holds derived state: whoever renders calls into [`crate::replay`] with
//! the cursor each time it changes.

use serde::{Deserialize, Serialize};

use crate::replay::clamp_position;
use crate::step::{Step, Trace};

/// Playback speed multiplier, `0.5x` to `10x` in half steps.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    pub const MIN: Self = Self(0.5);
    pub const NORMAL: Self = Self(1.0);
    pub const MAX: Self = Self(10.0);

    /// Clamp into range and snap to the nearest half. NaN becomes normal speed.
    pub fn new(multiplier: f64) -> Self {
        if multiplier.is_nan() {
            return Self::NORMAL;
        }
        let snapped = (multiplier * 2.0).round() / 2.0;
        Self(snapped.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Get the speed multiplier.
    pub fn multiplier(&self) -> f64 {
        self.0
    }

    /// Milliseconds between steps at this speed.
    pub fn ms_per_step(&self, base_ms: u64) -> u64 {
        (base_ms as f64 / self.0) as u64
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<f64> for PlaybackSpeed {
    fn from(multiplier: f64) -> Self {
        Self::new(multiplier)
    }
}

impl From<PlaybackSpeed> for f64 {
    fn from(speed: PlaybackSpeed) -> Self {
        speed.0
    }
}

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// At the start, not running
    Stopped,
    /// Advancing on every tick
    Playing,
    /// Holding position mid-trace
    Paused,
    /// Reached the last step
    Finished,
}

/// Playback controller for one trace.
#[derive(Debug, Clone)]
pub struct Playback {
    trace: Trace,
    position: isize,
    state: PlaybackState,
    speed: PlaybackSpeed,
}

impl Playback {
    /// Create a controller positioned before the first step.
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            position: -1,
            state: PlaybackState::Stopped,
            speed: PlaybackSpeed::NORMAL,
        }
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Cursor; `-1` is before the first step.
    pub fn position(&self) -> isize {
        self.position
    }

    pub fn total_steps(&self) -> usize {
        self.trace.len()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    fn last_position(&self) -> isize {
        clamp_position(isize::MAX, self.trace.len())
    }

    fn at_end(&self) -> bool {
        self.position >= self.last_position()
    }

    /// Step under the cursor.
    pub fn current_step(&self) -> Option<&Step> {
        usize::try_from(self.position)
            .ok()
            .and_then(|at| self.trace.get(at))
    }

    pub fn can_step_forward(&self) -> bool {
        !self.at_end()
    }

    pub fn can_step_backward(&self) -> bool {
        self.position > -1
    }

    /// Jump to a position (clamped).
    pub fn seek(&mut self, position: isize) {
        self.position = clamp_position(position, self.trace.len());
        if self.at_end() && !self.trace.is_empty() {
            self.state = PlaybackState::Finished;
        } else if self.state == PlaybackState::Finished {
            self.state = PlaybackState::Paused;
        }
    }

    /// Start playback. Restarts from the beginning when already at the end.
    pub fn play(&mut self) {
        if self.trace.is_empty() {
            self.state = PlaybackState::Finished;
            return;
        }
        if self.at_end() {
            self.position = -1;
        }
        self.state = PlaybackState::Playing;
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Play if not playing, pause otherwise.
    pub fn toggle(&mut self) {
        if self.state == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Stop and return to before the first step.
    pub fn reset(&mut self) {
        self.position = -1;
        self.state = PlaybackState::Stopped;
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    /// Step forward one step.
    pub fn step_forward(&mut self) -> Option<&Step> {
        if !self.can_step_forward() {
            return None;
        }
        self.position += 1;
        if self.at_end() {
            self.state = PlaybackState::Finished;
        }
        self.current_step()
    }

    /// Step backward one step.
    pub fn step_backward(&mut self) {
        if self.can_step_backward() {
            self.position -= 1;
            self.state = if self.position == -1 {
                PlaybackState::Stopped
            } else {
                PlaybackState::Paused
            };
        }
    }

    /// Timer advance. Moves one step while playing; returns whether it moved.
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        if self.at_end() {
            self.state = PlaybackState::Finished;
            return false;
        }
        self.position += 1;
        if self.at_end() {
            self.state = PlaybackState::Finished;
        }
        true
    }

    /// Fraction of the trace shown, `0.0` to `1.0`.
    pub fn progress(&self) -> f64 {
        (self.position + 1) as f64 / self.trace.len().max(1) as f64
    }
}

/// Playback status for sending to a frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStatus {
    pub position: isize,
    pub total_steps: usize,
    pub state: PlaybackState,
    pub speed: PlaybackSpeed,
    pub progress: f64,
    pub can_step_forward: bool,
    pub can_step_backward: bool,
}

impl From<&Playback> for PlaybackStatus {
    fn from(playback: &Playback) -> Self {
        Self {
            position: playback.position,
            total_steps: playback.total_steps(),
            state: playback.state,
            speed: playback.speed,
            progress: playback.progress(),
            can_step_forward: playback.can_step_forward(),
            can_step_backward: playback.can_step_backward(),
        }
    }
}
