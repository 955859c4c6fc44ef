//! Rebuild visual state at any trace position.
//!
//! Replay always starts from the original input and walks the trace prefix
//! `0..=position`. Nothing is cached between calls, so seeking backward is
//! exactly as correct as stepping forward and a regenerated trace needs no
//! invalidation.
//!
//! # Positions
//!
//! Position `-1` is before the first step. Anything outside
//! `[-1, len - 1]` is clamped into that range (see [`clamp_position`]), so
//! every function here is defined for every `isize`.

use std::collections::{BTreeMap, BTreeSet};

use algoviz_grid::Grid;
use serde::{Deserialize, Serialize};

use crate::step::{Auxiliary, Step, StepKind, Trace, Value};

/// Clamp a position into `[-1, len - 1]`.
pub fn clamp_position(position: isize, len: usize) -> isize {
    let last = isize::try_from(len).map_or(isize::MAX, |len| len - 1);
    position.clamp(-1, last)
}

/// Steps `0..=position`, after clamping.
fn prefix(trace: &Trace, position: isize) -> &[Step] {
    let end = usize::try_from(clamp_position(position, trace.len()) + 1).unwrap_or(0);
    &trace.steps()[..end]
}

/// Step at a position, after clamping. `None` before the start.
fn step_at(trace: &Trace, position: isize) -> Option<&Step> {
    usize::try_from(clamp_position(position, trace.len()))
        .ok()
        .and_then(|at| trace.get(at))
}

/// Subject sequence and sorted-set at one trace position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayState {
    pub sequence: Vec<Value>,
    pub sorted: BTreeSet<usize>,
}

/// Reconstruct the sequence and sorted-set after step `position`.
///
/// Steps carrying values write them positionally (`indices[i] := values[i]`);
/// for a swap that is `indices[0] := values[0]` and `indices[1] := values[1]`.
/// `sorted` steps add their indices to the set. Every other kind, including
/// ones this build does not know, leaves the state alone. Writes to an index
/// outside the sequence are ignored.
pub fn reconstruct(original: &[Value], trace: &Trace, position: isize) -> ReplayState {
    let mut state = ReplayState {
        sequence: original.to_vec(),
        sorted: BTreeSet::new(),
    };

    for step in prefix(trace, position) {
        match step.kind {
            kind if kind.mutates() => {
                if let Some(values) = &step.values {
                    for (&index, &value) in step.indices.iter().zip(values) {
                        if let Some(slot) = state.sequence.get_mut(index) {
                            *slot = value;
                        }
                    }
                }
            }
            StepKind::Sorted => state.sorted.extend(step.indices.iter().copied()),
            _ => {}
        }
    }

    state
}

/// Everything a sequence renderer needs for one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceFrame {
    pub position: isize,
    pub total_steps: usize,
    pub sequence: Vec<Value>,
    pub sorted: BTreeSet<usize>,
    /// Step at `position`
    pub step: Option<Step>,
    pub highlighted: Vec<usize>,
    pub compared: Vec<usize>,
    pub swapped: Vec<usize>,
    pub overwritten: Vec<usize>,
}

impl SequenceFrame {
    /// Build the frame at `position` (clamped).
    pub fn at(original: &[Value], trace: &Trace, position: isize) -> Self {
        let position = clamp_position(position, trace.len());
        let ReplayState { sequence, sorted } = reconstruct(original, trace, position);
        let step = step_at(trace, position).cloned();

        let mut frame = Self {
            position,
            total_steps: trace.len(),
            sequence,
            sorted,
            step: None,
            highlighted: Vec::new(),
            compared: Vec::new(),
            swapped: Vec::new(),
            overwritten: Vec::new(),
        };

        if let Some(step) = &step {
            let indices = step.indices.clone();
            match step.kind {
                StepKind::Highlight => frame.highlighted = indices,
                StepKind::Compare => frame.compared = indices,
                StepKind::Swap => frame.swapped = indices,
                StepKind::Overwrite => frame.overwritten = indices,
                _ => {}
            }
        }
        frame.step = step;
        frame
    }
}

/// g and f of a grid cell as last recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellScore {
    pub g: usize,
    pub f: usize,
}

/// Everything a grid renderer needs for one position of a search trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridFrame {
    pub position: isize,
    pub total_steps: usize,
    pub width: usize,
    pub height: usize,
    /// Cells expanded so far
    pub visited: BTreeSet<usize>,
    /// Cells discovered but not yet expanded
    pub frontier: BTreeSet<usize>,
    pub scores: BTreeMap<usize, CellScore>,
    /// Most recently expanded cell
    pub current: Option<usize>,
    /// Start-to-goal path, once found
    pub path: Vec<usize>,
    /// A terminal step has been replayed
    pub finished: bool,
    pub step: Option<Step>,
}

impl GridFrame {
    /// Build the frame at `position` (clamped).
    pub fn at(grid: Grid, trace: &Trace, position: isize) -> Self {
        let position = clamp_position(position, trace.len());
        let mut frame = Self {
            position,
            total_steps: trace.len(),
            width: grid.width(),
            height: grid.height(),
            visited: BTreeSet::new(),
            frontier: BTreeSet::new(),
            scores: BTreeMap::new(),
            current: None,
            path: Vec::new(),
            finished: false,
            step: step_at(trace, position).cloned(),
        };

        for step in prefix(trace, position) {
            match step.kind {
                StepKind::Visit => {
                    for &cell in &step.indices {
                        frame.frontier.remove(&cell);
                        frame.visited.insert(cell);
                        frame.current = Some(cell);
                    }
                }
                StepKind::Highlight => {
                    for &cell in &step.indices {
                        if !frame.visited.contains(&cell) {
                            frame.frontier.insert(cell);
                        }
                    }
                }
                StepKind::Compare => {
                    if let (Some(&cell), Some(Auxiliary::Score { g, f, .. })) =
                        (step.indices.first(), &step.auxiliary)
                    {
                        frame.scores.insert(cell, CellScore { g: *g, f: *f });
                    }
                }
                StepKind::Found => {
                    frame.finished = true;
                    if let Some(Auxiliary::Path { path }) = &step.auxiliary {
                        frame.path.clone_from(path);
                    }
                }
                _ => {}
            }
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding;
    use crate::sorting::bubble;

    fn manual_trace() -> Trace {
        vec![
            Step::new(StepKind::Compare, vec![0, 1], "cmp"),
            Step::swap(0, 1, 3, 5, "swap"),
            Step::sorted(1, "sorted"),
            Step::new(StepKind::Overwrite, vec![0], "write").with_values(vec![9]),
            Step::new(StepKind::Unknown, vec![0, 1], "future"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn before_start_is_original() {
        let original = [5, 3];
        let state = reconstruct(&original, &manual_trace(), -1);
        assert_eq!(state.sequence, vec![5, 3]);
        assert!(state.sorted.is_empty());
    }

    #[test]
    fn swap_applies_positionally() {
        let state = reconstruct(&[5, 3], &manual_trace(), 1);
        assert_eq!(state.sequence, vec![3, 5]);
        assert!(state.sorted.is_empty());
    }

    #[test]
    fn overwrite_single_pair() {
        let state = reconstruct(&[5, 3], &manual_trace(), 3);
        assert_eq!(state.sequence, vec![9, 5]);
        assert_eq!(state.sorted.iter().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn unknown_kind_is_noop() {
        let at_3 = reconstruct(&[5, 3], &manual_trace(), 3);
        let at_4 = reconstruct(&[5, 3], &manual_trace(), 4);
        assert_eq!(at_3, at_4);
    }

    #[test]
    fn swap_without_values_is_skipped() {
        let trace: Trace = vec![Step::new(StepKind::Swap, vec![0, 1], "bare")]
            .into_iter()
            .collect();
        assert_eq!(reconstruct(&[2, 1], &trace, 0).sequence, vec![2, 1]);
    }

    #[test]
    fn out_of_range_writes_ignored() {
        let trace: Trace = vec![Step::swap(0, 7, 1, 2, "bad")].into_iter().collect();
        assert_eq!(reconstruct(&[4, 4], &trace, 0).sequence, vec![1, 4]);
    }

    #[test]
    fn positions_clamp() {
        assert_eq!(clamp_position(-5, 3), -1);
        assert_eq!(clamp_position(10, 3), 2);
        assert_eq!(clamp_position(1, 3), 1);
        assert_eq!(clamp_position(0, 0), -1);

        let trace = manual_trace();
        assert_eq!(
            reconstruct(&[5, 3], &trace, 100),
            reconstruct(&[5, 3], &trace, 4)
        );
        assert_eq!(
            reconstruct(&[5, 3], &trace, isize::MIN),
            reconstruct(&[5, 3], &trace, -1)
        );
    }

    #[test]
    fn reconstruction_is_repeatable() {
        let input = [9, 2, 7, 4];
        let trace = bubble::generate(&input);
        for position in -1..trace.len() as isize {
            assert_eq!(
                reconstruct(&input, &trace, position),
                reconstruct(&input, &trace, position)
            );
        }
    }

    #[test]
    fn backward_seek_matches_fresh_forward() {
        let input = [4, 3, 2, 1];
        let trace = bubble::generate(&input);

        // First pass: three compare/swap pairs push 4 to the end, and the
        // pass's `sorted` step comes at position 6.
        let at_5 = reconstruct(&input, &trace, 5);
        assert_eq!(at_5.sequence, vec![3, 2, 1, 4]);
        assert!(at_5.sorted.is_empty());

        let at_6 = reconstruct(&input, &trace, 6);
        assert_eq!(at_6.sorted.iter().copied().collect::<Vec<_>>(), vec![3]);

        let end = reconstruct(&input, &trace, trace.len() as isize - 1);
        assert_eq!(end.sequence, vec![1, 2, 3, 4]);
        assert_eq!(end.sorted.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);

        let back = reconstruct(&input, &trace, 5);
        assert_eq!(back.sequence, vec![3, 2, 1, 4]);
        assert!(back.sorted.is_empty());
    }

    #[test]
    fn sequence_frame_groups_current_step() {
        let trace = manual_trace();
        let frame = SequenceFrame::at(&[5, 3], &trace, 0);
        assert_eq!(frame.compared, vec![0, 1]);
        assert!(frame.swapped.is_empty());
        assert_eq!(frame.total_steps, 5);

        let frame = SequenceFrame::at(&[5, 3], &trace, 1);
        assert_eq!(frame.swapped, vec![0, 1]);
        assert_eq!(frame.sequence, vec![3, 5]);

        let frame = SequenceFrame::at(&[5, 3], &trace, -1);
        assert_eq!(frame.step, None);
        assert_eq!(frame.position, -1);
    }

    #[test]
    fn sequence_frame_serializes_camel_case() {
        let frame = SequenceFrame::at(&[1], &Trace::default(), 0);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"totalSteps\":0"));
        assert!(json.contains("\"position\":-1"));
    }

    #[test]
    fn grid_frame_tracks_search() {
        let grid = Grid::new(2, 2).unwrap();
        let trace = pathfinding::generate(2, 2);

        let start = GridFrame::at(grid, &trace, -1);
        assert!(start.visited.is_empty());
        assert!(!start.finished);

        // After the first expansion both neighbors are on the frontier.
        let first = GridFrame::at(grid, &trace, 4);
        assert_eq!(first.visited.iter().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(first.frontier.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(first.scores.get(&2), Some(&CellScore { g: 1, f: 2 }));
        assert_eq!(first.current, Some(0));

        let end = GridFrame::at(grid, &trace, trace.len() as isize - 1);
        assert!(end.finished);
        assert_eq!(end.path, vec![0, 2, 3]);
        assert_eq!(end.visited.len(), 4);
        assert!(end.frontier.is_empty());
    }
}
