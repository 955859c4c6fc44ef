//! A* search over an implicit grid.
//!
//! The grid has no walls, unit edge costs and 4-directional adjacency.
//! Search runs from the top-left cell to the bottom-right cell with the
//! Manhattan heuristic.
//!
//! Per-cell state lives in a sparse arena keyed by the flat grid index
//! (`y * width + x`) and only holds cells the search has discovered, so
//! memory is bounded by the expansion limit rather than the grid size. A
//! node's parent is an index into that arena, and the final path is rebuilt
//! by walking indices back from the goal.

use std::collections::{HashMap, HashSet};

use algoviz_grid::Grid;

use crate::error::{EngineError, Result};
use crate::step::{Auxiliary, Step, StepKind, Trace, TraceBuilder};

/// Expansions allowed before the search gives up.
pub const EXPANSION_LIMIT: usize = 100;

mod line {
    pub const LOOP: u32 = 7;
    pub const SELECT: u32 = 8;
    pub const GOAL: u32 = 10;
    pub const UPDATE: u32 = 17;
    pub const OPEN: u32 = 20;
    pub const NO_PATH: u32 = 22;
}

/// g-score of a cell nothing has reached yet.
const UNSCORED: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Node {
    g: usize,
    h: usize,
    f: usize,
    parent: Option<usize>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNSCORED,
            h: 0,
            f: UNSCORED,
            parent: None,
        }
    }
}

/// How a search ended. Each maps to exactly one terminal `found` step.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Reached { goal: usize, path: Vec<usize> },
    LimitReached,
    Exhausted,
}

/// Record an A* search across a `width × height` grid.
///
/// A zero dimension cannot be searched; the trace is then a single
/// failing `found` step, so every trace still ends in exactly one `found`.
pub fn generate(width: usize, height: usize) -> Trace {
    let result = Grid::new(width, height)
        .map_err(EngineError::from)
        .and_then(search);

    match result {
        Ok(trace) => trace,
        Err(err) => {
            tracing::debug!(width, height, %err, "a* search not started");
            let mut trace = TraceBuilder::new();
            trace.push(
                Step::new(StepKind::Found, Vec::new(), format!("No search performed: {err}"))
                    .at_line(line::NO_PATH),
            );
            trace.finish()
        }
    }
}

/// Record an A* search on an existing grid.
pub fn search(grid: Grid) -> Result<Trace> {
    let mut nodes: HashMap<usize, Node> = HashMap::new();
    let mut closed: HashSet<usize> = HashSet::new();
    let mut in_open: HashSet<usize> = HashSet::new();
    let mut trace = TraceBuilder::new();

    let goal_coord = grid.goal();
    let start = grid.index_of(grid.start())?;
    let goal = grid.index_of(goal_coord)?;

    let h = grid.start().manhattan(&goal_coord);
    nodes.insert(
        start,
        Node {
            g: 0,
            h,
            f: h,
            parent: None,
        },
    );

    // Unordered open list; selection is a linear scan so ties resolve to
    // whichever node was added first.
    let mut open: Vec<usize> = vec![start];
    in_open.insert(start);
    let mut expansions = 0usize;

    let outcome = loop {
        let Some((slot, current)) = open
            .iter()
            .copied()
            .enumerate()
            .min_by_key(|&(_, idx)| nodes.get(&idx).map_or(UNSCORED, |n| n.f))
        else {
            break Outcome::Exhausted;
        };
        let node = nodes.get(&current).copied().unwrap_or_default();

        let here = grid.coord_of(current)?;
        trace.push(
            Step::new(
                StepKind::Visit,
                vec![current],
                format!("Visiting node at {here}, g={}, h={}, f={}", node.g, node.h, node.f),
            )
            .at_line(line::SELECT)
            .with_auxiliary(Auxiliary::Cell { x: here.x, y: here.y }),
        );

        if current == goal {
            break Outcome::Reached {
                goal,
                path: walk_back(&nodes, goal),
            };
        }

        open.remove(slot);
        in_open.remove(&current);
        closed.insert(current);

        for neighbor in grid.neighbors(here) {
            let idx = grid.index_of(neighbor)?;
            if closed.contains(&idx) {
                continue;
            }

            let tentative = node.g + 1;
            if in_open.insert(idx) {
                open.push(idx);
                trace.push(
                    Step::new(
                        StepKind::Highlight,
                        vec![idx],
                        format!("Added {neighbor} to open set"),
                    )
                    .at_line(line::OPEN)
                    .with_auxiliary(Auxiliary::Cell {
                        x: neighbor.x,
                        y: neighbor.y,
                    }),
                );
            } else if nodes.get(&idx).is_some_and(|n| tentative >= n.g) {
                continue;
            }

            let g = tentative;
            let h = neighbor.manhattan(&goal_coord);
            let updated = Node {
                g,
                h,
                f: g.saturating_add(h),
                parent: Some(current),
            };
            nodes.insert(idx, updated);

            trace.push(
                Step::new(
                    StepKind::Compare,
                    vec![idx],
                    format!("Updated {neighbor}: g={}, f={}", updated.g, updated.f),
                )
                .at_line(line::UPDATE)
                .with_auxiliary(Auxiliary::Score {
                    x: neighbor.x,
                    y: neighbor.y,
                    g: updated.g,
                    f: updated.f,
                }),
            );
        }

        expansions += 1;
        if expansions > EXPANSION_LIMIT {
            break Outcome::LimitReached;
        }
    };

    let terminal = match outcome {
        Outcome::Reached { goal, path } => {
            let at = grid.coord_of(goal)?;
            Step::new(
                StepKind::Found,
                vec![goal],
                format!("Path found! Goal reached at {at}"),
            )
            .at_line(line::GOAL)
            .with_auxiliary(Auxiliary::Path { path })
        }
        Outcome::LimitReached => {
            Step::new(StepKind::Found, Vec::new(), "Search completed (limit reached)")
                .at_line(line::LOOP)
        }
        Outcome::Exhausted => {
            Step::new(StepKind::Found, Vec::new(), "Open set is empty - no path found")
                .at_line(line::NO_PATH)
        }
    };
    trace.push(terminal);

    let trace = trace.finish();
    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        expansions,
        steps = trace.len(),
        "a* trace generated"
    );
    Ok(trace)
}

/// Follow parent indices from `goal` back to the start, start first.
fn walk_back(nodes: &HashMap<usize, Node>, goal: usize) -> Vec<usize> {
    let mut path: Vec<usize> =
        std::iter::successors(Some(goal), |idx| nodes.get(idx).and_then(|n| n.parent)).collect();
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(trace: &Trace) -> Vec<StepKind> {
        trace.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn single_cell_visits_then_finds() {
        let trace = generate(1, 1);
        assert_eq!(kinds(&trace), vec![StepKind::Visit, StepKind::Found]);
        assert_eq!(trace.steps()[1].indices, vec![0]);
        assert_eq!(
            trace.steps()[1].auxiliary,
            Some(Auxiliary::Path { path: vec![0] })
        );
    }

    #[test]
    fn two_by_two_exact_trace() {
        let trace = generate(2, 2);
        assert_eq!(
            kinds(&trace),
            vec![
                StepKind::Visit,     // (0,0)
                StepKind::Highlight, // down (0,1)
                StepKind::Compare,
                StepKind::Highlight, // right (1,0)
                StepKind::Compare,
                StepKind::Visit,     // (0,1): first of the f=2 tie
                StepKind::Highlight, // right (1,1)
                StepKind::Compare,
                StepKind::Visit,     // (1,0): (1,1) already scored g=2
                StepKind::Visit,     // (1,1)
                StepKind::Found,
            ]
        );

        let visited: Vec<usize> = trace
            .iter()
            .filter(|s| s.kind == StepKind::Visit)
            .map(|s| s.indices[0])
            .collect();
        assert_eq!(visited, vec![0, 2, 1, 3]);

        assert_eq!(
            trace.last().and_then(|s| s.auxiliary.clone()),
            Some(Auxiliary::Path { path: vec![0, 2, 3] })
        );
    }

    #[test]
    fn compare_carries_scores() {
        let trace = generate(3, 3);
        let first_update = trace
            .iter()
            .find(|s| s.kind == StepKind::Compare)
            .unwrap();
        // Down from origin: (0,1), g=1, h=3.
        assert_eq!(first_update.indices, vec![3]);
        assert_eq!(
            first_update.auxiliary,
            Some(Auxiliary::Score { x: 0, y: 1, g: 1, f: 4 })
        );
    }

    #[test]
    fn ten_by_ten_reaches_goal() {
        let trace = generate(10, 10);
        let last = trace.last().unwrap();
        assert_eq!(last.kind, StepKind::Found);
        assert_eq!(last.indices, vec![99]);
        match &last.auxiliary {
            Some(Auxiliary::Path { path }) => {
                // Shortest path on an empty grid visits width + height - 1 cells.
                assert_eq!(path.len(), 19);
                assert_eq!(path.first(), Some(&0));
                assert_eq!(path.last(), Some(&99));
            }
            other => panic!("expected path, got {other:?}"),
        }
    }

    #[test]
    fn large_grid_hits_limit() {
        let trace = generate(40, 40);
        let last = trace.last().unwrap();
        assert_eq!(last.kind, StepKind::Found);
        assert!(last.indices.is_empty());
        assert!(last.description.contains("limit"));
        assert_eq!(trace.count(StepKind::Visit), EXPANSION_LIMIT + 1);
    }

    #[test]
    fn exactly_one_found_at_end() {
        for (w, h) in [(1, 1), (1, 5), (5, 1), (3, 7), (12, 12), (30, 2)] {
            let trace = generate(w, h);
            assert_eq!(trace.count(StepKind::Found), 1, "{w}x{h}");
            assert_eq!(trace.last().map(|s| s.kind), Some(StepKind::Found));
        }
    }

    #[test]
    fn huge_grids_end_in_single_found() {
        // Cell count overflows: the grid is rejected up front.
        let trace = generate(usize::MAX, 2);
        assert_eq!(kinds(&trace), vec![StepKind::Found]);
        assert!(trace.steps()[0].indices.is_empty());

        // Valid but enormous: only discovered cells are stored, so the
        // search runs into the expansion limit.
        let trace = generate(1 << 31, 1 << 31);
        assert_eq!(trace.count(StepKind::Found), 1);
        assert_eq!(trace.last().map(|s| s.kind), Some(StepKind::Found));
        assert!(trace.last().unwrap().description.contains("limit"));
        assert_eq!(trace.count(StepKind::Visit), EXPANSION_LIMIT + 1);
    }

    #[test]
    fn zero_dimension_is_single_failure() {
        let trace = generate(0, 4);
        assert_eq!(kinds(&trace), vec![StepKind::Found]);
        assert!(trace.steps()[0].indices.is_empty());
    }
}
