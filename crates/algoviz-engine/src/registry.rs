//! Built-in generator registry.
//!
//! The set of algorithms is closed: each [`AlgorithmId`] maps to exactly
//! one generator function, decided at compile time. Ids coming from outside
//! (the content catalog, a request body) go through [`AlgorithmId::from_str`]
//! and either resolve or are rejected; nothing is looked up dynamically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::pathfinding;
use crate::sorting::{bubble, heap, selection};
use crate::step::{Trace, Value};

/// Algorithms with a built-in generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmId {
    BubbleSort,
    SelectionSort,
    HeapSort,
    AStar,
}

/// What shape of input a generator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    Sorting,
    Pathfinding,
}

impl AlgorithmId {
    /// Every registered algorithm.
    pub const ALL: [Self; 4] = [
        Self::BubbleSort,
        Self::SelectionSort,
        Self::HeapSort,
        Self::AStar,
    ];

    /// Catalog id.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BubbleSort => "bubble-sort",
            Self::SelectionSort => "selection-sort",
            Self::HeapSort => "heap-sort",
            Self::AStar => "a-star",
        }
    }

    pub const fn kind(self) -> AlgorithmKind {
        match self {
            Self::BubbleSort | Self::SelectionSort | Self::HeapSort => AlgorithmKind::Sorting,
            Self::AStar => AlgorithmKind::Pathfinding,
        }
    }

    /// The generator for this algorithm.
    pub fn generator(self) -> Generator {
        match self {
            Self::BubbleSort => Generator::Sorting(bubble::generate),
            Self::SelectionSort => Generator::Sorting(selection::generate),
            Self::HeapSort => Generator::Sorting(heap::generate),
            Self::AStar => Generator::Pathfinding(pathfinding::generate),
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| EngineError::UnknownAlgorithm(s.to_string()))
    }
}

/// Input handed to a generator for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunInput {
    /// Subject sequence for a sort
    Sequence(Vec<Value>),
    /// Grid dimensions for a search
    Grid { width: usize, height: usize },
}

impl RunInput {
    pub const fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Sequence(_) => AlgorithmKind::Sorting,
            Self::Grid { .. } => AlgorithmKind::Pathfinding,
        }
    }
}

/// A generator function, tagged by the input it takes.
#[derive(Clone, Copy)]
pub enum Generator {
    Sorting(fn(&[Value]) -> Trace),
    Pathfinding(fn(usize, usize) -> Trace),
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sorting(_) => f.write_str("Generator::Sorting"),
            Self::Pathfinding(_) => f.write_str("Generator::Pathfinding"),
        }
    }
}

impl Generator {
    /// Run against `input`. A mismatched input shape yields an empty trace.
    pub fn run(&self, input: &RunInput) -> Trace {
        match (self, input) {
            (Self::Sorting(generate), RunInput::Sequence(values)) => generate(values),
            (Self::Pathfinding(generate), RunInput::Grid { width, height }) => {
                generate(*width, *height)
            }
            (_, input) => {
                tracing::warn!(input = ?input.kind(), "generator does not accept this input");
                Trace::default()
            }
        }
    }
}

/// Generate a trace by catalog id.
///
/// Unknown ids produce an empty trace rather than an error: there is simply
/// nothing to animate.
pub fn generate(id: &str, input: &RunInput) -> Trace {
    match id.parse::<AlgorithmId>() {
        Ok(algorithm) => algorithm.generator().run(input),
        Err(err) => {
            tracing::debug!(%err, "no generator registered");
            Trace::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    #[test]
    fn ids_round_trip_through_str() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.as_str().parse::<AlgorithmId>().unwrap(), id);
        }
    }

    #[test]
    fn unknown_id_rejected() {
        assert_eq!(
            "merge-sort".parse::<AlgorithmId>(),
            Err(EngineError::UnknownAlgorithm("merge-sort".to_string()))
        );
    }

    #[test]
    fn serde_names_match_catalog_ids() {
        for id in AlgorithmId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn unknown_id_generates_empty_trace() {
        let trace = generate("quick-sort", &RunInput::Sequence(vec![3, 1, 2]));
        assert!(trace.is_empty());
    }

    #[test]
    fn dispatch_by_id() {
        let sorted = generate("heap-sort", &RunInput::Sequence(vec![3, 1, 2]));
        assert_eq!(sorted.last().map(|s| s.kind), Some(StepKind::Sorted));

        let search = generate("a-star", &RunInput::Grid { width: 3, height: 3 });
        assert_eq!(search.last().map(|s| s.kind), Some(StepKind::Found));
    }

    #[test]
    fn mismatched_input_is_empty() {
        let trace = AlgorithmId::AStar
            .generator()
            .run(&RunInput::Sequence(vec![1, 2]));
        assert!(trace.is_empty());

        let trace = AlgorithmId::BubbleSort
            .generator()
            .run(&RunInput::Grid { width: 2, height: 2 });
        assert!(trace.is_empty());
    }

    #[test]
    fn kinds_match_inputs() {
        assert_eq!(AlgorithmId::AStar.kind(), AlgorithmKind::Pathfinding);
        assert_eq!(AlgorithmId::HeapSort.kind(), AlgorithmKind::Sorting);
        assert_eq!(
            RunInput::Grid { width: 1, height: 1 }.kind(),
            AlgorithmKind::Pathfinding
        );
    }
}
