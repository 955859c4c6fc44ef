//! Algorithm catalog record.

use algoviz_engine::{AlgorithmId, AlgorithmKind};
use serde::{Deserialize, Serialize};

/// Descriptive metadata for one algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Algorithm {
    /// Catalog id, e.g. `bubble-sort`
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Display category (`Sorting`, `Graph`, `Pathfinding`, ...)
    pub category: String,

    pub description: String,
    pub time_complexity: String,
    pub space_complexity: String,

    /// Newline-separated pseudocode; step `sourceLine`s index into it from 1
    pub pseudo_code: String,
}

impl Algorithm {
    /// The built-in generator for this record, if there is one.
    pub fn generator_id(&self) -> Option<AlgorithmId> {
        self.id.parse().ok()
    }

    /// Input shape a run of this algorithm takes.
    ///
    /// Records without a generator fall back to their category so the run
    /// still gets a sensible (if never animated) input.
    pub fn kind(&self) -> AlgorithmKind {
        match self.generator_id() {
            Some(id) => id.kind(),
            None if self.category.eq_ignore_ascii_case("pathfinding") => AlgorithmKind::Pathfinding,
            None => AlgorithmKind::Sorting,
        }
    }

    /// Pseudocode line by 1-based number.
    pub fn pseudo_code_line(&self, line: u32) -> Option<&str> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        self.pseudo_code.lines().nth(index)
    }
}
