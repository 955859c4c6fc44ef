//! Step model shared by every generator and by replay.
//!
//! A [`Trace`] is the ordered list of [`Step`]s one generator run produced.
//! Generators append through a [`TraceBuilder`]; once `finish()` is called
//! the trace is read-only and fully determines what replay can reconstruct.

use serde::{Deserialize, Serialize};

/// Element type of a sorting subject sequence.
pub type Value = i64;

/// What a step does.
///
/// `Unknown` never comes out of a generator. It only exists so traces from a
/// newer producer still deserialize; replay treats it as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Two positions are being compared
    Compare,
    /// Two positions exchanged values
    Swap,
    /// Positions were written with new values
    Overwrite,
    /// Positions are being pointed at (current minimum, open-set entry, ...)
    Highlight,
    /// Positions reached their final value
    Sorted,
    /// A grid cell was expanded
    Visit,
    /// Terminal step of a search
    Found,
    /// Kind this build does not know about
    #[serde(other)]
    Unknown,
}

impl StepKind {
    /// Kinds that carry post-operation values.
    pub const fn mutates(self) -> bool {
        matches!(self, StepKind::Swap | StepKind::Overwrite)
    }
}

/// Algorithm-specific payload. Opaque to sequence replay.
///
/// Untagged so it serializes as a plain object; variants are tried in
/// declaration order, widest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Auxiliary {
    /// Path from start to goal as flattened cell indices
    Path { path: Vec<usize> },
    /// Scores assigned to a grid cell
    Score { x: usize, y: usize, g: usize, f: usize },
    /// A grid cell
    Cell { x: usize, y: usize },
}

/// One event in a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub kind: StepKind,
    /// Positions this step concerns
    pub indices: Vec<usize>,
    /// Post-operation values, positionally matching `indices`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
    pub description: String,
    /// 1-based line in the algorithm's pseudocode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<Auxiliary>,
}

impl Step {
    /// A step with no values, line or payload.
    pub fn new(kind: StepKind, indices: Vec<usize>, description: impl Into<String>) -> Self {
        Self {
            kind,
            indices,
            values: None,
            description: description.into(),
            source_line: None,
            auxiliary: None,
        }
    }

    /// A `swap` over `[i, j]` carrying the values now at `i` and `j`.
    pub fn swap(i: usize, j: usize, at_i: Value, at_j: Value, description: impl Into<String>) -> Self {
        Self::new(StepKind::Swap, vec![i, j], description).with_values(vec![at_i, at_j])
    }

    /// A `sorted` step for a single index.
    pub fn sorted(index: usize, description: impl Into<String>) -> Self {
        Self::new(StepKind::Sorted, vec![index], description)
    }

    pub fn with_values(mut self, values: Vec<Value>) -> Self {
        self.values = Some(values);
        self
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.source_line = Some(line);
        self
    }

    pub fn with_auxiliary(mut self, auxiliary: Auxiliary) -> Self {
        self.auxiliary = Some(auxiliary);
        self
    }

    /// Check the arity rules for this step's kind.
    pub fn is_well_formed(&self) -> bool {
        match (self.kind, &self.values) {
            (StepKind::Swap, None) => self.indices.len() == 2,
            (StepKind::Swap, Some(values)) => self.indices.len() == 2 && values.len() == 2,
            (StepKind::Overwrite, Some(values)) => values.len() == self.indices.len(),
            (StepKind::Overwrite, None) => true,
            (StepKind::Sorted, values) => values.is_none(),
            _ => true,
        }
    }
}

/// An immutable, ordered run of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at a position, if any.
    pub fn get(&self, position: usize) -> Option<&Step> {
        self.steps.get(position)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// How many steps of a kind the trace holds.
    pub fn count(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind == kind).count()
    }

    /// Every step satisfies [`Step::is_well_formed`].
    pub fn is_well_formed(&self) -> bool {
        self.steps.iter().all(Step::is_well_formed)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl FromIterator<Step> for Trace {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Append-only recorder owned by a generator while it runs.
#[derive(Debug, Default)]
pub struct TraceBuilder {
    steps: Vec<Step>,
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            steps: Vec::with_capacity(capacity),
        }
    }

    /// Append a step.
    pub fn push(&mut self, step: Step) {
        debug_assert!(step.is_well_formed(), "malformed {:?} step", step.kind);
        debug_assert!(step.kind != StepKind::Unknown);
        self.steps.push(step);
    }

    /// Steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Seal the trace.
    pub fn finish(self) -> Trace {
        Trace { steps: self.steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_serialization() {
        let step = Step::swap(0, 1, 3, 5, "Swapping 5 and 3").at_line(7);

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"kind\":\"swap\""));
        assert!(json.contains("\"sourceLine\":7"));
        assert!(!json.contains("auxiliary"));

        let parsed: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, step);
    }

    #[test]
    fn unknown_kind_deserializes() {
        let json = r#"{"kind":"rotate","indices":[1],"description":"from the future"}"#;
        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(step.kind, StepKind::Unknown);
        assert_eq!(step.values, None);
    }

    #[test]
    fn auxiliary_picks_widest_variant() {
        let score: Auxiliary = serde_json::from_str(r#"{"x":1,"y":2,"g":3,"f":7}"#).unwrap();
        assert_eq!(score, Auxiliary::Score { x: 1, y: 2, g: 3, f: 7 });

        let cell: Auxiliary = serde_json::from_str(r#"{"x":1,"y":2}"#).unwrap();
        assert_eq!(cell, Auxiliary::Cell { x: 1, y: 2 });
    }

    #[test]
    fn swap_arity_checked() {
        assert!(Step::swap(0, 1, 1, 2, "").is_well_formed());
        assert!(Step::new(StepKind::Swap, vec![0, 1], "").is_well_formed());
        assert!(!Step::new(StepKind::Swap, vec![0], "").is_well_formed());
        assert!(!Step::new(StepKind::Swap, vec![0, 1], "")
            .with_values(vec![1])
            .is_well_formed());
    }

    #[test]
    fn sorted_never_carries_values() {
        assert!(Step::sorted(3, "").is_well_formed());
        assert!(!Step::sorted(3, "").with_values(vec![1]).is_well_formed());
    }

    #[test]
    fn builder_seals_in_order() {
        let mut builder = TraceBuilder::new();
        builder.push(Step::new(StepKind::Compare, vec![0, 1], "a"));
        builder.push(Step::sorted(1, "b"));
        assert_eq!(builder.len(), 2);

        let trace = builder.finish();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.get(0).map(|s| s.kind), Some(StepKind::Compare));
        assert_eq!(trace.last().map(|s| s.kind), Some(StepKind::Sorted));
        assert_eq!(trace.count(StepKind::Sorted), 1);
    }

    #[test]
    fn trace_serializes_as_array() {
        let trace: Trace = vec![Step::sorted(0, "done")].into_iter().collect();
        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.starts_with('['));
    }
}
