//! Bubble sort.

use crate::step::{Step, StepKind, Trace, TraceBuilder, Value};

/// Pseudocode lines referenced by the trace.
mod line {
    pub const COMPARE: u32 = 6;
    pub const SWAP: u32 = 7;
    pub const PASS_DONE: u32 = 11;
    pub const DONE: u32 = 12;
}

/// Record a full bubble sort of `input`.
///
/// Pass `i` compares every adjacent pair below `n - i - 1` and then marks
/// `n - i - 1` sorted. No early exit: an already sorted input still emits
/// every compare. A closing `sorted [0]` is always appended for non-empty
/// input, even though the last pass already covered it.
pub fn generate(input: &[Value]) -> Trace {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut trace = TraceBuilder::with_capacity(n * n + 1);

    for i in 0..n {
        for j in 0..n - i - 1 {
            trace.push(
                Step::new(
                    StepKind::Compare,
                    vec![j, j + 1],
                    format!(
                        "Comparing elements at indices {} ({}) and {} ({})",
                        j,
                        arr[j],
                        j + 1,
                        arr[j + 1]
                    ),
                )
                .at_line(line::COMPARE),
            );

            if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
                trace.push(
                    Step::swap(
                        j,
                        j + 1,
                        arr[j],
                        arr[j + 1],
                        format!("Swapping {} and {} since {} > {}", arr[j + 1], arr[j], arr[j + 1], arr[j]),
                    )
                    .at_line(line::SWAP),
                );
            }
        }

        let settled = n - i - 1;
        trace.push(
            Step::sorted(settled, format!("Element at index {settled} is now in its sorted position"))
                .at_line(line::PASS_DONE),
        );
    }

    if n > 0 {
        trace.push(Step::sorted(0, "Sorting complete").at_line(line::DONE));
    }

    let trace = trace.finish();
    tracing::debug!(len = n, steps = trace.len(), "bubble sort trace generated");
    trace
}
