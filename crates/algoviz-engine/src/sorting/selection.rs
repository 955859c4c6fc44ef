//! Selection sort.

use crate::step::{Step, StepKind, Trace, TraceBuilder, Value};

mod line {
    pub const OUTER: u32 = 3;
    pub const ASSUME_MIN: u32 = 4;
    pub const COMPARE: u32 = 6;
    pub const NEW_MIN: u32 = 7;
    pub const SWAP: u32 = 10;
}

/// Record a full selection sort of `input`.
///
/// Each round highlights the minimum candidate, compares it against every
/// later index, re-highlights whenever a smaller value turns up, and swaps
/// only if the minimum moved. Index `i` is marked sorted every round,
/// including the last one whose scan is empty.
pub fn generate(input: &[Value]) -> Trace {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut trace = TraceBuilder::with_capacity(n * n + 3 * n);

    for i in 0..n {
        let mut min_idx = i;
        trace.push(
            Step::new(
                StepKind::Highlight,
                vec![min_idx],
                format!("Assuming minimum is at index {} ({})", min_idx, arr[min_idx]),
            )
            .at_line(line::ASSUME_MIN),
        );

        for j in i + 1..n {
            trace.push(
                Step::new(
                    StepKind::Compare,
                    vec![min_idx, j],
                    format!("Comparing current min ({}) with {}", arr[min_idx], arr[j]),
                )
                .at_line(line::COMPARE),
            );

            if arr[j] < arr[min_idx] {
                min_idx = j;
                trace.push(
                    Step::new(
                        StepKind::Highlight,
                        vec![min_idx],
                        format!("Found new minimum at index {} ({})", min_idx, arr[min_idx]),
                    )
                    .at_line(line::NEW_MIN),
                );
            }
        }

        if min_idx != i {
            let displaced = arr[i];
            arr.swap(i, min_idx);
            trace.push(
                Step::swap(
                    i,
                    min_idx,
                    arr[i],
                    arr[min_idx],
                    format!("Swapping {} with new minimum {}", displaced, arr[i]),
                )
                .at_line(line::SWAP),
            );
        }

        trace.push(Step::sorted(i, format!("Index {i} is now sorted")).at_line(line::OUTER));
    }

    let trace = trace.finish();
    tracing::debug!(len = n, steps = trace.len(), "selection sort trace generated");
    trace
}
