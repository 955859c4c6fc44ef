//! Heap sort.

use crate::step::{Step, StepKind, Trace, TraceBuilder, Value};

mod line {
    pub const BUILD: u32 = 6;
    pub const EXTRACT: u32 = 9;
    pub const EXTRACT_SWAP: u32 = 10;
    pub const DONE: u32 = 12;
    pub const SIFT_COMPARE: u32 = 24;
    pub const SIFT_SWAP: u32 = 25;
}

/// Working array plus the trace being recorded.
struct HeapRun {
    arr: Vec<Value>,
    trace: TraceBuilder,
}

impl HeapRun {
    /// Sift `root` down within the first `heap_size` elements.
    ///
    /// Only emits when a child beats the root: a `compare` over
    /// `[root, largest]` and the resulting `swap`, then recurses.
    fn sift_down(&mut self, heap_size: usize, root: usize) {
        let mut largest = root;
        let left = 2 * root + 1;
        let right = 2 * root + 2;

        if left < heap_size && self.arr[left] > self.arr[largest] {
            largest = left;
        }
        if right < heap_size && self.arr[right] > self.arr[largest] {
            largest = right;
        }

        if largest != root {
            self.trace.push(
                Step::new(
                    StepKind::Compare,
                    vec![root, largest],
                    format!("Comparing element at {root} and {largest}"),
                )
                .at_line(line::SIFT_COMPARE),
            );

            self.arr.swap(root, largest);
            self.trace.push(
                Step::swap(
                    root,
                    largest,
                    self.arr[root],
                    self.arr[largest],
                    format!("Swapping {} and {}", self.arr[largest], self.arr[root]),
                )
                .at_line(line::SIFT_SWAP),
            );

            self.sift_down(heap_size, largest);
        }
    }
}

/// Record a full heap sort of `input`.
///
/// Builds a max-heap bottom-up (one `highlight` per top-level heapify),
/// then repeatedly moves the root to the heap boundary, marks the boundary
/// sorted and sifts the reduced heap. Ends with `sorted [0]`.
pub fn generate(input: &[Value]) -> Trace {
    let n = input.len();
    let mut run = HeapRun {
        arr: input.to_vec(),
        trace: TraceBuilder::new(),
    };

    for i in (0..n / 2).rev() {
        run.trace.push(
            Step::new(
                StepKind::Highlight,
                vec![i],
                format!("Building heap: heapifying at index {i}"),
            )
            .at_line(line::BUILD),
        );
        run.sift_down(n, i);
    }

    for i in (1..n).rev() {
        run.trace.push(
            Step::new(
                StepKind::Compare,
                vec![0, i],
                format!("Extracting max element, swapping root with index {i}"),
            )
            .at_line(line::EXTRACT),
        );

        run.arr.swap(0, i);
        let (root, boundary) = (run.arr[0], run.arr[i]);
        run.trace.push(
            Step::swap(0, i, root, boundary, format!("Moved {boundary} to final position"))
                .at_line(line::EXTRACT_SWAP),
        );
        run.trace.push(
            Step::sorted(i, format!("Element at index {i} is now in its final sorted position"))
                .at_line(line::EXTRACT_SWAP),
        );

        run.sift_down(i, 0);
    }

    if n > 0 {
        run.trace
            .push(Step::sorted(0, "Array is now fully sorted").at_line(line::DONE));
    }

    let trace = run.trace.finish();
    tracing::debug!(len = n, steps = trace.len(), "heap sort trace generated");
    trace
}
