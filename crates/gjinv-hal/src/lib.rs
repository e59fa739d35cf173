#![no_std]
#![forbid(unsafe_code)]

use gjinv_core::{GjError, GjResult};
use gjinv_math::{Matrix, Scalar};

/// Output extent of one pass. `rows` spans y, `cols` spans x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub const fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

/// Execution engine metadata, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchProperties {
    pub engine: &'static str,
    pub workers: usize,
}

/// A per-cell kernel: `(x, y) -> value`. Must not observe other cells of
/// the pass it belongs to.
pub type CellFn<'a, T> = dyn Fn(usize, usize) -> T + Sync + 'a;

/// The thread grid.
/// INVARIANT: `dispatch` returns only after every cell is written. That return
/// is the barrier between consecutive pivot passes.
pub trait GridDispatcher<T: Scalar>: Send + Sync {
    fn properties(&self) -> DispatchProperties;

    /// Evaluate `cell(x, y)` for every coordinate of `grid`, storing the
    /// result at `out[y * grid.cols + x]`. Cells may run in any order.
    fn dispatch(&self, grid: Grid, out: &mut [T], cell: &CellFn<'_, T>) -> GjResult<()>;

    /// Dispatch into a matrix, checking its shape against the grid first.
    fn dispatch_into(&self, grid: Grid, out: &mut Matrix<T>, cell: &CellFn<'_, T>) -> GjResult<()> {
        if out.shape() != (grid.rows, grid.cols) || out.data.len() != grid.cells() {
            return Err(GjError::ShapeMismatch {
                expected: (grid.rows, grid.cols),
                found: out.shape(),
            });
        }
        self.dispatch(grid, &mut out.data, cell)
    }
}
