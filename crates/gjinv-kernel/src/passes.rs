use gjinv_core::{GjError, GjResult};
use gjinv_hal::GridDispatcher;
use gjinv_math::{Matrix, Scalar};

use crate::cells::{augment_init_cell, extract_result_cell, row_eliminate_cell};
use crate::desc::{KernelDesc, AUGMENT_INIT, EXTRACT_RESULT, ROW_ELIMINATE};

fn expect_shape<T: Scalar>(m: &Matrix<T>, rows: usize, cols: usize) -> GjResult<()> {
    if m.shape() != (rows, cols) || m.data.len() != rows * cols {
        return Err(GjError::ShapeMismatch { expected: (rows, cols), found: m.shape() });
    }
    Ok(())
}

fn output_for<T: Scalar>(desc: &KernelDesc, n: usize) -> Matrix<T> {
    let grid = desc.grid(n);
    Matrix::new(grid.rows, grid.cols)
}

/// [input | I] into `out` (n x 2n).
pub fn augment_init_into<T: Scalar>(
    dispatcher: &dyn GridDispatcher<T>,
    input: &Matrix<T>,
    n: usize,
    out: &mut Matrix<T>,
) -> GjResult<()> {
    if n == 0 || !input.is_square() || input.rows != n {
        return Err(GjError::InvalidShape { rows: input.rows, cols: input.cols });
    }
    let grid = AUGMENT_INIT.grid(n);
    dispatcher.dispatch_into(grid, out, &|x, y| augment_init_cell(input, n, x, y))
}

pub fn augment_init<T: Scalar>(
    dispatcher: &dyn GridDispatcher<T>,
    input: &Matrix<T>,
    n: usize,
) -> GjResult<Matrix<T>> {
    let mut out = output_for(&AUGMENT_INIT, n);
    augment_init_into(dispatcher, input, n, &mut out)?;
    Ok(out)
}

/// Pivot pass `r`: reads `prev`, writes `next`. The two never alias.
pub fn row_eliminate_into<T: Scalar>(
    dispatcher: &dyn GridDispatcher<T>,
    prev: &Matrix<T>,
    n: usize,
    r: usize,
    next: &mut Matrix<T>,
) -> GjResult<()> {
    let grid = ROW_ELIMINATE.grid(n);
    expect_shape(prev, grid.rows, grid.cols)?;
    if r >= n {
        return Err(GjError::PivotOutOfRange { pivot: r, size: n });
    }
    dispatcher.dispatch_into(grid, next, &|x, y| row_eliminate_cell(prev, r, x, y))
}

pub fn row_eliminate<T: Scalar>(
    dispatcher: &dyn GridDispatcher<T>,
    prev: &Matrix<T>,
    n: usize,
    r: usize,
) -> GjResult<Matrix<T>> {
    let mut next = output_for(&ROW_ELIMINATE, n);
    row_eliminate_into(dispatcher, prev, n, r, &mut next)?;
    Ok(next)
}

pub fn extract_result_into<T: Scalar>(
    dispatcher: &dyn GridDispatcher<T>,
    aug: &Matrix<T>,
    n: usize,
    out: &mut Matrix<T>,
) -> GjResult<()> {
    let (rows, cols) = ROW_ELIMINATE.stage.extent(n);
    expect_shape(aug, rows, cols)?;
    let grid = EXTRACT_RESULT.grid(n);
    dispatcher.dispatch_into(grid, out, &|x, y| extract_result_cell(aug, n, x, y))
}

/// Columns [n, 2n) of the final augmented matrix.
pub fn extract_result<T: Scalar>(
    dispatcher: &dyn GridDispatcher<T>,
    aug: &Matrix<T>,
    n: usize,
) -> GjResult<Matrix<T>> {
    let mut out = output_for(&EXTRACT_RESULT, n);
    extract_result_into(dispatcher, aug, n, &mut out)?;
    Ok(out)
}
