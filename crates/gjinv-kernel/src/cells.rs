//! Per-cell kernels. Each computes one output value from read-only inputs;
//! `x` is the column and `y` the row of the cell being produced.
//!
//! Coordinates are not validated here. A dispatch must cover exactly the
//! grid of the matching [`KernelDesc`](crate::KernelDesc).

use gjinv_math::{Matrix, Scalar};

/// Left half copies the input, right half is the identity.
#[inline]
pub fn augment_init_cell<T: Scalar>(input: &Matrix<T>, n: usize, x: usize, y: usize) -> T {
    if x >= n {
        return if x - n == y { T::ONE } else { T::ZERO };
    }
    input.at(y, x)
}

/// One Gauss-Jordan step for pivot `r`, reading only the previous matrix.
///
/// The pivot row is divided by its own column-`r` entry. Every other row
/// subtracts the multiple of the (not yet normalized) pivot row that clears
/// its column-`r` entry. Rows already zero in column `r` pass through.
///
/// A zero `aug(r, r)` is not handled here: the driver must reject it first.
#[inline]
pub fn row_eliminate_cell<T: Scalar>(aug: &Matrix<T>, r: usize, x: usize, y: usize) -> T {
    let v = aug.at(y, x);
    let d = aug.at(y, r);
    if d == T::ZERO {
        return v;
    }
    if y == r {
        return v / d;
    }
    v - d * aug.at(r, x) / aug.at(r, r)
}

/// Right half of the augmented matrix.
#[inline]
pub fn extract_result_cell<T: Scalar>(aug: &Matrix<T>, n: usize, x: usize, y: usize) -> T {
    aug.at(y, x + n)
}
