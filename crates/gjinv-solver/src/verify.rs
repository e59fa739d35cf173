use gjinv_core::{GjError, GjResult};
use gjinv_math::{Matrix, Scalar};

/// Worst deviation of `m * inv` and `inv * m` from the identity.
pub fn residual<T: Scalar>(m: &Matrix<T>, inv: &Matrix<T>) -> GjResult<T> {
    if !m.is_square() || m.shape() != inv.shape() {
        return Err(GjError::ShapeMismatch { expected: m.shape(), found: inv.shape() });
    }
    let id = Matrix::identity(m.rows);

    let mut worst = T::ZERO;
    for product in [m.matmul(inv)?, inv.matmul(m)?] {
        let d = product
            .max_abs_diff(&id)
            .ok_or(GjError::ShapeMismatch { expected: id.shape(), found: product.shape() })?;
        if !d.is_finite() { return Err(GjError::NonFinite); }
        if d > worst { worst = d; }
    }
    Ok(worst)
}
