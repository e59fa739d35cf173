use crate::Scalar;
use gjinv_core::{GjError, GjResult};
use zeroize::Zeroize;

use alloc::vec::Vec;

/// Dense row-major matrix addressed by (row, column).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix<T: Scalar> {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<T>,
}

impl<T: Scalar> Matrix<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: alloc::vec![T::ZERO; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::ONE;
        }
        m
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> GjResult<Self> {
        if data.len() != rows * cols {
            return Err(GjError::InvalidShape { rows, cols });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from nested rows. Ragged or empty input is rejected.
    pub fn from_rows(rows: &[Vec<T>]) -> GjResult<Self> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(GjError::InvalidShape { rows: rows.len(), cols });
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(GjError::InvalidShape { rows: rows.len(), cols: row.len() });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { rows: rows.len(), cols, data })
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return alloc::vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(|r| r.to_vec()).collect()
    }

    pub fn get(&self, r: usize, c: usize) -> Option<T> {
        if r >= self.rows || c >= self.cols { return None; }
        Some(self.data[r * self.cols + c])
    }

    pub fn set(&mut self, r: usize, c: usize, val: T) {
        if r < self.rows && c < self.cols {
            self.data[r * self.cols + c] = val;
        }
    }

    /// Unchecked-by-contract read for grid kernels. Panics on out-of-range.
    #[inline(always)]
    pub fn at(&self, r: usize, c: usize) -> T {
        self.data[r * self.cols + c]
    }

    pub fn row(&self, r: usize) -> &[T] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Matrix product (self * rhs).
    pub fn matmul(&self, rhs: &Self) -> GjResult<Self> {
        if self.cols != rhs.rows {
            return Err(GjError::ShapeMismatch {
                expected: (self.cols, rhs.cols),
                found: rhs.shape(),
            });
        }

        let mut out = Self::new(self.rows, rhs.cols);
        for r in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[r * self.cols + k];
                if a == T::ZERO { continue; }
                let src = rhs.row(k);
                let dst = &mut out.data[r * rhs.cols..(r + 1) * rhs.cols];
                for (d, &s) in dst.iter_mut().zip(src) {
                    *d = *d + a * s;
                }
            }
        }
        Ok(out)
    }

    /// Largest element-wise absolute difference, `None` on shape mismatch.
    pub fn max_abs_diff(&self, other: &Self) -> Option<T> {
        if self.shape() != other.shape() { return None; }
        let mut worst = T::ZERO;
        for (&a, &b) in self.data.iter().zip(&other.data) {
            let d = (a - b).abs();
            // NaN never compares greater; surface it explicitly.
            if !d.is_finite() { return Some(d); }
            if d > worst { worst = d; }
        }
        Some(worst)
    }

    pub fn approx_eq(&self, other: &Self, tol: T) -> bool {
        match self.max_abs_diff(other) {
            Some(d) => d.is_finite() && d <= tol,
            None => false,
        }
    }
}

impl<T: Scalar> Zeroize for Matrix<T> {
    // Wipes contents but keeps the shape so the buffer stays reusable.
    fn zeroize(&mut self) {
        self.data.as_mut_slice().zeroize();
    }
}
