#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
use alloc::boxed::Box;
use alloc::sync::Arc;

use log::{debug, info, warn};

use gjinv_core::{GjError, GjResult, AUGMENT_FACTOR, PING_PONG_BUFFERS};
use gjinv_hal::{DispatchProperties, GridDispatcher};
use gjinv_kernel::{augment_init_into, extract_result, row_eliminate_into};
use gjinv_math::{Matrix, Scalar};
use gjinv_mem::{BufferLease, BufferPool};

pub mod verify;
pub use verify::residual;

/// Pivot acceptance threshold.
///
/// The comparison is on absolute magnitude and is not scaled by the input:
/// a well-conditioned matrix whose entries are all tiny (`1e-13 * I` in f64,
/// `[[1e-7]]` in f32) is rejected by the default epsilon. Lower `epsilon`
/// (or use [`InverterConfig::exact`]) for such inputs.
#[derive(Debug, Clone, Copy)]
pub struct InverterConfig<T: Scalar> {
    /// A pivot with |value| <= epsilon marks the matrix uninvertible.
    pub epsilon: T,
}

impl<T: Scalar> Default for InverterConfig<T> {
    fn default() -> Self {
        Self { epsilon: T::DEFAULT_EPSILON }
    }
}

impl<T: Scalar> InverterConfig<T> {
    /// Only an exactly-zero pivot is rejected.
    pub fn exact() -> Self {
        Self { epsilon: T::ZERO }
    }
}

/// Drives augment, N pivot passes and extraction over a grid dispatcher.
pub struct Inverter<T: Scalar> {
    dispatcher: Box<dyn GridDispatcher<T>>,
    config: InverterConfig<T>,
}

impl<T: Scalar> Inverter<T> {
    pub fn new(dispatcher: Box<dyn GridDispatcher<T>>, config: InverterConfig<T>) -> Self {
        let props = dispatcher.properties();
        info!("[SOLVER] engine: {} ({} workers), epsilon {:?}", props.engine, props.workers, config.epsilon);
        Self { dispatcher, config }
    }

    pub fn config(&self) -> &InverterConfig<T> { &self.config }

    pub fn properties(&self) -> DispatchProperties { self.dispatcher.properties() }

    pub fn invert(&self, matrix: &Matrix<T>) -> GjResult<Matrix<T>> {
        if matrix.rows == 0 || !matrix.is_square() || matrix.data.len() != matrix.rows * matrix.cols {
            return Err(GjError::InvalidShape { rows: matrix.rows, cols: matrix.cols });
        }
        let n = matrix.rows;
        let pool = BufferPool::new(PING_PONG_BUFFERS, n, n * AUGMENT_FACTOR);

        let mut aug = pool.lease()?;
        augment_init_into(&*self.dispatcher, matrix, n, &mut aug)?;

        let aug = self.run_pivots(&pool, aug, n)?;
        let inv = extract_result(&*self.dispatcher, &aug, n)?;
        if !inv.is_finite() {
            warn!("[SOLVER] {}x{} inverse overflowed", n, n);
            return Err(GjError::NonFinite);
        }

        info!("[SOLVER] inverted {}x{}", n, n);
        Ok(inv)
    }

    /// Runs all pivot passes over an existing n x 2n augmented matrix.
    pub fn eliminate(&self, aug: &Matrix<T>, n: usize) -> GjResult<Matrix<T>> {
        let expected = (n, n * AUGMENT_FACTOR);
        if aug.shape() != expected || aug.data.len() != expected.0 * expected.1 {
            return Err(GjError::ShapeMismatch { expected, found: aug.shape() });
        }
        let pool = BufferPool::new(PING_PONG_BUFFERS, expected.0, expected.1);
        let mut cur = pool.lease()?;
        cur.data.copy_from_slice(&aug.data);

        let done = self.run_pivots(&pool, cur, n)?;
        Ok(done.to_matrix())
    }

    fn run_pivots(
        &self,
        pool: &Arc<BufferPool<T>>,
        mut cur: BufferLease<T>,
        n: usize,
    ) -> GjResult<BufferLease<T>> {
        for r in 0..n {
            self.check_pivot(&cur, r)?;

            let mut next = pool.lease()?;
            row_eliminate_into(&*self.dispatcher, &cur, n, r, &mut next)?;
            debug!("[PIVOT] {}/{} settled", r + 1, n);

            // Previous step's buffer goes back to the pool.
            cur = next;
        }
        Ok(cur)
    }

    fn check_pivot(&self, aug: &Matrix<T>, r: usize) -> GjResult<()> {
        let pivot = aug.at(r, r);
        if !pivot.is_finite() || pivot.abs() <= self.config.epsilon {
            warn!("[PIVOT] row {} diagonal {:?} within {:?} of zero", r, pivot, self.config.epsilon);
            return Err(GjError::Uninvertible { pivot: r });
        }
        Ok(())
    }
}
