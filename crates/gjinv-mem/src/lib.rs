#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
use alloc::sync::Arc;
use alloc::vec::Vec;
use spin::Mutex;
use zeroize::Zeroize;
use core::ops::{Deref, DerefMut};

use gjinv_core::{GjError, GjResult};
use gjinv_math::{Matrix, Scalar};

/// Fixed set of equally-shaped matrix buffers.
///
/// Pivot passes read one buffer and write another; leases are handed back
/// (wiped) when a pass no longer needs its input.
pub struct BufferPool<T: Scalar> {
    rows: usize,
    cols: usize,
    pool: Mutex<Vec<Matrix<T>>>,
}

pub struct BufferLease<T: Scalar> {
    buffer: Matrix<T>,
    allocator: Arc<BufferPool<T>>,
}

impl<T: Scalar> BufferPool<T> {
    pub fn new(capacity: usize, rows: usize, cols: usize) -> Arc<Self> {
        let mut pool = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            pool.push(Matrix::new(rows, cols));
        }
        Arc::new(Self { rows, cols, pool: Mutex::new(pool) })
    }

    pub fn alloc(self: &Arc<Self>) -> Option<BufferLease<T>> {
        let buffer = self.pool.lock().pop()?;
        Some(BufferLease { buffer, allocator: self.clone() })
    }

    /// Like `alloc`, but exhaustion is an error.
    pub fn lease(self: &Arc<Self>) -> GjResult<BufferLease<T>> {
        self.alloc().ok_or(GjError::PoolExhausted)
    }

    fn release(&self, buffer: Matrix<T>) {
        self.pool.lock().push(buffer);
    }

    pub fn available(&self) -> usize {
        self.pool.lock().len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl<T: Scalar> BufferLease<T> {
    /// Copies the contents out; the buffer itself still returns to the pool.
    pub fn to_matrix(&self) -> Matrix<T> {
        self.buffer.clone()
    }
}

impl<T: Scalar> Deref for BufferLease<T> {
    type Target = Matrix<T>;
    fn deref(&self) -> &Self::Target { &self.buffer }
}

impl<T: Scalar> DerefMut for BufferLease<T> {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.buffer }
}

impl<T: Scalar> Drop for BufferLease<T> {
    fn drop(&mut self) {
        let mut buffer = core::mem::take(&mut self.buffer);
        // Reshaped through DerefMut; not interchangeable with pooled buffers.
        if buffer.shape() != self.allocator.shape() { return; }
        buffer.zeroize();
        self.allocator.release(buffer);
    }
}
