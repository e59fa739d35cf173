#![no_std]
#[cfg(feature = "std")]
extern crate std;

/// Width multiplier of the augmented matrix: [A | I] is N x (2N).
pub const AUGMENT_FACTOR: usize = 2;

/// Buffers needed for read-old/write-new pivot passes.
pub const PING_PONG_BUFFERS: usize = 2;

/// The three passes of a grid inversion, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Stage {
    AugmentInit = 0x01,
    RowEliminate = 0x02,
    ExtractResult = 0x03,
}

impl Stage {
    pub const fn name(self) -> &'static str {
        match self {
            Stage::AugmentInit => "augment-init",
            Stage::RowEliminate => "row-eliminate",
            Stage::ExtractResult => "extract-result",
        }
    }

    /// Output grid as (rows, cols) for a matrix of size `n`.
    pub const fn extent(self, n: usize) -> (usize, usize) {
        match self {
            Stage::AugmentInit | Stage::RowEliminate => (n, n * AUGMENT_FACTOR),
            Stage::ExtractResult => (n, n),
        }
    }
}

pub type GjResult<T> = Result<T, GjError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GjError {
    /// Input is not a non-empty square matrix, or rows are ragged.
    InvalidShape { rows: usize, cols: usize },
    /// A buffer does not match the grid it is paired with.
    ShapeMismatch { expected: (usize, usize), found: (usize, usize) },
    PivotOutOfRange { pivot: usize, size: usize },
    /// Pivot diagonal is zero (or within epsilon of zero).
    Uninvertible { pivot: usize },
    NonFinite,
    PoolExhausted,
}

impl core::fmt::Display for GjError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GjError::InvalidShape { rows, cols } => {
                write!(f, "invalid input shape {}x{}", rows, cols)
            }
            GjError::ShapeMismatch { expected, found } => write!(
                f,
                "buffer shape mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            GjError::PivotOutOfRange { pivot, size } => {
                write!(f, "pivot {} out of range for size {}", pivot, size)
            }
            GjError::Uninvertible { pivot } => {
                write!(f, "uninvertible matrix (zero pivot at row {})", pivot)
            }
            _ => write!(f, "{:?}", self),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GjError {}
