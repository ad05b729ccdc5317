use thiserror::Error;

/// Errors raised by matrix and transform operations.
///
/// All of these describe a caller mistake (wrong shape, bad index) and are
/// reported before any element is written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("invalid dimension ({rows}, {cols}): rows and cols must be at least one")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("dimension mismatch in {op}: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, MatrixError>;

impl MatrixError {
    pub(crate) fn mismatch(op: &'static str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        MatrixError::DimensionMismatch { op, lhs, rhs }
    }
}
