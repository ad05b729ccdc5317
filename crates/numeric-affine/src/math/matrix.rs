use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice::Iter;

use serde::{Deserialize, Serialize};

use crate::config::TransformConfig;
use crate::error::{MatrixError, Result};

/// Dense row-major matrix of `f64`.
///
/// The shape is fixed at construction and both dimensions are at least one.
/// Element `(row, col)` is stored at `row * cols + col`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix", into = "RawMatrix")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Creates a zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::from_elem(rows, cols, 0.0)
    }

    pub fn from_elem(rows: usize, cols: usize, value: f64) -> Result<Self> {
        let len = element_count(rows, cols)?;
        Ok(Self {
            data: vec![value; len],
            rows,
            cols,
        })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::from_elem(rows, cols, 0.0)
    }

    pub fn ones(rows: usize, cols: usize) -> Result<Self> {
        Self::from_elem(rows, cols, 1.0)
    }

    /// Wraps a row-major buffer. The buffer length must equal `rows * cols`.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        if data.len() != element_count(rows, cols)? {
            return Err(MatrixError::InvalidDimension { rows, cols });
        }
        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix from equally sized rows.
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        let len = element_count(nrows, ncols)?;

        let mut data = Vec::with_capacity(len);
        for row in rows {
            if row.len() != ncols {
                return Err(MatrixError::mismatch("from_rows", (1, ncols), (1, row.len())));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: nrows,
            cols: ncols,
        })
    }

    /// `n x n` identity. Fails for `n == 0`.
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::new(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        Ok(m)
    }

    // Callers guarantee a valid shape for `data`.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert!(element_count(rows, cols).ok() == Some(data.len()));
        Self { data, rows, cols }
    }

    /// A 2D point as a 2x1 column.
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            data: vec![x, y],
            rows: 2,
            cols: 1,
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of stored elements.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_index(row, col)?;
        Ok(self.data[self.offset(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check_index(row, col)?;
        let offset = self.offset(row, col);
        self.data[offset] = value;
        Ok(())
    }

    pub fn row_slice(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row index out of bounds");
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    /// Copies `other` into `self`. Shapes must already agree; a matrix is
    /// never resized in place.
    pub fn assign(&mut self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(MatrixError::mismatch("assign", self.shape(), other.shape()));
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    pub fn fill(&mut self, value: f64) {
        for v in self.data.iter_mut() {
            *v = value;
        }
    }

    pub fn set_zero(&mut self) {
        self.fill(0.0);
    }

    pub fn set_ones(&mut self) {
        self.fill(1.0);
    }

    /// Largest element. Folds from negative infinity so a single element is
    /// always returned as is.
    pub fn max(&self) -> f64 {
        self.data
            .iter()
            .fold(f64::NEG_INFINITY, |acc, &v| if v > acc { v } else { acc })
    }

    /// Smallest element, folding from positive infinity.
    pub fn min(&self) -> f64 {
        self.data
            .iter()
            .fold(f64::INFINITY, |acc, &v| if v < acc { v } else { acc })
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.data[self.offset(row, col)]);
            }
        }
        Matrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    pub fn mapv<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// True when the shapes agree and every pair of elements differs by at
    /// most `tol`.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    /// `approx_eq` with the tolerance taken from `config`.
    pub fn approx_eq_with(&self, other: &Matrix, config: &TransformConfig) -> bool {
        self.approx_eq(other, config.tolerance)
    }
}

// Storage length for a shape. Zero dimensions and shapes whose element count
// overflows `usize` are both rejected.
fn element_count(rows: usize, cols: usize) -> Result<usize> {
    match rows.checked_mul(cols) {
        Some(len) if rows > 0 && cols > 0 => Ok(len),
        _ => Err(MatrixError::InvalidDimension { rows, cols }),
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index {:?} out of range for {}x{} matrix",
            index,
            self.rows,
            self.cols
        );
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index {:?} out of range for {}x{} matrix",
            index,
            self.rows,
            self.cols
        );
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

/// Debug dump: one row per line, elements separated by spaces.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line = self
                .row_slice(row)
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

// Wire form for serde; converted back through `from_shape_vec` so a
// deserialized matrix always satisfies the shape invariants.
#[derive(Serialize, Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = MatrixError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        Matrix::from_shape_vec((raw.rows, raw.cols), raw.data)
    }
}

impl From<Matrix> for RawMatrix {
    fn from(m: Matrix) -> Self {
        RawMatrix {
            rows: m.rows,
            cols: m.cols,
            data: m.data,
        }
    }
}
