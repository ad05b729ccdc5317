use std::ops::{Deref, Index, IndexMut};

use crate::error::Result;
use crate::math::Matrix;

/// Mutable access to the elements of a matrix whose shape is locked.
///
/// Elements may be read and written freely, but the matrix itself can only
/// be replaced through `assign`, which rejects a different shape.
#[derive(Debug)]
pub struct MatrixMut<'a> {
    inner: &'a mut Matrix,
}

impl<'a> MatrixMut<'a> {
    pub(crate) fn new(inner: &'a mut Matrix) -> Self {
        Self { inner }
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.inner.set(row, col, value)
    }

    pub fn assign(&mut self, other: &Matrix) -> Result<()> {
        self.inner.assign(other)
    }

    pub fn fill(&mut self, value: f64) {
        self.inner.fill(value);
    }

    pub fn set_zero(&mut self) {
        self.inner.set_zero();
    }

    pub fn set_ones(&mut self) {
        self.inner.set_ones();
    }
}

impl Deref for MatrixMut<'_> {
    type Target = Matrix;

    fn deref(&self) -> &Matrix {
        &*self.inner
    }
}

impl Index<(usize, usize)> for MatrixMut<'_> {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.inner[index]
    }
}

impl IndexMut<(usize, usize)> for MatrixMut<'_> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.inner[index]
    }
}
