//! Arithmetic on `Matrix`.
//!
//! Every operation comes in two flavors: an allocating `checked_*` method
//! returning a new matrix, and an `*_into` associated function writing into a
//! caller-provided, correctly shaped result. Shapes are validated before any
//! element of the result is written.
//!
//! The `std::ops` operators delegate to the checked methods and panic on a
//! shape mismatch, the same way slice indexing panics out of bounds.

use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{MatrixError, Result};
use crate::math::Matrix;

impl Matrix {
    fn check_same_shape(op: &'static str, lhs: &Matrix, rhs: &Matrix) -> Result<()> {
        if lhs.shape() != rhs.shape() {
            return Err(MatrixError::mismatch(op, lhs.shape(), rhs.shape()));
        }
        Ok(())
    }

    fn zip_into<F>(
        op: &'static str,
        lhs: &Matrix,
        rhs: &Matrix,
        result: &mut Matrix,
        f: F,
    ) -> Result<()>
    where
        F: Fn(f64, f64) -> f64,
    {
        Self::check_same_shape(op, lhs, rhs)?;
        Self::check_same_shape(op, lhs, result)?;
        for ((out, &a), &b) in result
            .as_mut_slice()
            .iter_mut()
            .zip(lhs.as_slice())
            .zip(rhs.as_slice())
        {
            *out = f(a, b);
        }
        Ok(())
    }

    /// `result = lhs + rhs`, element-wise.
    pub fn add_into(lhs: &Matrix, rhs: &Matrix, result: &mut Matrix) -> Result<()> {
        Self::zip_into("add", lhs, rhs, result, |a, b| a + b)
    }

    /// `result = lhs - rhs`, element-wise.
    pub fn sub_into(lhs: &Matrix, rhs: &Matrix, result: &mut Matrix) -> Result<()> {
        Self::zip_into("sub", lhs, rhs, result, |a, b| a - b)
    }

    /// Hadamard product `result[i][j] = lhs[i][j] * rhs[i][j]`.
    pub fn dot_mul_into(lhs: &Matrix, rhs: &Matrix, result: &mut Matrix) -> Result<()> {
        Self::zip_into("dot_mul", lhs, rhs, result, |a, b| a * b)
    }

    /// Matrix product. `result` must already be `lhs.nrows() x rhs.ncols()`.
    pub fn mul_into(lhs: &Matrix, rhs: &Matrix, result: &mut Matrix) -> Result<()> {
        if lhs.ncols() != rhs.nrows() {
            return Err(MatrixError::mismatch("mul", lhs.shape(), rhs.shape()));
        }
        let out_shape = (lhs.nrows(), rhs.ncols());
        if result.shape() != out_shape {
            return Err(MatrixError::mismatch("mul", out_shape, result.shape()));
        }
        log::trace!(
            "mul {:?} x {:?} -> {:?}",
            lhs.shape(),
            rhs.shape(),
            out_shape
        );

        let (m, n, l) = (lhs.nrows(), lhs.ncols(), rhs.ncols());
        let (a, b) = (lhs.as_slice(), rhs.as_slice());
        let out = result.as_mut_slice();
        for i in 0..m {
            for j in 0..l {
                let mut sum = 0.0;
                for k in 0..n {
                    sum += a[i * n + k] * b[k * l + j];
                }
                out[i * l + j] = sum;
            }
        }
        Ok(())
    }

    /// `result = s * mat`. `result` must have the shape of `mat`.
    pub fn scale_into(mat: &Matrix, s: f64, result: &mut Matrix) -> Result<()> {
        Self::check_same_shape("scale", mat, result)?;
        for (out, &v) in result.as_mut_slice().iter_mut().zip(mat.as_slice()) {
            *out = s * v;
        }
        Ok(())
    }

    pub fn checked_add(&self, rhs: &Matrix) -> Result<Matrix> {
        let mut result = self.clone();
        Self::add_into(self, rhs, &mut result)?;
        Ok(result)
    }

    pub fn checked_sub(&self, rhs: &Matrix) -> Result<Matrix> {
        let mut result = self.clone();
        Self::sub_into(self, rhs, &mut result)?;
        Ok(result)
    }

    pub fn checked_mul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.ncols() != rhs.nrows() {
            return Err(MatrixError::mismatch("mul", self.shape(), rhs.shape()));
        }
        let mut result = Matrix::new(self.nrows(), rhs.ncols())?;
        Self::mul_into(self, rhs, &mut result)?;
        Ok(result)
    }

    pub fn dot_mul(&self, rhs: &Matrix) -> Result<Matrix> {
        let mut result = self.clone();
        Self::dot_mul_into(self, rhs, &mut result)?;
        Ok(result)
    }

    pub fn scaled(&self, s: f64) -> Matrix {
        self.mapv(|v| s * v)
    }
}

fn or_panic(res: Result<Matrix>) -> Matrix {
    match res {
        Ok(m) => m,
        Err(e) => panic!("{}", e),
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl<'a, 'b> $trait<&'b Matrix> for &'a Matrix {
            type Output = Matrix;

            fn $method(self, rhs: &'b Matrix) -> Matrix {
                or_panic(self.$checked(rhs))
            }
        }

        impl $trait<Matrix> for Matrix {
            type Output = Matrix;

            fn $method(self, rhs: Matrix) -> Matrix {
                or_panic(self.$checked(&rhs))
            }
        }

        impl<'b> $trait<&'b Matrix> for Matrix {
            type Output = Matrix;

            fn $method(self, rhs: &'b Matrix) -> Matrix {
                or_panic(self.$checked(rhs))
            }
        }
    };
}

impl_binop!(Add, add, checked_add);
impl_binop!(Sub, sub, checked_sub);
impl_binop!(Mul, mul, checked_mul);

// Scalar-left is the canonical form; matrix-left delegates to it.
impl<'a> Mul<&'a Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &'a Matrix) -> Matrix {
        rhs.scaled(self)
    }
}

impl Mul<Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        self * &rhs
    }
}

impl<'a> Mul<f64> for &'a Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        rhs * self
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        rhs * &self
    }
}

impl<'a> Neg for &'a Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.mapv(|v| -v)
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        -&self
    }
}
