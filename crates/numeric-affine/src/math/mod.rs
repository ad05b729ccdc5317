//! Dense matrix type used by the affine transform code.
//!
//! `Matrix` is a row-major `f64` buffer with a shape fixed at construction.
//! Arithmetic lives in `ops`, and `MatrixMut` hands out element access
//! without allowing the shape to change.
pub mod matrix;
pub mod ops;
pub mod view;

pub use matrix::Matrix;
pub use view::MatrixMut;
