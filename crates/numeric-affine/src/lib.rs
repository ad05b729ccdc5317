//! numeric-affine: a small dense matrix type and 2D affine transforms.
//!
//! `math::Matrix` is a row-major `f64` matrix with a shape fixed at
//! construction. Arithmetic is available both as allocating operations and
//! as in-place forms writing into a pre-shaped result.
//!
//! `affine::AffineTransformParams` holds the map `y = L x + t` with a 2x2
//! linear map `L` and a 2x1 translation `t`, and `affine::transform` applies,
//! inverts and composes such maps.
pub mod affine;
pub mod config;
pub mod error;
pub mod math;

pub use affine::AffineTransformParams;
pub use config::TransformConfig;
pub use error::{MatrixError, Result};
pub use math::{Matrix, MatrixMut};
