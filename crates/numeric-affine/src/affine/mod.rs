//! 2D affine transforms: a 2x2 linear map plus a 2x1 translation.
pub mod params;
pub mod transform;

pub use params::AffineTransformParams;
pub use transform::{apply, combine, invert, invert_with};
