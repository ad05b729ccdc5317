use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::affine::transform;
use crate::config::TransformConfig;
use crate::error::{MatrixError, Result};
use crate::math::{Matrix, MatrixMut};

/// Parameters of the 2D affine map `y = linear_map * x + translation`.
///
/// `linear_map` is always 2x2 and `translation` always 2x1. Both matrices are
/// owned by value, so cloning a transform deep-copies them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParams")]
pub struct AffineTransformParams {
    pub(crate) linear_map: Matrix,
    pub(crate) translation: Matrix,
}

impl AffineTransformParams {
    /// The identity transform.
    pub fn new() -> Self {
        Self::identity()
    }

    pub fn identity() -> Self {
        Self::from_coefficients(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Builds `[[m00, m01], [m10, m11]]` with translation `(dx, dy)`.
    pub fn from_coefficients(m00: f64, m01: f64, m10: f64, m11: f64, dx: f64, dy: f64) -> Self {
        Self {
            linear_map: Matrix::from_parts(2, 2, vec![m00, m01, m10, m11]),
            translation: Matrix::point(dx, dy),
        }
    }

    /// Copies the given matrices in after checking they are 2x2 and 2x1.
    pub fn from_matrices(linear_map: &Matrix, translation: &Matrix) -> Result<Self> {
        check_linear_map(linear_map)?;
        check_translation(translation)?;
        Ok(Self {
            linear_map: linear_map.clone(),
            translation: translation.clone(),
        })
    }

    pub fn translate(dx: f64, dy: f64) -> Self {
        Self::from_coefficients(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    /// Counter-clockwise rotation about the origin.
    pub fn rotate(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_coefficients(c, -s, s, c, 0.0, 0.0)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::from_coefficients(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    pub fn linear_map(&self) -> &Matrix {
        &self.linear_map
    }

    pub fn translation(&self) -> &Matrix {
        &self.translation
    }

    /// Element access to the linear map. The 2x2 shape cannot be changed
    /// through the returned view.
    pub fn linear_map_mut(&mut self) -> MatrixMut<'_> {
        MatrixMut::new(&mut self.linear_map)
    }

    pub fn translation_mut(&mut self) -> MatrixMut<'_> {
        MatrixMut::new(&mut self.translation)
    }

    /// Replaces the linear map. A matrix that is not 2x2 is rejected and
    /// the current value is kept.
    pub fn set_linear_map(&mut self, linear_map: &Matrix) -> Result<()> {
        if let Err(e) = check_linear_map(linear_map) {
            log::debug!("rejected linear map of shape {:?}", linear_map.shape());
            return Err(e);
        }
        self.linear_map.assign(linear_map)
    }

    /// Replaces the translation. A matrix that is not 2x1 is rejected and
    /// the current value is kept.
    pub fn set_translation(&mut self, translation: &Matrix) -> Result<()> {
        if let Err(e) = check_translation(translation) {
            log::debug!("rejected translation of shape {:?}", translation.shape());
            return Err(e);
        }
        self.translation.assign(translation)
    }

    /// `[m00, m01, m10, m11, dx, dy]`.
    pub fn coefficients(&self) -> [f64; 6] {
        let l = self.linear_map.as_slice();
        let t = self.translation.as_slice();
        [l[0], l[1], l[2], l[3], t[0], t[1]]
    }

    pub fn determinant(&self) -> f64 {
        let l = &self.linear_map;
        l[(0, 0)] * l[(1, 1)] - l[(0, 1)] * l[(1, 0)]
    }

    /// Maps the point `(x, y)`.
    pub fn apply_point(&self, x: f64, y: f64) -> (f64, f64) {
        let [m00, m01, m10, m11, dx, dy] = self.coefficients();
        (m00 * x + m01 * y + dx, m10 * x + m11 * y + dy)
    }

    /// Maps a 2x1 point, returning a new 2x1 matrix.
    pub fn transform_point(&self, point: &Matrix) -> Result<Matrix> {
        let mut result = Matrix::point(0.0, 0.0);
        transform::apply(self, point, &mut result)?;
        Ok(result)
    }

    /// The inverse transform, or `None` when the linear map is singular.
    pub fn inverse(&self) -> Option<Self> {
        self.inverse_with(&TransformConfig::default())
    }

    pub fn inverse_with(&self, config: &TransformConfig) -> Option<Self> {
        let mut inv = Self::identity();
        if transform::invert_with(self, &mut inv, config) {
            Some(inv)
        } else {
            None
        }
    }

    /// The transform that applies `self` first and `next` afterwards.
    pub fn then(&self, next: &AffineTransformParams) -> Self {
        let mut out = Self::identity();
        transform::combine(self, next, &mut out);
        out
    }

    /// Multiplies every parameter by `s`. Together with `+` this is meant for
    /// averaging estimates, not for building geometric transforms.
    pub fn scaled(&self, s: f64) -> Self {
        Self {
            linear_map: self.linear_map.scaled(s),
            translation: self.translation.scaled(s),
        }
    }

    /// In-place form of `+`: `result = lhs + rhs` parameter-wise.
    pub fn add_into(
        lhs: &AffineTransformParams,
        rhs: &AffineTransformParams,
        result: &mut AffineTransformParams,
    ) -> Result<()> {
        Matrix::add_into(&lhs.linear_map, &rhs.linear_map, &mut result.linear_map)?;
        Matrix::add_into(&lhs.translation, &rhs.translation, &mut result.translation)
    }

    pub fn approx_eq(&self, other: &AffineTransformParams, tol: f64) -> bool {
        self.linear_map.approx_eq(&other.linear_map, tol)
            && self.translation.approx_eq(&other.translation, tol)
    }

    pub fn approx_eq_with(&self, other: &AffineTransformParams, config: &TransformConfig) -> bool {
        self.approx_eq(other, config.tolerance)
    }
}

impl Default for AffineTransformParams {
    fn default() -> Self {
        Self::new()
    }
}

fn check_linear_map(mat: &Matrix) -> Result<()> {
    if mat.shape() != (2, 2) {
        return Err(MatrixError::InvalidArgument(format!(
            "a linear map must be a 2x2 matrix, got {}x{}",
            mat.nrows(),
            mat.ncols()
        )));
    }
    Ok(())
}

fn check_translation(mat: &Matrix) -> Result<()> {
    if mat.shape() != (2, 1) {
        return Err(MatrixError::InvalidArgument(format!(
            "a translation must be a 2x1 matrix, got {}x{}",
            mat.nrows(),
            mat.ncols()
        )));
    }
    Ok(())
}

/// Parameter-wise sum of two transforms.
///
/// This is NOT composition: the result has no meaning as "one transform
/// followed by the other". Use [`AffineTransformParams::then`] or
/// [`transform::combine`] for that. The sum exists for numerical aggregation
/// such as averaging several estimates of the same transform.
impl<'a, 'b> Add<&'b AffineTransformParams> for &'a AffineTransformParams {
    type Output = AffineTransformParams;

    fn add(self, rhs: &'b AffineTransformParams) -> AffineTransformParams {
        AffineTransformParams {
            linear_map: &self.linear_map + &rhs.linear_map,
            translation: &self.translation + &rhs.translation,
        }
    }
}

impl Add for AffineTransformParams {
    type Output = AffineTransformParams;

    fn add(self, rhs: AffineTransformParams) -> AffineTransformParams {
        &self + &rhs
    }
}

impl fmt::Display for AffineTransformParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "linear map:")?;
        write!(f, "{}", self.linear_map)?;
        writeln!(f, "translation:")?;
        write!(f, "{}", self.translation)
    }
}

#[derive(Deserialize)]
struct RawParams {
    linear_map: Matrix,
    translation: Matrix,
}

impl TryFrom<RawParams> for AffineTransformParams {
    type Error = MatrixError;

    fn try_from(raw: RawParams) -> Result<Self> {
        AffineTransformParams::from_matrices(&raw.linear_map, &raw.translation)
    }
}
