//! Applying, inverting and composing affine transforms.
//!
//! These functions write into a caller-provided output and never touch their
//! inputs. The value-returning equivalents live on `AffineTransformParams`
//! (`transform_point`, `inverse`, `then`).

use crate::affine::AffineTransformParams;
use crate::config::TransformConfig;
use crate::error::{MatrixError, Result};
use crate::math::Matrix;

fn check_point(name: &str, mat: &Matrix) -> Result<()> {
    if mat.shape() != (2, 1) {
        return Err(MatrixError::InvalidArgument(format!(
            "{} must be a 2x1 matrix, got {}x{}",
            name,
            mat.nrows(),
            mat.ncols()
        )));
    }
    Ok(())
}

/// `result = atp.linear_map * point + atp.translation`.
///
/// Both `point` and `result` must be 2x1; otherwise `InvalidArgument` is
/// returned and `result` is left as it was.
pub fn apply(atp: &AffineTransformParams, point: &Matrix, result: &mut Matrix) -> Result<()> {
    check_point("point", point)?;
    check_point("result", result)?;

    let mapped = &(&atp.linear_map * point) + &atp.translation;
    result.assign(&mapped)
}

/// Writes the inverse of `atp` into `inv_atp` using the default singular
/// threshold of 1e-20.
///
/// Returns `false` for a singular linear map, in which case `inv_atp` is not
/// modified and must not be used.
pub fn invert(atp: &AffineTransformParams, inv_atp: &mut AffineTransformParams) -> bool {
    invert_with(atp, inv_atp, &TransformConfig::default())
}

/// Like [`invert`], with the singular threshold taken from `config`.
pub fn invert_with(
    atp: &AffineTransformParams,
    inv_atp: &mut AffineTransformParams,
    config: &TransformConfig,
) -> bool {
    let [m00, m01, m10, m11, dx, dy] = atp.coefficients();
    let det = m00 * m11 - m01 * m10;
    if det.abs() < config.singular_threshold {
        log::debug!(
            "linear map is singular (det={:e}, threshold={:e}), not inverting",
            det,
            config.singular_threshold
        );
        return false;
    }

    let i00 = m11 / det;
    let i01 = -m01 / det;
    let i10 = -m10 / det;
    let i11 = m00 / det;

    // inv(atp(x)) == x requires inv.t = -inv.L * atp.t
    let idx = -(dx * i00 + dy * i01);
    let idy = -(dx * i10 + dy * i11);

    *inv_atp = AffineTransformParams::from_coefficients(i00, i01, i10, i11, idx, idy);
    true
}

/// Writes into `atp01` the transform equal to applying `atp0` and then
/// `atp1`, i.e. `atp01(x) == atp1(atp0(x))`.
///
/// Note the multiplication order: the linear map is `atp1.L * atp0.L`, the
/// reverse of the order of application.
pub fn combine(
    atp0: &AffineTransformParams,
    atp1: &AffineTransformParams,
    atp01: &mut AffineTransformParams,
) {
    atp01.linear_map = &atp1.linear_map * &atp0.linear_map;
    atp01.translation = &atp1.translation + &(&atp1.linear_map * &atp0.translation);
}
