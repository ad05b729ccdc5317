//! Integration tests for affine transform parameters and the
//! apply / invert / combine operations.

use std::f64::consts::FRAC_PI_2;

use approx::assert_abs_diff_eq;
use numeric_affine::affine::{apply, combine, invert};
use numeric_affine::{AffineTransformParams, Matrix, MatrixError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOL: f64 = 1e-9;

fn random_transform(rng: &mut StdRng) -> AffineTransformParams {
    AffineTransformParams::from_coefficients(
        rng.gen_range(-5.0..5.0),
        rng.gen_range(-5.0..5.0),
        rng.gen_range(-5.0..5.0),
        rng.gen_range(-5.0..5.0),
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
    )
}

fn rotate_90() -> AffineTransformParams {
    AffineTransformParams::from_coefficients(0.0, -1.0, 1.0, 0.0, 0.0, 0.0)
}

// ---------------------------------------------------------------------------
// Construction and field access
// ---------------------------------------------------------------------------

#[test]
fn from_matrices_validates_shapes() {
    let bad_linear = Matrix::ones(3, 2).unwrap();
    let translation = Matrix::point(1.0, 2.0);
    assert!(matches!(
        AffineTransformParams::from_matrices(&bad_linear, &translation),
        Err(MatrixError::InvalidArgument(_))
    ));

    let linear = Matrix::identity(2).unwrap();
    let bad_translation = Matrix::ones(1, 2).unwrap();
    assert!(matches!(
        AffineTransformParams::from_matrices(&linear, &bad_translation),
        Err(MatrixError::InvalidArgument(_))
    ));

    let atp = AffineTransformParams::from_matrices(&linear, &translation).unwrap();
    assert_eq!(atp.coefficients(), [1.0, 0.0, 0.0, 1.0, 1.0, 2.0]);
}

#[test]
fn from_matrices_copies_its_inputs() {
    let mut linear = Matrix::identity(2).unwrap();
    let translation = Matrix::point(0.0, 0.0);
    let atp = AffineTransformParams::from_matrices(&linear, &translation).unwrap();
    linear.set(0, 0, 42.0).unwrap();
    assert_eq!(atp.linear_map()[(0, 0)], 1.0);
}

#[test]
fn default_is_identity_with_fixed_shapes() {
    let atp = AffineTransformParams::default();
    assert_eq!(atp.linear_map().shape(), (2, 2));
    assert_eq!(atp.translation().shape(), (2, 1));
    assert_eq!(atp.apply_point(3.0, -4.0), (3.0, -4.0));
}

#[test]
fn setters_reject_wrong_shape_and_keep_value() {
    let mut atp = AffineTransformParams::translate(1.0, 2.0);
    let before = atp.clone();

    assert!(matches!(
        atp.set_linear_map(&Matrix::ones(2, 3).unwrap()),
        Err(MatrixError::InvalidArgument(_))
    ));
    assert!(matches!(
        atp.set_translation(&Matrix::ones(2, 2).unwrap()),
        Err(MatrixError::InvalidArgument(_))
    ));
    assert_eq!(atp, before);

    atp.set_linear_map(&Matrix::from_rows(&[&[2.0, 0.0], &[0.0, 3.0]]).unwrap())
        .unwrap();
    atp.set_translation(&Matrix::point(-1.0, -1.0)).unwrap();
    assert_eq!(atp.coefficients(), [2.0, 0.0, 0.0, 3.0, -1.0, -1.0]);
}

#[test]
fn clone_does_not_share_storage() {
    let a = AffineTransformParams::translate(1.0, 1.0);
    let mut b = a.clone();
    b.translation_mut()[(0, 0)] = 10.0;
    assert_eq!(a.translation()[(0, 0)], 1.0);
    assert_eq!(b.translation()[(0, 0)], 10.0);
}

// ---------------------------------------------------------------------------
// Apply
// ---------------------------------------------------------------------------

#[test]
fn apply_computes_linear_map_then_offset() {
    let atp = AffineTransformParams::from_coefficients(1.0, 2.0, 3.0, 4.0, 10.0, 20.0);
    let p = Matrix::point(1.0, -1.0);
    let mut out = Matrix::point(0.0, 0.0);
    apply(&atp, &p, &mut out).unwrap();
    assert_eq!(out.as_slice(), &[9.0, 19.0]);
    assert_eq!(atp.apply_point(1.0, -1.0), (9.0, 19.0));
    assert_eq!(atp.transform_point(&p).unwrap(), out);
}

#[test]
fn apply_rejects_non_point_shapes() {
    let atp = AffineTransformParams::identity();
    let mut out = Matrix::point(0.0, 0.0);
    let bad = Matrix::ones(3, 1).unwrap();
    assert!(matches!(
        apply(&atp, &bad, &mut out),
        Err(MatrixError::InvalidArgument(_))
    ));

    let mut bad_out = Matrix::new(2, 2).unwrap();
    assert!(matches!(
        apply(&atp, &Matrix::point(1.0, 1.0), &mut bad_out),
        Err(MatrixError::InvalidArgument(_))
    ));
    assert!(bad_out.iter().all(|&v| v == 0.0));
}

// ---------------------------------------------------------------------------
// Invert
// ---------------------------------------------------------------------------

#[test]
fn inverse_round_trips_random_points() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut checked = 0;
    while checked < 200 {
        let t = random_transform(&mut rng);
        if t.determinant().abs() < 1e-3 {
            continue;
        }
        let mut t_inv = AffineTransformParams::identity();
        assert!(invert(&t, &mut t_inv));

        let p = Matrix::point(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
        let mut forward = Matrix::point(0.0, 0.0);
        let mut back = Matrix::point(0.0, 0.0);
        apply(&t, &p, &mut forward).unwrap();
        apply(&t_inv, &forward, &mut back).unwrap();

        let scale = 1.0 + p.max().abs().max(p.min().abs());
        assert_abs_diff_eq!(back[(0, 0)], p[(0, 0)], epsilon = TOL * scale * 1e3);
        assert_abs_diff_eq!(back[(1, 0)], p[(1, 0)], epsilon = TOL * scale * 1e3);
        checked += 1;
    }
}

#[test]
fn inverse_of_simple_transform_is_exact() {
    let t = AffineTransformParams::from_coefficients(2.0, 0.0, 0.0, 4.0, 6.0, -8.0);
    let inv = t.inverse().expect("transform should be invertible");
    assert_eq!(inv.coefficients(), [0.5, 0.0, 0.0, 0.25, -3.0, 2.0]);

    let (fx, fy) = t.apply_point(1.5, -2.5);
    let (x, y) = inv.apply_point(fx, fy);
    assert_abs_diff_eq!(x, 1.5, epsilon = TOL);
    assert_abs_diff_eq!(y, -2.5, epsilon = TOL);
}

#[test]
fn composing_with_inverse_gives_identity() {
    let t = AffineTransformParams::from_coefficients(1.2, 0.1, -0.4, 0.9, 4.0, -7.0);
    let inv = t.inverse().unwrap();
    assert!(t.then(&inv).approx_eq(&AffineTransformParams::identity(), TOL));
    assert!(inv.then(&t).approx_eq(&AffineTransformParams::identity(), TOL));
}

#[test]
fn singular_linear_map_is_not_inverted() {
    let t = AffineTransformParams::from_coefficients(1.0, 2.0, 2.0, 4.0, 3.0, 3.0);
    let mut out = AffineTransformParams::translate(7.0, 7.0);
    assert!(!invert(&t, &mut out));
    assert_eq!(out, AffineTransformParams::translate(7.0, 7.0));
    assert!(t.inverse().is_none());
}

#[test]
fn tiny_but_nonzero_determinant_is_still_invertible() {
    let t = AffineTransformParams::scale(1e-8, 1e-8);
    assert!(t.inverse().is_some());
    let zero = AffineTransformParams::scale(1e-11, 1e-11);
    assert!(zero.inverse().is_none());
}

// ---------------------------------------------------------------------------
// Combine
// ---------------------------------------------------------------------------

#[test]
fn combine_translate_then_rotate() {
    let t0 = AffineTransformParams::translate(1.0, 0.0);
    let t1 = rotate_90();
    let mut t01 = AffineTransformParams::identity();
    combine(&t0, &t1, &mut t01);

    let origin = Matrix::point(0.0, 0.0);
    let mut direct = Matrix::point(0.0, 0.0);
    apply(&t01, &origin, &mut direct).unwrap();

    let mut step = Matrix::point(0.0, 0.0);
    let mut sequential = Matrix::point(0.0, 0.0);
    apply(&t0, &origin, &mut step).unwrap();
    apply(&t1, &step, &mut sequential).unwrap();

    assert!(direct.approx_eq(&sequential, TOL));
    assert_abs_diff_eq!(direct[(0, 0)], 0.0, epsilon = TOL);
    assert_abs_diff_eq!(direct[(1, 0)], 1.0, epsilon = TOL);
}

#[test]
fn combine_multiplies_linear_maps_in_reverse_order() {
    let t0 = AffineTransformParams::scale(2.0, 1.0);
    let t1 = rotate_90();
    let combined = t0.then(&t1);

    let expected = t1.linear_map() * t0.linear_map();
    let wrong_order = t0.linear_map() * t1.linear_map();
    assert_eq!(combined.linear_map(), &expected);
    assert_ne!(combined.linear_map(), &wrong_order);

    // (1, 0) -> scale -> (2, 0) -> rotate -> (0, 2)
    let (x, y) = combined.apply_point(1.0, 0.0);
    assert_abs_diff_eq!(x, 0.0, epsilon = TOL);
    assert_abs_diff_eq!(y, 2.0, epsilon = TOL);
}

#[test]
fn combine_matches_sequential_application() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let t0 = random_transform(&mut rng);
        let t1 = random_transform(&mut rng);
        let t01 = t0.then(&t1);
        let (x, y) = (rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));

        let (sx, sy) = t0.apply_point(x, y);
        let (ex, ey) = t1.apply_point(sx, sy);
        let (cx, cy) = t01.apply_point(x, y);
        assert_abs_diff_eq!(cx, ex, epsilon = 1e-9 * (1.0 + ex.abs()));
        assert_abs_diff_eq!(cy, ey, epsilon = 1e-9 * (1.0 + ey.abs()));
    }
}

// ---------------------------------------------------------------------------
// Parameter sum
// ---------------------------------------------------------------------------

#[test]
fn sum_is_elementwise() {
    let a = AffineTransformParams::from_coefficients(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    let b = AffineTransformParams::from_coefficients(0.5, 0.5, 0.5, 0.5, -1.0, -2.0);
    let sum = &a + &b;
    assert_eq!(sum.coefficients(), [1.5, 2.5, 3.5, 4.5, 4.0, 4.0]);

    let mut out = AffineTransformParams::identity();
    AffineTransformParams::add_into(&a, &b, &mut out).unwrap();
    assert_eq!(out, sum);
    assert_eq!(a.clone() + b.clone(), sum);
}

#[test]
fn sum_is_not_composition() {
    let t0 = AffineTransformParams::translate(1.0, 0.0);
    let t1 = rotate_90();
    let sum = &t0 + &t1;
    let composed = t0.then(&t1);
    assert!(!sum.approx_eq(&composed, TOL));
}

#[test]
fn averaging_estimates_with_sum_and_scale() {
    let a = AffineTransformParams::translate(2.0, 4.0);
    let b = AffineTransformParams::translate(4.0, 0.0);
    let mean = (&a + &b).scaled(0.5);
    assert_eq!(mean.coefficients(), [1.0, 0.0, 0.0, 1.0, 3.0, 2.0]);
}

#[test]
fn rotate_constructor_matches_quarter_turn() {
    let r = AffineTransformParams::rotate(FRAC_PI_2);
    assert!(r.approx_eq(&rotate_90(), 1e-12));
}
