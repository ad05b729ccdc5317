use anyhow::{anyhow, Context, Result};

use numeric_affine::affine::{apply, combine, invert};
use numeric_affine::{AffineTransformParams, Matrix, TransformConfig};

fn main() -> Result<()> {
    env_logger::init();

    let config = TransformConfig::from_json(r#"{ "tolerance": 1e-9 }"#)
        .context("Failed to load example config")?;

    // Move one unit along x, then turn a quarter circle about the origin.
    let shift = AffineTransformParams::translate(1.0, 0.0);
    let turn = AffineTransformParams::rotate(std::f64::consts::FRAC_PI_2);

    let mut shift_then_turn = AffineTransformParams::identity();
    combine(&shift, &turn, &mut shift_then_turn);
    log::info!("combined transform:\n{}", shift_then_turn);

    let origin = Matrix::point(0.0, 0.0);
    let mut moved = Matrix::point(0.0, 0.0);
    apply(&shift_then_turn, &origin, &mut moved)?;
    println!("origin maps to:\n{}", moved);

    let mut undo = AffineTransformParams::identity();
    if !invert(&shift_then_turn, &mut undo) {
        return Err(anyhow!("combined transform is singular"));
    }

    let mut back = Matrix::point(0.0, 0.0);
    apply(&undo, &moved, &mut back)?;
    if !back.approx_eq_with(&origin, &config) {
        return Err(anyhow!("round trip drifted:\n{}", back));
    }
    println!("inverse brings it back to:\n{}", back);

    // Summing parameters is aggregation, not composition.
    let sum = &shift + &turn;
    println!("parameter sum (not a composition):\n{}", sum);

    Ok(())
}
