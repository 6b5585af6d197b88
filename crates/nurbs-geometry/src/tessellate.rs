//! Sampling utilities for converting curves to discrete point sequences.

use nurbs_core::{NurbsError, Result, Tolerance};
use nurbs_math::Point;

use crate::curve::ParametricCurve;

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Segments are always split at least this many times, so a midpoint that
/// happens to sit on the chord does not end subdivision early.
const MIN_DEPTH: u32 = 2;

/// Evaluate `count` equally spaced parameters over the curve domain,
/// endpoints included.
pub fn sample_uniform<const D: usize, C: ParametricCurve<D> + ?Sized>(
    curve: &C,
    count: usize,
) -> Result<Vec<Point<D>>> {
    let (t_min, t_max) = domain_of(curve)?;
    let params: Vec<f64> = match count {
        0 => Vec::new(),
        1 => vec![t_min],
        _ => {
            let last = count - 1;
            (0..count)
                .map(|i| {
                    if i == last {
                        t_max
                    } else {
                        t_min + (t_max - t_min) * i as f64 / last as f64
                    }
                })
                .collect()
        }
    };
    curve.points_at(&params)
}

/// Convert a curve to a polyline using adaptive subdivision.
///
/// Segments are split while the curve's midpoint deviates from the chord
/// midpoint by more than `tolerance.linear`, until the parameter step drops
/// below `tolerance.parametric` or the depth limit is reached.
///
/// # Errors
/// `InvalidParameter` for a non-positive tolerance or a curve without a
/// domain; evaluation errors are propagated.
pub fn curve_to_polyline<const D: usize, C: ParametricCurve<D> + ?Sized>(
    curve: &C,
    tolerance: Tolerance,
) -> Result<Vec<Point<D>>> {
    if !(tolerance.linear > 0.0 && tolerance.linear.is_finite()) {
        return Err(NurbsError::InvalidParameter(format!(
            "linear tolerance must be positive and finite, got {}",
            tolerance.linear
        )));
    }
    let (t_min, t_max) = domain_of(curve)?;
    let p_min = curve.point_at(t_min)?;
    let p_max = curve.point_at(t_max)?;

    let mut points = vec![p_min];
    subdivide_curve(
        curve,
        (t_min, p_min),
        (t_max, p_max),
        tolerance,
        &mut points,
        0,
    )?;
    Ok(points)
}

fn domain_of<const D: usize, C: ParametricCurve<D> + ?Sized>(curve: &C) -> Result<(f64, f64)> {
    curve
        .domain()
        .ok_or_else(|| NurbsError::InvalidParameter("curve has no parameter domain".into()))
}

fn subdivide_curve<const D: usize, C: ParametricCurve<D> + ?Sized>(
    curve: &C,
    (t0, p0): (f64, Point<D>),
    (t1, p1): (f64, Point<D>),
    tolerance: Tolerance,
    points: &mut Vec<Point<D>>,
    depth: u32,
) -> Result<()> {
    if depth >= MAX_DEPTH {
        log::trace!("subdivision depth limit reached on [{t0}, {t1}]");
        points.push(p1);
        return Ok(());
    }

    let t_mid = (t0 + t1) * 0.5;
    let p_mid = curve.point_at(t_mid)?;

    // Chord midpoint
    let chord_mid = (p0 + p1) * 0.5;
    let deviation = (p_mid - chord_mid).norm();

    let splittable = !tolerance.parametric_eq(t0, t1);
    if splittable && (depth < MIN_DEPTH || !tolerance.is_zero(deviation)) {
        subdivide_curve(curve, (t0, p0), (t_mid, p_mid), tolerance, points, depth + 1)?;
        subdivide_curve(curve, (t_mid, p_mid), (t1, p1), tolerance, points, depth + 1)?;
    } else {
        points.push(p1);
    }
    Ok(())
}
