//! Knot vector utilities for B-spline/NURBS evaluation.
//!
//! Spans are half-open `[knots[i], knots[i+1])`, except the closing span
//! (the last non-empty one), which also contains its upper bound so that the
//! terminal parameter value is covered.

use nurbs_core::{NurbsError, Result};

/// Whether every knot is finite and no knot is smaller than its predecessor.
pub fn is_non_decreasing(knots: &[f64]) -> bool {
    knots.iter().all(|k| k.is_finite()) && knots.windows(2).all(|w| w[0] <= w[1])
}

/// Index of the closing span: the largest `i` with `knots[i] < knots[i+1]`.
///
/// Falls back to `knots.len() - 2` when every span is empty. Returns `None`
/// for fewer than two knots.
pub fn closing_span(knots: &[f64]) -> Option<usize> {
    let last = knots.len().checked_sub(2)?;
    Some(
        (0..=last)
            .rev()
            .find(|&i| knots[i] < knots[i + 1])
            .unwrap_or(last),
    )
}

/// Find the span index `i` containing parameter `u`.
///
/// Returns the `i` with `knots[i] <= u < knots[i+1]`, or the closing span when
/// `u` equals the last knot. Returns `None` when `u` is NaN or lies outside
/// `[knots[0], knots[m]]`. The knot vector must be non-decreasing.
pub fn find_span(knots: &[f64], u: f64) -> Option<usize> {
    let closing = closing_span(knots)?;
    let (first, last) = (knots[0], knots[knots.len() - 1]);
    if !(u >= first && u <= last) {
        return None;
    }

    // Every span after the closing one is empty, so this only holds at the last knot.
    if u >= knots[closing + 1] {
        return Some(closing);
    }

    // Binary search: first knot strictly greater than u, minus one.
    Some(knots.partition_point(|&k| k <= u) - 1)
}

/// Number of knots exactly equal to `u`.
pub fn multiplicity(knots: &[f64], u: f64) -> usize {
    knots.iter().filter(|&&k| k == u).count()
}

/// An ordered sequence of knot values.
#[derive(Debug, Clone, PartialEq)]
pub struct KnotVector(Vec<f64>);

impl KnotVector {
    /// Build a knot vector, rejecting non-finite values, decreasing
    /// sequences and vectors with fewer than two knots.
    pub fn new(knots: Vec<f64>) -> Result<Self> {
        if knots.len() < 2 {
            return Err(NurbsError::InvalidKnotVector(format!(
                "need at least 2 knots, got {}",
                knots.len()
            )));
        }
        if let Some(k) = knots.iter().find(|k| !k.is_finite()) {
            return Err(NurbsError::InvalidKnotVector(format!(
                "knot value {k} is not finite"
            )));
        }
        if let Some(i) = knots.windows(2).position(|w| w[0] > w[1]) {
            return Err(NurbsError::InvalidKnotVector(format!(
                "knots[{}] = {} is greater than knots[{}] = {}",
                i,
                knots[i],
                i + 1,
                knots[i + 1]
            )));
        }
        Ok(Self(knots))
    }

    /// Store the values as given, without any checks.
    pub fn new_unchecked(knots: Vec<f64>) -> Self {
        Self(knots)
    }

    /// Open-uniform (clamped) knot vector on `[0, 1]` for `count` control
    /// points of the given degree.
    ///
    /// The first and last knots have multiplicity `degree + 1`, so the curve
    /// interpolates its end control points.
    pub fn clamped_uniform(count: usize, degree: usize) -> Result<Self> {
        if count <= degree {
            return Err(NurbsError::InvalidDegree(format!(
                "degree {degree} needs at least {} control points, got {count}",
                degree.saturating_add(1)
            )));
        }
        let segments = count - degree;
        let mut knots = vec![0.0; degree + 1];
        knots.extend((1..segments).map(|i| i as f64 / segments as f64));
        knots.resize(count + degree + 1, 1.0);
        Ok(Self(knots))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    pub fn is_non_decreasing(&self) -> bool {
        is_non_decreasing(&self.0)
    }

    /// Number of basis functions of the given degree, `len - degree - 1`.
    pub fn basis_count(&self, degree: usize) -> usize {
        self.0.len().saturating_sub(degree.saturating_add(1))
    }

    /// Valid parameter range `[knots[p], knots[m-p]]` for degree `p`.
    pub fn domain(&self, degree: usize) -> Option<(f64, f64)> {
        let m = self.0.len().checked_sub(1)?;
        if m == 0 || degree.saturating_mul(2) > m {
            return None;
        }
        Some((self.0[degree], self.0[m - degree]))
    }

    pub fn closing_span(&self) -> Option<usize> {
        closing_span(&self.0)
    }

    pub fn find_span(&self, u: f64) -> Option<usize> {
        find_span(&self.0, u)
    }

    pub fn multiplicity(&self, u: f64) -> usize {
        multiplicity(&self.0, u)
    }
}

impl AsRef<[f64]> for KnotVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
