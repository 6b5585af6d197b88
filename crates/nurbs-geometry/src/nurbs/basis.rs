//! B-spline basis functions via the Cox-de Boor recurrence.
//!
//! `N_{i,p}(u) = a * N_{i,p-1}(u) + b * N_{i+1,p-1}(u)` with
//! `a = (u - t_i) / (t_{i+p} - t_i)` and `b = (t_{i+p+1} - u) / (t_{i+p+1} - t_{i+1})`.
//! A term whose denominator is exactly zero (repeated knots) is dropped, and
//! its branch is not evaluated.
//!
//! Two forms are provided. [`basis_function`] and [`all_basis_functions`]
//! evaluate the recurrence directly for any index. [`nonzero_basis_functions`]
//! locates the span containing `u` and builds only the `p + 1` functions that
//! can be non-zero there. Both produce the same values on non-decreasing
//! knot vectors.

use nurbs_core::{NurbsError, Result};

use super::knot::{closing_span, find_span};

/// Evaluate the basis function `N_{i,p}` at parameter `u`.
///
/// # Arguments
/// * `i` - Basis function index
/// * `p` - Degree
/// * `u` - Parameter value
/// * `knots` - The knot vector
///
/// # Errors
/// `IndexOutOfRange` when `knots[i + p + 1]` does not exist.
pub fn basis_function(i: usize, p: usize, u: f64, knots: &[f64]) -> Result<f64> {
    let closing = check_index(i, p, knots)?;
    Ok(cox_de_boor(i, p, u, knots, closing))
}

/// Evaluate `N_{i,p}` at every parameter in `us`, preserving order.
pub fn basis_function_batch(i: usize, p: usize, us: &[f64], knots: &[f64]) -> Result<Vec<f64>> {
    let closing = check_index(i, p, knots)?;
    Ok(us
        .iter()
        .map(|&u| cox_de_boor(i, p, u, knots, closing))
        .collect())
}

/// Evaluate every basis function of degree `p` at `u`, in index order.
///
/// Returns `len(knots) - p - 1` values (none if the knot vector is too short),
/// most of them zero outside the local support of `u`.
pub fn all_basis_functions(p: usize, u: f64, knots: &[f64]) -> Vec<f64> {
    let n = knots.len().saturating_sub(p.saturating_add(1));
    let Some(closing) = closing_span(knots) else {
        return Vec::new();
    };
    (0..n).map(|i| cox_de_boor(i, p, u, knots, closing)).collect()
}

/// The basis functions that can be non-zero at a parameter value.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalBasis {
    /// Index of the first function in `values`.
    pub first: usize,
    /// `N_{first,p}(u)`, `N_{first+1,p}(u)`, ...
    pub values: Vec<f64>,
}

impl LocalBasis {
    /// Value of `N_{i,p}(u)`; zero for indices outside the window.
    pub fn get(&self, i: usize) -> f64 {
        i.checked_sub(self.first)
            .and_then(|offset| self.values.get(offset))
            .copied()
            .unwrap_or(0.0)
    }

    /// `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(offset, &v)| (self.first + offset, v))
    }
}

/// Compute the basis functions of degree `p` that can be non-zero at `u`.
///
/// Finds the span `s` containing `u` by binary search, then runs the
/// triangular recurrence over indices `max(0, s-p)..=min(s, n-1)` only.
/// Returns `None` when `u` is outside the knot range (or NaN) or when the
/// knot vector has no basis functions of degree `p`. The knot vector must be
/// non-decreasing.
pub fn nonzero_basis_functions(p: usize, u: f64, knots: &[f64]) -> Option<LocalBasis> {
    if knots.len() < p.saturating_add(2) {
        return None;
    }
    let span = find_span(knots, u)?;

    let mut first = span;
    let mut values = vec![1.0];

    for k in 1..=p {
        // N_{j,k} exists for j + k + 1 <= m.
        let lo = span.saturating_sub(k);
        let hi = span.min(knots.len() - k - 2);

        let lower = |j: usize| {
            j.checked_sub(first)
                .and_then(|offset| values.get(offset))
                .copied()
                .unwrap_or(0.0)
        };

        let next: Vec<f64> = (lo..=hi)
            .map(|j| {
                let mut value = 0.0;
                let denom1 = knots[j + k] - knots[j];
                if denom1 != 0.0 {
                    value += (u - knots[j]) / denom1 * lower(j);
                }
                let denom2 = knots[j + k + 1] - knots[j + 1];
                if denom2 != 0.0 {
                    value += (knots[j + k + 1] - u) / denom2 * lower(j + 1);
                }
                value
            })
            .collect();

        first = lo;
        values = next;
    }

    Some(LocalBasis { first, values })
}

/// Same output as [`all_basis_functions`], computed through
/// [`nonzero_basis_functions`]. The knot vector must be non-decreasing.
pub fn all_basis_functions_local(p: usize, u: f64, knots: &[f64]) -> Vec<f64> {
    let mut all = vec![0.0; knots.len().saturating_sub(p.saturating_add(1))];
    if let Some(local) = nonzero_basis_functions(p, u, knots) {
        for (i, v) in local.iter() {
            all[i] = v;
        }
    }
    all
}

fn check_index(i: usize, p: usize, knots: &[f64]) -> Result<usize> {
    let needed = i.saturating_add(p).saturating_add(1);
    match closing_span(knots) {
        Some(closing) if needed < knots.len() => Ok(closing),
        _ => Err(NurbsError::IndexOutOfRange(format!(
            "N_{{{i},{p}}} needs knots[{needed}], but the knot vector has {} knots",
            knots.len()
        ))),
    }
}

fn cox_de_boor(i: usize, p: usize, u: f64, knots: &[f64], closing: usize) -> f64 {
    if p == 0 {
        let below_upper = if i == closing {
            u <= knots[i + 1]
        } else {
            u < knots[i + 1]
        };
        return if knots[i] <= u && below_upper { 1.0 } else { 0.0 };
    }

    let mut value = 0.0;

    let denom1 = knots[i + p] - knots[i];
    if denom1 != 0.0 {
        value += (u - knots[i]) / denom1 * cox_de_boor(i, p - 1, u, knots, closing);
    }

    let denom2 = knots[i + p + 1] - knots[i + 1];
    if denom2 != 0.0 {
        value += (knots[i + p + 1] - u) / denom2 * cox_de_boor(i + 1, p - 1, u, knots, closing);
    }

    value
}
