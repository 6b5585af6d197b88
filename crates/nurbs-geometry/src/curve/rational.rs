//! Rational B-spline (NURBS) curves in arbitrary dimension.

use nurbs_core::traits::{BoundingBox, Validate};
use nurbs_core::{EvalConfig, NurbsError, Result};
use nurbs_math::{Aabb, Point};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::ParametricCurve;
use crate::nurbs::{all_basis_functions, is_non_decreasing, nonzero_basis_functions, KnotVector};

/// A NURBS curve: control points in `R^D`, one weight per control point, a
/// knot vector and a degree.
///
/// The curve is immutable once built. A point is
/// `Σ N_{i,p}(u) w_i P_i / Σ N_{i,p}(u) w_i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveData<D>", into = "CurveData<D>")]
pub struct RationalCurve<const D: usize> {
    control_points: Vec<Point<D>>,
    weights: Vec<f64>,
    knots: KnotVector,
    degree: usize,
    config: EvalConfig,
    /// Localized basis evaluation is only valid on non-decreasing knots.
    monotone_knots: bool,
}

/// Serialized form of a [`RationalCurve`]. Deserializing goes back through
/// [`RationalCurve::with_config`].
#[derive(Serialize, Deserialize)]
struct CurveData<const D: usize> {
    control_points: Vec<Point<D>>,
    weights: Vec<f64>,
    knots: Vec<f64>,
    degree: usize,
    #[serde(default)]
    config: EvalConfig,
}

impl<const D: usize> RationalCurve<D> {
    /// Build a curve with the default (permissive) configuration.
    ///
    /// # Errors
    /// `DimensionMismatch` when the weight count differs from the
    /// control-point count.
    pub fn new(
        control_points: Vec<Point<D>>,
        weights: Vec<f64>,
        knots: Vec<f64>,
        degree: usize,
    ) -> Result<Self> {
        Self::with_config(control_points, weights, knots, degree, EvalConfig::default())
    }

    /// Build a curve with an explicit configuration.
    ///
    /// Permissive mode only enforces the weight count and logs any other
    /// invariant violation. Strict mode rejects them.
    ///
    /// A permissive curve with decreasing knots is evaluated through the
    /// direct recurrence (see [`RationalCurve::evaluate`]), whose cost grows
    /// exponentially with the degree.
    pub fn with_config(
        control_points: Vec<Point<D>>,
        weights: Vec<f64>,
        knots: Vec<f64>,
        degree: usize,
        config: EvalConfig,
    ) -> Result<Self> {
        if control_points.len() != weights.len() {
            return Err(NurbsError::DimensionMismatch {
                control_points: control_points.len(),
                weights: weights.len(),
            });
        }

        let monotone_knots = is_non_decreasing(&knots);
        let curve = Self {
            control_points,
            weights,
            knots: KnotVector::new_unchecked(knots),
            degree,
            config,
            monotone_knots,
        };

        if config.is_strict() {
            curve.validate()?;
        } else {
            for violation in curve.invariant_violations() {
                log::warn!("accepting curve in permissive mode: {violation}");
            }
        }

        Ok(curve)
    }

    /// Build a curve from homogeneous control points `(w * P, w)`.
    ///
    /// A zero weight keeps the given coordinates as they are.
    pub fn from_homogeneous(
        homogeneous: &[(Point<D>, f64)],
        knots: Vec<f64>,
        degree: usize,
        config: EvalConfig,
    ) -> Result<Self> {
        let (control_points, weights) = homogeneous
            .iter()
            .map(|&(hp, w)| if w == 0.0 { (hp, w) } else { (hp / w, w) })
            .unzip();
        Self::with_config(control_points, weights, knots, degree, config)
    }

    pub fn control_points(&self) -> &[Point<D>] {
        &self.control_points
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Dimension of the space the control points live in.
    pub fn dimension(&self) -> usize {
        D
    }

    /// Parameter range `[knots[p], knots[m-p]]`.
    pub fn domain(&self) -> Option<(f64, f64)> {
        self.knots.domain(self.degree)
    }

    /// Control points in homogeneous form `(w * P, w)`.
    pub fn homogeneous_control_points(&self) -> Vec<(Point<D>, f64)> {
        self.control_points
            .iter()
            .zip(&self.weights)
            .map(|(p, &w)| (p * w, w))
            .collect()
    }

    /// Evaluate the curve at parameter `u`.
    ///
    /// On non-decreasing knots only the `p + 1` basis functions of the span
    /// containing `u` are built, in `O(p^2)`. Decreasing knots (accepted in
    /// permissive mode) fall back to the direct recurrence for every basis
    /// function, which costs `O(2^p)` each.
    ///
    /// # Errors
    /// `SingularEvaluation` when `Σ N_{i,p}(u) w_i` is exactly zero: `u` lies
    /// outside every basis support, or every active weight is zero.
    pub fn evaluate(&self, u: f64) -> Result<Point<D>> {
        let knots = self.knots.as_slice();
        let (first, basis) = if self.monotone_knots {
            nonzero_basis_functions(self.degree, u, knots)
                .map(|local| (local.first, local.values))
                .unwrap_or_default()
        } else {
            (0, all_basis_functions(self.degree, u, knots))
        };

        let mut numerator = Point::<D>::zeros();
        let mut denominator = 0.0;

        // Basis indices without a control point contribute nothing.
        for ((point, &weight), &n) in self
            .control_points
            .iter()
            .zip(&self.weights)
            .skip(first)
            .zip(&basis)
        {
            let nw = n * weight;
            numerator += point * nw;
            denominator += nw;
        }

        if denominator == 0.0 {
            return Err(NurbsError::SingularEvaluation { parameter: u });
        }

        Ok(numerator / denominator)
    }

    /// Evaluate the curve at each parameter in `us`, preserving order.
    ///
    /// Batches of at least `config.parallel_threshold` parameters are split
    /// across the rayon thread pool. On failure the error of the first
    /// failing parameter (in input order) is returned.
    pub fn evaluate_batch(&self, us: &[f64]) -> Result<Vec<Point<D>>> {
        if us.len() >= self.config.parallel_threshold {
            log::debug!("evaluating {} parameters in parallel", us.len());
            let results: Vec<Result<Point<D>>> =
                us.par_iter().map(|&u| self.evaluate(u)).collect();
            results.into_iter().collect()
        } else {
            log::debug!("evaluating {} parameters sequentially", us.len());
            us.iter().map(|&u| self.evaluate(u)).collect()
        }
    }

    fn invariant_violations(&self) -> Vec<NurbsError> {
        let mut violations = Vec::new();
        let knots = self.knots.as_slice();

        if knots.iter().any(|k| !k.is_finite()) {
            violations.push(NurbsError::InvalidKnotVector(
                "knot vector contains non-finite values".into(),
            ));
        } else if let Some(i) = knots.windows(2).position(|w| w[0] > w[1]) {
            violations.push(NurbsError::InvalidKnotVector(format!(
                "knots[{}] = {} is greater than knots[{}] = {}",
                i,
                knots[i],
                i + 1,
                knots[i + 1]
            )));
        }

        let expected = self
            .control_points
            .len()
            .saturating_add(self.degree)
            .saturating_add(1);
        if knots.len() != expected {
            violations.push(NurbsError::InvalidDegree(format!(
                "degree {} with {} control points needs {} knots, got {}",
                self.degree,
                self.control_points.len(),
                expected,
                knots.len()
            )));
        }

        if let Some((i, w)) = self
            .weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            violations.push(NurbsError::InvalidWeight(format!(
                "weights[{i}] = {w} is negative or not finite"
            )));
        }

        violations
    }
}

impl<const D: usize> Validate for RationalCurve<D> {
    fn validate(&self) -> Result<()> {
        match self.invariant_violations().into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }
}

impl<const D: usize> BoundingBox for RationalCurve<D> {
    type Point = Point<D>;

    /// Bounds of the control polygon. For non-negative weights the curve
    /// lies inside it (convex hull property).
    fn bounding_box(&self) -> Option<(Point<D>, Point<D>)> {
        Aabb::from_points(&self.control_points).map(|aabb| (aabb.min, aabb.max))
    }
}

impl<const D: usize> ParametricCurve<D> for RationalCurve<D> {
    fn point_at(&self, t: f64) -> Result<Point<D>> {
        self.evaluate(t)
    }

    fn domain(&self) -> Option<(f64, f64)> {
        RationalCurve::domain(self)
    }

    fn points_at(&self, ts: &[f64]) -> Result<Vec<Point<D>>> {
        self.evaluate_batch(ts)
    }
}

impl<const D: usize> TryFrom<CurveData<D>> for RationalCurve<D> {
    type Error = NurbsError;

    fn try_from(data: CurveData<D>) -> Result<Self> {
        Self::with_config(
            data.control_points,
            data.weights,
            data.knots,
            data.degree,
            data.config,
        )
    }
}

impl<const D: usize> From<RationalCurve<D>> for CurveData<D> {
    fn from(curve: RationalCurve<D>) -> Self {
        Self {
            control_points: curve.control_points,
            weights: curve.weights,
            knots: curve.knots.into_inner(),
            degree: curve.degree,
            config: curve.config,
        }
    }
}
