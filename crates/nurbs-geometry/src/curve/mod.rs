//! Curve traits and implementations.

mod rational;

use nurbs_core::Result;
use nurbs_math::Point;

pub use rational::RationalCurve;

/// Trait for parametric curves in `D`-dimensional space.
pub trait ParametricCurve<const D: usize>: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Result<Point<D>>;

    /// Return the parameter domain `(t_min, t_max)`, if the curve has one.
    fn domain(&self) -> Option<(f64, f64)>;

    /// Evaluate the curve at each parameter, preserving order.
    fn points_at(&self, ts: &[f64]) -> Result<Vec<Point<D>>> {
        ts.iter().map(|&t| self.point_at(t)).collect()
    }
}
