//! Rational B-spline (NURBS) evaluation: knot vectors, basis functions, and curves.

pub mod curve;
pub mod nurbs;
pub mod tessellate;

pub use curve::{ParametricCurve, RationalCurve};
pub use nurbs::{KnotVector, LocalBasis};
