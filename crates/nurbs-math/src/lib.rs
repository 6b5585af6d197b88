//! N-dimensional point types for curve evaluation.
//!
//! Points are fixed-size `nalgebra` column vectors, so the curve dimension is
//! a compile-time constant while still being arbitrary.

pub mod aabb;

pub use aabb::Aabb;
pub use nalgebra::SVector;

pub type Point<const D: usize> = SVector<f64, D>;
pub type Vector<const D: usize> = SVector<f64, D>;

pub type Point2 = Point<2>;
pub type Point3 = Point<3>;
pub type Point4 = Point<4>;

/// Build a point from its coordinates.
pub fn point<const D: usize>(coords: [f64; D]) -> Point<D> {
    Point::from(coords)
}
