use nurbs_core::Tolerance;
use serde::{Deserialize, Serialize};

use crate::{Point, Vector};

/// Axis-aligned bounding box in `D`-dimensional space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb<const D: usize> {
    pub min: Point<D>,
    pub max: Point<D>,
}

impl<const D: usize> Aabb<D> {
    pub fn new(min: Point<D>, max: Point<D>) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point<D>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some(Self { min, max })
    }

    pub fn contains_point(&self, p: &Point<D>) -> bool {
        (0..D).all(|k| p[k] >= self.min[k] && p[k] <= self.max[k])
    }

    /// Like [`Aabb::contains_point`], allowing `tol.linear` slack on every side.
    pub fn contains_point_within(&self, p: &Point<D>, tol: Tolerance) -> bool {
        self.expand(tol.linear).contains_point(p)
    }

    pub fn expand(&self, amount: f64) -> Self {
        let offset = Vector::<D>::repeat(amount);
        Self {
            min: self.min - offset,
            max: self.max + offset,
        }
    }
}
