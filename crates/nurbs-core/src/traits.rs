use crate::error::Result;

/// Validate the structural invariants of a geometric entity.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Compute an axis-aligned bounding box as `(min, max)` corners.
///
/// Returns `None` for entities without any points.
pub trait BoundingBox {
    type Point;
    fn bounding_box(&self) -> Option<(Self::Point, Self::Point)>;
}
