//! Axis-aligned bounds of a triangle mesh.

use nalgebra::{Point3, Vector3};

use super::triangle::TriangleMesh;

/// Axis-aligned bounding box of a mesh and the measurements derived from it.
///
/// The bounds of an empty mesh are the canonical zero box at the origin, so
/// every derived size is zero. Callers that divide by [`height`](Self::height)
/// must check [`is_degenerate`](Self::is_degenerate) first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingMetrics {
    /// Minimum corner.
    pub min: Point3<f32>,
    /// Maximum corner.
    pub max: Point3<f32>,
}

impl Default for BoundingMetrics {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingMetrics {
    /// The canonical zero-sized box.
    pub fn empty() -> Self {
        Self {
            min: Point3::origin(),
            max: Point3::origin(),
        }
    }

    /// Extent along each axis.
    #[inline]
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Extent along X.
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Extent along Y.
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Extent along Z.
    #[inline]
    pub fn depth(&self) -> f32 {
        self.max.z - self.min.z
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Whether the box has zero height, which is the case for empty text.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.height() <= 0.0
    }
}

/// Compute the bounding metrics of a mesh's vertex positions.
pub fn measure(mesh: &TriangleMesh) -> BoundingMetrics {
    let positions = mesh.positions();
    let Some(first) = positions.first() else {
        return BoundingMetrics::empty();
    };

    let mut min = *first;
    let mut max = *first;
    for p in &positions[1..] {
        min = min.inf(p);
        max = max.sup(p);
    }

    BoundingMetrics { min, max }
}
