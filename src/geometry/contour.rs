//! Flattened glyph contours.
//!
//! Glyph outlines arrive as lyon paths with line, quadratic and cubic
//! segments. Extrusion works on closed polylines instead, so every curve is
//! sampled at a fixed number of evenly spaced parameter values.

use lyon_path::geom::{CubicBezierSegment, QuadraticBezierSegment};
use lyon_path::{Event, Path};
use nalgebra::{Point2, Vector2};

/// Points closer than this are merged.
const MERGE_EPSILON: f32 = 1e-6;

/// Miter length limit, as a multiple of the offset width.
const MITER_LIMIT: f32 = 4.0;

/// A closed polyline. The closing edge from the last point back to the first
/// is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<Point2<f32>>,
}

impl Contour {
    /// Create a contour, dropping repeated consecutive points and an explicit
    /// closing point.
    pub fn new(points: Vec<Point2<f32>>) -> Self {
        let mut deduped: Vec<Point2<f32>> = Vec::with_capacity(points.len());
        for p in points {
            if deduped
                .last()
                .map_or(true, |last| (p - last).norm() > MERGE_EPSILON)
            {
                deduped.push(p);
            }
        }
        while deduped.len() > 1 && (deduped[0] - deduped[deduped.len() - 1]).norm() <= MERGE_EPSILON {
            deduped.pop();
        }
        Self { points: deduped }
    }

    /// The contour's points.
    #[inline]
    pub fn points(&self) -> &[Point2<f32>] {
        &self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the contour has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the contour encloses no area.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3 || self.signed_area().abs() <= MERGE_EPSILON * MERGE_EPSILON
    }

    /// Shoelace area; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f32 {
        self.edges()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<f32>()
            * 0.5
    }

    /// Whether the winding is counter-clockwise.
    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Even-odd point-in-polygon test.
    pub fn contains(&self, p: &Point2<f32>) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Reverse the winding.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Move every point by `offset`.
    pub fn translate(&mut self, offset: &Vector2<f32>) {
        for p in &mut self.points {
            *p += offset;
        }
    }

    /// Iterate over edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2<f32>, Point2<f32>)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Push every point `width` away from the filled side.
    ///
    /// Expects normalized winding (filled region on the left of travel), so
    /// outer contours grow and holes shrink. Corners are mitered, with the
    /// miter length clamped to four times `width`.
    pub fn offset(&self, width: f32) -> Contour {
        let n = self.points.len();
        if n < 3 || width == 0.0 {
            return self.clone();
        }

        let points = (0..n)
            .map(|i| {
                let prev = self.points[(i + n - 1) % n];
                let cur = self.points[i];
                let next = self.points[(i + 1) % n];

                let n0 = edge_normal(&prev, &cur);
                let n1 = edge_normal(&cur, &next);
                let sum = n0 + n1;
                match sum.try_normalize(MERGE_EPSILON) {
                    Some(miter) => {
                        let cos = miter.dot(&n0).max(1.0 / MITER_LIMIT);
                        cur + miter * (width / cos)
                    }
                    // Hairpin turn: fall back to the incoming edge normal.
                    None => cur + n0 * width,
                }
            })
            .collect();

        Contour { points }
    }
}

/// Right-hand unit normal of the edge `a -> b`.
pub(crate) fn edge_normal(a: &Point2<f32>, b: &Point2<f32>) -> Vector2<f32> {
    let d = b - a;
    Vector2::new(d.y, -d.x)
        .try_normalize(MERGE_EPSILON)
        .unwrap_or_else(Vector2::zeros)
}

/// Flatten a path into closed polylines, sampling each curve with
/// `curve_segments` line segments.
///
/// Contours with fewer than three distinct points are dropped.
pub fn flatten(path: &Path, curve_segments: u32) -> Vec<Contour> {
    let segments = curve_segments.max(1);
    let step = 1.0 / segments as f32;

    let mut contours = Vec::new();
    let mut current: Vec<Point2<f32>> = Vec::new();

    for event in path.iter() {
        match event {
            Event::Begin { at } => {
                current.clear();
                current.push(Point2::new(at.x, at.y));
            }
            Event::Line { to, .. } => {
                current.push(Point2::new(to.x, to.y));
            }
            Event::Quadratic { from, ctrl, to } => {
                let curve = QuadraticBezierSegment { from, ctrl, to };
                for i in 1..=segments {
                    let p = curve.sample(i as f32 * step);
                    current.push(Point2::new(p.x, p.y));
                }
            }
            Event::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                let curve = CubicBezierSegment {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                };
                for i in 1..=segments {
                    let p = curve.sample(i as f32 * step);
                    current.push(Point2::new(p.x, p.y));
                }
            }
            Event::End { .. } => {
                let contour = Contour::new(std::mem::take(&mut current));
                if !contour.is_degenerate() {
                    contours.push(contour);
                }
            }
        }
    }

    contours
}

/// Flip a glyph's contours so its outer contours run counter-clockwise.
///
/// The contour with the largest absolute area is always an outer one, so its
/// winding tells which convention the font uses. If it is clockwise, every
/// contour is reversed. Relative windings are kept as the font drew them:
/// holes stay opposite to their outers, and overlapping strokes with the
/// same winding stay solid under the non-zero fill rule.
pub fn normalize_orientation(contours: &mut [Contour]) {
    let largest = contours
        .iter()
        .map(Contour::signed_area)
        .max_by(|a, b| a.abs().total_cmp(&b.abs()));

    if largest.is_some_and(|area| area < 0.0) {
        for contour in contours.iter_mut() {
            contour.reverse();
        }
    }
}
