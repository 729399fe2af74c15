//! Flat-capped extrusion of laid-out glyphs.

use lyon_path::math::{point, Point};
use lyon_path::Path;
use lyon_tessellation::{BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers};
use nalgebra::{Point2, Point3, Vector2, Vector3};
use rayon::prelude::*;

use super::contour::{edge_normal, flatten, normalize_orientation, Contour};
use crate::error::{Result, TextMeshError};
use crate::layout::GlyphSpan;
use crate::mesh::TriangleMesh;

/// Line segments per curve used when flattening glyph outlines.
pub const DEFAULT_CURVE_SEGMENTS: u32 = 12;

/// Options for extrusion.
#[derive(Debug, Clone)]
pub struct ExtrudeOptions {
    /// Number of line segments each curve is sampled with.
    pub curve_segments: u32,

    /// Whether to extrude glyphs in parallel (default: true).
    pub parallel: bool,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            curve_segments: DEFAULT_CURVE_SEGMENTS,
            parallel: true,
        }
    }
}

impl ExtrudeOptions {
    /// Set the curve resolution. Values below one are treated as one.
    pub fn with_curve_segments(mut self, curve_segments: u32) -> Self {
        self.curve_segments = curve_segments.max(1);
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Extrude laid-out glyphs into a solid mesh spanning `z = 0..depth`.
///
/// The front cap faces +Z at `z = depth`, the back cap faces -Z at `z = 0`,
/// and every contour edge contributes one outward-facing wall quad. No bevel
/// is applied. The result is ungrouped; run the face classifier to split it
/// into material groups.
///
/// Empty input (or input made only of blank glyphs) produces an empty mesh.
///
/// # Example
///
/// ```
/// use textrude::font::BlockFont;
/// use textrude::geometry::{extrude, ExtrudeOptions};
/// use textrude::layout::{layout, SpacingParams};
///
/// let params = SpacingParams::new(10.0, 2.0);
/// let spans = layout("Hi", &BlockFont::new(), &params).unwrap();
/// let mesh = extrude(&spans, params.depth, &ExtrudeOptions::default()).unwrap();
///
/// assert!(mesh.num_triangles() > 0);
/// assert!(!mesh.is_grouped());
/// ```
pub fn extrude(spans: &[GlyphSpan], depth: f32, options: &ExtrudeOptions) -> Result<TriangleMesh> {
    extrude_spans(spans, depth, options, 0.0)
}

/// Extrude spans with every contour first offset outward by `offset`.
pub(crate) fn extrude_spans(
    spans: &[GlyphSpan],
    depth: f32,
    options: &ExtrudeOptions,
    offset: f32,
) -> Result<TriangleMesh> {
    if !depth.is_finite() || depth < 0.0 {
        return Err(TextMeshError::invalid_param(
            "depth",
            depth,
            "must be non-negative and finite",
        ));
    }

    let build = |span: &GlyphSpan| -> Result<TriangleMesh> {
        let contours = glyph_contours(span, options.curve_segments, offset);
        extrude_contours(&contours, depth).map_err(|message| TextMeshError::Tessellation {
            glyph: span.ch,
            message,
        })
    };

    let pieces: Vec<TriangleMesh> = if options.parallel {
        spans.par_iter().map(build).collect::<Result<_>>()?
    } else {
        spans.iter().map(build).collect::<Result<_>>()?
    };

    let (num_vertices, num_triangles) = pieces
        .iter()
        .fold((0, 0), |(v, t), m| (v + m.num_vertices(), t + m.num_triangles()));
    let mut mesh = TriangleMesh::with_capacity(num_vertices, num_triangles);
    for piece in &pieces {
        mesh.append(piece);
    }

    log::debug!(
        "extruded {} glyphs into {} vertices / {} triangles (offset {})",
        spans.len(),
        mesh.num_vertices(),
        mesh.num_triangles(),
        offset
    );

    Ok(mesh)
}

/// Flattened, positioned, orientation-normalized contours of one glyph.
fn glyph_contours(span: &GlyphSpan, curve_segments: u32, offset: f32) -> Vec<Contour> {
    let mut contours = flatten(&span.path, curve_segments);
    let shift = Vector2::new(span.origin.x, span.origin.y);
    for contour in &mut contours {
        contour.translate(&shift);
    }
    normalize_orientation(&mut contours);
    if offset != 0.0 {
        contours = contours.iter().map(|c| c.offset(offset)).collect();
    }
    contours
}

/// Build caps and walls for a set of normalized contours.
fn extrude_contours(contours: &[Contour], depth: f32) -> std::result::Result<TriangleMesh, String> {
    let mut mesh = TriangleMesh::new();
    if contours.is_empty() {
        return Ok(mesh);
    }

    let cap = tessellate_cap(contours)?;

    // Front cap, counter-clockwise seen from +Z.
    let front_base = mesh.num_vertices() as u32;
    for p in &cap.vertices {
        mesh.push_vertex(Point3::new(p.x, p.y, depth), Vector3::z(), Point2::new(p.x, p.y));
    }
    // Back cap, counter-clockwise seen from -Z.
    let back_base = mesh.num_vertices() as u32;
    for p in &cap.vertices {
        mesh.push_vertex(Point3::new(p.x, p.y, 0.0), -Vector3::z(), Point2::new(p.x, p.y));
    }

    for tri in cap.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]];
        let ccw = triangle_area(&cap.vertices, a, b, c) >= 0.0;
        let (b, c) = if ccw { (b, c) } else { (c, b) };
        mesh.push_triangle([front_base + a, front_base + b, front_base + c]);
        mesh.push_triangle([back_base + a, back_base + c, back_base + b]);
    }

    if depth > 0.0 {
        for contour in contours {
            push_walls(&mut mesh, contour, depth);
        }
    }

    Ok(mesh)
}

fn tessellate_cap(contours: &[Contour]) -> std::result::Result<VertexBuffers<Point, u32>, String> {
    let mut builder = Path::builder();
    for contour in contours {
        let pts = contour.points();
        builder.begin(point(pts[0].x, pts[0].y));
        for p in &pts[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
    }
    let path = builder.build();

    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    tessellator
        .tessellate_path(
            &path,
            &FillOptions::default().with_fill_rule(FillRule::NonZero),
            &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| vertex.position()),
        )
        .map_err(|e| format!("{:?}", e))?;

    Ok(buffers)
}

fn triangle_area(vertices: &[Point], a: u32, b: u32, c: u32) -> f32 {
    let (pa, pb, pc) = (vertices[a as usize], vertices[b as usize], vertices[c as usize]);
    (pb - pa).cross(pc - pa)
}

/// One wall quad per edge, with flat outward normals.
fn push_walls(mesh: &mut TriangleMesh, contour: &Contour, depth: f32) {
    for (a, b) in contour.edges() {
        let n = edge_normal(&a, &b);
        if n == Vector2::zeros() {
            continue;
        }
        let normal = Vector3::new(n.x, n.y, 0.0);

        // Walls closer to horizontal take U from X, the rest from Y.
        let horizontal = (a.y - b.y).abs() < (a.x - b.x).abs();
        let uv = |p: &Point2<f32>, z: f32| {
            let u = if horizontal { p.x } else { p.y };
            Point2::new(u, 1.0 - z)
        };

        let a0 = mesh.push_vertex(Point3::new(a.x, a.y, 0.0), normal, uv(&a, 0.0));
        let b0 = mesh.push_vertex(Point3::new(b.x, b.y, 0.0), normal, uv(&b, 0.0));
        let b1 = mesh.push_vertex(Point3::new(b.x, b.y, depth), normal, uv(&b, depth));
        let a1 = mesh.push_vertex(Point3::new(a.x, a.y, depth), normal, uv(&a, depth));
        mesh.push_triangle([a0, b0, b1]);
        mesh.push_triangle([a0, b1, a1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{BlockFont, Glyph, GlyphOutlineProvider};
    use crate::layout::{layout, SpacingParams};
    use crate::mesh::measure;

    /// A "T" drawn as two clockwise strokes that overlap, as variable and
    /// composite glyphs often are.
    struct OverlappingStrokes;

    impl GlyphOutlineProvider for OverlappingStrokes {
        fn glyph(&self, _ch: char, _size: f32) -> Result<Option<Glyph>> {
            let mut builder = Path::builder();
            // Bar: x 0..10, y 8..10.
            builder.begin(point(0.0, 8.0));
            builder.line_to(point(0.0, 10.0));
            builder.line_to(point(10.0, 10.0));
            builder.line_to(point(10.0, 8.0));
            builder.end(true);
            // Stem: x 4..6, y 0..9.5, starting inside the bar.
            builder.begin(point(4.0, 9.5));
            builder.line_to(point(6.0, 9.5));
            builder.line_to(point(6.0, 0.0));
            builder.line_to(point(4.0, 0.0));
            builder.end(true);
            Ok(Some(Glyph {
                path: builder.build(),
                advance: 10.0,
            }))
        }
    }

    fn front_cap_area(mesh: &TriangleMesh) -> f32 {
        let p = mesh.positions();
        (0..mesh.num_triangles())
            .filter(|&t| mesh.normals()[mesh.triangle(t)[0] as usize].z > 0.5)
            .map(|t| {
                let [a, b, c] = mesh.triangle(t);
                let (a, b, c) = (p[a as usize], p[b as usize], p[c as usize]);
                0.5 * (b - a).cross(&(c - a)).z
            })
            .sum()
    }

    fn face_normal(mesh: &TriangleMesh, t: usize) -> Option<Vector3<f32>> {
        let [a, b, c] = mesh.triangle(t);
        let p = mesh.positions();
        (p[b as usize] - p[a as usize])
            .cross(&(p[c as usize] - p[a as usize]))
            .try_normalize(1e-9)
    }

    fn spans(text: &str, params: &SpacingParams) -> Vec<GlyphSpan> {
        layout(text, &BlockFont::new(), params).unwrap()
    }

    #[test]
    fn test_empty_text() {
        let mesh = extrude(&[], 2.0, &ExtrudeOptions::default()).unwrap();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_triangles(), 0);
    }

    #[test]
    fn test_blank_glyphs_only() {
        let params = SpacingParams::default();
        let mesh = extrude(&spans("   ", &params), 2.0, &ExtrudeOptions::default()).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_single_block() {
        // 'I' is one rectangle: 2 triangles per cap, 4 wall quads.
        let params = SpacingParams::new(10.0, 2.0);
        let mesh = extrude(&spans("I", &params), 2.0, &ExtrudeOptions::default()).unwrap();
        assert_eq!(mesh.num_triangles(), 2 + 2 + 8);

        let metrics = measure(&mesh);
        assert!((metrics.height() - 7.0).abs() < 1e-5);
        assert!((metrics.depth() - 2.0).abs() < 1e-6);
        assert!((metrics.min.x - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_winding_matches_normals() {
        let params = SpacingParams::new(10.0, 3.0);
        let mesh = extrude(&spans("Ao", &params), 3.0, &ExtrudeOptions::default()).unwrap();

        for t in 0..mesh.num_triangles() {
            let [a, _, _] = mesh.triangle(t);
            let stored = mesh.normals()[a as usize];
            let Some(geometric) = face_normal(&mesh, t) else {
                continue;
            };
            assert!(
                stored.dot(&geometric) > 0.99,
                "triangle {} winding disagrees with its normal",
                t
            );
        }
    }

    #[test]
    fn test_overlapping_strokes_fill_their_union() {
        let params = SpacingParams::new(10.0, 2.0);
        let spans = layout("T", &OverlappingStrokes, &params).unwrap();
        let mesh = extrude(&spans, 2.0, &ExtrudeOptions::default()).unwrap();

        // 20 + 19 - 3 of overlap.
        assert!((front_cap_area(&mesh) - 36.0).abs() < 1e-3);
    }

    #[test]
    fn test_hole_is_cut_from_cap() {
        // Block 'O': 4.8 x 7 with a 2.4 x 3.5 counter.
        let params = SpacingParams::new(10.0, 2.0);
        let mesh = extrude(&spans("O", &params), 2.0, &ExtrudeOptions::default()).unwrap();
        assert!((front_cap_area(&mesh) - (4.8 * 7.0 - 2.4 * 3.5)).abs() < 1e-3);
    }

    #[test]
    fn test_walls_point_outward() {
        let params = SpacingParams::new(10.0, 2.0);
        let mesh = extrude(&spans("I", &params), 2.0, &ExtrudeOptions::default()).unwrap();
        let center = measure(&mesh).center();

        for t in 0..mesh.num_triangles() {
            let [a, _, _] = mesh.triangle(t);
            let n = mesh.normals()[a as usize];
            if n.z != 0.0 {
                continue;
            }
            let to_wall = mesh.positions()[a as usize] - center;
            assert!(n.dot(&to_wall) > 0.0);
        }
    }

    #[test]
    fn test_glyphs_translated_by_origin() {
        let params = SpacingParams::new(10.0, 1.0).with_letter_spacing(4.0);
        let s = spans("II", &params);
        let mesh = extrude(&s, 1.0, &ExtrudeOptions::default()).unwrap();
        let metrics = measure(&mesh);
        // second glyph right edge: origin 10 + 5.4
        assert!((metrics.max.x - (s[1].origin.x + 5.4)).abs() < 1e-4);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let params = SpacingParams::new(10.0, 2.0).with_letter_spacing(0.5);
        let s = spans("Parallel o!", &params);
        let par = extrude(&s, 2.0, &ExtrudeOptions::default()).unwrap();
        let seq = extrude(&s, 2.0, &ExtrudeOptions::default().sequential()).unwrap();
        assert_eq!(par, seq);
    }

    #[test]
    fn test_curve_segments_change_density() {
        let params = SpacingParams::new(10.0, 2.0);
        let s = spans("o", &params);
        let coarse = extrude(&s, 2.0, &ExtrudeOptions::default().with_curve_segments(2)).unwrap();
        let fine = extrude(&s, 2.0, &ExtrudeOptions::default().with_curve_segments(12)).unwrap();
        assert!(fine.num_triangles() > coarse.num_triangles());
    }

    #[test]
    fn test_zero_depth_has_no_walls() {
        let params = SpacingParams::new(10.0, 0.0);
        let mesh = extrude(&spans("I", &params), 0.0, &ExtrudeOptions::default()).unwrap();
        assert_eq!(mesh.num_triangles(), 4);
    }

    #[test]
    fn test_rejects_negative_depth() {
        let params = SpacingParams::default();
        assert!(extrude(&spans("I", &params), -1.0, &ExtrudeOptions::default()).is_err());
    }

    #[test]
    fn test_wall_uvs() {
        let params = SpacingParams::new(10.0, 2.0);
        let mesh = extrude(&spans("I", &params), 2.0, &ExtrudeOptions::default()).unwrap();
        for (n, (p, uv)) in mesh
            .normals()
            .iter()
            .zip(mesh.positions().iter().zip(mesh.uvs()))
        {
            if n.z != 0.0 {
                assert_eq!((uv.x, uv.y), (p.x, p.y));
            } else if n.y.abs() > 0.5 {
                assert_eq!((uv.x, uv.y), (p.x, 1.0 - p.z));
            } else {
                assert_eq!((uv.x, uv.y), (p.y, 1.0 - p.z));
            }
        }
    }
}
