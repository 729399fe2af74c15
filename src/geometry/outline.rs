//! Outline (silhouette) meshes.

use super::extrude::{extrude_spans, ExtrudeOptions};
use crate::error::{Result, TextMeshError};
use crate::layout::GlyphSpan;
use crate::mesh::{MaterialSlot, TriangleMesh};

/// Text height at which the outline width is applied unscaled.
pub const REFERENCE_HEIGHT: f32 = 10.0;

/// Outline offset actually applied for a text of measured `height`.
///
/// Thickness scales with the rendered text so a given `outline_width` looks
/// the same at every font size. Zero height yields zero.
pub fn scaled_outline_width(outline_width: f32, height: f32) -> f32 {
    if height <= 0.0 {
        return 0.0;
    }
    outline_width * (height / REFERENCE_HEIGHT)
}

/// Build the outline mesh for laid-out glyphs.
///
/// Every contour is pushed outward by [`scaled_outline_width`] and extruded
/// with the same pipeline as the main mesh. The result is one group bound to
/// [`MaterialSlot::Outline`]. A zero `outline_width` or empty text (zero
/// `height`) gives an empty mesh.
///
/// # Errors
/// Returns [`TextMeshError::InvalidParameter`] for a negative or non-finite
/// `outline_width`, and propagates extrusion failures.
pub fn build_outline(
    spans: &[GlyphSpan],
    depth: f32,
    outline_width: f32,
    height: f32,
    options: &ExtrudeOptions,
) -> Result<TriangleMesh> {
    if !outline_width.is_finite() || outline_width < 0.0 {
        return Err(TextMeshError::invalid_param(
            "outline_width",
            outline_width,
            "must be non-negative and finite",
        ));
    }
    if outline_width == 0.0 || height <= 0.0 || spans.is_empty() {
        return Ok(TriangleMesh::new());
    }

    let width = scaled_outline_width(outline_width, height);
    let mut mesh = extrude_spans(spans, depth, options, width)?;
    mesh.set_single_group(MaterialSlot::Outline);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BlockFont;
    use crate::geometry::extrude;
    use crate::layout::{layout, SpacingParams};
    use crate::mesh::measure;

    #[test]
    fn test_scaled_width() {
        assert_eq!(scaled_outline_width(1.0, 10.0), 1.0);
        assert_eq!(scaled_outline_width(0.5, 20.0), 1.0);
        assert_eq!(scaled_outline_width(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_width_is_linear_in_height() {
        let w = 0.3;
        let a = scaled_outline_width(w, 7.0);
        let b = scaled_outline_width(w, 14.0);
        assert!((b - 2.0 * a).abs() < 1e-6);
    }

    #[test]
    fn test_empty_text() {
        let mesh = build_outline(&[], 2.0, 1.0, 0.0, &ExtrudeOptions::default()).unwrap();
        assert!(mesh.is_empty());
        assert!(!mesh.is_grouped());
    }

    #[test]
    fn test_outline_surrounds_main() {
        let font = BlockFont::new();
        let params = SpacingParams::new(10.0, 2.0);
        let spans = layout("I", &font, &params).unwrap();
        let options = ExtrudeOptions::default();

        let main = extrude(&spans, 2.0, &options).unwrap();
        let height = measure(&main).height();
        let outline = build_outline(&spans, 2.0, 1.0, height, &options).unwrap();

        let applied = scaled_outline_width(1.0, height);
        let inner = measure(&main);
        let outer = measure(&outline);
        assert!((outer.height() - (inner.height() + 2.0 * applied)).abs() < 1e-4);
        assert!((outer.min.x - (inner.min.x - applied)).abs() < 1e-4);

        assert_eq!(outline.groups().len(), 1);
        assert_eq!(outline.groups()[0].slot, MaterialSlot::Outline);
        assert_eq!(outline.groups()[0].count, outline.indices().len());
    }

    #[test]
    fn test_offset_doubles_with_size() {
        let font = BlockFont::new();
        let options = ExtrudeOptions::default();
        let growth = |size: f32| {
            let params = SpacingParams::new(size, 2.0);
            let spans = layout("H", &font, &params).unwrap();
            let main = extrude(&spans, 2.0, &options).unwrap();
            let height = measure(&main).height();
            let outline = build_outline(&spans, 2.0, 0.5, height, &options).unwrap();
            measure(&outline).height() - height
        };
        assert!((growth(20.0) - 2.0 * growth(10.0)).abs() < 1e-4);
    }

    #[test]
    fn test_zero_width_disables_outline() {
        let spans = layout("I", &BlockFont::new(), &SpacingParams::default()).unwrap();
        let mesh = build_outline(&spans, 2.0, 0.0, 7.0, &ExtrudeOptions::default()).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_rejects_negative_width() {
        assert!(build_outline(&[], 2.0, -1.0, 5.0, &ExtrudeOptions::default()).is_err());
    }
}
