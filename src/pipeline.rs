//! One-call text geometry.
//!
//! [`build_text_geometry`] runs layout, extrusion, measurement, outline
//! construction and classification in order, leaving only material
//! resolution and assembly to the caller.
//!
//! ```
//! use textrude::font::BlockFont;
//! use textrude::pipeline::{build_text_geometry, TextOptions};
//!
//! let options = TextOptions::default().with_letter_spacing(1.0).with_outline_width(0.5);
//! let text = build_text_geometry("Ab", &BlockFont::new(), &options).unwrap();
//!
//! assert_eq!(text.main.groups().len(), 5);
//! assert!(text.outline.num_triangles() > 0);
//! assert!((text.outline_offset - 0.5 * text.metrics.height() / 10.0).abs() < 1e-5);
//! ```

use crate::assembly::{MeshAssembler, MeshBundle, Transform};
use crate::classify::{classify, ClassifyOptions};
use crate::error::Result;
use crate::font::GlyphOutlineProvider;
use crate::geometry::{build_outline, extrude, scaled_outline_width, ExtrudeOptions, DEFAULT_CURVE_SEGMENTS};
use crate::layout::{layout, GlyphSpan, SpacingParams};
use crate::material::SlotMaterials;
use crate::mesh::{measure, BoundingMetrics, TriangleMesh};

/// Everything needed to turn a string into text geometry.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Font size (default: 10).
    pub size: f32,
    /// Extrusion depth (default: 2).
    pub depth: f32,
    /// Extra advance after every character (default: 0).
    pub letter_spacing: f32,
    /// Extra advance after whitespace (default: 0).
    pub spacing_width: f32,
    /// Outline width at a text height of 10; zero disables the outline
    /// (default: 0).
    pub outline_width: f32,
    /// Segments per flattened curve (default: 12).
    pub curve_segments: u32,
    /// Whether an overlay layer is drawn over the text (default: false).
    pub overlay: bool,
    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            size: 10.0,
            depth: 2.0,
            letter_spacing: 0.0,
            spacing_width: 0.0,
            outline_width: 0.0,
            curve_segments: DEFAULT_CURVE_SEGMENTS,
            overlay: false,
            parallel: true,
        }
    }
}

impl TextOptions {
    /// Set the font size.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the extrusion depth.
    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the letter spacing.
    pub fn with_letter_spacing(mut self, letter_spacing: f32) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }

    /// Set the word spacing.
    pub fn with_spacing_width(mut self, spacing_width: f32) -> Self {
        self.spacing_width = spacing_width;
        self
    }

    /// Set the outline width.
    pub fn with_outline_width(mut self, outline_width: f32) -> Self {
        self.outline_width = outline_width;
        self
    }

    /// Set the number of segments per curve.
    pub fn with_curve_segments(mut self, curve_segments: u32) -> Self {
        self.curve_segments = curve_segments;
        self
    }

    /// Enable or disable the overlay layer.
    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
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

    /// Layout parameters.
    pub fn spacing(&self) -> SpacingParams {
        SpacingParams::new(self.size, self.depth)
            .with_letter_spacing(self.letter_spacing)
            .with_spacing_width(self.spacing_width)
    }

    /// Extrusion options.
    pub fn extrude_options(&self) -> ExtrudeOptions {
        ExtrudeOptions::default()
            .with_curve_segments(self.curve_segments)
            .with_parallel(self.parallel)
    }

    /// Classification options.
    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions::default().with_parallel(self.parallel)
    }
}

/// Geometry for one string, ready for material resolution and assembly.
#[derive(Debug, Clone)]
pub struct TextGeometry {
    /// Laid-out characters.
    pub spans: Vec<GlyphSpan>,
    /// Extruded text, classified into the five face groups.
    pub main: TriangleMesh,
    /// Outline silhouette. Empty when the outline width is zero or the text
    /// has no height.
    pub outline: TriangleMesh,
    /// Bounds of the main mesh.
    pub metrics: BoundingMetrics,
    /// Outline offset actually applied.
    pub outline_offset: f32,
    /// Whether the overlay layer was requested.
    pub overlay: bool,
}

impl TextGeometry {
    /// Hand the meshes to `assembler` with resolved materials.
    pub fn assemble<'a, M: Clone>(
        self,
        assembler: &'a mut MeshAssembler<M>,
        materials: SlotMaterials<M>,
        transform: Transform,
    ) -> Result<&'a MeshBundle<M>> {
        assembler.assemble(self.main, self.outline, materials, self.overlay, transform)
    }
}

/// Build the main and outline meshes for `text`.
///
/// # Errors
/// Propagates invalid options, font failures and tessellation failures.
pub fn build_text_geometry<F: GlyphOutlineProvider + ?Sized>(
    text: &str,
    font: &F,
    options: &TextOptions,
) -> Result<TextGeometry> {
    let params = options.spacing();
    let extrude_options = options.extrude_options();

    let spans = layout(text, font, &params)?;
    let mut main = extrude(&spans, params.depth, &extrude_options)?;
    let metrics = measure(&main);

    let outline = build_outline(&spans, params.depth, options.outline_width, metrics.height(), &extrude_options)?;
    let outline_offset = scaled_outline_width(options.outline_width, metrics.height());

    classify(&mut main, &options.classify_options());

    log::debug!(
        "built {:?}: {} spans, {} main triangles, {} outline triangles, height {}",
        text,
        spans.len(),
        main.num_triangles(),
        outline.num_triangles(),
        metrics.height()
    );

    Ok(TextGeometry {
        spans,
        main,
        outline,
        metrics,
        outline_offset,
        overlay: options.overlay,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::slot_histogram;
    use crate::error::TextMeshError;
    use crate::font::BlockFont;
    use crate::mesh::MaterialSlot;

    fn materials() -> SlotMaterials<u8> {
        SlotMaterials {
            faces: [0, 1, 2, 3, 4],
            outline: 5,
        }
    }

    #[test]
    fn test_ab_scenario() {
        let font = BlockFont::new();
        let options = TextOptions::default()
            .with_letter_spacing(1.0)
            .with_outline_width(0.4);
        let text = build_text_geometry("Ab", &font, &options).unwrap();

        assert_eq!(text.spans[0].origin.x, 0.0);
        assert_eq!(text.spans[1].origin.x, text.spans[0].advance + 1.0);
        assert!(text.main.num_triangles() > 0);
        assert!(text.metrics.height() > 0.0);
        assert!((text.outline_offset - 0.4 * text.metrics.height() / 10.0).abs() < 1e-5);
        assert_eq!(text.outline.groups()[0].slot, MaterialSlot::Outline);

        let mut assembler = MeshAssembler::new();
        let bundle = text.assemble(&mut assembler, materials(), Transform::identity()).unwrap();
        assert_eq!(bundle.drawables().len(), 2);
    }

    #[test]
    fn test_empty_text() {
        let options = TextOptions::default().with_outline_width(1.0).with_overlay(true);
        let text = build_text_geometry("", &BlockFont::new(), &options).unwrap();

        assert_eq!(text.main.num_vertices(), 0);
        assert_eq!(text.outline.num_vertices(), 0);
        assert_eq!(text.outline_offset, 0.0);
        assert!(text.main.groups().is_empty());

        let mut assembler = MeshAssembler::new();
        let bundle = text.assemble(&mut assembler, materials(), Transform::identity()).unwrap();
        assert!(bundle.overlay().is_none());
    }

    #[test]
    fn test_whitespace_only() {
        let text = build_text_geometry("   ", &BlockFont::new(), &TextOptions::default()).unwrap();
        assert_eq!(text.spans.len(), 3);
        assert!(text.main.is_empty());
        assert_eq!(text.metrics, BoundingMetrics::empty());
    }

    #[test]
    fn test_overlay_requested() {
        let options = TextOptions::default().with_overlay(true);
        let text = build_text_geometry("Hi", &BlockFont::new(), &options).unwrap();
        let mut assembler = MeshAssembler::new();
        let bundle = text.assemble(&mut assembler, materials(), Transform::identity()).unwrap();
        let overlay = bundle.overlay().unwrap();
        assert_eq!(overlay.mesh, bundle.main.mesh);
        assert_eq!(bundle.drawables().len(), 3);
    }

    #[test]
    fn test_outline_off_by_default() {
        let text = build_text_geometry("Hi", &BlockFont::new(), &TextOptions::default()).unwrap();
        assert!(text.outline.is_empty());
        assert_eq!(text.outline_offset, 0.0);
    }

    #[test]
    fn test_negative_outline_rejected() {
        let options = TextOptions::default().with_outline_width(-1.0);
        let result = build_text_geometry("Hi", &BlockFont::new(), &options);
        assert!(matches!(
            result,
            Err(TextMeshError::InvalidParameter { name: "outline_width", .. })
        ));
    }

    #[test]
    fn test_invalid_size_rejected() {
        let options = TextOptions::default().with_size(0.0);
        assert!(build_text_geometry("Hi", &BlockFont::new(), &options).is_err());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let font = BlockFont::new();
        let options = TextOptions::default().with_outline_width(0.5).with_spacing_width(2.0);
        let par = build_text_geometry("Hello world", &font, &options).unwrap();
        let seq = build_text_geometry("Hello world", &font, &options.clone().sequential()).unwrap();

        assert_eq!(par.main, seq.main);
        assert_eq!(par.outline, seq.outline);
        assert_eq!(slot_histogram(&par.main), slot_histogram(&seq.main));
    }
}
