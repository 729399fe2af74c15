//! Letter-spaced text layout.
//!
//! [`layout`] walks a string one character at a time and places every glyph
//! at a horizontal cursor. The cursor moves by the glyph's natural advance
//! plus the letter spacing, and by the word spacing on top of that for
//! whitespace. Spacings may be negative to tighten text until glyphs overlap.
//!
//! # Example
//!
//! ```
//! use textrude::font::BlockFont;
//! use textrude::layout::{layout, SpacingParams};
//!
//! let params = SpacingParams::new(10.0, 2.0).with_letter_spacing(1.0);
//! let spans = layout("Ab", &BlockFont::new(), &params).unwrap();
//!
//! assert_eq!(spans.len(), 2);
//! assert_eq!(spans[0].origin.x, 0.0);
//! assert_eq!(spans[1].origin.x, spans[0].advance + 1.0);
//! ```

use lyon_path::Path;
use nalgebra::Point2;

use crate::error::{Result, TextMeshError};
use crate::font::GlyphOutlineProvider;

/// Size and spacing parameters for layout and extrusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingParams {
    /// Font size; glyph coordinates are in the same units.
    pub size: f32,
    /// Extrusion depth along Z.
    pub depth: f32,
    /// Extra advance after every character.
    pub letter_spacing: f32,
    /// Extra advance after whitespace, on top of the letter spacing.
    pub spacing_width: f32,
}

impl Default for SpacingParams {
    fn default() -> Self {
        Self {
            size: 10.0,
            depth: 2.0,
            letter_spacing: 0.0,
            spacing_width: 0.0,
        }
    }
}

impl SpacingParams {
    /// Create parameters with the given size and depth and no extra spacing.
    pub fn new(size: f32, depth: f32) -> Self {
        Self {
            size,
            depth,
            ..Self::default()
        }
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

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(TextMeshError::invalid_param(
                "size",
                self.size,
                "must be positive and finite",
            ));
        }
        if !self.depth.is_finite() || self.depth < 0.0 {
            return Err(TextMeshError::invalid_param(
                "depth",
                self.depth,
                "must be non-negative and finite",
            ));
        }
        if !self.letter_spacing.is_finite() {
            return Err(TextMeshError::invalid_param(
                "letter_spacing",
                self.letter_spacing,
                "must be finite",
            ));
        }
        if !self.spacing_width.is_finite() {
            return Err(TextMeshError::invalid_param(
                "spacing_width",
                self.spacing_width,
                "must be finite",
            ));
        }
        Ok(())
    }
}

/// One positioned character.
#[derive(Debug, Clone)]
pub struct GlyphSpan {
    /// The character.
    pub ch: char,
    /// Glyph contours in glyph space. Empty for blank or missing glyphs.
    pub path: Path,
    /// String-space position of the glyph origin.
    pub origin: Point2<f32>,
    /// Natural advance reported by the font.
    pub advance: f32,
    /// Letter and word spacing applied after the glyph.
    pub spacing: f32,
    /// Whether the font had no glyph for `ch`.
    pub missing: bool,
}

impl GlyphSpan {
    /// Cursor position after this glyph, i.e. the next glyph's origin.
    #[inline]
    pub fn next_origin_x(&self) -> f32 {
        self.origin.x + self.advance + self.spacing
    }
}

/// Lay out `text` with custom letter and word spacing.
///
/// Empty text produces no spans. Characters the font can't represent keep
/// their place with an empty contour and the font's fallback advance.
///
/// # Errors
/// Returns an error if `params` fails validation or the font reports a
/// failure for any character.
pub fn layout<F: GlyphOutlineProvider + ?Sized>(
    text: &str,
    font: &F,
    params: &SpacingParams,
) -> Result<Vec<GlyphSpan>> {
    params.validate()?;

    let mut spans = Vec::with_capacity(text.len());
    let mut cursor = 0.0f32;

    for ch in text.chars() {
        let (path, advance, missing) = match font.glyph(ch, params.size)? {
            Some(glyph) => (glyph.path, glyph.advance, false),
            None => {
                log::warn!("no glyph for {:?}, substituting a blank", ch);
                (Path::new(), font.missing_advance(params.size), true)
            }
        };

        let mut spacing = params.letter_spacing;
        if ch.is_whitespace() {
            spacing += params.spacing_width;
        }

        spans.push(GlyphSpan {
            ch,
            path,
            origin: Point2::new(cursor, 0.0),
            advance,
            spacing,
            missing,
        });
        cursor += advance + spacing;
    }

    Ok(spans)
}

/// Total advance of a laid-out line.
pub fn line_advance(spans: &[GlyphSpan]) -> f32 {
    spans.last().map_or(0.0, GlyphSpan::next_origin_x)
}
