//! Procedural block letters.

use lyon_path::math::point;
use lyon_path::Path;

use super::{Glyph, GlyphOutlineProvider};
use crate::error::Result;

/// Characters drawn with a rectangular counter (hole).
const ENCLOSED: &str = "ABDOPQRabdegpq04689";

/// Characters drawn as curved rings.
const ROUND: &str = "o";

/// A procedural font of blocky letters.
///
/// Every printable ASCII character gets a glyph. Capitals and digits are full
/// cap-height blocks, lowercase letters are x-height blocks, enclosed letters
/// carry a hole and `o` is built from quadratic curves. Outer contours are
/// wound clockwise and holes counter-clockwise, the TrueType convention.
/// Characters outside printable ASCII have no glyph.
#[derive(Debug, Clone, Copy)]
pub struct BlockFont {
    /// Advance as a fraction of the size.
    pub advance: f32,
    /// Space advance as a fraction of the size.
    pub space_advance: f32,
    /// Cap height as a fraction of the size.
    pub cap_height: f32,
    /// x-height as a fraction of the size.
    pub x_height: f32,
}

impl Default for BlockFont {
    fn default() -> Self {
        Self {
            advance: 0.6,
            space_advance: 0.35,
            cap_height: 0.7,
            x_height: 0.5,
        }
    }
}

impl BlockFont {
    /// Create a block font with default proportions.
    pub fn new() -> Self {
        Self::default()
    }

    fn outline(&self, ch: char, size: f32) -> Path {
        let width = self.advance * size;
        let x0 = 0.1 * width;
        let x1 = 0.9 * width;
        let top = if ch.is_ascii_lowercase() {
            self.x_height * size
        } else if ch.is_ascii_alphanumeric() {
            self.cap_height * size
        } else {
            0.2 * size
        };

        let mut builder = Path::builder();
        if ROUND.contains(ch) {
            let cx = 0.5 * width;
            let cy = 0.5 * top;
            ellipse(&mut builder, cx, cy, 0.5 * (x1 - x0), 0.5 * top, true);
            ellipse(&mut builder, cx, cy, 0.25 * (x1 - x0), 0.25 * top, false);
        } else {
            rect(&mut builder, x0, 0.0, x1, top, true);
            if ENCLOSED.contains(ch) {
                let inset = 0.25 * (x1 - x0);
                rect(&mut builder, x0 + inset, 0.25 * top, x1 - inset, 0.75 * top, false);
            }
        }
        builder.build()
    }
}

impl GlyphOutlineProvider for BlockFont {
    fn glyph(&self, ch: char, size: f32) -> Result<Option<Glyph>> {
        if ch == ' ' {
            return Ok(Some(Glyph::blank(self.space_advance * size)));
        }
        if !ch.is_ascii_graphic() {
            return Ok(None);
        }
        Ok(Some(Glyph {
            path: self.outline(ch, size),
            advance: self.advance * size,
        }))
    }

    fn missing_advance(&self, size: f32) -> f32 {
        self.advance * size
    }
}

fn rect(builder: &mut lyon_path::path::Builder, x0: f32, y0: f32, x1: f32, y1: f32, clockwise: bool) {
    builder.begin(point(x0, y0));
    if clockwise {
        builder.line_to(point(x0, y1));
        builder.line_to(point(x1, y1));
        builder.line_to(point(x1, y0));
    } else {
        builder.line_to(point(x1, y0));
        builder.line_to(point(x1, y1));
        builder.line_to(point(x0, y1));
    }
    builder.end(true);
}

fn ellipse(builder: &mut lyon_path::path::Builder, cx: f32, cy: f32, rx: f32, ry: f32, clockwise: bool) {
    let sx = if clockwise { -1.0 } else { 1.0 };
    builder.begin(point(cx, cy - ry));
    builder.quadratic_bezier_to(point(cx + sx * rx, cy - ry), point(cx + sx * rx, cy));
    builder.quadratic_bezier_to(point(cx + sx * rx, cy + ry), point(cx, cy + ry));
    builder.quadratic_bezier_to(point(cx - sx * rx, cy + ry), point(cx - sx * rx, cy));
    builder.quadratic_bezier_to(point(cx - sx * rx, cy - ry), point(cx, cy - ry));
    builder.end(true);
}
