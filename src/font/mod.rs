//! Glyph outline providers.
//!
//! The text pipeline never parses fonts itself. It asks a
//! [`GlyphOutlineProvider`] for each character's outline at the requested size
//! and treats the answer as opaque path data.
//!
//! Two providers ship with the crate:
//!
//! - [`TtfFont`] reads TrueType/OpenType data through `ttf-parser`.
//! - [`BlockFont`] generates blocky procedural letters, handy when no font file
//!   is at hand.

mod block;
mod ttf;

pub use block::BlockFont;
pub use ttf::{read_font_file, TtfFont};

use lyon_path::Path;

use crate::error::Result;

/// A glyph outline scaled to a requested size.
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Closed contours in glyph space: baseline at y = 0, y pointing up, units
    /// matching the requested size. Empty for blank glyphs such as spaces.
    pub path: Path,
    /// Natural horizontal advance at the requested size.
    pub advance: f32,
}

impl Glyph {
    /// A glyph with no contours.
    pub fn blank(advance: f32) -> Self {
        Self {
            path: Path::new(),
            advance,
        }
    }
}

/// Source of glyph outlines.
pub trait GlyphOutlineProvider {
    /// Outline and advance of `ch` at `size`.
    ///
    /// Returns `Ok(None)` for characters the font cannot represent. `Err` is
    /// reserved for unreadable font data.
    fn glyph(&self, ch: char, size: f32) -> Result<Option<Glyph>>;

    /// Advance used for characters [`glyph`](Self::glyph) has no outline for.
    fn missing_advance(&self, _size: f32) -> f32 {
        0.0
    }
}

impl<P: GlyphOutlineProvider + ?Sized> GlyphOutlineProvider for &P {
    fn glyph(&self, ch: char, size: f32) -> Result<Option<Glyph>> {
        (**self).glyph(ch, size)
    }

    fn missing_advance(&self, size: f32) -> f32 {
        (**self).missing_advance(size)
    }
}
