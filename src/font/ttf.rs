//! TrueType / OpenType glyph outlines via `ttf-parser`.

use std::fmt;
use std::path::Path as FsPath;

use lyon_path::math::point;
use lyon_path::Path;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use super::{Glyph, GlyphOutlineProvider};
use crate::error::{Result, TextMeshError};

/// A parsed font face borrowing TrueType or OpenType data.
///
/// The table directory is parsed once, when the font is created. Glyph
/// lookups then read straight from the borrowed bytes, so the data has to
/// outlive the font; [`read_font_file`] loads it from disk.
///
/// # Example
///
/// ```no_run
/// use textrude::font::{read_font_file, GlyphOutlineProvider, TtfFont};
///
/// let data = read_font_file("DejaVuSans.ttf").unwrap();
/// let font = TtfFont::from_bytes(&data).unwrap();
/// let glyph = font.glyph('A', 10.0).unwrap().expect("font has an 'A'");
/// println!("advance: {}", glyph.advance);
/// ```
#[derive(Clone)]
pub struct TtfFont<'a> {
    face: Face<'a>,
    units_per_em: f32,
}

impl fmt::Debug for TtfFont<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtfFont")
            .field("units_per_em", &self.units_per_em)
            .field("glyphs", &self.face.number_of_glyphs())
            .finish()
    }
}

impl<'a> TtfFont<'a> {
    /// Parse the first face in `data`.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        Self::from_bytes_with_index(data, 0)
    }

    /// Parse face `index` of a font collection.
    pub fn from_bytes_with_index(data: &'a [u8], index: u32) -> Result<Self> {
        let face = Face::parse(data, index).map_err(|e| TextMeshError::Font(e.to_string()))?;
        let units_per_em = face.units_per_em() as f32;
        Ok(Self { face, units_per_em })
    }

    /// Font units per em.
    pub fn units_per_em(&self) -> f32 {
        self.units_per_em
    }

    fn scale(&self, size: f32) -> f32 {
        size / self.units_per_em
    }
}

/// Read a font file into memory for [`TtfFont::from_bytes`].
pub fn read_font_file<P: AsRef<FsPath>>(path: P) -> Result<Vec<u8>> {
    Ok(std::fs::read(path)?)
}

impl GlyphOutlineProvider for TtfFont<'_> {
    fn glyph(&self, ch: char, size: f32) -> Result<Option<Glyph>> {
        let Some(gid) = self.face.glyph_index(ch) else {
            return Ok(None);
        };

        let scale = self.scale(size);
        let advance = self.face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale;

        let mut sink = PathSink::new(scale);
        // Blank glyphs have no outline; that's not an error.
        let _ = self.face.outline_glyph(gid, &mut sink);

        Ok(Some(Glyph {
            path: sink.finish(),
            advance,
        }))
    }

    fn missing_advance(&self, size: f32) -> f32 {
        self.face
            .glyph_hor_advance(GlyphId(0))
            .map_or(0.0, |adv| adv as f32 * self.scale(size))
    }
}

/// Forwards `ttf-parser` outline callbacks into a lyon path, scaled to size.
struct PathSink {
    builder: lyon_path::path::Builder,
    scale: f32,
    open: bool,
}

impl PathSink {
    fn new(scale: f32) -> Self {
        Self {
            builder: Path::builder(),
            scale,
            open: false,
        }
    }

    fn pt(&self, x: f32, y: f32) -> lyon_path::math::Point {
        point(x * self.scale, y * self.scale)
    }

    fn finish(mut self) -> Path {
        if self.open {
            self.builder.end(true);
        }
        self.builder.build()
    }
}

impl OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        if self.open {
            self.builder.end(true);
        }
        let at = self.pt(x, y);
        self.builder.begin(at);
        self.open = true;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let to = self.pt(x, y);
        self.builder.line_to(to);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let ctrl = self.pt(x1, y1);
        let to = self.pt(x, y);
        self.builder.quadratic_bezier_to(ctrl, to);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let ctrl1 = self.pt(x1, y1);
        let ctrl2 = self.pt(x2, y2);
        let to = self.pt(x, y);
        self.builder.cubic_bezier_to(ctrl1, ctrl2, to);
    }

    fn close(&mut self) {
        if self.open {
            self.builder.end(true);
            self.open = false;
        }
    }
}
