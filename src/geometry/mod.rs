//! Glyph contour geometry.
//!
//! - [`contour`]: curve flattening, winding normalization and outward offsets
//! - [`extrude`]: flat-capped extrusion of laid-out glyphs into a [`TriangleMesh`]
//! - [`build_outline`]: the offset silhouette mesh drawn behind the text
//!
//! [`TriangleMesh`]: crate::mesh::TriangleMesh

pub mod contour;
mod extrude;
mod outline;

pub use contour::Contour;
pub use extrude::{extrude, ExtrudeOptions, DEFAULT_CURVE_SEGMENTS};
pub use outline::{build_outline, scaled_outline_width, REFERENCE_HEIGHT};
