//! # Textrude
//!
//! Extruded 3D text meshes with independently styleable faces.
//!
//! Textrude turns a string into triangle meshes ready for a real-time
//! renderer: a flat-capped extruded text mesh split into material groups by
//! the direction each triangle faces, an outline silhouette scaled to the
//! text height, and an optional overlay copy drawn on top.
//!
//! ## Features
//!
//! - **Spaced layout**: letter and word spacing on top of the font's advances
//! - **Extrusion**: curve flattening, hole-aware caps and outward-facing walls
//! - **Face classification**: right, left, up, down and cap groups for per-face materials
//! - **Outline**: miter-offset silhouette whose width tracks the text height
//! - **Materials**: per-face color, gradient and image specs with placement
//! - **Export**: STL and grouped OBJ
//!
//! ## Quick Start
//!
//! ```
//! use textrude::prelude::*;
//!
//! let options = TextOptions::default()
//!     .with_letter_spacing(0.5)
//!     .with_outline_width(0.3);
//! let text = build_text_geometry("Hello", &BlockFont::new(), &options).unwrap();
//!
//! println!("height: {}", text.metrics.height());
//! for group in text.main.groups() {
//!     println!("{:?}: {} triangles", group.slot, group.num_triangles());
//! }
//! ```
//!
//! ## Materials and Assembly
//!
//! Materials are opaque to the crate. A [`MaterialResolver`](material::MaterialResolver)
//! turns each face's [`MaterialSpec`](material::MaterialSpec) into the
//! renderer's own material type:
//!
//! ```
//! use textrude::prelude::*;
//!
//! struct Names;
//!
//! impl MaterialResolver for Names {
//!     type Material = String;
//!
//!     fn resolve(&self, spec: &MaterialSpec, _placement: &UvTransform) -> String {
//!         format!("{:?}", spec.mode())
//!     }
//! }
//!
//! let mut store = MaterialStore::new();
//! store.set_mode(Face::Front, MaterialMode::Gradient);
//!
//! let text = build_text_geometry("Hi", &BlockFont::new(), &TextOptions::default().with_overlay(true)).unwrap();
//! let materials = resolve_slot_materials(&Names, &store, &text.metrics, 0.0);
//!
//! let mut assembler = MeshAssembler::new();
//! assembler.set_overlay_material("Glow".to_string());
//! let bundle = text.assemble(&mut assembler, materials, Transform::identity()).unwrap();
//!
//! assert_eq!(bundle.drawables().len(), 3);
//! assert_eq!(bundle.main.material_for(MaterialSlot::Cap).unwrap(), "Gradient");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assembly;
pub mod classify;
pub mod error;
pub mod font;
pub mod geometry;
pub mod io;
pub mod layout;
pub mod material;
pub mod mesh;
pub mod pipeline;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use textrude::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assembly::{DrawOrder, Layer, LayerMaterials, MeshAssembler, MeshBundle, Transform};
    pub use crate::classify::{classify, ClassifyOptions};
    pub use crate::error::{Result, TextMeshError};
    pub use crate::font::{BlockFont, Glyph, GlyphOutlineProvider, TtfFont};
    pub use crate::geometry::{build_outline, extrude, ExtrudeOptions};
    pub use crate::layout::{layout, GlyphSpan, SpacingParams};
    pub use crate::material::{
        resolve_slot_materials, uv_transform, Face, MaterialMode, MaterialResolver, MaterialSpec,
        MaterialStore, Rgba, SlotMaterials, UvTransform,
    };
    pub use crate::mesh::{measure, BoundingMetrics, Group, MaterialSlot, TriangleMesh};
    pub use crate::pipeline::{build_text_geometry, TextGeometry, TextOptions};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
