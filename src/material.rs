//! Per-face material specifications.
//!
//! The core never shades anything. It keeps one [`MaterialSpec`] per
//! styleable [`Face`], works out where each spec's texture coordinates land
//! on the text ([`uv_transform`]), and hands both to a caller-supplied
//! [`MaterialResolver`] that produces whatever the renderer draws with.
//!
//! # Mode memory
//!
//! [`MaterialStore`] remembers the last spec used for every (face, mode)
//! pair, so switching a face from a gradient to a solid color and back brings
//! the gradient back instead of resetting it.
//!
//! ```
//! use textrude::material::{Face, MaterialMode, MaterialSpec, MaterialStore, Rgba};
//!
//! let mut store = MaterialStore::new();
//! store.set_mode(Face::Front, MaterialMode::Gradient);
//! store.update(Face::Front, MaterialSpec::Gradient {
//!     start: Rgba::WHITE,
//!     end: "#ff0000".parse().unwrap(),
//!     repeat: 2.0,
//!     offset: 0.0,
//! });
//!
//! store.set_mode(Face::Front, MaterialMode::Color);
//! store.set_mode(Face::Front, MaterialMode::Gradient);
//! assert!(matches!(store.get(Face::Front), MaterialSpec::Gradient { repeat, .. } if *repeat == 2.0));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use nalgebra::Point2;

use crate::error::TextMeshError;
use crate::mesh::{BoundingMetrics, MaterialSlot};

/// A styleable face of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// Front cap.
    Front,
    /// Back cap.
    Back,
    /// Upward-facing walls.
    Up,
    /// Downward-facing walls.
    Down,
    /// Left-facing walls.
    Left,
    /// Right-facing walls.
    Right,
    /// Outline silhouette.
    Outline,
}

impl Face {
    /// Every face.
    pub const ALL: [Face; 7] = [
        Face::Front,
        Face::Back,
        Face::Up,
        Face::Down,
        Face::Left,
        Face::Right,
        Face::Outline,
    ];

    /// The face whose spec drives a material slot. Both caps share the
    /// front spec.
    pub fn for_slot(slot: MaterialSlot) -> Face {
        match slot {
            MaterialSlot::Right => Face::Right,
            MaterialSlot::Left => Face::Left,
            MaterialSlot::Up => Face::Up,
            MaterialSlot::Down => Face::Down,
            MaterialSlot::Cap => Face::Front,
            MaterialSlot::Outline => Face::Outline,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// How a face is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialMode {
    /// Solid color.
    Color,
    /// Vertical two-color gradient.
    Gradient,
    /// Image texture.
    Image,
}

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    /// Create a color from components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self, TextMeshError> {
        let invalid = || TextMeshError::invalid_param("color", hex, "expected #rrggbb or #rrggbbaa");

        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !(digits.len() == 6 || digits.len() == 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| -> Result<f32, TextMeshError> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| invalid())
        };

        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Rgba::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl FromStr for Rgba {
    type Err = TextMeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgba::from_hex(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(f, "#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))?;
        if self.a < 1.0 {
            write!(f, "{:02x}", byte(self.a))?;
        }
        Ok(())
    }
}

/// Material specification for one face.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialSpec {
    /// Solid color.
    Color {
        /// The color.
        color: Rgba,
    },
    /// Vertical gradient from the bottom of the text to the top.
    Gradient {
        /// Color at the bottom.
        start: Rgba,
        /// Color at the top.
        end: Rgba,
        /// How many times the gradient repeats over the text height.
        repeat: f32,
        /// Vertical offset in gradient periods.
        offset: f32,
    },
    /// Image texture.
    Image {
        /// Image location or data URL. Empty until one is chosen.
        source: String,
        /// Horizontal repeats per unit.
        repeat_x: f32,
        /// Vertical repeats per unit.
        repeat_y: f32,
        /// Horizontal offset.
        offset_x: f32,
        /// Vertical offset.
        offset_y: f32,
    },
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self::default_for(MaterialMode::Color)
    }
}

impl MaterialSpec {
    /// The default spec for a mode.
    pub fn default_for(mode: MaterialMode) -> Self {
        match mode {
            MaterialMode::Color => MaterialSpec::Color {
                color: Rgba::WHITE,
            },
            MaterialMode::Gradient => MaterialSpec::Gradient {
                start: Rgba::WHITE,
                end: Rgba::BLACK,
                repeat: 1.0,
                offset: 0.0,
            },
            MaterialMode::Image => MaterialSpec::Image {
                source: String::new(),
                repeat_x: 0.1,
                repeat_y: 0.1,
                offset_x: 0.0,
                offset_y: 0.0,
            },
        }
    }

    /// This spec's mode.
    pub fn mode(&self) -> MaterialMode {
        match self {
            MaterialSpec::Color { .. } => MaterialMode::Color,
            MaterialSpec::Gradient { .. } => MaterialMode::Gradient,
            MaterialSpec::Image { .. } => MaterialMode::Image,
        }
    }
}

/// Current material per face, plus the last spec used for every
/// (face, mode) pair.
#[derive(Debug, Clone, Default)]
pub struct MaterialStore {
    current: [MaterialSpec; 7],
    remembered: HashMap<(Face, MaterialMode), MaterialSpec>,
}

impl MaterialStore {
    /// A store with every face solid white.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current spec of a face.
    pub fn get(&self, face: Face) -> &MaterialSpec {
        &self.current[face.index()]
    }

    /// Replace the current spec of a face.
    ///
    /// A spec of a different mode counts as a mode switch: the outgoing
    /// spec is remembered under its own mode.
    pub fn update(&mut self, face: Face, spec: MaterialSpec) {
        let slot = &mut self.current[face.index()];
        if slot.mode() != spec.mode() {
            self.remembered.insert((face, slot.mode()), slot.clone());
        }
        *slot = spec;
    }

    /// Switch a face to `mode`, restoring the spec it last had in that mode
    /// or the mode's default.
    pub fn set_mode(&mut self, face: Face, mode: MaterialMode) -> &MaterialSpec {
        let current = &self.current[face.index()];
        if current.mode() != mode {
            let next = self.lookup_or_default(face, mode);
            self.update(face, next);
        }
        self.get(face)
    }

    /// The spec last used for `face` in `mode`, if any.
    pub fn remembered(&self, face: Face, mode: MaterialMode) -> Option<&MaterialSpec> {
        let current = self.get(face);
        if current.mode() == mode {
            return Some(current);
        }
        self.remembered.get(&(face, mode))
    }

    /// The spec `face` would get in `mode`.
    pub fn lookup_or_default(&self, face: Face, mode: MaterialMode) -> MaterialSpec {
        self.remembered(face, mode)
            .cloned()
            .unwrap_or_else(|| MaterialSpec::default_for(mode))
    }

    /// Specs for the five face slots, in slot order, and the outline.
    pub fn slot_specs(&self) -> ([&MaterialSpec; 5], &MaterialSpec) {
        let faces = MaterialSlot::FACES.map(|slot| self.get(Face::for_slot(slot)));
        (faces, self.get(Face::Outline))
    }
}

/// Scale and offset applied to a face's texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvTransform {
    /// Scale for U and V.
    pub scale: [f32; 2],
    /// Offset for U and V, added after scaling.
    pub offset: [f32; 2],
}

impl Default for UvTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl UvTransform {
    /// No change.
    pub fn identity() -> Self {
        Self {
            scale: [1.0, 1.0],
            offset: [0.0, 0.0],
        }
    }

    /// Transform a coordinate.
    pub fn apply(&self, uv: Point2<f32>) -> Point2<f32> {
        Point2::new(
            uv.x * self.scale[0] + self.offset[0],
            uv.y * self.scale[1] + self.offset[1],
        )
    }
}

/// Where a spec's texture lands on text with the given bounds.
///
/// Gradients are stretched so one period spans the text height divided by
/// `repeat`, starting at the bottom of the text. Images use their repeat and
/// offset directly. `global_y_offset` shifts every textured face vertically.
pub fn uv_transform(spec: &MaterialSpec, metrics: &BoundingMetrics, global_y_offset: f32) -> UvTransform {
    match spec {
        MaterialSpec::Color { .. } => UvTransform::identity(),
        MaterialSpec::Gradient { repeat, offset, .. } => {
            if metrics.is_degenerate() {
                return UvTransform {
                    scale: [1.0, 1.0],
                    offset: [0.0, offset + global_y_offset],
                };
            }
            let s = repeat / metrics.height();
            UvTransform {
                scale: [1.0, s],
                offset: [0.0, offset - metrics.min.y * s + global_y_offset],
            }
        }
        MaterialSpec::Image {
            repeat_x,
            repeat_y,
            offset_x,
            offset_y,
            ..
        } => UvTransform {
            scale: [*repeat_x, *repeat_y],
            offset: [*offset_x, offset_y + global_y_offset],
        },
    }
}

/// Turns material specs into renderer materials.
pub trait MaterialResolver {
    /// The renderer's material handle.
    type Material;

    /// Build a material for `spec` with the given texture placement.
    fn resolve(&self, spec: &MaterialSpec, placement: &UvTransform) -> Self::Material;
}

/// Resolved materials for the five face slots and the outline.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotMaterials<M> {
    /// Materials in slot order: right, left, up, down, caps.
    pub faces: [M; 5],
    /// Outline material.
    pub outline: M,
}

impl<M> SlotMaterials<M> {
    /// Material bound to `slot`.
    pub fn for_slot(&self, slot: MaterialSlot) -> &M {
        match slot {
            MaterialSlot::Outline => &self.outline,
            face => &self.faces[face.index()],
        }
    }
}

/// Resolve every slot's material from the store.
pub fn resolve_slot_materials<R: MaterialResolver>(
    resolver: &R,
    store: &MaterialStore,
    metrics: &BoundingMetrics,
    global_y_offset: f32,
) -> SlotMaterials<R::Material> {
    let (faces, outline) = store.slot_specs();
    SlotMaterials {
        faces: faces.map(|spec| resolver.resolve(spec, &uv_transform(spec, metrics, global_y_offset))),
        outline: resolver.resolve(outline, &UvTransform::identity()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    struct Describe;

    impl MaterialResolver for Describe {
        type Material = (MaterialMode, UvTransform);

        fn resolve(&self, spec: &MaterialSpec, placement: &UvTransform) -> Self::Material {
            (spec.mode(), *placement)
        }
    }

    fn metrics(min_y: f32, max_y: f32) -> BoundingMetrics {
        BoundingMetrics {
            min: Point3::new(0.0, min_y, 0.0),
            max: Point3::new(10.0, max_y, 2.0),
        }
    }

    #[test]
    fn test_hex_colors() {
        let c: Rgba = "#ff8000".parse().unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
        assert_eq!(c.to_string(), "#ff8000");

        let c = Rgba::from_hex("#00000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.to_string(), "#00000080");

        assert!(Rgba::from_hex("ffffff").is_err());
        assert!(Rgba::from_hex("#fff").is_err());
        assert!(Rgba::from_hex("#gggggg").is_err());
        assert!(Rgba::from_hex("#+f+f+f").is_err());
        assert!(Rgba::from_hex("#+fffff").is_err());
    }

    #[test]
    fn test_defaults() {
        let store = MaterialStore::new();
        for face in Face::ALL {
            assert_eq!(store.get(face), &MaterialSpec::Color { color: Rgba::WHITE });
        }
        assert!(matches!(
            MaterialSpec::default_for(MaterialMode::Image),
            MaterialSpec::Image { repeat_x, .. } if repeat_x == 0.1
        ));
    }

    #[test]
    fn test_mode_memory() {
        let mut store = MaterialStore::new();
        let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
        store.update(Face::Up, MaterialSpec::Color { color: red });

        // Fresh mode starts from its default.
        let spec = store.set_mode(Face::Up, MaterialMode::Image).clone();
        assert_eq!(spec, MaterialSpec::default_for(MaterialMode::Image));

        // Going back restores the red.
        store.set_mode(Face::Up, MaterialMode::Color);
        assert_eq!(store.get(Face::Up), &MaterialSpec::Color { color: red });

        // Faces don't share memory.
        assert_eq!(store.remembered(Face::Down, MaterialMode::Image), None);
        assert_eq!(
            store.lookup_or_default(Face::Down, MaterialMode::Gradient),
            MaterialSpec::default_for(MaterialMode::Gradient)
        );
    }

    #[test]
    fn test_set_same_mode_is_noop() {
        let mut store = MaterialStore::new();
        let green = Rgba::new(0.0, 1.0, 0.0, 1.0);
        store.update(Face::Left, MaterialSpec::Color { color: green });
        store.set_mode(Face::Left, MaterialMode::Color);
        assert_eq!(store.get(Face::Left), &MaterialSpec::Color { color: green });
    }

    #[test]
    fn test_caps_share_front_spec() {
        let mut store = MaterialStore::new();
        store.set_mode(Face::Front, MaterialMode::Gradient);
        store.set_mode(Face::Outline, MaterialMode::Image);
        let (faces, outline) = store.slot_specs();
        assert_eq!(faces[MaterialSlot::Cap.index()].mode(), MaterialMode::Gradient);
        assert_eq!(faces[MaterialSlot::Right.index()].mode(), MaterialMode::Color);
        assert_eq!(outline.mode(), MaterialMode::Image);
    }

    #[test]
    fn test_gradient_spans_text_height() {
        let spec = MaterialSpec::Gradient {
            start: Rgba::WHITE,
            end: Rgba::BLACK,
            repeat: 1.0,
            offset: 0.0,
        };
        let m = metrics(-2.0, 6.0);
        let t = uv_transform(&spec, &m, 0.0);
        assert!((t.apply(Point2::new(0.0, -2.0)).y - 0.0).abs() < 1e-6);
        assert!((t.apply(Point2::new(0.0, 6.0)).y - 1.0).abs() < 1e-6);

        let shifted = uv_transform(&spec, &m, 0.25);
        assert!((shifted.apply(Point2::new(0.0, -2.0)).y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_gradient_on_empty_text() {
        let spec = MaterialSpec::default_for(MaterialMode::Gradient);
        let t = uv_transform(&spec, &BoundingMetrics::empty(), 0.0);
        assert!(t.scale.iter().chain(&t.offset).all(|v| v.is_finite()));
    }

    #[test]
    fn test_image_placement() {
        let spec = MaterialSpec::Image {
            source: "wood.png".to_string(),
            repeat_x: 0.5,
            repeat_y: 0.25,
            offset_x: 1.0,
            offset_y: 2.0,
        };
        let t = uv_transform(&spec, &metrics(0.0, 10.0), 0.5);
        assert_eq!(t.scale, [0.5, 0.25]);
        assert_eq!(t.offset, [1.0, 2.5]);
    }

    #[test]
    fn test_resolve_slot_materials() {
        let mut store = MaterialStore::new();
        store.set_mode(Face::Right, MaterialMode::Gradient);
        let resolved = resolve_slot_materials(&Describe, &store, &metrics(0.0, 5.0), 0.0);

        assert_eq!(resolved.for_slot(MaterialSlot::Right).0, MaterialMode::Gradient);
        assert!((resolved.for_slot(MaterialSlot::Right).1.scale[1] - 0.2).abs() < 1e-6);
        assert_eq!(resolved.for_slot(MaterialSlot::Cap).0, MaterialMode::Color);
        assert_eq!(resolved.for_slot(MaterialSlot::Outline).1, UvTransform::identity());
    }
}
