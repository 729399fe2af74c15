//! Bundling meshes and materials into drawable layers.
//!
//! A [`MeshBundle`] holds up to three layers that share one transform:
//!
//! | Layer   | Draw order | Geometry                          | Materials            |
//! |---------|------------|-----------------------------------|----------------------|
//! | outline | 1          | offset silhouette                 | one outline material |
//! | main    | 2          | classified text mesh              | one per face slot    |
//! | overlay | 3          | deep copy of the main mesh        | late-arriving, single |
//!
//! The overlay material can show up at any time, before or after the first
//! assembly. [`MeshAssembler`] keeps the latest one in a single-slot mailbox
//! and patches it into the current bundle without rebuilding geometry.

use nalgebra::{Isometry3, Matrix4, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};

use crate::error::{Result, TextMeshError};
use crate::material::SlotMaterials;
use crate::mesh::{MaterialSlot, TriangleMesh};

/// Order in which layers are drawn, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawOrder {
    /// Outline, drawn behind everything.
    Outline = 1,
    /// The text itself.
    Main = 2,
    /// Overlay, drawn on top.
    Overlay = 3,
}

impl DrawOrder {
    /// Numeric render order.
    #[inline]
    pub fn value(self) -> u32 {
        self as u32
    }
}

/// Position and XYZ Euler rotation (radians) applied to a whole bundle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation.
    pub position: Vector3<f32>,
    /// Rotation about X, then Y, then Z, in radians.
    pub rotation: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// No translation or rotation.
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
        }
    }

    /// Set the translation.
    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    /// Set the Euler angles.
    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rotation matrix, `Rx * Ry * Rz`.
    pub fn rotation_matrix(&self) -> Rotation3<f32> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), self.rotation.x)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation.y)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), self.rotation.z)
    }

    /// The transform as an isometry.
    pub fn isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(
            Translation3::from(self.position),
            UnitQuaternion::from_rotation_matrix(&self.rotation_matrix()),
        )
    }

    /// Homogeneous 4x4 matrix.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        self.isometry().to_homogeneous()
    }

    /// Map a local-space point into world space.
    pub fn transform_point(&self, p: &Point3<f32>) -> Point3<f32> {
        self.rotation_matrix() * p + self.position
    }
}

/// Materials bound to a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerMaterials<M> {
    /// One material per face slot; group *i* uses entry *i*.
    Slots([M; 5]),
    /// One material for every group. `None` until it is provided.
    Uniform(Option<M>),
}

/// A mesh with its materials and draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer<M> {
    /// When this layer is drawn.
    pub order: DrawOrder,
    /// Layer geometry.
    pub mesh: TriangleMesh,
    /// Layer materials.
    pub materials: LayerMaterials<M>,
}

impl<M> Layer<M> {
    /// Material used for triangles in `slot`.
    pub fn material_for(&self, slot: MaterialSlot) -> Option<&M> {
        match &self.materials {
            LayerMaterials::Slots(slots) => slots.get(slot.index()),
            LayerMaterials::Uniform(material) => material.as_ref(),
        }
    }
}

/// The assembled layers of one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBundle<M> {
    /// The classified text mesh.
    pub main: Layer<M>,
    /// The outline silhouette. Empty when the outline is off.
    pub outline: Layer<M>,
    /// Copy of the main mesh drawn on top, when enabled.
    pub overlay: Option<Layer<M>>,
    /// Transform shared by every layer.
    pub transform: Transform,
}

impl<M> MeshBundle<M> {
    /// Layers sorted by draw order.
    pub fn drawables(&self) -> Vec<&Layer<M>> {
        let mut layers: Vec<&Layer<M>> = [Some(&self.outline), Some(&self.main), self.overlay.as_ref()]
            .into_iter()
            .flatten()
            .collect();
        layers.sort_by_key(|layer| layer.order);
        layers
    }

    /// The overlay layer, if any.
    pub fn overlay(&self) -> Option<&Layer<M>> {
        self.overlay.as_ref()
    }
}

/// Builds [`MeshBundle`]s and routes the late overlay material into them.
#[derive(Debug, Clone)]
pub struct MeshAssembler<M> {
    overlay_material: Option<M>,
    bundle: Option<MeshBundle<M>>,
}

impl<M> Default for MeshAssembler<M> {
    fn default() -> Self {
        Self {
            overlay_material: None,
            bundle: None,
        }
    }
}

impl<M: Clone> MeshAssembler<M> {
    /// An assembler with no bundle and no overlay material yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a new bundle, replacing the previous one.
    ///
    /// The overlay layer exists only when `overlay_enabled` is set and the
    /// main mesh has triangles. It gets its own copy of the main geometry and
    /// whatever overlay material has arrived so far.
    ///
    /// # Errors
    /// Returns [`TextMeshError::InvalidState`] if `main` has triangles but
    /// was not partitioned into the five face groups.
    pub fn assemble(
        &mut self,
        main: TriangleMesh,
        outline: TriangleMesh,
        materials: SlotMaterials<M>,
        overlay_enabled: bool,
        transform: Transform,
    ) -> Result<&MeshBundle<M>> {
        if !main.is_empty() && !is_face_grouped(&main) {
            return Err(TextMeshError::InvalidState(
                "main mesh must be classified before assembly".to_string(),
            ));
        }

        let overlay = (overlay_enabled && !main.is_empty()).then(|| Layer {
            order: DrawOrder::Overlay,
            mesh: main.clone(),
            materials: LayerMaterials::Uniform(self.overlay_material.clone()),
        });

        let SlotMaterials { faces, outline: outline_material } = materials;
        let bundle = MeshBundle {
            main: Layer {
                order: DrawOrder::Main,
                mesh: main,
                materials: LayerMaterials::Slots(faces),
            },
            outline: Layer {
                order: DrawOrder::Outline,
                mesh: outline,
                materials: LayerMaterials::Uniform(Some(outline_material)),
            },
            overlay,
            transform,
        };

        log::debug!(
            "assembled bundle: main={} outline={} overlay={}",
            bundle.main.mesh.num_triangles(),
            bundle.outline.mesh.num_triangles(),
            bundle.overlay.is_some()
        );

        Ok(&*self.bundle.insert(bundle))
    }

    /// Deliver a new overlay material, returning the previous one.
    ///
    /// The current overlay layer, if any, picks it up immediately. Otherwise
    /// it waits for the next assembly.
    pub fn set_overlay_material(&mut self, material: M) -> Option<M> {
        if let Some(overlay) = self.bundle.as_mut().and_then(|b| b.overlay.as_mut()) {
            overlay.materials = LayerMaterials::Uniform(Some(material.clone()));
        }
        self.overlay_material.replace(material)
    }

    /// The pending or applied overlay material.
    pub fn overlay_material(&self) -> Option<&M> {
        self.overlay_material.as_ref()
    }

    /// The most recently assembled bundle.
    pub fn bundle(&self) -> Option<&MeshBundle<M>> {
        self.bundle.as_ref()
    }

    /// Take ownership of the current bundle. The overlay material stays.
    pub fn take_bundle(&mut self) -> Option<MeshBundle<M>> {
        self.bundle.take()
    }
}

fn is_face_grouped(mesh: &TriangleMesh) -> bool {
    let groups = mesh.groups();
    groups.len() == MaterialSlot::FACES.len()
        && groups.iter().zip(MaterialSlot::FACES).all(|(g, slot)| g.slot == slot)
}
