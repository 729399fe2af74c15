//! Face classification.
//!
//! Splits an extruded text mesh into five material groups by the direction
//! its triangles face: right and left walls, up and down walls, and the
//! front/back caps.
//!
//! # Example
//!
//! ```
//! use textrude::classify::{classify, ClassifyOptions};
//! use textrude::font::BlockFont;
//! use textrude::geometry::{extrude, ExtrudeOptions};
//! use textrude::layout::{layout, SpacingParams};
//! use textrude::mesh::MaterialSlot;
//!
//! let params = SpacingParams::new(10.0, 2.0);
//! let spans = layout("T", &BlockFont::new(), &params).unwrap();
//! let mut mesh = extrude(&spans, params.depth, &ExtrudeOptions::default()).unwrap();
//!
//! classify(&mut mesh, &ClassifyOptions::default());
//!
//! assert_eq!(mesh.groups().len(), 5);
//! assert_eq!(mesh.groups()[4].slot, MaterialSlot::Cap);
//! ```

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::mesh::{Group, MaterialSlot, TriangleMesh};

/// `|n.x|` above this makes a triangle a right or left wall.
pub const SIDE_THRESHOLD: f32 = 0.8;

/// `|n.y|` above this makes a triangle an up or down wall.
pub const VERTICAL_THRESHOLD: f32 = 0.5;

/// Options for face classification.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Whether to classify triangles in parallel (default: true).
    pub parallel: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl ClassifyOptions {
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
}

/// Slot for a (not necessarily unit) normal.
pub fn slot_for_normal(normal: &Vector3<f32>) -> MaterialSlot {
    let Some(n) = normal.try_normalize(f32::EPSILON) else {
        return MaterialSlot::Cap;
    };

    if n.x.abs() > SIDE_THRESHOLD {
        if n.x > 0.0 {
            MaterialSlot::Right
        } else {
            MaterialSlot::Left
        }
    } else if n.y.abs() > VERTICAL_THRESHOLD {
        if n.y > 0.0 {
            MaterialSlot::Up
        } else {
            MaterialSlot::Down
        }
    } else {
        MaterialSlot::Cap
    }
}

/// Slot of every triangle, judged by the normal of its first vertex.
pub fn triangle_slots(mesh: &TriangleMesh, options: &ClassifyOptions) -> Vec<MaterialSlot> {
    let normals = mesh.normals();
    let slot = |tri: &[u32]| slot_for_normal(&normals[tri[0] as usize]);

    if options.parallel {
        mesh.indices().par_chunks_exact(3).map(slot).collect()
    } else {
        mesh.indices().chunks_exact(3).map(slot).collect()
    }
}

/// Partition a mesh's triangles into the five face groups.
///
/// The index buffer is stably reordered so each slot's triangles are
/// contiguous, and the group table is replaced by exactly five groups where
/// group *i* is bound to slot *i*. Slots with no triangles get empty groups.
/// Vertex data is untouched. An empty mesh ends up with no groups.
///
/// Only the first vertex of each triangle is sampled; vertices are expected
/// to carry flat (per-face) normals, as the extrusion builder emits.
pub fn classify(mesh: &mut TriangleMesh, options: &ClassifyOptions) {
    mesh.clear_groups();
    if mesh.is_empty() {
        return;
    }

    let slots = triangle_slots(mesh, options);

    let mut buckets: [Vec<usize>; 5] = Default::default();
    for (t, slot) in slots.iter().enumerate() {
        buckets[slot.index()].push(t);
    }

    let mut order = Vec::with_capacity(slots.len());
    let mut groups = Vec::with_capacity(MaterialSlot::FACES.len());
    for (slot, bucket) in MaterialSlot::FACES.iter().zip(&buckets) {
        groups.push(Group::new(order.len() * 3, bucket.len() * 3, *slot));
        order.extend_from_slice(bucket);
    }

    mesh.reorder_triangles(&order);
    let result = mesh.set_groups(groups);
    debug_assert!(result.is_ok(), "face groups must partition the index buffer");

    log::debug!(
        "classified {} triangles: {:?}",
        slots.len(),
        buckets.iter().map(Vec::len).collect::<Vec<_>>()
    );
}

/// Triangle count per face slot, in slot order.
///
/// Uses the group table when present and classifies on the fly otherwise.
pub fn slot_histogram(mesh: &TriangleMesh) -> [usize; 5] {
    let mut counts = [0usize; 5];
    if mesh.is_grouped() {
        for g in mesh.groups().iter().filter(|g| g.slot.is_face()) {
            counts[g.slot.index()] += g.num_triangles();
        }
    } else {
        for slot in triangle_slots(mesh, &ClassifyOptions::default()) {
            counts[slot.index()] += 1;
        }
    }
    counts
}
