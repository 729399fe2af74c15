//! Triangle buffers and material groups.

use nalgebra::{Point2, Point3, Vector3};

use crate::error::{Result, TextMeshError};

/// Material slot a group of triangles is bound to.
///
/// The first five slots are the face categories produced by the face
/// classifier; front and back caps share [`MaterialSlot::Cap`]. The outline
/// mesh uses the dedicated [`MaterialSlot::Outline`] slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaterialSlot {
    /// Side walls facing +X.
    Right = 0,
    /// Side walls facing -X.
    Left = 1,
    /// Side walls facing +Y.
    Up = 2,
    /// Side walls facing -Y.
    Down = 3,
    /// Front and back caps.
    Cap = 4,
    /// Outline silhouette.
    Outline = 5,
}

impl MaterialSlot {
    /// The five face slots in slot-index order.
    pub const FACES: [MaterialSlot; 5] = [
        MaterialSlot::Right,
        MaterialSlot::Left,
        MaterialSlot::Up,
        MaterialSlot::Down,
        MaterialSlot::Cap,
    ];

    /// Numeric slot index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether this is one of the five face slots.
    #[inline]
    pub fn is_face(self) -> bool {
        self != MaterialSlot::Outline
    }
}

/// A contiguous range of the index buffer bound to one material slot.
///
/// `start` and `count` are measured in indices, so both are multiples of three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    /// First index of the range.
    pub start: usize,
    /// Number of indices in the range.
    pub count: usize,
    /// Material slot the range is drawn with.
    pub slot: MaterialSlot,
}

impl Group {
    /// Create a new group.
    pub fn new(start: usize, count: usize, slot: MaterialSlot) -> Self {
        Self { start, count, slot }
    }

    /// One past the last index of the range.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    /// Number of triangles in the range.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.count / 3
    }
}

/// An indexed triangle mesh with per-vertex normals and UVs.
///
/// Positions, normals and UVs always have the same length. The index buffer
/// length is a multiple of three and every index is in range. Structural
/// edits ([`push_triangle`](Self::push_triangle), [`append`](Self::append))
/// discard the group table, so groups never outlive the geometry they were
/// derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    positions: Vec<Point3<f32>>,
    normals: Vec<Vector3<f32>>,
    uvs: Vec<Point2<f32>>,
    indices: Vec<u32>,
    groups: Vec<Group>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with reserved capacity.
    pub fn with_capacity(num_vertices: usize, num_triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(num_vertices),
            normals: Vec::with_capacity(num_vertices),
            uvs: Vec::with_capacity(num_vertices),
            indices: Vec::with_capacity(num_triangles * 3),
            groups: Vec::new(),
        }
    }

    /// Build a mesh from raw buffers, validating their consistency.
    ///
    /// # Errors
    /// Returns [`TextMeshError::InvalidBuffers`] if the attribute buffers have
    /// different lengths, the index count is not a multiple of three, or an
    /// index is out of range.
    pub fn from_buffers(
        positions: Vec<Point3<f32>>,
        normals: Vec<Vector3<f32>>,
        uvs: Vec<Point2<f32>>,
        indices: Vec<u32>,
    ) -> Result<Self> {
        if normals.len() != positions.len() || uvs.len() != positions.len() {
            return Err(TextMeshError::InvalidBuffers(format!(
                "attribute lengths differ: {} positions, {} normals, {} uvs",
                positions.len(),
                normals.len(),
                uvs.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(TextMeshError::InvalidBuffers(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(TextMeshError::InvalidBuffers(format!(
                "index {} out of range for {} vertices",
                bad,
                positions.len()
            )));
        }

        Ok(Self {
            positions,
            normals,
            uvs,
            indices,
            groups: Vec::new(),
        })
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    /// Mutable vertex positions. Topology and groups are unaffected.
    #[inline]
    pub fn positions_mut(&mut self) -> &mut [Point3<f32>] {
        &mut self.positions
    }

    /// Vertex normals.
    #[inline]
    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    /// Vertex texture coordinates.
    #[inline]
    pub fn uvs(&self) -> &[Point2<f32>] {
        &self.uvs
    }

    /// The index buffer.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The group table. Empty when the mesh is ungrouped.
    #[inline]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Whether the mesh carries an explicit group table.
    #[inline]
    pub fn is_grouped(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let i = t * 3;
        [self.indices[i], self.indices[i + 1], self.indices[i + 2]]
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Add a vertex and return its index.
    pub fn push_vertex(&mut self, position: Point3<f32>, normal: Vector3<f32>, uv: Point2<f32>) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    /// Add a triangle. Clears the group table.
    pub fn push_triangle(&mut self, triangle: [u32; 3]) {
        debug_assert!(
            triangle.iter().all(|&i| (i as usize) < self.positions.len()),
            "triangle {:?} references a missing vertex",
            triangle
        );
        self.groups.clear();
        self.indices.extend_from_slice(&triangle);
    }

    /// Append another mesh's geometry, offsetting its indices. Clears the group table.
    pub fn append(&mut self, other: &TriangleMesh) {
        let offset = self.positions.len() as u32;
        self.groups.clear();
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Replace the group table.
    ///
    /// # Errors
    /// Returns [`TextMeshError::InvalidBuffers`] unless the groups are
    /// triangle-aligned and partition the index buffer in order.
    pub fn set_groups(&mut self, groups: Vec<Group>) -> Result<()> {
        if !groups_partition(&groups, self.indices.len()) {
            return Err(TextMeshError::InvalidBuffers(format!(
                "{} groups do not partition {} indices",
                groups.len(),
                self.indices.len()
            )));
        }
        self.groups = groups;
        Ok(())
    }

    /// Bind the whole mesh to a single slot. An empty mesh stays ungrouped.
    pub fn set_single_group(&mut self, slot: MaterialSlot) {
        self.groups.clear();
        if !self.indices.is_empty() {
            self.groups.push(Group::new(0, self.indices.len(), slot));
        }
    }

    /// Drop the group table.
    pub fn clear_groups(&mut self) {
        self.groups.clear();
    }

    /// Check that the group table partitions the index buffer.
    ///
    /// An ungrouped mesh is trivially valid.
    pub fn groups_are_valid(&self) -> bool {
        self.groups.is_empty() || groups_partition(&self.groups, self.indices.len())
    }

    /// Vertex data as interleaved `[px, py, pz, nx, ny, nz, u, v]` records.
    pub fn interleaved(&self) -> Vec<[f32; 8]> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| [p.x, p.y, p.z, n.x, n.y, n.z, uv.x, uv.y])
            .collect()
    }

    /// Rewrite the index buffer so triangle `k` becomes the old triangle `order[k]`.
    pub(crate) fn reorder_triangles(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.num_triangles());
        let indices: Vec<u32> = order
            .iter()
            .flat_map(|&t| self.triangle(t))
            .collect();
        self.indices = indices;
        self.groups.clear();
    }
}

fn groups_partition(groups: &[Group], num_indices: usize) -> bool {
    let mut cursor = 0;
    for g in groups {
        if g.start != cursor || g.count % 3 != 0 {
            return false;
        }
        cursor = g.end();
    }
    cursor == num_indices
}
