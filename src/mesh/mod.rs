//! Core mesh data structures.
//!
//! This module provides the triangle buffer representation shared by every stage
//! of the text pipeline, the material group table that partitions it, and the
//! bounding metrics derived from it.
//!
//! # Overview
//!
//! The primary type is [`TriangleMesh`]: flat position, normal and UV buffers plus
//! a `u32` index buffer where every consecutive run of three indices is one
//! triangle. A mesh optionally carries a table of [`Group`]s, contiguous index
//! ranges bound to a [`MaterialSlot`]. An empty table means the whole mesh is one
//! implicit group.
//!
//! # Construction
//!
//! ```
//! use textrude::mesh::{TriangleMesh, measure};
//! use nalgebra::{Point2, Point3, Vector3};
//!
//! let mut mesh = TriangleMesh::new();
//! let n = Vector3::z();
//! let a = mesh.push_vertex(Point3::new(0.0, 0.0, 0.0), n, Point2::new(0.0, 0.0));
//! let b = mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), n, Point2::new(1.0, 0.0));
//! let c = mesh.push_vertex(Point3::new(0.0, 2.0, 0.0), n, Point2::new(0.0, 2.0));
//! mesh.push_triangle([a, b, c]);
//!
//! assert_eq!(mesh.num_triangles(), 1);
//! assert_eq!(measure(&mesh).height(), 2.0);
//! ```

mod bounds;
mod triangle;

pub use bounds::{measure, BoundingMetrics};
pub use triangle::{Group, MaterialSlot, TriangleMesh};
