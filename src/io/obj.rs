//! Wavefront OBJ export.
//!
//! Positions, normals and UVs are written once per vertex. Each non-empty
//! group becomes a `g`/`usemtl` block named after its material slot, so a
//! classified mesh opens in most DCC tools with its faces already split.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::mesh::{Group, MaterialSlot, TriangleMesh};

/// Material name used for a slot.
pub fn slot_name(slot: MaterialSlot) -> &'static str {
    match slot {
        MaterialSlot::Right => "right",
        MaterialSlot::Left => "left",
        MaterialSlot::Up => "up",
        MaterialSlot::Down => "down",
        MaterialSlot::Cap => "cap",
        MaterialSlot::Outline => "outline",
    }
}

/// Save a mesh to an OBJ file.
pub fn save<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write(mesh, &mut writer)?;
    writer.flush()?;
    log::debug!("wrote {} triangles to {}", mesh.num_triangles(), path.display());
    Ok(())
}

/// Write a mesh as OBJ text.
pub fn write<W: Write>(mesh: &TriangleMesh, w: &mut W) -> Result<()> {
    writeln!(w, "# textrude")?;
    writeln!(w, "# {} vertices, {} triangles", mesh.num_vertices(), mesh.num_triangles())?;

    for p in mesh.positions() {
        writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in mesh.uvs() {
        writeln!(w, "vt {} {}", uv.x, uv.y)?;
    }
    for n in mesh.normals() {
        writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    if mesh.is_grouped() {
        for group in mesh.groups().iter().filter(|g| g.count > 0) {
            let name = slot_name(group.slot);
            writeln!(w, "g {}", name)?;
            writeln!(w, "usemtl {}", name)?;
            write_faces(mesh, group, w)?;
        }
    } else {
        write_faces(mesh, &Group::new(0, mesh.indices().len(), MaterialSlot::Cap), w)?;
    }

    Ok(())
}

fn write_faces<W: Write>(mesh: &TriangleMesh, group: &Group, w: &mut W) -> Result<()> {
    for tri in mesh.indices()[group.start..group.end()].chunks_exact(3) {
        // OBJ indices are 1-based.
        let [a, b, c] = [tri[0] + 1, tri[1] + 1, tri[2] + 1];
        writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BlockFont;
    use crate::pipeline::{build_text_geometry, TextOptions};
    use nalgebra::{Point2, Point3, Vector3};

    fn to_string(mesh: &TriangleMesh) -> String {
        let mut buf = Vec::new();
        write(mesh, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_ungrouped_triangle() {
        let mut mesh = TriangleMesh::new();
        for p in [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]] {
            mesh.push_vertex(Point3::new(p[0], p[1], 0.0), Vector3::z(), Point2::new(p[0], p[1]));
        }
        mesh.push_triangle([0, 1, 2]);

        let text = to_string(&mesh);
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 3);
        assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 3);
        assert!(text.contains("f 1/1/1 2/2/2 3/3/3"));
        assert!(!text.contains("usemtl"));
    }

    #[test]
    fn test_groups_become_blocks() {
        let geometry = build_text_geometry("T", &BlockFont::new(), &TextOptions::default()).unwrap();
        let text = to_string(&geometry.main);

        let faces = text.lines().filter(|l| l.starts_with("f ")).count();
        assert_eq!(faces, geometry.main.num_triangles());

        let non_empty = geometry.main.groups().iter().filter(|g| g.count > 0).count();
        assert_eq!(text.lines().filter(|l| l.starts_with("usemtl ")).count(), non_empty);
        assert!(text.contains("usemtl cap"));
    }

    #[test]
    fn test_outline_slot_name() {
        let options = TextOptions::default().with_outline_width(1.0);
        let geometry = build_text_geometry("T", &BlockFont::new(), &options).unwrap();
        let text = to_string(&geometry.outline);
        assert!(text.contains("g outline"));
    }
}
