//! STL (stereolithography) export.
//!
//! STL has no notion of groups, UVs or shared vertices, so only positions
//! survive. Facet normals are recomputed from the triangle winding.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use nalgebra::Vector3;

use crate::error::{Result, TextMeshError};
use crate::mesh::TriangleMesh;

/// Save a mesh to a binary STL file.
///
/// # Example
///
/// ```no_run
/// use textrude::io::stl;
/// use textrude::mesh::TriangleMesh;
///
/// let mesh = TriangleMesh::new();
/// stl::save(&mesh, "output.stl").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let positions = mesh.positions();
    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles()
        .map(|[a, b, c]| {
            let p0 = &positions[a as usize];
            let p1 = &positions[b as usize];
            let p2 = &positions[c as usize];

            let n = (p1 - p0)
                .cross(&(p2 - p0))
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(Vector3::zeros);

            stl_io::Triangle {
                normal: stl_io::Normal::new([n.x, n.y, n.z]),
                vertices: [
                    stl_io::Vertex::new([p0.x, p0.y, p0.z]),
                    stl_io::Vertex::new([p1.x, p1.y, p1.z]),
                    stl_io::Vertex::new([p2.x, p2.y, p2.z]),
                ],
            }
        })
        .collect();

    stl_io::write_stl(&mut writer, triangles.iter()).map_err(|e| TextMeshError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::debug!("wrote {} triangles to {}", triangles.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BlockFont;
    use crate::pipeline::{build_text_geometry, TextOptions};

    #[test]
    fn test_save_and_read_back() {
        let text = build_text_geometry("L", &BlockFont::new(), &TextOptions::default()).unwrap();
        let path = std::env::temp_dir().join(format!("textrude-stl-{}.stl", std::process::id()));

        save(&text.main, &path).unwrap();
        let mut file = File::open(&path).unwrap();
        let read = stl_io::read_stl(&mut file).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(read.faces.len(), text.main.num_triangles());
    }

    #[test]
    fn test_save_to_missing_directory() {
        let path = std::env::temp_dir()
            .join("textrude-does-not-exist")
            .join("out.stl");
        assert!(matches!(save(&TriangleMesh::new(), &path), Err(TextMeshError::Io(_))));
    }
}
