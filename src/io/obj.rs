//! Wavefront OBJ reader and writer.
//!
//! Only the geometry carried by `v` and `f` statements is used; texture
//! coordinates, normals, materials and groups are skipped. Faces may be
//! polygons; they are fan-triangulated on read.

use crate::{Mesh, Point, TriangleIndex};
use crate::geom::triangles::fan_triangulate;
use anyhow::{Context, Result, anyhow};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Reads an OBJ file into a mesh.
///
/// Face indices may use the `v`, `v/vt`, `v//vn` or `v/vt/vn` syntax and may
/// be negative (relative to the vertices read so far). Duplicate vertices
/// are merged after reading, since some exporters repeat corners per face.
pub fn read_obj(path: &Path) -> Result<Mesh> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut vertices: Vec<Point> = Vec::new();
    let mut faces: Vec<TriangleIndex> = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        let mut parts = trimmed.split_whitespace();

        match parts.next() {
            Some("v") => {
                let coords: Vec<f64> = parts
                    .take(3)
                    .map(|s| s.parse::<f64>())
                    .collect::<Result<_, _>>()
                    .with_context(|| format!("Invalid vertex on line {}", lineno + 1))?;
                if coords.len() != 3 {
                    return Err(anyhow!("Vertex with < 3 coordinates on line {}", lineno + 1));
                }
                vertices.push(Point::new(coords[0], coords[1], coords[2]));
            }
            Some("f") => {
                let mut face: Vec<usize> = Vec::new();
                for part in parts {
                    let index_str = part
                        .split('/')
                        .next()
                        .ok_or_else(|| anyhow!("Empty face index on line {}", lineno + 1))?;
                    let index: i64 = index_str
                        .parse()
                        .with_context(|| format!("Invalid face index on line {}", lineno + 1))?;
                    face.push(resolve_obj_index(index, vertices.len(), lineno + 1)?);
                }
                if face.len() < 3 {
                    return Err(anyhow!("Face with < 3 vertices on line {}", lineno + 1));
                }
                faces.extend(fan_triangulate(&face));
            }
            // vt, vn, o, g, s, usemtl, mtllib, comments, blank lines
            _ => {}
        }
    }

    let mesh = Mesh::new(vertices, Some(faces));
    Ok(mesh.deduplicate_vertices())
}

/// Maps a 1-based (or negative, relative) OBJ index to a 0-based one.
fn resolve_obj_index(index: i64, num_vertices: usize, lineno: usize) -> Result<usize> {
    let resolved = if index > 0 {
        index - 1
    } else if index < 0 {
        num_vertices as i64 + index
    } else {
        return Err(anyhow!("OBJ indices are 1-based, got 0 on line {}", lineno));
    };
    if resolved < 0 || resolved as usize >= num_vertices {
        return Err(anyhow!(
            "Face index {} out of range on line {}",
            index,
            lineno
        ));
    }
    Ok(resolved as usize)
}

/// Writes a mesh to an OBJ file.
pub fn write_obj(path: &Path, mesh: &Mesh, name: &str) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let faces = mesh
        .faces
        .as_ref()
        .ok_or_else(|| anyhow!("Mesh has no triangulated faces"))?;

    writeln!(writer, "o {}", name)?;
    for p in &mesh.vertices {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for tri in faces {
        writeln!(writer, "f {} {} {}", tri.0 + 1, tri.1 + 1, tri.2 + 1)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_obj_quads_and_triangles() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("test.obj");
        fs::write(
            &path,
            "# comment\n\
             o test\n\
             v 0 0 0\n\
             v 1 0 0\n\
             v 1 1 0\n\
             v 0 1 0\n\
             v 0 0 1\n\
             f 1 2 3 4\n\
             f 1 2 5\n",
        )?;

        let mesh = read_obj(&path)?;
        assert_eq!(mesh.vertex_count(), 5);
        // Quad fans into 2 triangles, plus 1 plain triangle
        assert_eq!(mesh.face_count(), 3);
        assert!(mesh.vertices()[4].is_close(&Point::new(0., 0., 1.)));
        Ok(())
    }

    #[test]
    fn test_read_obj_slash_and_negative_indices() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("test.obj");
        fs::write(
            &path,
            "v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             vt 0 0\n\
             vn 0 0 1\n\
             f 1/1/1 2/1/1 3/1/1\n\
             f -3 -2 -1\n",
        )?;

        let mesh = read_obj(&path)?;
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces().unwrap()[0], mesh.faces().unwrap()[1]);
        Ok(())
    }

    #[test]
    fn test_read_obj_merges_duplicates() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("test.obj");
        fs::write(
            &path,
            "v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             v 1 0 0\n\
             v 1 1 0\n\
             v 0 1 0\n\
             f 1 2 3\n\
             f 4 5 6\n",
        )?;

        let mesh = read_obj(&path)?;
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        Ok(())
    }

    #[test]
    fn test_read_obj_bad_index() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("test.obj");
        fs::write(&path, "v 0 0 0\nf 1 2 3\n")?;
        assert!(read_obj(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_obj_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("box.obj");

        let original = Mesh::from_box(2., 3., 4., None);
        write_obj(&path, &original, "box")?;
        let loaded = read_obj(&path)?;

        assert_eq!(loaded.vertex_count(), original.vertex_count());
        assert_eq!(loaded.face_count(), original.face_count());
        Ok(())
    }

    #[test]
    fn test_read_missing_file_errors() {
        assert!(read_obj(Path::new("no/such/file.obj")).is_err());
    }
}
