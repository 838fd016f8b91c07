//! The city of buildings under the spider army.

use crate::Mesh;
use crate::Vector;
use crate::io::obj::read_obj;
use anyhow::Result;
use std::path::Path;

/// Reads the buildings model and orients it for the scene.
///
/// The OBJ asset (downloaded from sketchfab, stored in the data directory)
/// is y-up; it gets rotated x by 90 degrees to stand z-up, then shifted so
/// the army hovers over the city center.
pub fn load_buildings(path: &Path) -> Result<Mesh> {
    let mut buildings = read_obj(path)?;
    buildings.rotate_x(90.);
    buildings.translate(Vector::new(-4., -4., 0.));
    Ok(buildings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_buildings_orientation() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("buildings.obj");

        // One y-up quad: a "roof" at height y = 2
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, "v 0 2 0")?;
        writeln!(file, "v 1 2 0")?;
        writeln!(file, "v 1 2 1")?;
        writeln!(file, "v 0 2 1")?;
        writeln!(file, "f 1 2 3 4")?;
        drop(file);

        let buildings = load_buildings(&path)?;
        // y-up height 2 becomes z-up height 2, then shifted by (-4, -4, 0)
        assert_eq!(buildings.vertex_count(), 4);
        assert_eq!(buildings.face_count(), 2);
        assert!(buildings.vertices()[0].is_close(&Point::new(-4., -4., 2.)));
        Ok(())
    }

    #[test]
    fn test_missing_file_errors() {
        let result = load_buildings(Path::new("no/such/buildings.obj"));
        assert!(result.is_err());
    }
}
