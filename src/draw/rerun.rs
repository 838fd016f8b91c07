//! Logs the scene to a Rerun viewer, as an alternative to the render window.

use crate::Scene;
use crate::draw::config::{DrawConfig, Rgba};
use crate::geom::mesh::Mesh;
use crate::geom::point::Point;
use crate::geom::triangles::TriangleIndex;
use anyhow::Result;
use rerun as rr;

/// Converts Point to native format of Rerun
impl From<Point> for rr::Vec3D {
    fn from(val: Point) -> Self {
        rr::Vec3D([val.x as f32, val.y as f32, val.z as f32])
    }
}

/// Converts TriangleIndex to native format of Rerun
impl From<TriangleIndex> for rr::TriangleIndices {
    fn from(val: TriangleIndex) -> Self {
        rr::TriangleIndices(rr::datatypes::UVec3D([
            val.0 as u32,
            val.1 as u32,
            val.2 as u32,
        ]))
    }
}

fn color(rgba: Rgba) -> rr::Color {
    let (r, g, b, a) = rgba;
    rr::Color(rr::Rgba32::from_linear_unmultiplied_rgba_f32(r, g, b, a))
}

/// Connects to the Rerun gRPC server using the default address and port:
/// localhost:9876.
pub fn start_session(config: &DrawConfig) -> Result<rr::RecordingStream> {
    let session = rr::RecordingStreamBuilder::new(config.session_name.clone()).spawn()?;

    Ok(session)
}

/// Logs the faces of one mesh as a static entity.
pub fn log_mesh(
    session: &rr::RecordingStream,
    entity: &str,
    mesh: &Mesh,
    rgba: Rgba,
) -> Result<()> {
    let vertices: Vec<Point> = mesh.vertices.clone();
    let triangles: Vec<TriangleIndex> = mesh.faces.clone().unwrap_or_default();

    let (r, g, b, a) = rgba;
    session.log_static(
        entity,
        &rr::Mesh3D::new(vertices)
            .with_triangle_indices(triangles)
            .with_albedo_factor(rr::Rgba32::from_linear_unmultiplied_rgba_f32(r, g, b, a)),
    )?;

    Ok(())
}

/// Logs the triangle edges of one mesh as line strips.
pub fn log_mesh_edges(
    session: &rr::RecordingStream,
    entity: &str,
    mesh: &Mesh,
    radius: f32,
    rgba: Rgba,
) -> Result<()> {
    let vertices = &mesh.vertices;
    let triangles: Vec<TriangleIndex> = mesh.faces.clone().unwrap_or_default();

    let mut lines: Vec<Vec<rr::Vec3D>> = Vec::new();
    let mut radii: Vec<f32> = Vec::new();
    let mut colors: Vec<rr::Color> = Vec::new();

    for t in triangles.iter() {
        lines.push(vec![
            rr::Vec3D::from(vertices[t.0]),
            rr::Vec3D::from(vertices[t.1]),
            rr::Vec3D::from(vertices[t.2]),
            rr::Vec3D::from(vertices[t.0]),
        ]);
        radii.push(radius);
        colors.push(color(rgba));
    }

    session.log_static(
        entity,
        &rr::LineStrips3D::new(lines)
            .with_radii(radii)
            .with_colors(colors),
    )?;

    Ok(())
}

/// Edge radius scaled to the scene size, same factor as the render window.
pub fn edge_radius(scene: &Scene, config: &DrawConfig) -> f32 {
    let radius = match scene.bounds() {
        Some((pmin, pmax)) => {
            let half_diag = ((pmax.x - pmin.x).powi(2)
                + (pmax.y - pmin.y).powi(2)
                + (pmax.z - pmin.z).powi(2))
            .sqrt()
                / 2.;
            (half_diag as f32).max(1.0)
        }
        None => 1.0,
    };
    radius * config.edge_radius_factor
}

/// Logs every unit of the army and the buildings under one entity prefix.
///
/// Entities are named `<prefix>/army/<unit>/spider`, `<prefix>/army/<unit>/box`
/// (with `box_edges`), `<prefix>/buildings` and `<prefix>/buildings_edges`,
/// with the edge entities present per the `config` flags.
pub fn log_scene(session: &rr::RecordingStream, scene: &Scene, config: &DrawConfig) -> Result<()> {
    let prefix = &config.entity_prefix;
    let radius = edge_radius(scene, config);

    for unit in &scene.army {
        let spider_entity = format!("{}/army/{}/spider", prefix, unit.name);
        log_mesh(session, &spider_entity, &unit.spider, config.spider_color)?;

        let box_entity = format!("{}/army/{}/box", prefix, unit.name);
        log_mesh(session, &box_entity, &unit.box_mesh, config.box_color)?;
        if config.show_box_edges {
            let edges_entity = format!("{}/army/{}/box_edges", prefix, unit.name);
            log_mesh_edges(
                session,
                &edges_entity,
                &unit.box_mesh,
                radius,
                config.edge_color,
            )?;
        }
    }

    if let Some(buildings) = &scene.buildings {
        let entity = format!("{}/buildings", prefix);
        log_mesh(session, &entity, buildings, config.buildings_color)?;
        if config.show_building_edges {
            let edges_entity = format!("{}/buildings_edges", prefix);
            log_mesh_edges(session, &edges_entity, buildings, radius, config.edge_color)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::unit::SpiderUnit;
    use crate::transform::Placement;

    fn tiny_scene() -> Scene {
        let raw = Mesh::new(vec![Point::new(0., 0., 0.5)], None);
        let unit = SpiderUnit::assemble("unit_00", &raw, &Placement::identity());
        let mut scene = Scene::from_units(vec![unit]);
        scene.buildings = Some(Mesh::unit_box());
        scene
    }

    #[test]
    fn test_edge_radius_scales_with_factor() {
        let scene = tiny_scene();
        let mut config = DrawConfig::new();
        config.edge_radius_factor = 0.002;
        let thin = edge_radius(&scene, &config);
        config.edge_radius_factor = 0.004;
        let thick = edge_radius(&scene, &config);
        assert!(thin > 0.0);
        assert!((thick - 2.0 * thin).abs() < 1e-6);
    }

    #[test]
    fn test_edge_radius_empty_scene() {
        let scene = Scene::from_units(Vec::new());
        let config = DrawConfig::new();
        assert!((edge_radius(&scene, &config) - config.edge_radius_factor).abs() < 1e-9);
    }
}
