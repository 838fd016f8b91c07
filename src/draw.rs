use anyhow::Result;
use three_d::Camera;
use three_d::ColorMaterial;
use three_d::CpuMesh;
use three_d::Gm;
use three_d::Indices;
use three_d::Mesh as GpuMesh;
use three_d::Positions;
use three_d::Srgba;
use three_d::control::OrbitControl;
use three_d::degrees;
use three_d::vec3;
use three_d::{ClearState, FrameOutput, InnerSpace, InstancedMesh, Instances, Mat4, Quat, Vec3};
use three_d::{Window, WindowSettings};

use crate::Scene;
use crate::geom::mesh::Mesh;
use crate::geom::point::Point;
use crate::geom::triangles::TriangleIndex;

pub mod config;
pub mod rerun;

use config::{DrawConfig, Rgba};

const MAX_DISTANCE: f32 = 1000.0;

fn points_to_positions(pts: &[Point]) -> Positions {
    Positions::F64(pts.iter().map(|p| vec3(p.x, p.y, p.z)).collect())
}

fn triangles_to_indices(tri: &[TriangleIndex]) -> Indices {
    Indices::U32(
        tri.iter()
            .flat_map(|x| [x.0 as u32, x.1 as u32, x.2 as u32])
            .collect(),
    )
}

fn rgba_to_srgba(rgba: Rgba) -> Srgba {
    let (r, g, b, a) = rgba;
    Srgba::new(
        (r * 255.) as u8,
        (g * 255.) as u8,
        (b * 255.) as u8,
        (a * 255.) as u8,
    )
}

/// One mesh with its display settings, ready for the render window.
struct MeshGroup<'a> {
    mesh: &'a Mesh,
    color: Rgba,
    show_edges: bool,
}

/// Opens an interactive window showing the whole scene.
///
/// Spiders are drawn in the spider color, boxes and buildings with their own
/// colors and edge overlays, per `config`. Blocks until the window closes.
pub fn draw_scene(scene: &Scene, config: &DrawConfig) -> Result<()> {
    let mut groups: Vec<MeshGroup> = Vec::new();
    for unit in &scene.army {
        groups.push(MeshGroup {
            mesh: &unit.spider,
            color: config.spider_color,
            show_edges: false,
        });
        groups.push(MeshGroup {
            mesh: &unit.box_mesh,
            color: config.box_color,
            show_edges: config.show_box_edges,
        });
    }
    if let Some(buildings) = &scene.buildings {
        groups.push(MeshGroup {
            mesh: buildings,
            color: config.buildings_color,
            show_edges: config.show_building_edges,
        });
    }

    draw_groups(&groups, config)
}

/// Opens an interactive window showing a single mesh.
pub fn draw_mesh(mesh: &Mesh, color: Rgba, show_edges: bool) -> Result<()> {
    let groups = [MeshGroup {
        mesh,
        color,
        show_edges,
    }];
    draw_groups(&groups, &DrawConfig::default())
}

fn draw_groups(groups: &[MeshGroup], config: &DrawConfig) -> Result<()> {
    // Window & GL
    let window = Window::new(WindowSettings {
        title: config.window_title.clone(),
        ..Default::default()
    })?;
    let context = window.gl();

    // Compute positions as Vec3<f32> for camera framing
    let positions: Vec<Vec3> = groups
        .iter()
        .flat_map(|g| g.mesh.vertices())
        .map(|p| vec3(p.x as f32, p.y as f32, p.z as f32))
        .collect();
    if positions.is_empty() {
        return Err(anyhow::anyhow!("Nothing to draw: the scene has no vertices"));
    }
    let center = positions.iter().copied().reduce(|a, b| a + b).unwrap() / positions.len() as f32;
    let radius = positions
        .iter()
        .map(|p| (p - center).magnitude())
        .fold(0.0, f32::max)
        .max(1.0);

    // Filled meshes
    let mut fills: Vec<Gm<GpuMesh, ColorMaterial>> = Vec::new();
    for group in groups {
        let mut cpu = CpuMesh {
            positions: points_to_positions(group.mesh.vertices()),
            indices: triangles_to_indices(group.mesh.faces().unwrap_or_default()),
            ..Default::default()
        };
        cpu.compute_normals();
        fills.push(Gm::new(
            GpuMesh::new(&context, &cpu),
            ColorMaterial {
                color: rgba_to_srgba(group.color),
                ..Default::default()
            },
        ));
    }

    // Edge overlays (instanced cylinders along unique triangle edges)
    let mut cyl = CpuMesh::cylinder(12);
    cyl.transform(Mat4::from_nonuniform_scale(
        1.0,
        radius * config.edge_radius_factor,
        radius * config.edge_radius_factor,
    ))?;

    let mut edge_gms: Vec<Gm<InstancedMesh, ColorMaterial>> = Vec::new();
    for group in groups.iter().filter(|g| g.show_edges) {
        let transformations = edge_transforms(group.mesh);
        if transformations.is_empty() {
            continue;
        }
        let instances = Instances {
            transformations,
            ..Default::default()
        };
        edge_gms.push(Gm::new(
            InstancedMesh::new(&context, &instances, &cyl),
            ColorMaterial {
                color: rgba_to_srgba(config.edge_color),
                ..Default::default()
            },
        ));
    }

    // Camera & control adapt to scene size; z is up in this scene
    let up = vec3(0.0, 0.0, 1.0);
    let position = center + vec3(1.0, -1.0, 0.6).normalize() * (radius * 2.0);
    let mut camera = Camera::new_perspective(
        window.viewport(),
        position,
        center,
        up,
        degrees(45.0),
        0.1,
        radius * MAX_DISTANCE,
    );
    let mut control = OrbitControl::new(center, radius * 0.5, radius * MAX_DISTANCE);

    if config.print_camera {
        // Camera tuple: [position, focal point, view up]
        println!(
            "[({:.2}, {:.2}, {:.2}), ({:.2}, {:.2}, {:.2}), ({:.1}, {:.1}, {:.1})]",
            position.x, position.y, position.z, center.x, center.y, center.z, up.x, up.y, up.z
        );
    }

    let (br, bg, bb, ba) = config.background;

    // Render loop
    window.render_loop(move |mut frame_input| {
        camera.set_viewport(frame_input.viewport);
        control.handle_events(&mut camera, &mut frame_input.events);

        frame_input
            .screen()
            .clear(ClearState::color_and_depth(br, bg, bb, ba, 1.0))
            .render(
                &camera,
                fills
                    .iter()
                    .flat_map(|g| g.into_iter())
                    .chain(edge_gms.iter().flat_map(|g| g.into_iter())),
                &[],
            );

        FrameOutput::default()
    });
    Ok(())
}

/// Computes a cylinder transform between two points.
fn edge_transform(p1: Vec3, p2: Vec3) -> Mat4 {
    Mat4::from_translation(p1)
        * Into::<Mat4>::into(Quat::from_arc(
            vec3(1.0, 0.0, 0.0),
            (p2 - p1).normalize(),
            None,
        ))
        * Mat4::from_nonuniform_scale((p2 - p1).magnitude(), 1.0, 1.0)
}

/// One transform per unique (undirected) triangle edge of the mesh.
fn edge_transforms(mesh: &Mesh) -> Vec<Mat4> {
    let positions: Vec<Vec3> = mesh
        .vertices()
        .iter()
        .map(|p| vec3(p.x as f32, p.y as f32, p.z as f32))
        .collect();

    let mut seen = std::collections::HashSet::new();
    let mut transforms: Vec<Mat4> = Vec::new();
    for t in mesh.faces().unwrap_or_default() {
        let [i1, i2, i3] = [t.0, t.1, t.2];
        for &(a, b) in &[(i1, i2), (i2, i3), (i3, i1)] {
            let key = if a < b { (a, b) } else { (b, a) };
            if seen.insert(key) {
                transforms.push(edge_transform(positions[a], positions[b]));
            }
        }
    }
    transforms
}
