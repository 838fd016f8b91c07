pub mod draw;
pub mod geom;
pub mod io;
pub mod scene;
pub mod transform;

// Prelude
pub use geom::mesh::Mesh;
pub use geom::point::Point;
pub use geom::rotation::Axis;
pub use geom::triangles::TriangleIndex;
pub use geom::vector::Vector;
pub use scene::Scene;
pub use scene::army::{ArmyLayout, GridUnit, build_army};
pub use scene::unit::SpiderUnit;
pub use transform::{Placement, RotationStep};
// Drawing utilities
pub use draw::config::DrawConfig;
pub use draw::{draw_mesh, draw_scene};
