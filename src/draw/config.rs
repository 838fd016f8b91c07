/// RGBA color tuple (red, green, blue, alpha) with values in 0.0..=1.0.
pub type Rgba = (f32, f32, f32, f32);

/// Configuration for scene drawing and Rerun logging.
///
/// Controls window/session naming, the scene colors and edge display.
pub struct DrawConfig {
    // Labels
    pub window_title: String,
    pub session_name: String,
    pub entity_prefix: String,

    // Scene colors
    pub spider_color: Rgba,
    pub box_color: Rgba,
    pub buildings_color: Rgba,
    pub background: Rgba,

    // Edge overlays
    pub edge_color: Rgba,
    pub edge_radius_factor: f32,
    pub show_box_edges: bool,
    pub show_building_edges: bool,

    // Printed camera tuple (position, focal point, view up)
    pub print_camera: bool,
}

impl DrawConfig {
    pub fn new() -> Self {
        Self {
            window_title: "xkcd red spiders".to_string(),
            session_name: "xkcd_red_spider".to_string(),
            entity_prefix: "RedSpider".to_string(),

            spider_color: (1.0, 0.0, 0.0, 1.0),
            box_color: (0.82, 0.71, 0.55, 1.0), // tan
            buildings_color: (1.0, 1.0, 1.0, 1.0),
            background: (0.9, 0.9, 0.9, 1.0),

            edge_color: (0.2, 0.2, 0.2, 1.0),
            edge_radius_factor: 0.002,
            show_box_edges: true,
            show_building_edges: true,

            print_camera: true,
        }
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self::new()
    }
}
