use crate::vector::Vector2;

/// 0RGB packed pixel, the format softbuffer presents.
pub type Color = u32;

#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> Color {
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

pub const SKY: Color = pack_rgb(135, 206, 235);
pub const GROUND: Color = pack_rgb(0, 100, 0);
pub const WALL_X: Color = pack_rgb(0, 0, 255);
pub const WALL_Y: Color = pack_rgb(0, 0, 139);

/// Every tunable of the simulation and the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Display pixels per internal column/row.
    pub res: u32,
    pub fov_degrees: f64,
    /// Far clamp for degenerate hit distances, in grid units.
    pub view_distance: f64,
    /// Maximum cells a ray visits before giving up.
    pub max_steps: u32,
    /// Collision half-width of the camera body.
    pub clearance: f64,
    /// Grid units per second.
    pub move_speed: f64,
    /// Radians per second.
    pub turn_speed: f64,
    /// Longest frame delta fed to the simulation, in seconds.
    pub max_frame_delta: f64,
    pub spawn_position: Vector2,
    pub spawn_direction: Vector2,
    pub title: &'static str,
    pub window_size: (f64, f64), // logical
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            res: 1,
            fov_degrees: 90.0,
            view_distance: 80.0,
            max_steps: 80,
            clearance: 0.2,
            move_speed: 3.0,
            turn_speed: 2.0,
            max_frame_delta: 0.1,
            spawn_position: Vector2::new(2.0, 2.0),
            spawn_direction: Vector2::new(1.0, 0.0),
            title: "Grid Caster",
            window_size: (800.0, 600.0),
        }
    }
}
