//! First-person grid-world renderer.
//!
//! A camera moves through a static tile [`grid::Grid`]; every frame one DDA
//! ray per screen column finds the nearest wall and a vertical slab inversely
//! proportional to its perpendicular distance is painted.

pub mod camera;
pub mod caster;
pub mod collision;
pub mod grid;
pub mod input;
pub mod level;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod vector;
