use rayon::prelude::*;

use crate::{
    caster::{RayHit, Side},
    settings::{Color, GROUND, SKY, WALL_X, WALL_Y},
    sim::SimulationState,
};

/// Drawing surface the frame is painted onto.
pub trait Canvas {
    /// Pixel dimensions `(width, height)`.
    fn size(&self) -> (usize, usize);

    /// Fills the axis-aligned rectangle at `(x, y)`; anything outside the
    /// surface is clipped.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);
}

/// Row-major 0RGB pixel buffer, e.g. a softbuffer frame.
pub struct Framebuffer<'a> {
    pixels: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Framebuffer<'a> {
    pub fn new(pixels: &'a mut [u32], width: usize, height: usize) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            pixels,
            width,
            height,
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }
}

impl Canvas for Framebuffer<'_> {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        // Pixel centres inside the rect; NaN clamps to an empty span
        let span = |start: f64, len: f64, max: usize| {
            let a = start.round().clamp(0.0, max as f64) as usize;
            let b = (start + len).round().clamp(0.0, max as f64) as usize;
            a..b
        };
        let xs = span(x, w, self.width);
        if xs.is_empty() {
            return;
        }
        for row in span(y, h, self.height) {
            let base = row * self.width;
            self.pixels[base + xs.start..base + xs.end].fill(color);
        }
    }
}

/// Display size and the internal resolution rays are cast at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub display_width: usize,
    pub display_height: usize,
    /// Display pixels per internal pixel.
    pub res: usize,
    pub internal_width: usize,
    pub internal_height: usize,
}

impl Viewport {
    pub fn new(display_width: usize, display_height: usize, res: u32) -> Self {
        let mut viewport = Self {
            display_width: 0,
            display_height: 0,
            res: (res as usize).max(1),
            internal_width: 0,
            internal_height: 0,
        };
        viewport.resize(display_width, display_height);
        viewport
    }

    pub fn resize(&mut self, display_width: usize, display_height: usize) {
        self.display_width = display_width;
        self.display_height = display_height;
        self.internal_width = display_width / self.res;
        self.internal_height = display_height / self.res;
    }
}

/// Distance to draw for a column.
///
/// A miss leaves the column empty. A hit whose distance is zero or not finite
/// is drawn at `view_distance` instead.
pub fn column_distance(hit: Option<RayHit>, view_distance: f64) -> Option<(f64, Side)> {
    let hit = hit?;
    let distance = if hit.distance.is_finite() && hit.distance != 0.0 {
        hit.distance
    } else {
        view_distance
    };
    Some((distance, hit.side))
}

/// On-screen slab height for a wall `distance` away, in display pixels.
#[inline]
pub fn slab_height(internal_height: usize, distance: f64, res: usize) -> f64 {
    (internal_height as f64 / distance).trunc() * res as f64
}

#[inline]
fn wall_color(side: Side) -> Color {
    match side {
        Side::X => WALL_X,
        Side::Y => WALL_Y,
    }
}

/// Casts one ray per internal column. Columns are independent and only read
/// the grid and camera, so they run in parallel.
pub fn cast_columns(state: &SimulationState, columns: usize) -> Vec<Option<RayHit>> {
    let caster = state.caster();
    let camera = state.camera;
    (0..columns)
        .into_par_iter()
        .map(|x| caster.cast(camera.position, camera.ray_direction(x, columns)))
        .collect()
}

/// Paints sky, ground and one wall slab per internal column. Returns how many
/// columns drew a wall.
pub fn render_frame(
    canvas: &mut impl Canvas,
    viewport: &Viewport,
    state: &SimulationState,
) -> usize {
    let (w, h) = canvas.size();
    let (w, h) = (w as f64, h as f64);

    canvas.fill_rect(0.0, 0.0, w, h / 2.0, SKY);
    canvas.fill_rect(0.0, h / 2.0, w, h / 2.0, GROUND);

    let res = viewport.res;
    let view = state.settings.view_distance;
    let mut drawn = 0;
    for (x, hit) in cast_columns(state, viewport.internal_width).into_iter().enumerate() {
        let Some((distance, side)) = column_distance(hit, view) else {
            continue;
        };

        let height = slab_height(viewport.internal_height, distance, res);
        let top = h / 2.0 - height / 2.0;
        canvas.fill_rect((x * res) as f64, top, res as f64, height, wall_color(side));
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid::Grid, settings::Settings, vector::Vector2};

    fn state_in(rows: Vec<Vec<u8>>, spawn: Vector2) -> SimulationState {
        SimulationState::new(
            Grid::from_rows(&rows).unwrap(),
            Settings {
                spawn_position: spawn,
                ..Settings::default()
            },
        )
    }

    #[test]
    fn fill_rect_clips() {
        let mut px = vec![0u32; 4 * 3];
        let mut fb = Framebuffer::new(&mut px, 4, 3);
        fb.fill_rect(-2.0, 1.0, 4.0, 10.0, 7);
        assert_eq!(fb.pixel(0, 0), 0);
        assert_eq!(fb.pixel(0, 1), 7);
        assert_eq!(fb.pixel(1, 2), 7);
        assert_eq!(fb.pixel(2, 1), 0);
        fb.fill_rect(f64::NAN, 0.0, 2.0, 1.0, 9);
        fb.fill_rect(0.0, f64::INFINITY, 2.0, 1.0, 9);
        assert!(!px.contains(&9));
    }

    #[test]
    fn viewport_downscales() {
        let mut vp = Viewport::new(801, 600, 2);
        assert_eq!((vp.internal_width, vp.internal_height), (400, 300));
        vp.resize(10, 5);
        assert_eq!((vp.internal_width, vp.internal_height), (5, 2));
        assert_eq!(Viewport::new(10, 10, 0).res, 1);
    }

    #[test]
    fn miss_skips_but_degenerate_hit_clamps() {
        assert_eq!(column_distance(None, 80.0), None);
        let hit = |distance| {
            Some(RayHit {
                distance,
                side: Side::Y,
            })
        };
        assert_eq!(column_distance(hit(3.5), 80.0), Some((3.5, Side::Y)));
        assert_eq!(column_distance(hit(f64::INFINITY), 80.0), Some((80.0, Side::Y)));
        assert_eq!(column_distance(hit(f64::NAN), 80.0), Some((80.0, Side::Y)));
        assert_eq!(column_distance(hit(0.0), 80.0), Some((80.0, Side::Y)));
    }

    #[test]
    fn slab_height_truncates_then_scales() {
        assert_eq!(slab_height(300, 4.0, 1), 75.0);
        assert_eq!(slab_height(300, 7.0, 2), 84.0);
        assert_eq!(slab_height(300, 80.0, 1), 3.0);
    }

    #[test]
    fn empty_world_is_sky_and_ground() {
        let state = state_in(vec![vec![0u8; 5]; 5], Vector2::new(2.5, 2.5));
        let mut px = vec![0u32; 8 * 6];
        let vp = Viewport::new(8, 6, 1);
        let drawn = render_frame(&mut Framebuffer::new(&mut px, 8, 6), &vp, &state);
        assert_eq!(drawn, 0);
        let fb = Framebuffer::new(&mut px, 8, 6);
        assert_eq!(fb.pixel(3, 0), SKY);
        assert_eq!(fb.pixel(3, 2), SKY);
        assert_eq!(fb.pixel(3, 3), GROUND);
        assert_eq!(fb.pixel(7, 5), GROUND);
    }

    #[test]
    fn wall_ahead_draws_centred_slab() {
        // Wall column x = 4, camera at x = 2.5 facing +x: perp distance 1.5
        let mut rows = vec![vec![0u8; 5]; 5];
        for row in rows.iter_mut() {
            row[4] = 1;
        }
        let state = state_in(rows, Vector2::new(2.5, 2.5));
        let (w, h) = (16, 12);
        let mut px = vec![0u32; w * h];
        let vp = Viewport::new(w, h, 1);
        let drawn = render_frame(&mut Framebuffer::new(&mut px, w, h), &vp, &state);
        assert!(drawn > 0);

        // Centre column hits the X face; 12 / 1.5 = 8 px tall, rows 2..10
        let fb = Framebuffer::new(&mut px, w, h);
        let x = w / 2;
        assert_eq!(fb.pixel(x, 1), SKY);
        assert_eq!(fb.pixel(x, 2), WALL_X);
        assert_eq!(fb.pixel(x, 9), WALL_X);
        assert_eq!(fb.pixel(x, 10), GROUND);
    }

    #[test]
    fn wall_across_y_uses_y_color() {
        // Top row (world y = 4) walled, camera at y = 2.5 facing +y: perp distance 1.5
        let mut rows = vec![vec![0u8; 5]; 5];
        rows[0] = vec![1; 5];
        let state = SimulationState::new(
            Grid::from_rows(&rows).unwrap(),
            Settings {
                spawn_position: Vector2::new(2.5, 2.5),
                spawn_direction: Vector2::new(0.0, 1.0),
                ..Settings::default()
            },
        );
        let (w, h) = (16, 12);
        let mut px = vec![0u32; w * h];
        let vp = Viewport::new(w, h, 1);
        render_frame(&mut Framebuffer::new(&mut px, w, h), &vp, &state);

        let fb = Framebuffer::new(&mut px, w, h);
        let x = w / 2;
        assert_eq!(fb.pixel(x, 1), SKY);
        assert_eq!(fb.pixel(x, 2), WALL_Y);
        assert_eq!(fb.pixel(x, 9), WALL_Y);
        assert_ne!(fb.pixel(x, 5), WALL_X);
        assert_eq!(fb.pixel(x, 10), GROUND);
    }

    #[test]
    fn columns_match_sequential_casts() {
        let rows = crate::level::LEVEL.iter().map(|r| r.to_vec()).collect();
        let state = state_in(rows, Vector2::new(2.0, 2.0));
        let hits = cast_columns(&state, 64);
        let caster = state.caster();
        for (x, hit) in hits.iter().enumerate() {
            let expected = caster.cast(state.camera.position, state.camera.ray_direction(x, 64));
            assert_eq!(*hit, expected, "column {x}");
        }
    }
}
