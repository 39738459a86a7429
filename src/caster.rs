use crate::{grid::Grid, vector::Vector2};

/// Stand-in for an infinite per-cell ray length along an axis the ray never crosses.
const NEVER: f64 = 1e30;

/// Grid axis whose line the ray crossed last before hitting a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Crossed a vertical grid line (stepped along X).
    X,
    /// Crossed a horizontal grid line (stepped along Y).
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Perpendicular distance to the wall in units of the ray direction.
    pub distance: f64,
    pub side: Side,
}

/// DDA ray caster over a shared, read-only [`Grid`].
///
/// Holds no mutable state, so one caster can be used from many threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Caster<'g> {
    grid: &'g Grid,
    max_steps: u32,
}

impl<'g> Caster<'g> {
    pub fn new(grid: &'g Grid, max_steps: u32) -> Self {
        Self { grid, max_steps }
    }

    /// Walks the grid cell by cell from `origin` along `dir` until an occupied
    /// cell is entered. Returns `None` once `max_steps` cells have been visited
    /// without a hit.
    ///
    /// The reported distance is `side_dist - delta_dist` on the axis of the
    /// last step, which is the hit distance projected onto the camera plane
    /// normal rather than the Euclidean one. The cell the origin sits in is
    /// never tested.
    pub fn cast(&self, origin: Vector2, dir: Vector2) -> Option<RayHit> {
        let mut cell = origin.floor();

        let delta = Vector2::new(axis_delta(dir.x), axis_delta(dir.y));
        let step = Vector2::new(axis_step(dir.x), axis_step(dir.y));

        let mut side_dist = Vector2::new(
            if dir.x < 0.0 {
                (origin.x - cell.x) * delta.x
            } else {
                (cell.x + 1.0 - origin.x) * delta.x
            },
            if dir.y < 0.0 {
                (origin.y - cell.y) * delta.y
            } else {
                (cell.y + 1.0 - origin.y) * delta.y
            },
        );

        for _ in 0..self.max_steps {
            // Exact ties step along Y
            let side = if side_dist.x < side_dist.y {
                side_dist.x += delta.x;
                cell.x += step.x;
                Side::X
            } else {
                side_dist.y += delta.y;
                cell.y += step.y;
                Side::Y
            };

            if self.grid.is_occupied(cell) {
                let distance = match side {
                    Side::X => side_dist.x - delta.x,
                    Side::Y => side_dist.y - delta.y,
                };
                return Some(RayHit { distance, side });
            }
        }

        None
    }
}

#[inline]
fn axis_delta(d: f64) -> f64 {
    if d == 0.0 { NEVER } else { (1.0 / d).abs() }
}

#[inline]
fn axis_step(d: f64) -> f64 {
    if d < 0.0 { -1.0 } else { 1.0 }
}
