use crate::{grid::Grid, vector::Vector2};

/// Moves from `current` towards `desired` one axis at a time.
///
/// X is tried first with the old Y; Y is then tried against the X that was
/// just committed. Each axis checks the two cells `clearance` either side of
/// the body along that axis and only moves if both are open, so a blocked
/// axis never cancels the other one and the body slides along walls.
pub fn resolve(grid: &Grid, current: Vector2, desired: Vector2, clearance: f64) -> Vector2 {
    let mut next = current;

    let row = current.y.floor();
    if axis_clear(
        grid,
        Vector2::new((desired.x + clearance).floor(), row),
        Vector2::new((desired.x - clearance).floor(), row),
    ) {
        next.x = desired.x;
    }

    let col = next.x.floor();
    if axis_clear(
        grid,
        Vector2::new(col, (desired.y + clearance).floor()),
        Vector2::new(col, (desired.y - clearance).floor()),
    ) {
        next.y = desired.y;
    }

    next
}

#[inline]
fn axis_clear(grid: &Grid, a: Vector2, b: Vector2) -> bool {
    !grid.is_occupied(a) && !grid.is_occupied(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10 x 10 open field with the listed world cells walled.
    fn field(walls: &[(usize, usize)]) -> Grid {
        let mut rows = vec![vec![0u8; 10]; 10];
        for &(x, y) in walls {
            rows[9 - y][x] = 1;
        }
        Grid::from_rows(&rows).unwrap()
    }

    #[test]
    fn free_move_commits_both_axes() {
        let grid = field(&[]);
        let next = resolve(&grid, Vector2::new(5.0, 5.0), Vector2::new(5.3, 4.6), 0.2);
        assert_eq!(next, Vector2::new(5.3, 4.6));
    }

    #[test]
    fn blocked_x_keeps_old_x() {
        let grid = field(&[(6, 5)]);
        let next = resolve(&grid, Vector2::new(5.0, 5.0), Vector2::new(5.9, 5.0), 0.2);
        assert_eq!(next.x, 5.0);
        assert_eq!(next.y, 5.0);
    }

    #[test]
    fn slides_along_wall() {
        let grid = field(&[(6, 5)]);
        let next = resolve(&grid, Vector2::new(5.0, 5.0), Vector2::new(5.9, 5.4), 0.2);
        assert_eq!(next.x, 5.0);
        assert_eq!(next.y, 5.4);
    }

    #[test]
    fn slides_when_y_is_blocked() {
        let grid = field(&[(5, 6)]);
        let next = resolve(&grid, Vector2::new(5.5, 5.5), Vector2::new(5.7, 5.9), 0.2);
        assert_eq!(next, Vector2::new(5.7, 5.5));
    }

    #[test]
    fn clearance_keeps_distance_from_wall() {
        let grid = field(&[(6, 5)]);
        // 5.85 + 0.2 reaches into x = 6
        let next = resolve(&grid, Vector2::new(5.5, 5.5), Vector2::new(5.85, 5.5), 0.2);
        assert_eq!(next.x, 5.5);
        // 5.75 + 0.2 stays in x = 5
        let next = resolve(&grid, Vector2::new(5.5, 5.5), Vector2::new(5.75, 5.5), 0.2);
        assert_eq!(next.x, 5.75);
    }

    #[test]
    fn y_uses_committed_x() {
        // Moving diagonally into the corner cell (6, 6): X is allowed into
        // column 6 only if (6, 5) is open, and Y is then checked in column 6.
        let grid = field(&[(6, 6)]);
        let next = resolve(&grid, Vector2::new(5.5, 5.5), Vector2::new(6.3, 5.9), 0.2);
        assert_eq!(next.x, 6.3);
        // Cell (6, floor(6.1)) is the wall
        assert_eq!(next.y, 5.5);

        // Same move with the old X would have passed in column 5.
        let next = resolve(&grid, Vector2::new(5.5, 5.5), Vector2::new(5.5, 5.9), 0.2);
        assert_eq!(next.y, 5.9);
    }

    #[test]
    fn outside_the_grid_is_open() {
        let grid = field(&[]);
        let next = resolve(&grid, Vector2::new(0.1, 0.1), Vector2::new(-3.0, -3.0), 0.2);
        assert_eq!(next, Vector2::new(-3.0, -3.0));
    }

    #[test]
    fn nan_does_not_panic() {
        let grid = field(&[(1, 1)]);
        let _ = resolve(&grid, Vector2::new(f64::NAN, 1.0), Vector2::new(1.0, f64::NAN), 0.2);
        let _ = resolve(&grid, Vector2::new(1.5, 1.5), Vector2::new(f64::INFINITY, 1.5), 0.2);
    }
}
