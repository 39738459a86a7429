use thiserror::Error;

use crate::vector::Vector2;

/// Tile category. `0` is empty, anything else blocks movement and rays.
pub type CellCode = u8;

pub const EMPTY: CellCode = 0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Static occupancy table.
///
/// Rows are stored top-down as authored, while world Y grows upwards: world
/// `y` lives in row `(rows - 1) - floor(y)`. World `x` maps straight to the
/// column. [`Grid::index_of`] is the only place that flip happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<CellCode>, // row-major
}

impl Grid {
    pub fn from_rows<R: AsRef<[CellCode]>>(rows: &[R]) -> Result<Self, GridError> {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        if columns == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(columns * rows.len());
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(GridError::Ragged {
                    row: i,
                    expected: columns,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            columns,
            rows: rows.len(),
            cells,
        })
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// World point -> index into `cells`, or `None` outside `[0, columns) x [0, rows)`.
    /// NaN coordinates count as outside.
    #[inline]
    fn index_of(&self, point: Vector2) -> Option<usize> {
        let in_x = (0.0..self.columns as f64).contains(&point.x);
        let in_y = (0.0..self.rows as f64).contains(&point.y);
        if !(in_x && in_y) {
            return None;
        }

        let row = (self.rows - 1) - point.y.floor() as usize;
        let col = point.x.floor() as usize;
        Some(row * self.columns + col)
    }

    /// Cell code under a world point, `None` when out of bounds.
    pub fn cell(&self, point: Vector2) -> Option<CellCode> {
        self.index_of(point).map(|i| self.cells[i])
    }

    /// Single occupancy predicate shared by the ray caster and the movement
    /// resolver. Out-of-bounds points are never occupied.
    #[inline]
    pub fn is_occupied(&self, point: Vector2) -> bool {
        self.cell(point).is_some_and(|code| code > EMPTY)
    }
}
