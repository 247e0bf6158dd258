use std::fmt;
use std::ops::Range;

use crate::api::GridError;

/// One of the four overlapping sub-grids of a quadrant split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Quadrant::TopLeft => "Top Left",
            Quadrant::TopRight => "Top Right",
            Quadrant::BottomLeft => "Bottom Left",
            Quadrant::BottomRight => "Bottom Right",
        }
    }

    /// Top quadrants carry their ghost row below their own rows.
    #[inline]
    pub fn is_top(self) -> bool {
        matches!(self, Quadrant::TopLeft | Quadrant::TopRight)
    }

    /// Left quadrants carry their ghost column right of their own columns.
    #[inline]
    pub fn is_left(self) -> bool {
        matches!(self, Quadrant::TopLeft | Quadrant::BottomLeft)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rectangular window of the grid that is paginated as a unit.
///
/// `rows` and `cols` include the ghost row and column, which belong to the
/// neighbouring quadrant and are drawn only as an alignment guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub quadrant: Option<Quadrant>,
    pub rows: Range<usize>,
    pub cols: Range<usize>,
    pub ghost_row: Option<usize>,
    pub ghost_col: Option<usize>,
}

impl Region {
    /// The whole grid, no ghosts.
    pub fn whole(rows: usize, cols: usize) -> Self {
        Self {
            quadrant: None,
            rows: 0..rows,
            cols: 0..cols,
            ghost_row: None,
            ghost_col: None,
        }
    }

    /// One quadrant of a `rows` x `cols` grid split at `rows / 2` and
    /// `cols / 2`, extended by one row and one column across the midlines.
    pub fn quadrant(quadrant: Quadrant, rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows < 2 || cols < 2 {
            return Err(GridError::InvalidLayout(format!(
                "quadrant split needs at least 2x2 cells, grid is {}x{}",
                cols, rows
            )));
        }
        let (mid_r, mid_c) = (rows / 2, cols / 2);

        let (row_range, ghost_row) = if quadrant.is_top() {
            (0..mid_r + 1, mid_r)
        } else {
            (mid_r - 1..rows, mid_r - 1)
        };
        let (col_range, ghost_col) = if quadrant.is_left() {
            (0..mid_c + 1, mid_c)
        } else {
            (mid_c - 1..cols, mid_c - 1)
        };

        Ok(Self {
            quadrant: Some(quadrant),
            rows: row_range,
            cols: col_range,
            ghost_row: Some(ghost_row),
            ghost_col: Some(ghost_col),
        })
    }

    /// All four quadrants in reading order.
    pub fn quadrants(rows: usize, cols: usize) -> Result<Vec<Self>, GridError> {
        Quadrant::ALL
            .into_iter()
            .map(|q| Self::quadrant(q, rows, cols))
            .collect()
    }

    /// True when (`row`, `col`) lies on this region's ghost row or column.
    #[inline]
    pub fn is_ghost(&self, row: usize, col: usize) -> bool {
        self.ghost_row == Some(row) || self.ghost_col == Some(col)
    }
}
