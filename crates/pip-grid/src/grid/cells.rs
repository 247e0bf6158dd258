use crate::api::GridError;
use crate::bucket::Bucket;

use super::counts::BucketCounts;

/// A rectangular matrix of bucket values, row-major.
///
/// Shape is always valid: `width > 0`, `height > 0` and exactly
/// `width * height` cells. Cell values are only guaranteed to be valid
/// buckets when the grid came out of [`GridBuilder`](crate::GridBuilder);
/// grids parsed from caller input are checked by [`Grid::validate`] and
/// by the renderer.
///
/// # Example
///
/// ```
/// use pip_grid::Grid;
///
/// let grid = Grid::from_rows(vec![vec![0, 6], vec![3, 6]]).unwrap();
/// assert_eq!((grid.width(), grid.height()), (2, 2));
/// assert_eq!(grid.get(1, 0), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Wrap row-major cells.
    pub fn new(width: usize, height: usize, cells: Vec<u8>) -> Result<Self, GridError> {
        if width == 0 || height == 0 || cells.len() != width * height {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build from nested rows, as received over the wire.
    ///
    /// Every row must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(ragged) = rows.iter().find(|r| r.len() != width) {
            return Err(GridError::InvalidDimensions {
                width: ragged.len(),
                height,
            });
        }
        Self::new(width, height, rows.into_iter().flatten().collect())
    }

    /// Build from rows of untyped integers, as decoded from JSON.
    ///
    /// Shape is checked first, like [`Grid::from_rows`]. A cell that does not
    /// even fit a byte is reported as [`GridError::UnknownBucket`] here;
    /// values 7..=255 are kept and caught by [`Grid::validate`] or the
    /// renderer.
    pub fn from_int_rows(rows: Vec<Vec<i64>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(ragged) = rows.iter().find(|r| r.len() != width) {
            return Err(GridError::InvalidDimensions {
                width: ragged.len(),
                height,
            });
        }
        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            for (col, value) in values.into_iter().enumerate() {
                let byte = u8::try_from(value)
                    .map_err(|_| GridError::UnknownBucket { value, row, col })?;
                cells.push(byte);
            }
        }
        Self::new(width, height, cells)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell values.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Value at (`row`, `col`), `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Checked bucket at (`row`, `col`).
    ///
    /// Callers pass in-bounds coordinates; the error carries them either way.
    pub fn bucket_at(&self, row: usize, col: usize) -> Result<Bucket, GridError> {
        let value = self.get(row, col).unwrap_or(u8::MAX);
        Bucket::new(value).ok_or(GridError::UnknownBucket {
            value: value.into(),
            row,
            col,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.width)
    }

    /// Nested rows, the wire representation.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows().map(<[u8]>::to_vec).collect()
    }

    /// Fails on the first cell (in row-major order) outside `0..=6`.
    pub fn validate(&self) -> Result<(), GridError> {
        self.counts().map(|_| ())
    }

    /// Occurrences of each bucket value over the whole grid.
    pub fn counts(&self) -> Result<BucketCounts, GridError> {
        let mut counts = BucketCounts::default();
        for (i, &value) in self.cells.iter().enumerate() {
            let bucket = Bucket::new(value).ok_or(GridError::UnknownBucket {
                value: value.into(),
                row: i / self.width,
                col: i % self.width,
            })?;
            counts.add(bucket);
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_shape() {
        let grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.cells(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(grid.to_rows(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_and_empty() {
        assert_eq!(
            Grid::from_rows(vec![vec![1, 2], vec![3]]),
            Err(GridError::InvalidDimensions {
                width: 1,
                height: 2
            })
        );
        assert!(Grid::from_rows(vec![]).is_err());
        assert!(Grid::from_rows(vec![vec![], vec![]]).is_err());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::new(2, 1, vec![0, 1]).unwrap();
        assert_eq!(grid.get(0, 1), Some(1));
        assert_eq!(grid.get(1, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn test_counts_reports_position_of_bad_cell() {
        let grid = Grid::from_rows(vec![vec![0, 1, 2], vec![3, 9, 4]]).unwrap();
        assert_eq!(
            grid.counts(),
            Err(GridError::UnknownBucket {
                value: 9,
                row: 1,
                col: 1
            })
        );
        assert!(grid.validate().is_err());
        assert!(grid.bucket_at(0, 2).is_ok());
    }

    #[test]
    fn test_from_int_rows() {
        let grid = Grid::from_int_rows(vec![vec![0, 6], vec![3, 200]]).unwrap();
        assert_eq!(grid.cells(), &[0, 6, 3, 200]);

        assert_eq!(
            Grid::from_int_rows(vec![vec![0, 1], vec![-1, 2]]),
            Err(GridError::UnknownBucket {
                value: -1,
                row: 1,
                col: 0
            })
        );
        assert_eq!(
            Grid::from_int_rows(vec![vec![300]]),
            Err(GridError::UnknownBucket {
                value: 300,
                row: 0,
                col: 0
            })
        );
        // Shape is reported before values
        assert!(matches!(
            Grid::from_int_rows(vec![vec![-1, 2], vec![3]]),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_new_rejects_mismatched_length() {
        assert!(Grid::new(2, 2, vec![0; 3]).is_err());
        assert!(Grid::new(0, 2, vec![]).is_err());
    }
}
