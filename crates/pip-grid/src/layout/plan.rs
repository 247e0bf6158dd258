use std::ops::Range;

use crate::api::GridError;

use super::geometry::PageGeometry;
use super::paginate::paginate;
use super::quadrant::{Quadrant, Region};

/// How the cell edge length is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellSizing {
    /// Fixed edge length in millimetres
    Fixed(f32),
    /// As large as possible while every column (plus the label gutter) fits
    /// the content width, clamped to `[min, max]`
    FitWidth { min: f32, max: f32 },
}

impl Default for CellSizing {
    fn default() -> Self {
        CellSizing::FitWidth { min: 4.0, max: 12.0 }
    }
}

/// Page layout configuration.
///
/// # Example
///
/// ```
/// use pip_grid::{CellSizing, LayoutOptions, PageGeometry};
///
/// let plan = LayoutOptions::new(PageGeometry::A4)
///     .cell_sizing(CellSizing::Fixed(10.0))
///     .plan(10, 100)
///     .unwrap();
///
/// // 25 rows fit an A4 page at 10mm, so 100 rows take 4 grid pages
/// assert_eq!(plan.rows_per_page, 25);
/// assert_eq!(plan.pages.len(), 4);
/// // plus the legend
/// assert_eq!(plan.total_pages(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutOptions {
    pub geometry: PageGeometry,
    pub sizing: CellSizing,
    /// Split the grid into four overlapping quadrants
    pub quadrants: bool,
}

impl LayoutOptions {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            ..Default::default()
        }
    }

    #[inline]
    pub fn cell_sizing(mut self, sizing: CellSizing) -> Self {
        self.sizing = sizing;
        self
    }

    #[inline]
    pub fn quadrants(mut self, enabled: bool) -> Self {
        self.quadrants = enabled;
        self
    }

    /// Partition a `cols` x `rows` grid into grid pages.
    ///
    /// Each region (the whole grid, or each quadrant) is cut into row bands
    /// of `rows_per_page` and column bands of `cols_per_page`; pages run row
    /// band major, column band minor, region after region.
    pub fn plan(&self, cols: usize, rows: usize) -> Result<LayoutPlan, GridError> {
        self.geometry.validate()?;
        if cols == 0 || rows == 0 {
            return Err(GridError::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let regions = if self.quadrants {
            Region::quadrants(rows, cols)?
        } else {
            vec![Region::whole(rows, cols)]
        };
        let widest = regions.iter().map(|r| r.cols.len()).max().unwrap_or(cols);
        let cell_size = self.cell_size(widest)?;

        let rows_per_page = self.geometry.rows_per_page(cell_size);
        let cols_per_page = self.geometry.cols_per_page(cell_size);
        if rows_per_page == 0 || cols_per_page == 0 {
            return Err(GridError::InvalidLayout(format!(
                "a {}mm cell plus label gutter does not fit the {}x{}mm content area",
                cell_size,
                self.geometry.content_width(),
                self.geometry.content_height()
            )));
        }

        let mut pages = Vec::new();
        for region in &regions {
            let row_bands = paginate(region.rows.len(), rows_per_page)?;
            let col_bands = paginate(region.cols.len(), cols_per_page)?;
            for row_band in &row_bands {
                for col_band in &col_bands {
                    pages.push(GridPage {
                        number: pages.len() + 1,
                        quadrant: region.quadrant,
                        rows: offset(row_band, region.rows.start),
                        cols: offset(col_band, region.cols.start),
                        ghost_row: region.ghost_row,
                        ghost_col: region.ghost_col,
                    });
                }
            }
        }

        Ok(LayoutPlan {
            geometry: self.geometry,
            cell_size,
            rows_per_page,
            cols_per_page,
            pages,
        })
    }

    fn cell_size(&self, cols: usize) -> Result<f32, GridError> {
        let size = match self.sizing {
            CellSizing::Fixed(size) => size,
            CellSizing::FitWidth { min, max } => {
                if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
                    return Err(GridError::InvalidLayout(format!(
                        "cell size bounds [{}, {}] are not a valid range",
                        min, max
                    )));
                }
                // One extra cell for the row-label gutter
                (self.geometry.content_width() / (cols + 1) as f32).clamp(min, max)
            }
        };
        if !size.is_finite() || size <= 0.0 {
            return Err(GridError::InvalidLayout(format!(
                "cell size must be a positive length, got {}",
                size
            )));
        }
        Ok(size)
    }
}

#[inline]
fn offset(range: &Range<usize>, by: usize) -> Range<usize> {
    range.start + by..range.end + by
}

/// One printed page of grid cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPage {
    /// 1-based page number
    pub number: usize,
    pub quadrant: Option<Quadrant>,
    /// Global row indices on this page
    pub rows: Range<usize>,
    /// Global column indices on this page
    pub cols: Range<usize>,
    pub ghost_row: Option<usize>,
    pub ghost_col: Option<usize>,
}

impl GridPage {
    /// True when (`row`, `col`) is an alignment guide, not data owned by
    /// this page's quadrant.
    #[inline]
    pub fn is_ghost(&self, row: usize, col: usize) -> bool {
        self.ghost_row == Some(row) || self.ghost_col == Some(col)
    }
}

/// Result of [`LayoutOptions::plan`]: grid pages followed by one legend page.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub geometry: PageGeometry,
    /// Cell edge length in millimetres
    pub cell_size: f32,
    /// Grid rows per page: `floor(cell area height / cell_size)`, where the
    /// cell area is the content area minus the one-cell column-label gutter
    /// (see [`PageGeometry::cell_area`])
    pub rows_per_page: usize,
    /// Grid columns per page, with the row-label gutter taken out the same way
    pub cols_per_page: usize,
    pub pages: Vec<GridPage>,
}

impl LayoutPlan {
    /// Grid pages plus the legend page.
    #[inline]
    pub fn total_pages(&self) -> usize {
        self.pages.len() + 1
    }

    /// Page number of the legend, always last.
    #[inline]
    pub fn legend_page(&self) -> usize {
        self.total_pages()
    }
}
