use crate::api::GridError;

/// Tolerance for floor() on cell counts, so 190mm / 9.5mm is 20 and not 19.
const FIT_EPSILON: f32 = 1e-4;

/// Physical page in millimetres.
///
/// The content area is the page minus a margin on every side and a header
/// band at the top. Inside the content area, one cell-sized gutter on the
/// left and one on top carry the row and column labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    /// Band above the grid for the page title and numbering
    pub header_height: f32,
}

impl PageGeometry {
    /// ISO A4 portrait.
    pub const A4: PageGeometry = PageGeometry::new(210.0, 297.0);
    /// US Letter portrait.
    pub const LETTER: PageGeometry = PageGeometry::new(215.9, 279.4);

    /// Page with the default 10mm margin and 12mm header.
    pub const fn new(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
            margin: 10.0,
            header_height: 12.0,
        }
    }

    #[inline]
    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    #[inline]
    pub fn header_height(mut self, height: f32) -> Self {
        self.header_height = height;
        self
    }

    #[inline]
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    #[inline]
    pub fn content_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin - self.header_height
    }

    /// Top-left corner of the content area (below the header band).
    #[inline]
    pub fn content_origin(&self) -> (f32, f32) {
        (self.margin, self.margin + self.header_height)
    }

    /// Fails with [`GridError::InvalidLayout`] for non-finite or negative
    /// measures and an empty content area.
    pub fn validate(&self) -> Result<(), GridError> {
        let measures = [
            ("page width", self.page_width),
            ("page height", self.page_height),
            ("margin", self.margin),
            ("header height", self.header_height),
        ];
        for (name, value) in measures {
            if !value.is_finite() || value < 0.0 {
                return Err(GridError::InvalidLayout(format!(
                    "{} must be a finite, non-negative length, got {}",
                    name, value
                )));
            }
        }
        if self.content_width() <= 0.0 || self.content_height() <= 0.0 {
            return Err(GridError::InvalidLayout(format!(
                "content area {}x{}mm is empty",
                self.content_width(),
                self.content_height()
            )));
        }
        Ok(())
    }

    /// Width and height left for grid cells once the one-cell label gutter
    /// (row labels on the left, column labels on top) is taken from the
    /// content area.
    pub fn cell_area(&self, cell_size: f32) -> (f32, f32) {
        (
            self.content_width() - cell_size,
            self.content_height() - cell_size,
        )
    }

    /// `floor(cell area width / cell_size)`.
    pub fn cols_per_page(&self, cell_size: f32) -> usize {
        cells_that_fit(self.cell_area(cell_size).0, cell_size)
    }

    /// `floor(cell area height / cell_size)`.
    pub fn rows_per_page(&self, cell_size: f32) -> usize {
        cells_that_fit(self.cell_area(cell_size).1, cell_size)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// `floor(length / cell)`, zero for unusable measures.
fn cells_that_fit(length: f32, cell_size: f32) -> usize {
    if !cell_size.is_finite() || cell_size <= 0.0 || !length.is_finite() || length <= 0.0 {
        return 0;
    }
    (length / cell_size + FIT_EPSILON).floor() as usize
}
