//! pip-grid: images as grids of die faces, laid out for print
//!
//! An image is reduced to a grid of buckets 0..=6, one die face per cell,
//! darkest to brightest. The grid is then cut into printable pages with
//! colored, labelled cells and a legend counting the dice of each value.
//!
//! # Quick Start
//!
//! ```
//! use image::{DynamicImage, GrayImage, Luma};
//! use pip_grid::{DocumentRenderer, GridBuilder, LayoutOptions, PageGeometry, StylePreset};
//!
//! let image = DynamicImage::ImageLuma8(GrayImage::from_fn(64, 48, |x, _| Luma([(x * 4) as u8])));
//!
//! let grid = GridBuilder::new()
//!     .preset(StylePreset::HighContrast)
//!     .build(&image, 16, 12)
//!     .unwrap();
//! assert_eq!((grid.width(), grid.height()), (16, 12));
//!
//! let doc = DocumentRenderer::default()
//!     .render(&grid, "Gradient", &LayoutOptions::new(PageGeometry::A4))
//!     .unwrap();
//! assert_eq!(doc.counts.total(), 16 * 12);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! encoded bytes
//!     |  decode, luminance
//!     v
//! GrayImage
//!     |  [CLAHE]  resize  brightness  contrast  sharpness  gamma
//!     v
//! IntensityMap            (one f32 per cell, 0..=255)
//!     |  BucketPolicy
//!     v
//! Grid                    (one u8 per cell, 0..=6)
//!     |  LayoutOptions::plan
//!     v
//! LayoutPlan              (row/column bands, quadrants, cell size)
//!     |  DocumentRenderer
//!     v
//! DocumentDrawing         (pages of DrawOps, counts)
//! ```
//!
//! # Bucket Policies
//!
//! - **Ladder** (default): breakpoints `30, 60, 100, 140, 180, 220`
//! - **Linear**: `floor(v / 256 * 7)`
//!
//! Both map 0 to 0 and 255 to 6, and never decrease as intensity grows.
//! Invalid intensities (NaN, infinite, outside `0..=255`) are errors, never
//! wrapped or defaulted.
//!
//! # Quadrants
//!
//! Large grids can be split into four quadrants at `rows / 2` and
//! `cols / 2`. Each quadrant also carries the first row and column of its
//! neighbours as "ghost" cells, drawn faded, so printed sheets can be lined
//! up edge to edge.

pub mod api;
pub mod bucket;
pub mod grid;
pub mod layout;
pub mod output;
pub mod palette;
pub mod preprocess;

#[cfg(test)]
mod domain_tests;

pub use api::{GridBuilder, GridError};
pub use bucket::{Bucket, BucketPolicy, ThresholdLadder, BUCKET_COUNT, MAX_BUCKET};
pub use grid::{BucketCounts, Grid};
pub use layout::{
    page_count, paginate, CellSizing, GridPage, LayoutOptions, LayoutPlan, PageGeometry, Quadrant,
    Region,
};
pub use output::{
    DocumentDrawing, DocumentRenderer, DocumentStyle, DrawOp, PageDrawing, PageKind, Stroke,
    TextAnchor, MM_PER_PT,
};
pub use palette::{BucketColor, BucketPalette, PaletteError, Srgb};
pub use preprocess::{
    ClaheOptions, EnhanceOptions, IntensityMap, Preprocessor, ResampleFilter, StylePreset,
};
