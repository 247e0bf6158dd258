//! Mosaic preview: the grid as an SVG of colored die faces.
//!
//! Each cell becomes a rounded square in its bucket's fill with as many pips
//! as its value, painted in the bucket's label color. Bucket 0 is a blank face.

use pip_grid::{Bucket, BucketPalette, Grid, GridError};
use std::fmt::Write;

/// Pip centres on a unit face, per face value.
const PIPS: [&[(f32, f32)]; 7] = [
    &[],
    &[(0.5, 0.5)],
    &[(0.25, 0.25), (0.75, 0.75)],
    &[(0.25, 0.25), (0.5, 0.5), (0.75, 0.75)],
    &[(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)],
    &[
        (0.25, 0.25),
        (0.75, 0.25),
        (0.5, 0.5),
        (0.25, 0.75),
        (0.75, 0.75),
    ],
    &[
        (0.25, 0.25),
        (0.75, 0.25),
        (0.25, 0.5),
        (0.75, 0.5),
        (0.25, 0.75),
        (0.75, 0.75),
    ],
];

const GAP: f32 = 0.06;
const PIP_RADIUS: f32 = 0.09;
const BACKGROUND: &str = "#2b2b2b";

/// Builds preview SVGs for grids.
#[derive(Debug, Clone)]
pub struct MosaicRenderer {
    palette: BucketPalette,
    /// Edge of one die in SVG user units (pixels when rasterized 1:1)
    cell_px: u32,
}

impl MosaicRenderer {
    pub fn new(palette: BucketPalette, cell_px: u32) -> Self {
        Self {
            palette,
            cell_px: cell_px.max(2),
        }
    }

    pub fn cell_px(&self) -> u32 {
        self.cell_px
    }

    /// Pixel size of the preview for `grid`.
    pub fn size(&self, grid: &Grid) -> (u32, u32) {
        (
            grid.width() as u32 * self.cell_px,
            grid.height() as u32 * self.cell_px,
        )
    }

    /// Render `grid` as an SVG document.
    ///
    /// Fails with [`GridError::UnknownBucket`] on the first cell outside
    /// `0..=6`.
    pub fn to_svg(&self, grid: &Grid) -> Result<String, GridError> {
        let (width, height) = self.size(grid);
        let cell = self.cell_px as f32;
        let inset = cell * GAP;
        let face = cell - 2.0 * inset;
        let radius = face * 0.15;
        let pip_r = cell * PIP_RADIUS;

        let mut svg = String::with_capacity(grid.cells().len() * 160);
        // Writing into a String cannot fail
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = write!(
            svg,
            r#"<rect width="{width}" height="{height}" fill="{BACKGROUND}"/>"#
        );

        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let bucket: Bucket = grid.bucket_at(row, col)?;
                let color = self.palette.color(bucket);
                let x = col as f32 * cell;
                let y = row as f32 * cell;

                let _ = write!(
                    svg,
                    r#"<rect x="{:.2}" y="{:.2}" width="{face:.2}" height="{face:.2}" rx="{radius:.2}" fill="{}"/>"#,
                    x + inset,
                    y + inset,
                    color.fill.to_hex()
                );
                let pip_fill = color.text.to_hex();
                for &(px, py) in PIPS[bucket.index()] {
                    let _ = write!(
                        svg,
                        r#"<circle cx="{:.2}" cy="{:.2}" r="{pip_r:.2}" fill="{pip_fill}"/>"#,
                        x + px * cell,
                        y + py * cell
                    );
                }
            }
        }

        svg.push_str("</svg>");
        Ok(svg)
    }
}
