//! Resampling a grayscale image down (or up) to exactly one value per cell.

use image::imageops::{self, FilterType};
use image::GrayImage;

use super::IntensityMap;

/// Resampling filter used to bring the image to grid resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    /// Mean of the source pixels covered by each cell
    #[default]
    Area,
    /// Lanczos windowed sinc, radius 3
    Lanczos3,
}

impl ResampleFilter {
    /// Parse `area` (alias `box`) or `lanczos` (alias `lanczos3`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "area" | "box" => Some(ResampleFilter::Area),
            "lanczos" | "lanczos3" => Some(ResampleFilter::Lanczos3),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResampleFilter::Area => "area",
            ResampleFilter::Lanczos3 => "lanczos3",
        }
    }
}

/// Resize `gray` to `width` x `height` cells.
///
/// Callers guarantee both target dimensions are non-zero and the source is
/// not empty.
pub fn resize_to_grid(
    gray: &GrayImage,
    width: usize,
    height: usize,
    filter: ResampleFilter,
) -> IntensityMap {
    match filter {
        ResampleFilter::Area => area_average(gray, width, height),
        ResampleFilter::Lanczos3 => {
            let resized = imageops::resize(gray, width as u32, height as u32, FilterType::Lanczos3);
            IntensityMap::from_gray(&resized)
        }
    }
}

/// Box-average resampling.
///
/// Cell `x` covers source columns `[x*W/w, (x+1)*W/w)`, widened to at least
/// one pixel so upsampling repeats source pixels instead of leaving gaps.
fn area_average(gray: &GrayImage, width: usize, height: usize) -> IntensityMap {
    let (src_w, src_h) = (gray.width() as usize, gray.height() as usize);
    let raw = gray.as_raw();
    let span = |i: usize, src: usize, dst: usize| {
        let start = (i * src / dst).min(src - 1);
        let end = ((i + 1) * src / dst).clamp(start + 1, src);
        (start, end)
    };

    let mut values = Vec::with_capacity(width * height);
    for y in 0..height {
        let (y0, y1) = span(y, src_h, height);
        for x in 0..width {
            let (x0, x1) = span(x, src_w, width);
            let mut sum: u64 = 0;
            for row in y0..y1 {
                let line = &raw[row * src_w..(row + 1) * src_w];
                sum += line[x0..x1].iter().map(|&p| p as u64).sum::<u64>();
            }
            let count = ((y1 - y0) * (x1 - x0)) as f64;
            values.push((sum as f64 / count) as f32);
        }
    }
    IntensityMap::new(width, height, values)
}
