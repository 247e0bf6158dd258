//! Grid-resolution intensity buffer.

use image::GrayImage;

/// Row-major intensities at grid resolution, one `f32` per cell.
///
/// Values stay in `0.0..=255.0`: every stage that writes into the map clamps.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityMap {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl IntensityMap {
    /// Wrap raw values.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != width * height`.
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> Self {
        assert_eq!(
            values.len(),
            width * height,
            "intensity count ({}) does not match {}x{}",
            values.len(),
            width,
            height
        );
        Self {
            width,
            height,
            values,
        }
    }

    /// Copy an 8-bit grayscale image.
    pub fn from_gray(gray: &GrayImage) -> Self {
        let values = gray.as_raw().iter().map(|&p| p as f32).collect();
        Self::new(gray.width() as usize, gray.height() as usize, values)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Intensity at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }
}
