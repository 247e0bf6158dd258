//! Image preprocessing: from a decoded grayscale image to one intensity per
//! grid cell.
//!
//! The pipeline run by [`Preprocessor::process`]:
//!
//! 1. **Equalize** (optional CLAHE) at source resolution, so each tile sees
//!    real detail rather than already-averaged cells
//! 2. **Resize** to exactly the grid dimensions ([`ResampleFilter::Area`] or
//!    [`ResampleFilter::Lanczos3`])
//! 3. **Brightness**, **contrast**, **sharpness** and **gamma** on the
//!    resized map, each clamped to `0..=255`
//!
//! # Presets
//!
//! [`StylePreset`] names the enhancement combinations offered side by side to
//! users picking a look for their image:
//!
//! ```
//! use pip_grid::StylePreset;
//!
//! let bright = StylePreset::Bright.options();
//! assert!(bright.brightness > 1.0);
//! assert_eq!(StylePreset::parse("bright"), Some(StylePreset::Bright));
//! ```

mod clahe;
mod enhance;
mod intensity;
mod options;
mod resize;

pub use clahe::equalize;
pub use intensity::IntensityMap;
pub use options::{ClaheOptions, EnhanceOptions, StylePreset};
pub use resize::ResampleFilter;

use image::GrayImage;

/// Turns a grayscale image into a grid-resolution [`IntensityMap`].
///
/// # Example
///
/// ```
/// use image::{GrayImage, Luma};
/// use pip_grid::{EnhanceOptions, Preprocessor, ResampleFilter};
///
/// let gray = GrayImage::from_pixel(40, 20, Luma([200]));
/// let map = Preprocessor::new(EnhanceOptions::default(), ResampleFilter::Area)
///     .process(&gray, 4, 2);
///
/// assert_eq!((map.width(), map.height()), (4, 2));
/// assert!(map.values().iter().all(|&v| v == 200.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preprocessor {
    options: EnhanceOptions,
    filter: ResampleFilter,
}

impl Preprocessor {
    pub fn new(options: EnhanceOptions, filter: ResampleFilter) -> Self {
        Self { options, filter }
    }

    /// Run the full pipeline.
    ///
    /// `width` and `height` must be non-zero and `gray` must not be empty;
    /// [`GridBuilder`](crate::GridBuilder) checks both before calling.
    pub fn process(&self, gray: &GrayImage, width: usize, height: usize) -> IntensityMap {
        let mut map = match self.options.equalize {
            Some(clahe) => {
                let equalized = equalize(gray, &clahe);
                resize::resize_to_grid(&equalized, width, height, self.filter)
            }
            None => resize::resize_to_grid(gray, width, height, self.filter),
        };
        enhance::enhance(&mut map, &self.options);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_pipeline_applies_enhancement_after_resize() {
        let gray = GrayImage::from_pixel(10, 10, Luma([100]));
        let pre = Preprocessor::new(EnhanceOptions::new().brightness(2.0), ResampleFilter::Area);
        let map = pre.process(&gray, 2, 2);
        assert_eq!(map.values(), &[200.0; 4]);
    }

    #[test]
    fn test_equalized_pipeline_keeps_dimensions() {
        let gray = GrayImage::from_fn(50, 30, |x, _| Luma([(x * 5) as u8]));
        let pre = Preprocessor::new(StylePreset::Equalized.options(), ResampleFilter::Lanczos3);
        let map = pre.process(&gray, 7, 3);
        assert_eq!((map.width(), map.height()), (7, 3));
        assert!(map.values().iter().all(|v| (0.0..=255.0).contains(v)));
    }
}
