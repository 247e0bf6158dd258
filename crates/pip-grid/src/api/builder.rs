//! GridBuilder -- the entry point from image to bucket grid.

use image::DynamicImage;

use crate::api::GridError;
use crate::bucket::BucketPolicy;
use crate::grid::Grid;
use crate::preprocess::{ClaheOptions, EnhanceOptions, Preprocessor, ResampleFilter, StylePreset};

/// Builds a [`Grid`] from an image.
///
/// Configuration methods consume and return `self`; [`build()`](Self::build)
/// takes `&self` so one builder can be reused across images. Output depends
/// only on the input and the configuration.
///
/// # Example
///
/// ```
/// use image::{DynamicImage, GrayImage, Luma};
/// use pip_grid::{BucketPolicy, GridBuilder};
///
/// let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(30, 20, Luma([255])));
/// let grid = GridBuilder::new()
///     .policy(BucketPolicy::linear())
///     .contrast(1.2)
///     .build(&image, 6, 4)
///     .unwrap();
///
/// assert_eq!((grid.width(), grid.height()), (6, 4));
/// assert!(grid.cells().iter().all(|&v| v == 6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridBuilder {
    policy: BucketPolicy,
    enhance: EnhanceOptions,
    filter: ResampleFilter,
}

impl GridBuilder {
    /// Standard ladder policy, area resampling, no enhancement.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn policy(mut self, policy: BucketPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace all enhancement settings at once.
    #[inline]
    pub fn enhance(mut self, options: EnhanceOptions) -> Self {
        self.enhance = options;
        self
    }

    /// Use the settings of a named preset.
    #[inline]
    pub fn preset(mut self, preset: StylePreset) -> Self {
        self.enhance = preset.options();
        self
    }

    #[inline]
    pub fn brightness(mut self, factor: f32) -> Self {
        self.enhance = self.enhance.brightness(factor);
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.enhance = self.enhance.contrast(factor);
        self
    }

    #[inline]
    pub fn sharpness(mut self, factor: f32) -> Self {
        self.enhance = self.enhance.sharpness(factor);
        self
    }

    #[inline]
    pub fn gamma(mut self, exponent: f32) -> Self {
        self.enhance = self.enhance.gamma(exponent);
        self
    }

    #[inline]
    pub fn equalize(mut self, clahe: ClaheOptions) -> Self {
        self.enhance = self.enhance.equalize(clahe);
        self
    }

    pub fn enhance_options(&self) -> &EnhanceOptions {
        &self.enhance
    }

    /// Decode `bytes` (PNG, JPEG, GIF, BMP or WebP) and build the grid.
    pub fn build_from_bytes(
        &self,
        bytes: &[u8],
        width: usize,
        height: usize,
    ) -> Result<Grid, GridError> {
        check_dimensions(width, height)?;
        let image = image::load_from_memory(bytes)?;
        self.build(&image, width, height)
    }

    /// Build a `height` x `width` grid from a decoded image.
    ///
    /// 1. Luminance conversion
    /// 2. Equalization, resize and tone adjustments ([`Preprocessor`])
    /// 3. Bucketing of every cell
    pub fn build(&self, image: &DynamicImage, width: usize, height: usize) -> Result<Grid, GridError> {
        check_dimensions(width, height)?;
        self.enhance.validate()?;
        if image.width() == 0 || image.height() == 0 {
            return Err(GridError::ImageDecode("image has no pixels".to_string()));
        }

        let gray = image.to_luma8();
        let map = Preprocessor::new(self.enhance, self.filter).process(&gray, width, height);

        let cells = map
            .values()
            .iter()
            .map(|&v| self.policy.bucket(v.clamp(0.0, 255.0)).map(|b| b.value()))
            .collect::<Result<Vec<u8>, GridError>>()?;
        Grid::new(width, height, cells)
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), GridError> {
    // The resampler works in u32 pixel coordinates
    if width == 0 || height == 0 || width > u32::MAX as usize || height > u32::MAX as usize {
        return Err(GridError::InvalidDimensions { width, height });
    }
    Ok(())
}
