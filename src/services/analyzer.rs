use crate::error::ApiError;
use crate::models::{AnalysisConfig, ConfigError, GridOptions};
use image::DynamicImage;
use pip_grid::{
    BucketCounts, BucketPolicy, EnhanceOptions, Grid, GridBuilder, GridError,
    ResampleFilter, StylePreset,
};

/// A built grid with its bucket counts.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub grid: Grid,
    pub counts: BucketCounts,
}

/// One grid per style preset, for side-by-side comparison.
#[derive(Debug, Clone)]
pub struct StyleGrid {
    pub preset: StylePreset,
    pub grid: Grid,
}

/// Turns uploaded images into grids, applying configured defaults and limits
#[derive(Debug, Clone)]
pub struct AnalyzerService {
    policy: BucketPolicy,
    filter: ResampleFilter,
    default_size: usize,
    max_dimension: usize,
}

impl AnalyzerService {
    pub fn new(
        policy: BucketPolicy,
        filter: ResampleFilter,
        default_size: usize,
        max_dimension: usize,
    ) -> Self {
        Self {
            policy,
            filter,
            default_size,
            max_dimension,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.bucket_policy()?,
            config.resample_filter()?,
            config.default_grid_size,
            config.max_grid_dimension,
        ))
    }

    /// Requested `(width, height)`, falling back to `grid_size` and then the
    /// configured default. Zero and oversized dimensions are rejected.
    pub fn dimensions(&self, options: &GridOptions) -> Result<(usize, usize), GridError> {
        let square = options.grid_size.unwrap_or(self.default_size);
        let width = options.grid_width.unwrap_or(square);
        let height = options.grid_height.unwrap_or(square);
        if width == 0 || height == 0 || width > self.max_dimension || height > self.max_dimension
        {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok((width, height))
    }

    /// Grid builder for `options`: preset first, explicit factors on top.
    pub fn builder(&self, options: &GridOptions) -> Result<GridBuilder, ApiError> {
        let policy = match options.policy.as_deref() {
            Some(name) => BucketPolicy::parse(name)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown policy '{name}'")))?,
            None => self.policy,
        };
        let filter = match options.filter.as_deref() {
            Some(name) => ResampleFilter::parse(name)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown filter '{name}'")))?,
            None => self.filter,
        };
        let mut enhance = match options.preset.as_deref() {
            Some(name) => StylePreset::parse(name)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown preset '{name}'")))?
                .options(),
            None => EnhanceOptions::new(),
        };
        if let Some(v) = options.brightness {
            enhance.brightness = v;
        }
        if let Some(v) = options.contrast {
            enhance.contrast = v;
        }
        if let Some(v) = options.sharpness {
            enhance.sharpness = v;
        }
        if let Some(v) = options.gamma {
            enhance.gamma = v;
        }
        match options.clahe {
            Some(true) => enhance.equalize = Some(enhance.equalize.unwrap_or_default()),
            Some(false) => enhance.equalize = None,
            None => {}
        }
        enhance.validate()?;

        Ok(GridBuilder::new()
            .policy(policy)
            .filter(filter)
            .enhance(enhance))
    }

    /// Build one grid from encoded image bytes.
    pub fn analyze(&self, bytes: &[u8], options: &GridOptions) -> Result<Analysis, ApiError> {
        let (width, height) = self.dimensions(options)?;
        let builder = self.builder(options)?;
        let grid = builder.build_from_bytes(bytes, width, height)?;
        let counts = grid.counts()?;

        tracing::info!(
            width = width,
            height = height,
            policy = options.policy.as_deref().unwrap_or(self.policy.name()),
            total = counts.total(),
            "Grid built"
        );
        Ok(Analysis { grid, counts })
    }

    /// Decode once and build a grid for every style preset.
    ///
    /// Policy, filter and dimensions come from `options`; enhancement comes
    /// from each preset.
    pub fn analyze_styles(
        &self,
        bytes: &[u8],
        options: &GridOptions,
    ) -> Result<Vec<StyleGrid>, ApiError> {
        let (width, height) = self.dimensions(options)?;
        let base = self.builder(&GridOptions {
            preset: None,
            brightness: None,
            contrast: None,
            sharpness: None,
            gamma: None,
            clahe: None,
            ..options.clone()
        })?;
        let image: DynamicImage = image::load_from_memory(bytes).map_err(GridError::from)?;

        let styles = StylePreset::ALL
            .into_iter()
            .map(|preset| {
                let grid = base.preset(preset).build(&image, width, height)?;
                Ok(StyleGrid { preset, grid })
            })
            .collect::<Result<Vec<_>, GridError>>()?;

        tracing::info!(
            width = width,
            height = height,
            styles = styles.len(),
            "Style grids built"
        );
        Ok(styles)
    }

    /// Run [`Self::analyze`] off the async runtime.
    pub async fn analyze_blocking(
        self: std::sync::Arc<Self>,
        bytes: Vec<u8>,
        options: GridOptions,
    ) -> Result<Analysis, ApiError> {
        tokio::task::spawn_blocking(move || self.analyze(&bytes, &options))
            .await
            .map_err(|e| ApiError::Internal(format!("Analysis task failed: {e}")))?
    }

    /// Run [`Self::analyze_styles`] off the async runtime.
    pub async fn analyze_styles_blocking(
        self: std::sync::Arc<Self>,
        bytes: Vec<u8>,
        options: GridOptions,
    ) -> Result<Vec<StyleGrid>, ApiError> {
        tokio::task::spawn_blocking(move || self.analyze_styles(&bytes, &options))
            .await
            .map_err(|e| ApiError::Internal(format!("Analysis task failed: {e}")))?
    }
}

impl Default for AnalyzerService {
    fn default() -> Self {
        Self::new(BucketPolicy::default(), ResampleFilter::default(), 40, 200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageFormat, Luma};
    use std::io::Cursor;

    fn gradient_png(width: u32, height: u32) -> Vec<u8> {
        let img = GrayImage::from_fn(width, height, |x, _| Luma([(x * 255 / (width - 1)) as u8]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_dimensions_defaults() {
        let service = AnalyzerService::default();
        assert_eq!(service.dimensions(&GridOptions::default()).unwrap(), (40, 40));

        let options = GridOptions {
            grid_size: Some(25),
            grid_height: Some(10),
            ..Default::default()
        };
        assert_eq!(service.dimensions(&options).unwrap(), (25, 10));
    }

    #[test]
    fn test_dimensions_limits() {
        let service = AnalyzerService::default();
        for (w, h) in [(0, 10), (10, 0), (201, 10)] {
            let options = GridOptions {
                grid_width: Some(w),
                grid_height: Some(h),
                ..Default::default()
            };
            assert!(matches!(
                service.dimensions(&options),
                Err(GridError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn test_builder_rejects_unknown_names() {
        let service = AnalyzerService::default();
        for options in [
            GridOptions {
                policy: Some("median".into()),
                ..Default::default()
            },
            GridOptions {
                filter: Some("nearest".into()),
                ..Default::default()
            },
            GridOptions {
                preset: Some("sepia".into()),
                ..Default::default()
            },
        ] {
            assert!(matches!(
                service.builder(&options),
                Err(ApiError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_builder_overrides_preset() {
        let service = AnalyzerService::default();
        let options = GridOptions {
            preset: Some("high-contrast".into()),
            contrast: Some(2.0),
            clahe: Some(true),
            ..Default::default()
        };
        let builder = service.builder(&options).unwrap();
        let enhance = builder.enhance_options();
        assert_eq!(enhance.contrast, 2.0);
        // Preset sharpness survives
        assert_eq!(enhance.sharpness, 1.2);
        assert!(enhance.equalize.is_some());
    }

    #[test]
    fn test_builder_rejects_invalid_enhancement() {
        let service = AnalyzerService::default();
        let options = GridOptions {
            gamma: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            service.builder(&options),
            Err(ApiError::Grid(GridError::InvalidEnhancement(_)))
        ));
    }

    #[test]
    fn test_analyze_gradient() {
        let service = AnalyzerService::default();
        let options = GridOptions {
            grid_width: Some(14),
            grid_height: Some(3),
            policy: Some("linear".into()),
            ..Default::default()
        };
        let analysis = service.analyze(&gradient_png(140, 30), &options).unwrap();

        assert_eq!(analysis.grid.width(), 14);
        assert_eq!(analysis.grid.height(), 3);
        assert_eq!(analysis.counts.total(), 42);
        // Left edge dark, right edge bright
        assert_eq!(analysis.grid.get(0, 0), Some(0));
        assert_eq!(analysis.grid.get(0, 13), Some(6));
    }

    #[test]
    fn test_analyze_rejects_garbage() {
        let service = AnalyzerService::default();
        let result = service.analyze(b"not an image", &GridOptions::default());
        assert!(matches!(
            result,
            Err(ApiError::Grid(GridError::ImageDecode(_)))
        ));
    }

    #[test]
    fn test_analyze_styles_one_grid_per_preset() {
        let service = AnalyzerService::default();
        let options = GridOptions {
            grid_size: Some(8),
            ..Default::default()
        };
        let styles = service.analyze_styles(&gradient_png(64, 64), &options).unwrap();

        assert_eq!(styles.len(), StylePreset::ALL.len());
        for (style, preset) in styles.iter().zip(StylePreset::ALL) {
            assert_eq!(style.preset, preset);
            assert_eq!((style.grid.width(), style.grid.height()), (8, 8));
        }
    }

    #[tokio::test]
    async fn test_analyze_blocking() {
        let service = std::sync::Arc::new(AnalyzerService::default());
        let options = GridOptions {
            grid_size: Some(5),
            ..Default::default()
        };
        let analysis = service
            .analyze_blocking(gradient_png(50, 50), options)
            .await
            .unwrap();
        assert_eq!(analysis.counts.total(), 25);
    }
}
