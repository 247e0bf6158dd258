//! Enhancement options and named style presets.

use crate::api::GridError;

/// Tile-based histogram equalization (CLAHE) settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaheOptions {
    /// Tiles across the image
    pub tiles_x: u32,
    /// Tiles down the image
    pub tiles_y: u32,
    /// Histogram clip limit, as a multiple of the mean bin height
    pub clip_limit: f32,
}

impl Default for ClaheOptions {
    fn default() -> Self {
        Self {
            tiles_x: 8,
            tiles_y: 8,
            clip_limit: 2.0,
        }
    }
}

/// Configuration for the enhancement stage of the grid pipeline.
///
/// Steps run in a fixed order: equalization (at source resolution, before the
/// resize), then brightness, contrast, sharpness and gamma on the resized map.
/// Factors of exactly 1.0 are skipped.
///
/// # Example
///
/// ```
/// use pip_grid::EnhanceOptions;
///
/// let options = EnhanceOptions::new()
///     .brightness(1.2)
///     .contrast(1.5)
///     .gamma(0.8);
/// assert!(options.validate().is_ok());
/// assert!(!options.is_identity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhanceOptions {
    /// Multiplier applied to every intensity
    pub brightness: f32,
    /// Scale around mid-grey 128
    pub contrast: f32,
    /// 0.0 fully smoothed, 1.0 unchanged, above 1.0 sharpened
    pub sharpness: f32,
    /// Exponent applied to the normalized intensity
    pub gamma: f32,
    /// Local contrast equalization, when requested
    pub equalize: Option<ClaheOptions>,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            sharpness: 1.0,
            gamma: 1.0,
            equalize: None,
        }
    }
}

impl EnhanceOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn brightness(mut self, factor: f32) -> Self {
        self.brightness = factor;
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    #[inline]
    pub fn sharpness(mut self, factor: f32) -> Self {
        self.sharpness = factor;
        self
    }

    #[inline]
    pub fn gamma(mut self, exponent: f32) -> Self {
        self.gamma = exponent;
        self
    }

    /// Enable CLAHE with the given settings.
    #[inline]
    pub fn equalize(mut self, clahe: ClaheOptions) -> Self {
        self.equalize = Some(clahe);
        self
    }

    /// True when no step would change a pixel.
    pub fn is_identity(&self) -> bool {
        self.brightness == 1.0
            && self.contrast == 1.0
            && self.sharpness == 1.0
            && self.gamma == 1.0
            && self.equalize.is_none()
    }

    /// Check every factor is finite and in range.
    pub fn validate(&self) -> Result<(), GridError> {
        let positive = [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("gamma", self.gamma),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GridError::InvalidEnhancement(format!(
                    "{} must be a finite value above 0, got {}",
                    name, value
                )));
            }
        }
        if !self.sharpness.is_finite() || self.sharpness < 0.0 {
            return Err(GridError::InvalidEnhancement(format!(
                "sharpness must be a finite value of at least 0, got {}",
                self.sharpness
            )));
        }
        if let Some(clahe) = self.equalize {
            if clahe.tiles_x == 0 || clahe.tiles_y == 0 {
                return Err(GridError::InvalidEnhancement(
                    "equalization needs at least one tile in each direction".to_string(),
                ));
            }
            if !clahe.clip_limit.is_finite() || clahe.clip_limit <= 0.0 {
                return Err(GridError::InvalidEnhancement(format!(
                    "clip limit must be a finite value above 0, got {}",
                    clahe.clip_limit
                )));
            }
        }
        Ok(())
    }
}

/// Named enhancement presets offered side by side by the styles endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StylePreset {
    /// No adjustment
    Natural,
    /// Lifted exposure and mid-tones
    Bright,
    /// Strong contrast with a touch of sharpening
    HighContrast,
    /// Edge emphasis for line art and text
    Crisp,
    /// Darker mid-tones with extra contrast
    Moody,
    /// Local contrast equalization for flat or backlit photos
    Equalized,
}

impl StylePreset {
    pub const ALL: [StylePreset; 6] = [
        StylePreset::Natural,
        StylePreset::Bright,
        StylePreset::HighContrast,
        StylePreset::Crisp,
        StylePreset::Moody,
        StylePreset::Equalized,
    ];

    /// Stable numeric identifier (1-based).
    pub fn id(self) -> u8 {
        match self {
            StylePreset::Natural => 1,
            StylePreset::Bright => 2,
            StylePreset::HighContrast => 3,
            StylePreset::Crisp => 4,
            StylePreset::Moody => 5,
            StylePreset::Equalized => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StylePreset::Natural => "natural",
            StylePreset::Bright => "bright",
            StylePreset::HighContrast => "high-contrast",
            StylePreset::Crisp => "crisp",
            StylePreset::Moody => "moody",
            StylePreset::Equalized => "equalized",
        }
    }

    /// Accepts the kebab-case name or the numeric id.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u8>() {
            return Self::ALL.into_iter().find(|p| p.id() == id);
        }
        let lower = s.to_ascii_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|p| p.name() == lower)
    }

    pub fn options(self) -> EnhanceOptions {
        let base = EnhanceOptions::new();
        match self {
            StylePreset::Natural => base,
            StylePreset::Bright => base.brightness(1.2).gamma(0.9),
            StylePreset::HighContrast => base.contrast(1.5).sharpness(1.2),
            StylePreset::Crisp => base.contrast(1.2).sharpness(2.0),
            StylePreset::Moody => base.brightness(0.9).contrast(1.3).gamma(1.2),
            StylePreset::Equalized => base.equalize(ClaheOptions::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let opts = EnhanceOptions::default();
        assert!(opts.is_identity());
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_builder_chaining() {
        let opts = EnhanceOptions::new()
            .brightness(1.1)
            .contrast(1.3)
            .sharpness(2.0)
            .gamma(0.7)
            .equalize(ClaheOptions::default());
        assert!((opts.brightness - 1.1).abs() < f32::EPSILON);
        assert!((opts.contrast - 1.3).abs() < f32::EPSILON);
        assert!((opts.sharpness - 2.0).abs() < f32::EPSILON);
        assert!((opts.gamma - 0.7).abs() < f32::EPSILON);
        assert_eq!(opts.equalize, Some(ClaheOptions::default()));
        assert!(!opts.is_identity());
    }

    #[test]
    fn test_validate_rejects_bad_factors() {
        let bad = [
            EnhanceOptions::new().brightness(0.0),
            EnhanceOptions::new().contrast(-1.0),
            EnhanceOptions::new().gamma(f32::NAN),
            EnhanceOptions::new().sharpness(-0.5),
            EnhanceOptions::new().brightness(f32::INFINITY),
            EnhanceOptions::new().equalize(ClaheOptions {
                tiles_x: 0,
                ..Default::default()
            }),
            EnhanceOptions::new().equalize(ClaheOptions {
                clip_limit: 0.0,
                ..Default::default()
            }),
        ];
        for opts in bad {
            assert!(
                matches!(opts.validate(), Err(GridError::InvalidEnhancement(_))),
                "{:?} should be rejected",
                opts
            );
        }
    }

    #[test]
    fn test_zero_sharpness_is_valid() {
        assert!(EnhanceOptions::new().sharpness(0.0).validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid_and_unique() {
        let mut ids: Vec<u8> = StylePreset::ALL.iter().map(|p| p.id()).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        for preset in StylePreset::ALL {
            assert!(preset.options().validate().is_ok(), "{}", preset.name());
        }
        assert!(StylePreset::Natural.options().is_identity());
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(StylePreset::parse("3"), Some(StylePreset::HighContrast));
        assert_eq!(StylePreset::parse("High_Contrast"), Some(StylePreset::HighContrast));
        assert_eq!(StylePreset::parse("equalized"), Some(StylePreset::Equalized));
        assert_eq!(StylePreset::parse("0"), None);
        assert_eq!(StylePreset::parse("vivid"), None);
    }
}
