use pip_grid::{
    BucketPalette, BucketPolicy, CellSizing, DocumentStyle, GridError, LayoutOptions,
    PageGeometry, PaletteError, ResampleFilter, ThresholdLadder,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use utoipa::ToSchema;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_CONTENT_DIR: &str = "./content";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown bucket policy '{0}' (expected ladder or linear)")]
    UnknownPolicy(String),

    #[error("unknown resample filter '{0}' (expected area or lanczos3)")]
    UnknownFilter(String),

    #[error("thresholds must be strictly increasing: {0:?}")]
    Thresholds([u8; 6]),

    #[error("invalid palette: {0}")]
    Palette(#[from] PaletteError),

    #[error("invalid document layout: {0}")]
    Layout(#[from] GridError),
}

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Listen address for `serve`
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory where rendered documents and previews are written
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Prefix for artifact URLs in responses (e.g. `https://dice.example.com`)
    #[serde(default)]
    pub public_base_url: Option<String>,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub document: DocumentConfig,

    /// Seven hex fill colors, darkest bucket first. Standard table when unset.
    #[serde(default)]
    pub palette: Option<Vec<String>>,
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CONTENT_DIR)
}

/// Grid building defaults and request limits
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    /// `ladder` or `linear`
    pub policy: String,
    /// Custom ladder breakpoints, replacing the standard ones
    pub thresholds: Option<[u8; 6]>,
    /// `area` or `lanczos3`
    pub filter: String,
    /// Square grid size used when a request names no dimensions
    pub default_grid_size: usize,
    /// Largest accepted grid width or height
    pub max_grid_dimension: usize,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            policy: "ladder".to_string(),
            thresholds: None,
            filter: "area".to_string(),
            default_grid_size: 40,
            max_grid_dimension: 200,
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

impl AnalysisConfig {
    pub fn bucket_policy(&self) -> Result<BucketPolicy, ConfigError> {
        let policy = BucketPolicy::parse(&self.policy)
            .ok_or_else(|| ConfigError::UnknownPolicy(self.policy.clone()))?;
        match (policy, self.thresholds) {
            (BucketPolicy::Ladder(_), Some(breakpoints)) => ThresholdLadder::new(breakpoints)
                .map(BucketPolicy::Ladder)
                .ok_or(ConfigError::Thresholds(breakpoints)),
            (policy, _) => Ok(policy),
        }
    }

    pub fn resample_filter(&self) -> Result<ResampleFilter, ConfigError> {
        ResampleFilter::parse(&self.filter).ok_or_else(|| ConfigError::UnknownFilter(self.filter.clone()))
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    pub fn geometry(self) -> PageGeometry {
        match self {
            PageSize::A4 => PageGeometry::A4,
            PageSize::Letter => PageGeometry::LETTER,
        }
    }
}

/// Page layout and document appearance
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DocumentConfig {
    pub page_size: PageSize,
    /// Page margin in millimetres
    pub margin: f32,
    /// Header band height in millimetres
    pub header_height: f32,
    /// Fixed cell edge in millimetres; fitted to the page width when unset
    pub cell_size: Option<f32>,
    pub min_cell_size: f32,
    pub max_cell_size: f32,
    /// Split renders into quadrants unless the request says otherwise
    pub quadrants: bool,
    pub ghost_quadrants: bool,
    pub instructions: bool,
    /// Edge of one cell in the PNG preview, in pixels
    pub preview_cell_pixels: u32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin: 10.0,
            header_height: 12.0,
            cell_size: None,
            min_cell_size: 4.0,
            max_cell_size: 12.0,
            quadrants: false,
            ghost_quadrants: true,
            instructions: true,
            preview_cell_pixels: 12,
        }
    }
}

impl DocumentConfig {
    pub fn geometry(&self) -> PageGeometry {
        self.page_size
            .geometry()
            .margin(self.margin)
            .header_height(self.header_height)
    }

    pub fn cell_sizing(&self) -> CellSizing {
        match self.cell_size {
            Some(size) => CellSizing::Fixed(size),
            None => CellSizing::FitWidth {
                min: self.min_cell_size,
                max: self.max_cell_size,
            },
        }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions::new(self.geometry())
            .cell_sizing(self.cell_sizing())
            .quadrants(self.quadrants)
    }

    pub fn style(&self) -> DocumentStyle {
        DocumentStyle::default()
            .ghost_quadrants(self.ghost_quadrants)
            .instructions(self.instructions)
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file set, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        policy = %config.analysis.policy,
                        page_size = ?config.document.page_size,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `CONFIG_FILE` and apply the `BIND_ADDR`, `CONTENT_DIR` and
    /// `PUBLIC_BASE_URL` overrides.
    pub fn from_env() -> Self {
        let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
        let mut config = Self::load(config_file.as_deref());
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply environment-style overrides through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(dir) = lookup("CONTENT_DIR") {
            self.content_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("PUBLIC_BASE_URL") {
            let url = url.trim_end_matches('/').to_string();
            self.public_base_url = (!url.is_empty()).then_some(url);
        }
    }

    /// The configured bucket palette, or the standard table.
    pub fn bucket_palette(&self) -> Result<BucketPalette, ConfigError> {
        match &self.palette {
            Some(fills) => Ok(BucketPalette::from_hex_fills(fills)?),
            None => Ok(BucketPalette::standard()),
        }
    }

    /// Check every derived setting once, at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.bucket_policy()?;
        self.analysis.resample_filter()?;
        self.bucket_palette()?;
        // A one-cell plan fails whenever no cell fits the page
        self.document.layout_options().plan(1, 1)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            content_dir: default_content_dir(),
            public_base_url: None,
            analysis: AnalysisConfig::default(),
            document: DocumentConfig::default(),
            palette: None,
        }
    }
}
