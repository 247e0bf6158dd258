use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::PageSize;

/// Grid size and enhancement parameters for the analyze endpoints
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GridOptions {
    /// Columns in the grid (defaults to `grid_size`)
    pub grid_width: Option<usize>,
    /// Rows in the grid (defaults to `grid_size`)
    pub grid_height: Option<usize>,
    /// Square grid shortcut (server default when nothing is given)
    pub grid_size: Option<usize>,
    /// Bucket policy: `ladder` or `linear`
    pub policy: Option<String>,
    /// Resample filter: `area` or `lanczos3`
    pub filter: Option<String>,
    /// Style preset name or id (e.g. `high-contrast` or `3`)
    pub preset: Option<String>,
    /// Brightness multiplier (1.0 = unchanged)
    pub brightness: Option<f32>,
    /// Contrast multiplier around mid-grey (1.0 = unchanged)
    pub contrast: Option<f32>,
    /// Sharpness: 0.0 smoothed, 1.0 unchanged, above 1.0 sharpened
    pub sharpness: Option<f32>,
    /// Gamma exponent (1.0 = unchanged)
    pub gamma: Option<f32>,
    /// Apply local contrast equalization (CLAHE)
    pub clahe: Option<bool>,
}

/// Per-request layout overrides for `/render`
#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
pub struct RenderLayout {
    /// Split the grid into four overlapping quadrants
    pub quadrants: Option<bool>,
    /// Draw the neighbouring quadrant's edge as faded guide cells
    pub ghost_quadrants: Option<bool>,
    /// Fixed cell edge in millimetres
    pub cell_size: Option<f32>,
    pub page_size: Option<PageSize>,
    /// Append assembly instructions to the legend
    pub instructions: Option<bool>,
    /// Also produce a PNG mosaic preview (default true)
    pub preview: Option<bool>,
}
