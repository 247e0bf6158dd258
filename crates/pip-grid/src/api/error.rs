//! Unified error type for the pip-grid public API.
//!
//! Every fallible operation in the crate returns [`GridError`], so callers can
//! propagate with `?` and decide on a response class by matching variants.

use crate::palette::PaletteError;
use std::fmt;

/// Unified error type for the pip-grid public API.
///
/// All variants are scoped to a single call; none of them indicate a fault
/// that would go away on retry.
///
/// # Example
///
/// ```
/// use pip_grid::{BucketPolicy, GridError};
///
/// let err = BucketPolicy::linear().bucket(f32::NAN).unwrap_err();
/// assert!(matches!(err, GridError::InvalidIntensity(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Intensity was NaN, infinite or outside the accepted range
    InvalidIntensity(f32),
    /// Requested grid dimensions were zero or otherwise unusable
    InvalidDimensions {
        /// Requested grid width in cells
        width: usize,
        /// Requested grid height in cells
        height: usize,
    },
    /// Input bytes could not be decoded as an image
    ImageDecode(String),
    /// Page geometry or quadrant request cannot be laid out
    InvalidLayout(String),
    /// A grid cell holds a value outside 0..=6
    UnknownBucket {
        /// Offending cell value, as received
        value: i64,
        /// Zero-based row of the cell
        row: usize,
        /// Zero-based column of the cell
        col: usize,
    },
    /// Enhancement factor was non-finite or out of range
    InvalidEnhancement(String),
    /// Palette construction failed
    Palette(PaletteError),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidIntensity(v) => {
                write!(f, "invalid intensity {} (expected a finite value in range)", v)
            }
            GridError::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {}x{}", width, height)
            }
            GridError::ImageDecode(msg) => write!(f, "image decode error: {}", msg),
            GridError::InvalidLayout(msg) => write!(f, "invalid layout: {}", msg),
            GridError::UnknownBucket { value, row, col } => write!(
                f,
                "unknown bucket value {} at row {}, column {}",
                value, row, col
            ),
            GridError::InvalidEnhancement(msg) => write!(f, "invalid enhancement: {}", msg),
            GridError::Palette(err) => write!(f, "palette error: {}", err),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::Palette(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for GridError {
    fn from(err: PaletteError) -> Self {
        GridError::Palette(err)
    }
}

impl From<image::ImageError> for GridError {
    fn from(err: image::ImageError) -> Self {
        GridError::ImageDecode(err.to_string())
    }
}
