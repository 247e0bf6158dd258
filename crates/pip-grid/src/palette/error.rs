use std::fmt;

/// Error building a bucket color or palette.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// A bucket palette needs exactly one color per bucket value
    WrongLength {
        /// Number of colors required
        expected: usize,
        /// Number of colors supplied
        found: usize,
    },
    /// Not a `#rgb` or `#rrggbb` color
    BadColor {
        /// Bucket the color was meant for, when parsing a whole palette
        bucket: Option<usize>,
        /// The rejected input, trimmed
        input: String,
    },
}

impl PaletteError {
    pub(crate) fn bad_color(input: &str) -> Self {
        PaletteError::BadColor {
            bucket: None,
            input: input.trim().to_string(),
        }
    }

    /// Attach the bucket a rejected color belongs to.
    pub(crate) fn for_bucket(self, index: usize) -> Self {
        match self {
            PaletteError::BadColor { input, .. } => PaletteError::BadColor {
                bucket: Some(index),
                input,
            },
            other => other,
        }
    }
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::WrongLength { expected, found } => {
                write!(f, "bucket palette needs {} colors, got {}", expected, found)
            }
            PaletteError::BadColor {
                bucket: Some(bucket),
                input,
            } => write!(f, "color '{}' for bucket {} is not a hex color", input, bucket),
            PaletteError::BadColor { bucket: None, input } => {
                write!(f, "'{}' is not a hex color", input)
            }
        }
    }
}

impl std::error::Error for PaletteError {}
