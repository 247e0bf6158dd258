//! The bucket color table and its 8-bit sRGB color type.

use std::fmt;
use std::str::FromStr;

use super::error::PaletteError;
use crate::bucket::{Bucket, BUCKET_COUNT};

/// 8-bit sRGB color as drawn on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Srgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Luminance above which dark label text reads better than light text.
///
/// This is the crossover where black and white reach equal WCAG contrast
/// ratios against the fill.
const DARK_TEXT_LUMINANCE: f32 = 0.179;

impl Srgb {
    pub const BLACK: Srgb = Srgb::from_u8(0, 0, 0);
    pub const WHITE: Srgb = Srgb::from_u8(255, 255, 255);

    #[inline]
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels scaled to 0.0..=1.0 (for backends that take unit floats).
    #[inline]
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// `#rrggbb` form, as used in SVG attributes and API payloads.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// WCAG relative luminance (0.0 black to 1.0 white).
    pub fn relative_luminance(self) -> f32 {
        fn linear(channel: u8) -> f32 {
            let c = channel as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Label color with the better contrast against `self` as a fill.
    pub fn contrasting_text(self) -> Srgb {
        if self.relative_luminance() > DARK_TEXT_LUMINANCE {
            Srgb::BLACK
        } else {
            Srgb::WHITE
        }
    }

    /// Linear blend in sRGB bytes: `t = 0.0` keeps `self`, `t = 1.0` gives `other`.
    pub fn blend(self, other: Srgb, t: f32) -> Srgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Srgb::from_u8(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Srgb {
    type Err = PaletteError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive, trimmed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaletteError::bad_color(s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| PaletteError::bad_color(s))
        };

        match digits.len() {
            // #rgb: each digit doubles, 0xf -> 0xff
            3 => Ok(Self::from_u8(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
            )),
            6 => Ok(Self::from_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            _ => Err(PaletteError::bad_color(s)),
        }
    }
}

/// Display colors for one bucket value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketColor {
    /// Cell fill
    pub fill: Srgb,
    /// Label color drawn on top of `fill`
    pub text: Srgb,
    /// Human-readable color name for the legend
    pub name: String,
}

impl BucketColor {
    fn new(fill: Srgb, text: Srgb, name: &str) -> Self {
        Self {
            fill,
            text,
            name: name.to_string(),
        }
    }
}

/// One [`BucketColor`] per bucket value, indexed by the value.
///
/// # Example
///
/// ```
/// use pip_grid::{Bucket, BucketPalette, Srgb};
///
/// let palette = BucketPalette::standard();
/// let six = palette.color(Bucket::new(6).unwrap());
/// assert_eq!(six.fill, Srgb::WHITE);
/// assert_eq!(six.text, Srgb::BLACK);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketPalette {
    colors: Vec<BucketColor>,
}

impl BucketPalette {
    /// The canonical table: dark cold colors for low buckets, warm and light
    /// colors for high ones.
    pub fn standard() -> Self {
        Self {
            colors: vec![
                BucketColor::new(Srgb::from_u8(0x1b, 0x1b, 0x1b), Srgb::WHITE, "black"),
                BucketColor::new(Srgb::from_u8(0x3a, 0x4c, 0xc0), Srgb::WHITE, "blue"),
                BucketColor::new(Srgb::from_u8(0x7b, 0x32, 0x94), Srgb::WHITE, "purple"),
                BucketColor::new(Srgb::from_u8(0x2e, 0x9e, 0x44), Srgb::BLACK, "green"),
                BucketColor::new(Srgb::from_u8(0xff, 0x7f, 0x0e), Srgb::BLACK, "orange"),
                BucketColor::new(Srgb::from_u8(0xff, 0xd9, 0x2f), Srgb::BLACK, "yellow"),
                BucketColor::new(Srgb::WHITE, Srgb::BLACK, "white"),
            ],
        }
    }

    /// Build a palette from seven fill colors, one per bucket in order.
    ///
    /// Label colors are picked by luminance; names are the hex fills.
    pub fn from_hex_fills<S: AsRef<str>>(fills: &[S]) -> Result<Self, PaletteError> {
        if fills.len() != BUCKET_COUNT {
            return Err(PaletteError::WrongLength {
                expected: BUCKET_COUNT,
                found: fills.len(),
            });
        }
        let colors = fills
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let fill: Srgb = s.as_ref().parse().map_err(|e: PaletteError| e.for_bucket(i))?;
                Ok(BucketColor::new(fill, fill.contrasting_text(), &fill.to_hex()))
            })
            .collect::<Result<Vec<_>, PaletteError>>()?;
        Ok(Self { colors })
    }

    #[inline]
    pub fn color(&self, bucket: Bucket) -> &BucketColor {
        &self.colors[bucket.index()]
    }

    /// Colors in bucket order, paired with their bucket.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &BucketColor)> {
        Bucket::all().zip(self.colors.iter())
    }
}

impl Default for BucketPalette {
    fn default() -> Self {
        Self::standard()
    }
}
