//! Bucket color table.
//!
//! Every bucket value 0..=6 maps to one fill color and one label color. The
//! table is built once and shared read-only by the document renderer and the
//! mosaic preview, so a given value looks the same on every page.

mod error;
mod table;

pub use error::PaletteError;
pub use table::{BucketColor, BucketPalette, Srgb};
