//! The bucket grid and its per-value counts.

mod cells;
mod counts;

pub use cells::Grid;
pub use counts::BucketCounts;
