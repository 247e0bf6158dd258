//! Intensity bucketing.
//!
//! A bucket is one of seven brightness classes, 0 (darkest, a blank die face)
//! to 6 (brightest, six pips). [`BucketPolicy`] decides where the class
//! boundaries sit:
//!
//! - **Ladder**: fixed breakpoints `30, 60, 100, 140, 180, 220`
//! - **Linear**: `floor(v / 256 * 7)`, bucket width ~36.6 intensity units
//!
//! Both policies are monotonic, map 0 to bucket 0 and 255 to bucket 6.

mod policy;
mod value;

pub use policy::{BucketPolicy, ThresholdLadder};
pub use value::{Bucket, BUCKET_COUNT, MAX_BUCKET};
