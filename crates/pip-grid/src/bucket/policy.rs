//! Bucket policies: threshold ladder and linear scaling.

use super::value::{Bucket, MAX_BUCKET};
use crate::api::GridError;

/// Six strictly increasing breakpoints splitting 0..=255 into seven buckets.
///
/// A value lands in bucket `k` where `k` is the number of breakpoints less
/// than or equal to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdLadder {
    breakpoints: [u8; 6],
}

impl ThresholdLadder {
    /// `<30 → 0, <60 → 1, <100 → 2, <140 → 3, <180 → 4, <220 → 5, else 6`
    pub const STANDARD: ThresholdLadder = ThresholdLadder {
        breakpoints: [30, 60, 100, 140, 180, 220],
    };

    /// Returns `None` unless the breakpoints are strictly increasing and
    /// the first one is above zero (so intensity 0 stays in bucket 0).
    pub fn new(breakpoints: [u8; 6]) -> Option<Self> {
        let increasing = breakpoints.windows(2).all(|w| w[0] < w[1]);
        if increasing && breakpoints[0] > 0 {
            Some(Self { breakpoints })
        } else {
            None
        }
    }

    pub fn breakpoints(&self) -> [u8; 6] {
        self.breakpoints
    }

    #[inline]
    fn classify(&self, v: f32) -> u8 {
        self.breakpoints
            .iter()
            .take_while(|&&b| v >= b as f32)
            .count() as u8
    }
}

impl Default for ThresholdLadder {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// How an intensity is mapped to a bucket.
///
/// # Example
///
/// ```
/// use pip_grid::BucketPolicy;
///
/// assert_eq!(BucketPolicy::linear().bucket(128.0).unwrap().value(), 3);
/// assert_eq!(BucketPolicy::ladder().bucket(128.0).unwrap().value(), 3);
/// assert_eq!(BucketPolicy::ladder().bucket(29.9).unwrap().value(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketPolicy {
    /// Fixed breakpoints
    Ladder(ThresholdLadder),
    /// `floor(v / 256 * 7)`, clamped to the bucket range
    Linear,
}

impl Default for BucketPolicy {
    fn default() -> Self {
        BucketPolicy::Ladder(ThresholdLadder::STANDARD)
    }
}

impl BucketPolicy {
    /// Standard threshold ladder.
    #[inline]
    pub fn ladder() -> Self {
        BucketPolicy::Ladder(ThresholdLadder::STANDARD)
    }

    #[inline]
    pub fn linear() -> Self {
        BucketPolicy::Linear
    }

    /// Parse a policy name: `ladder` (alias `threshold`) or `linear`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ladder" | "threshold" => Some(Self::ladder()),
            "linear" => Some(Self::linear()),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BucketPolicy::Ladder(_) => "ladder",
            BucketPolicy::Linear => "linear",
        }
    }

    /// Bucket an intensity in `0.0..=255.0`.
    ///
    /// NaN, infinities and out-of-range values fail with
    /// [`GridError::InvalidIntensity`].
    pub fn bucket(&self, v: f32) -> Result<Bucket, GridError> {
        if !v.is_finite() || !(0.0..=255.0).contains(&v) {
            return Err(GridError::InvalidIntensity(v));
        }
        let k = match self {
            BucketPolicy::Ladder(ladder) => ladder.classify(v),
            BucketPolicy::Linear => ((v / 256.0 * 7.0).floor() as u8).min(MAX_BUCKET),
        };
        // Both arms are bounded by MAX_BUCKET
        Bucket::new(k).ok_or(GridError::InvalidIntensity(v))
    }

    /// Bucket an intensity normalized to `0.0..=1.0`.
    pub fn bucket_normalized(&self, v: f32) -> Result<Bucket, GridError> {
        if !v.is_finite() || !(0.0..=1.0).contains(&v) {
            return Err(GridError::InvalidIntensity(v));
        }
        self.bucket(v * 255.0)
    }
}
