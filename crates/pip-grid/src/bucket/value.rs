use std::fmt;

/// Number of distinct bucket values.
pub const BUCKET_COUNT: usize = 7;

/// Largest bucket value.
pub const MAX_BUCKET: u8 = 6;

/// A bucket value known to be in `0..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bucket(u8);

impl Bucket {
    /// Returns `None` for values above [`MAX_BUCKET`].
    #[inline]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= MAX_BUCKET {
            Some(Self(value))
        } else {
            None
        }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All buckets in ascending order.
    pub fn all() -> impl Iterator<Item = Bucket> {
        (0..=MAX_BUCKET).map(Bucket)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
