use std::ops::Index;

use crate::bucket::{Bucket, BUCKET_COUNT};

/// Number of cells per bucket value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketCounts([u64; BUCKET_COUNT]);

impl BucketCounts {
    #[inline]
    pub fn add(&mut self, bucket: Bucket) {
        self.0[bucket.index()] += 1;
    }

    #[inline]
    pub fn get(&self, bucket: Bucket) -> u64 {
        self.0[bucket.index()]
    }

    /// Sum over all buckets; equals `width * height` of the counted grid.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn as_array(&self) -> &[u64; BUCKET_COUNT] {
        &self.0
    }

    /// `(bucket, count)` pairs in bucket order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, u64)> + '_ {
        Bucket::all().map(move |b| (b, self.get(b)))
    }
}

impl Index<Bucket> for BucketCounts {
    type Output = u64;

    fn index(&self, bucket: Bucket) -> &u64 {
        &self.0[bucket.index()]
    }
}
