//! Bucket grid
//!
//! Buckets are numbered from the Unix epoch in steps of the interval width
//! `W`. Bucket `i` covers `(i·W, (i+1)·W]`: an instant sitting exactly on a
//! boundary closes the bucket that ends there instead of opening the next.
//! The single exception is bucket 0, which also owns the epoch tick itself.
//!
//! The grid never depends on the sampling start. Indices are kept in
//! `i128` so the boundary shift stays exact at the ends of the `i64` tick
//! range.

use crate::config::SamplingInterval;
use crate::measurement::Timestamp;

/// Position of a bucket on the epoch-anchored grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketIndex(i128);

impl BucketIndex {
    /// Computes the bucket a timestamp falls into.
    pub fn of(timestamp: Timestamp, interval: SamplingInterval) -> Self {
        let ticks = i128::from(timestamp.as_millis());
        let width = i128::from(interval.as_millis());

        let quotient = ticks.div_euclid(width);
        if ticks != 0 && ticks.rem_euclid(width) == 0 {
            // Closing edge of the previous bucket
            Self(quotient - 1)
        } else {
            Self(quotient)
        }
    }

    /// Raw index value
    pub const fn get(self) -> i128 {
        self.0
    }
}
