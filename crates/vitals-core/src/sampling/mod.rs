//! Last-value downsampling
//!
//! [`Sampler`] turns an unordered batch of readings into one reading per
//! category per bucket, keeping the latest reading of each bucket.
//!
//! ## Selection rules
//!
//! - Readings strictly before the sampling start are dropped.
//! - Buckets come from [`BucketIndex`], so they are aligned to the epoch and
//!   a reading on a boundary belongs to the bucket that ends there.
//! - Within a bucket the greatest timestamp wins; equal timestamps go to the
//!   reading that appears later in the input.
//! - Each category's output is in ascending time order. Categories with no
//!   surviving reading are absent.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let sampler = Sampler::with_interval_secs(start, 300)?;
//! let sampled = sampler.sample(&readings);
//!
//! for (kind, series) in &sampled {
//!     // one entry per five-minute window, oldest first
//! }
//! ```

mod bucket;

pub use bucket::BucketIndex;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use log::{debug, trace};

use crate::config::{SamplingConfig, SamplingInterval};
use crate::error::Result;
use crate::measurement::{Measurement, Timestamp};

/// Downsampled output: per category, readings in ascending time order
pub type SampledSeries<C> = BTreeMap<C, Vec<Measurement<C>>>;

/// A downsampling back end
///
/// Pipeline stages hold this rather than a concrete [`Sampler`] so the
/// reduction can be swapped out.
pub trait Downsampler<C> {
    /// Reduce `measurements` to at most one reading per category and bucket.
    fn sample(&self, measurements: &[Measurement<C>]) -> SampledSeries<C>;
}

/// Keeps the latest reading per category per interval
///
/// Immutable once built, so one instance can serve any number of threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    config: SamplingConfig,
}

impl Sampler {
    /// Create a sampler from a validated configuration
    pub const fn new(config: SamplingConfig) -> Self {
        Self { config }
    }

    /// Create a sampler with the interval given in seconds
    ///
    /// Fails immediately when `interval_secs` is zero or negative.
    pub fn with_interval_secs(start_of_sampling: Timestamp, interval_secs: i64) -> Result<Self> {
        SamplingConfig::with_interval_secs(start_of_sampling, interval_secs).map(Self::new)
    }

    /// Create a sampler using the default five-minute interval
    pub fn starting_at(start_of_sampling: Timestamp) -> Self {
        Self::new(SamplingConfig::new(start_of_sampling, SamplingInterval::default()))
    }

    /// The configuration this sampler was built with
    pub const fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Readings strictly before this instant are discarded
    pub const fn start_of_sampling(&self) -> Timestamp {
        self.config.start_of_sampling()
    }

    /// Bucket width
    pub const fn interval(&self) -> SamplingInterval {
        self.config.interval()
    }

    /// Downsample a batch of readings.
    ///
    /// The input is never modified; only the surviving readings are cloned
    /// into the result.
    pub fn sample<C>(&self, measurements: &[Measurement<C>]) -> SampledSeries<C>
    where
        C: Ord + Clone,
    {
        let start = self.start_of_sampling();
        let interval = self.interval();

        let mut buckets: BTreeMap<&C, BTreeMap<BucketIndex, &Measurement<C>>> = BTreeMap::new();
        let mut skipped = 0usize;

        for measurement in measurements {
            if measurement.timestamp() < start {
                skipped += 1;
                continue;
            }

            let index = BucketIndex::of(measurement.timestamp(), interval);
            let slot = buckets
                .entry(measurement.category())
                .or_default()
                .entry(index)
                .or_insert(measurement);

            // `>=` hands ties to the later reading in the input
            if measurement.timestamp() >= slot.timestamp() {
                *slot = measurement;
            }
        }

        if skipped > 0 {
            trace!("dropped {} readings before {}", skipped, start);
        }

        let sampled: SampledSeries<C> = buckets
            .into_iter()
            .map(|(category, per_bucket)| {
                let series = per_bucket.into_values().cloned().collect();
                (category.clone(), series)
            })
            .collect();

        debug!(
            "sampled {} readings into {} categories ({} kept)",
            measurements.len(),
            sampled.len(),
            sampled.values().map(Vec::len).sum::<usize>()
        );

        sampled
    }
}

impl<C> Downsampler<C> for Sampler
where
    C: Ord + Clone,
{
    fn sample(&self, measurements: &[Measurement<C>]) -> SampledSeries<C> {
        Sampler::sample(self, measurements)
    }
}
