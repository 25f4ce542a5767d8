//! Hardware-independent core library for vitals-rs
//!
//! This crate reduces irregularly timed, multi-category measurements into a
//! fixed-cadence series: for every category and every interval-wide bucket,
//! only the latest measurement survives. Buckets are laid on a grid anchored
//! at the Unix epoch, so the grid depends on the interval width alone.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).
//!
//! ```
//! use vitals_core::{Measurement, MeasurementType, Sampler, Timestamp};
//!
//! let start = Timestamp::from_secs(1_483_437_600); // 2017-01-03T10:00:00Z
//! let sampler = Sampler::starting_at(start);
//!
//! let readings = [
//!     Measurement::new(start.add_secs(121), 35.82, MeasurementType::Temperature),
//!     Measurement::new(start.add_secs(285), 35.79, MeasurementType::Temperature),
//! ];
//!
//! let sampled = sampler.sample(&readings);
//! assert_eq!(sampled[&MeasurementType::Temperature], [readings[1]]);
//! ```

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod measurement;
pub mod sampling;

pub use config::{DEFAULT_INTERVAL_SECS, SamplerSettings, SamplingConfig, SamplingInterval};
pub use error::{ConfigError, Result};
pub use measurement::{Measurement, MeasurementType, Timestamp};
pub use sampling::{Downsampler, SampledSeries, Sampler};
