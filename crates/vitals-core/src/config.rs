//! Sampler configuration
//!
//! [`SamplerSettings`] is the raw, deserializable form; [`SamplingConfig`] is
//! the validated form the sampler holds. Conversion between the two is where
//! a bad interval width is rejected.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::measurement::Timestamp;

/// Interval width used when none is configured (5 minutes)
pub const DEFAULT_INTERVAL_SECS: i64 = 300;

/// Validated, strictly positive bucket width in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SamplingInterval(i64);

impl SamplingInterval {
    /// Creates an interval from milliseconds.
    pub const fn from_millis(millis: i64) -> Result<Self> {
        if millis <= 0 {
            return Err(ConfigError::NonPositiveInterval { millis });
        }
        Ok(Self(millis))
    }

    /// Creates an interval from whole seconds.
    pub const fn from_secs(secs: i64) -> Result<Self> {
        match secs.checked_mul(1000) {
            Some(millis) => Self::from_millis(millis),
            None if secs < 0 => Err(ConfigError::NonPositiveInterval { millis: i64::MIN }),
            None => Err(ConfigError::IntervalTooWide),
        }
    }

    /// Width in milliseconds, always greater than zero
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Width as a [`Duration`]
    pub const fn as_duration(self) -> Duration {
        Duration::from_millis(self.0 as u64)
    }
}

impl Default for SamplingInterval {
    fn default() -> Self {
        Self(DEFAULT_INTERVAL_SECS * 1000)
    }
}

impl TryFrom<Duration> for SamplingInterval {
    type Error = ConfigError;

    /// Sub-millisecond precision is truncated, so anything shorter than one
    /// tick is rejected as a zero width.
    fn try_from(duration: Duration) -> Result<Self> {
        let millis =
            i64::try_from(duration.as_millis()).map_err(|_| ConfigError::IntervalTooWide)?;
        Self::from_millis(millis)
    }
}

/// Raw sampler settings as they appear in a config source
///
/// Missing fields fall back to the epoch and the default interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerSettings {
    /// Sampling start, milliseconds since the Unix epoch
    pub start_of_sampling_ms: i64,
    /// Bucket width in seconds
    pub interval_secs: i64,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            start_of_sampling_ms: 0,
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }
}

/// Validated sampler configuration
///
/// Fixed for the lifetime of a [`Sampler`](crate::Sampler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    start_of_sampling: Timestamp,
    interval: SamplingInterval,
}

impl SamplingConfig {
    /// Creates a configuration from an already validated interval.
    pub const fn new(start_of_sampling: Timestamp, interval: SamplingInterval) -> Self {
        Self {
            start_of_sampling,
            interval,
        }
    }

    /// Creates a configuration with an interval given in whole seconds.
    pub const fn with_interval_secs(
        start_of_sampling: Timestamp,
        interval_secs: i64,
    ) -> Result<Self> {
        match SamplingInterval::from_secs(interval_secs) {
            Ok(interval) => Ok(Self::new(start_of_sampling, interval)),
            Err(err) => Err(err),
        }
    }

    /// Readings strictly before this instant are discarded
    pub const fn start_of_sampling(&self) -> Timestamp {
        self.start_of_sampling
    }

    /// Bucket width
    pub const fn interval(&self) -> SamplingInterval {
        self.interval
    }
}

impl TryFrom<SamplerSettings> for SamplingConfig {
    type Error = ConfigError;

    fn try_from(settings: SamplerSettings) -> Result<Self> {
        Self::with_interval_secs(
            Timestamp::from_millis(settings.start_of_sampling_ms),
            settings.interval_secs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval_is_five_minutes() {
        assert_eq!(SamplingInterval::default().as_millis(), 300_000);
        assert_eq!(
            SamplingInterval::default().as_duration(),
            Duration::from_secs(300)
        );
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert_eq!(
            SamplingInterval::from_secs(0),
            Err(ConfigError::NonPositiveInterval { millis: 0 })
        );
    }

    #[test]
    fn test_negative_interval_rejected() {
        assert_eq!(
            SamplingInterval::from_secs(-300),
            Err(ConfigError::NonPositiveInterval { millis: -300_000 })
        );
        assert!(matches!(
            SamplingInterval::from_secs(i64::MIN),
            Err(ConfigError::NonPositiveInterval { .. })
        ));
    }

    #[test]
    fn test_huge_interval_rejected() {
        assert_eq!(
            SamplingInterval::from_secs(i64::MAX),
            Err(ConfigError::IntervalTooWide)
        );
        assert_eq!(
            SamplingInterval::try_from(Duration::from_secs(u64::MAX)),
            Err(ConfigError::IntervalTooWide)
        );
    }

    #[test]
    fn test_duration_conversion() {
        let interval = SamplingInterval::try_from(Duration::from_secs(60)).unwrap();
        assert_eq!(interval.as_millis(), 60_000);

        assert_eq!(
            SamplingInterval::try_from(Duration::from_micros(999)),
            Err(ConfigError::NonPositiveInterval { millis: 0 })
        );
    }

    #[test]
    fn test_settings_defaults() {
        let config = SamplingConfig::try_from(SamplerSettings::default()).unwrap();
        assert_eq!(config.start_of_sampling(), Timestamp::EPOCH);
        assert_eq!(config.interval(), SamplingInterval::default());
    }

    #[test]
    fn test_settings_validation() {
        let settings = SamplerSettings {
            start_of_sampling_ms: 1_000,
            interval_secs: -1,
        };
        assert_eq!(
            SamplingConfig::try_from(settings),
            Err(ConfigError::NonPositiveInterval { millis: -1000 })
        );
    }
}
