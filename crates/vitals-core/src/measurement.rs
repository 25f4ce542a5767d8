//! Measurement model
//!
//! A [`Measurement`] is an immutable `(timestamp, value, category)` triple.
//! Timestamps count milliseconds from the Unix epoch; the category is any
//! ordered key, with [`MeasurementType`] covering the kinds the monitoring
//! pipeline reports out of the box.

use core::fmt;

use serde::{Deserialize, Serialize};

const MILLIS_PER_SEC: i64 = 1000;

/// Absolute point in time, in milliseconds since `1970-01-01T00:00:00Z`
///
/// Negative values are instants before the epoch. One millisecond is the
/// tick every bucket computation works in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The Unix epoch, origin of the bucket grid
    pub const EPOCH: Self = Self(0);

    /// Creates a timestamp from milliseconds since the epoch.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Creates a timestamp from whole seconds since the epoch.
    ///
    /// Saturates at the ends of the millisecond range.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(MILLIS_PER_SEC))
    }

    /// Milliseconds since the epoch
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Whole seconds since the epoch, rounded towards negative infinity
    pub const fn as_secs(self) -> i64 {
        self.0.div_euclid(MILLIS_PER_SEC)
    }

    /// Returns this timestamp shifted by `millis` (saturating).
    pub const fn add_millis(self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Returns this timestamp shifted by `millis`, or `None` on overflow.
    pub const fn checked_add_millis(self, millis: i64) -> Option<Self> {
        match self.0.checked_add(millis) {
            Some(shifted) => Some(Self(shifted)),
            None => None,
        }
    }

    /// Returns this timestamp shifted by `secs` (saturating).
    pub const fn add_secs(self, secs: i64) -> Self {
        self.add_millis(secs.saturating_mul(MILLIS_PER_SEC))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_sec = MILLIS_PER_SEC as u64;
        write!(f, "{sign}{}.{:03}s", abs / per_sec, abs % per_sec)
    }
}

/// Kinds of reading produced by the monitoring pipeline
///
/// The sampler never looks inside a category; this enum exists so callers
/// have a ready-made key. Any `Ord + Clone` type works in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MeasurementType {
    /// Body temperature (°C)
    Temperature,
    /// Heart rate (beats per minute)
    HeartRate,
    /// Blood oxygen saturation (%)
    SpO2,
}

impl MeasurementType {
    /// Every known kind, in declaration order
    pub const ALL: [Self; 3] = [Self::Temperature, Self::HeartRate, Self::SpO2];

    /// Get a short label for display
    pub const fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temp",
            Self::HeartRate => "HR",
            Self::SpO2 => "SpO2",
        }
    }

    /// Get the unit suffix for display
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::HeartRate => "bpm",
            Self::SpO2 => "%",
        }
    }
}

/// A single timestamped reading
///
/// Created by whatever ingests the readings; the sampler only borrows it and
/// clones the survivors into its output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement<C = MeasurementType> {
    timestamp: Timestamp,
    value: f64,
    category: C,
}

impl<C> Measurement<C> {
    /// Creates a measurement.
    pub const fn new(timestamp: Timestamp, value: f64, category: C) -> Self {
        Self {
            timestamp,
            value,
            category,
        }
    }

    /// When the reading was taken
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The measured value, in the category's unit
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// The category this reading belongs to
    pub const fn category(&self) -> &C {
        &self.category
    }
}
