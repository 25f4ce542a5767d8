//! Error types for sampler configuration

use thiserror_no_std::Error;

/// Errors raised while building a sampling configuration
///
/// These are the only failures in the crate. Sampling itself is total over
/// its input, so every error surfaces at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Interval width was zero or negative
    #[error("sampling interval has to be a positive number (got {millis} ms)")]
    NonPositiveInterval {
        /// The rejected width in milliseconds
        millis: i64,
    },

    /// Interval width does not fit the millisecond tick range
    #[error("sampling interval is too wide to be represented in milliseconds")]
    IntervalTooWide,
}

/// Result alias for configuration operations
pub type Result<T> = core::result::Result<T, ConfigError>;
