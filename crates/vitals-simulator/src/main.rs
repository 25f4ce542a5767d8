//! Desktop simulator for the vitals-rs sampler.
//!
//! Generates a synthetic, irregularly timed stream of temperature, heart-rate
//! and SpO2 readings, shuffles it, runs it through the [`Sampler`] and logs
//! what survived. Useful for eyeballing the bucket grid without a device.
//!
//! # Environment
//!
//! | Variable                      | Default        | Meaning                          |
//! |-------------------------------|----------------|----------------------------------|
//! | `VITALS_START_OF_SAMPLING_MS` | two hours ago  | sampling start, ms since epoch   |
//! | `VITALS_INTERVAL_SECS`        | 300            | bucket width in seconds          |
//! | `VITALS_SIMULATED_MINUTES`    | 60             | length of the generated stream   |
//!
//! A `.env` file in the working directory is loaded first if present.
//! Set `RUST_LOG=debug` to also see the sampler's own summary.

use std::env;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{error, info, warn};

use vitals_core::{
    Measurement, MeasurementType, SampledSeries, Sampler, SamplerSettings, SamplingConfig,
    Timestamp,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const ENV_START_OF_SAMPLING_MS: &str = "VITALS_START_OF_SAMPLING_MS";
const ENV_INTERVAL_SECS: &str = "VITALS_INTERVAL_SECS";
const ENV_SIMULATED_MINUTES: &str = "VITALS_SIMULATED_MINUTES";

const DEFAULT_SIMULATED_MINUTES: i64 = 60;

/// Readings generated before the sampling start, to exercise the filter.
const WARM_UP_SECS: i64 = 90;

/// Read and parse an environment variable, falling back on absence or
/// parse failure.
fn env_or<T: FromStr + Copy>(key: &str, fallback: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {}={:?}", key, raw);
            fallback
        }),
        Err(_) => fallback,
    }
}

fn load_settings(now: Timestamp) -> SamplerSettings {
    let defaults = SamplerSettings::default();
    SamplerSettings {
        start_of_sampling_ms: env_or(
            ENV_START_OF_SAMPLING_MS,
            now.add_secs(-2 * 3600).as_millis(),
        ),
        interval_secs: env_or(ENV_INTERVAL_SECS, defaults.interval_secs),
    }
}

/// End of the simulated stream, or `None` when `minutes` past `start` does
/// not fit the millisecond range.
fn stream_end(start: Timestamp, minutes: i64) -> Option<Timestamp> {
    minutes
        .checked_mul(60_000)
        .and_then(|millis| start.checked_add_millis(millis))
}

// ---------------------------------------------------------------------------
// Mock data generation
// ---------------------------------------------------------------------------

/// Generates synthetic readings with uneven spacing per sensor.
struct MockVitalsGenerator {
    start: Timestamp,
}

impl MockVitalsGenerator {
    fn new(start: Timestamp) -> Self {
        Self { start }
    }

    /// Nominal period between readings for each kind, in milliseconds.
    const fn period_ms(kind: MeasurementType) -> i64 {
        match kind {
            MeasurementType::Temperature => 47_000,
            MeasurementType::HeartRate => 13_000,
            MeasurementType::SpO2 => 29_000,
        }
    }

    fn value_at(kind: MeasurementType, t: f64) -> f64 {
        match kind {
            // Temperature: 36.2–37.4 °C with slow drift
            MeasurementType::Temperature => 36.8 + 0.5 * (t / 900.0).sin() + 0.1 * (t / 61.0).cos(),
            // Heart rate: 60–90 bpm
            MeasurementType::HeartRate => 75.0 + 12.0 * (t / 240.0).sin() + 3.0 * (t / 17.0).cos(),
            // SpO2: 94–99 %
            MeasurementType::SpO2 => 96.5 + 2.0 * (t / 420.0).sin() + 0.5 * (t / 33.0).cos(),
        }
    }

    /// Generate every reading from `WARM_UP_SECS` before the start until
    /// `minutes` after it, in no particular order.
    ///
    /// Yields nothing when the stream would run past the end of time.
    fn generate(&self, minutes: i64) -> Vec<Measurement> {
        let Some(last) = stream_end(self.start, minutes) else {
            return Vec::new();
        };
        let last = last.as_millis();
        let first = self.start.add_secs(-WARM_UP_SECS).as_millis();

        let mut readings = Vec::new();
        for kind in MeasurementType::ALL {
            let period = Self::period_ms(kind);
            let mut ts = first;
            let mut step = 0u32;
            while ts <= last {
                let t = (ts - first) as f64 / 1000.0;
                readings.push(Measurement::new(
                    Timestamp::from_millis(ts),
                    Self::value_at(kind, t),
                    kind,
                ));

                // Jitter the spacing by up to ±40 % of the period
                let jitter = (f64::from(step) * 1.7).sin() * 0.4;
                let spacing = ((1.0 + jitter) * period as f64) as i64;
                match ts.checked_add(spacing) {
                    Some(next) => ts = next,
                    None => break,
                }
                step += 1;
            }
        }

        interleave(readings)
    }
}

/// Deterministically scramble the readings so the sampler sees them out of
/// order, the way a batch assembled from several devices arrives.
fn interleave(mut readings: Vec<Measurement>) -> Vec<Measurement> {
    let len = readings.len();
    if len < 2 {
        return readings;
    }
    // Stride coprime with most lengths; the tail reversal covers the rest
    let stride = 7;
    for i in 0..len {
        let j = (i * stride + 3) % len;
        readings.swap(i, j);
    }
    readings[len / 2..].reverse();
    readings
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

fn report(sampler: &Sampler, total: usize, sampled: &SampledSeries<MeasurementType>) {
    info!(
        "Sampled {} readings from {} every {} s",
        total,
        sampler.start_of_sampling(),
        sampler.interval().as_duration().as_secs()
    );

    for kind in MeasurementType::ALL {
        let Some(series) = sampled.get(&kind) else {
            info!("{:>5}: no readings after start", kind.label());
            continue;
        };

        info!("{:>5}: {} buckets", kind.label(), series.len());
        for m in series {
            info!(
                "{:>5}  {}  {:.2} {}",
                "",
                m.timestamp(),
                m.value(),
                kind.unit()
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        // A missing .env file is the normal case
        if !e.not_found() {
            eprintln!("Failed to load .env: {e}");
        }
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default();
    let settings = load_settings(Timestamp::from_millis(now_ms));

    let config = match SamplingConfig::try_from(settings) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid sampler configuration {:?}: {}", settings, e);
            return ExitCode::FAILURE;
        }
    };
    let sampler = Sampler::new(config);

    let minutes = env_or(ENV_SIMULATED_MINUTES, DEFAULT_SIMULATED_MINUTES).max(0);
    if stream_end(sampler.start_of_sampling(), minutes).is_none() {
        error!(
            "Simulating {} minutes from {} overflows the timestamp range",
            minutes,
            sampler.start_of_sampling()
        );
        return ExitCode::FAILURE;
    }
    let readings = MockVitalsGenerator::new(sampler.start_of_sampling()).generate(minutes);

    let sampled = sampler.sample(&readings);
    report(&sampler, readings.len(), &sampled);

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_covers_every_kind() {
        let start = Timestamp::from_secs(1_483_437_600);
        let readings = MockVitalsGenerator::new(start).generate(10);

        for kind in MeasurementType::ALL {
            assert!(readings.iter().any(|m| *m.category() == kind));
        }
        assert!(readings.iter().any(|m| m.timestamp() < start));
    }

    #[test]
    fn test_interleave_keeps_every_reading() {
        let start = Timestamp::from_secs(0);
        let ordered: Vec<Measurement> = (0..50)
            .map(|i| Measurement::new(start.add_secs(i), i as f64, MeasurementType::HeartRate))
            .collect();

        let mut shuffled = interleave(ordered.clone());
        assert_ne!(shuffled, ordered);

        shuffled.sort_by_key(Measurement::timestamp);
        assert_eq!(shuffled, ordered);
    }

    #[test]
    fn test_simulated_stream_sampled_per_bucket() {
        let start = Timestamp::from_secs(1_483_437_600);
        let sampler = Sampler::starting_at(start);
        let readings = MockVitalsGenerator::new(start).generate(30);

        let sampled = sampler.sample(&readings);

        // 30 minutes of data at a five-minute width spans six or seven buckets
        for kind in MeasurementType::ALL {
            let series = &sampled[&kind];
            assert!((6..=7).contains(&series.len()), "{kind:?}: {}", series.len());
            assert!(series.iter().all(|m| m.timestamp() >= start));
        }
    }

    #[test]
    fn test_stream_end_overflow() {
        let start = Timestamp::from_secs(1_483_437_600);
        assert_eq!(stream_end(start, 60), Some(start.add_secs(3600)));

        let near_max = Timestamp::from_millis(i64::MAX - 60_000);
        assert_eq!(stream_end(near_max, 60), None);
        assert_eq!(stream_end(near_max, i64::MAX), None);
    }

    #[test]
    fn test_generate_near_max_start_terminates() {
        let near_max = Timestamp::from_millis(i64::MAX - 60_000);
        assert!(MockVitalsGenerator::new(near_max).generate(60).is_empty());

        // The stream fits, but stepping past its end would overflow
        let start = Timestamp::from_millis(i64::MAX - 3_600_000 - 30_000);
        let readings = MockVitalsGenerator::new(start).generate(60);
        assert!(!readings.is_empty());
        assert!(readings.iter().all(|m| m.timestamp() <= start.add_secs(3600)));
    }

    #[test]
    fn test_missing_env_falls_back() {
        assert_eq!(env_or("VITALS_SIMULATOR_TEST_UNSET", 42i64), 42);
    }
}
