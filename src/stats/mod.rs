//! Statistics for latency samples and throughput

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(test)]
mod comprehensive_tests;

/// Smallest elapsed time used in a throughput division
pub const MIN_MEASURABLE_ELAPSED: Duration = Duration::from_micros(1);

const BITS_PER_BYTE: f64 = 8.0;
const BITS_PER_MEGABIT: f64 = 1_000_000.0;

/// Mean latency and jitter of one latency probe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    /// Arithmetic mean of the samples in milliseconds
    pub mean_ms: f64,
    /// Population standard deviation of the samples in milliseconds
    pub jitter_ms: f64,
}

impl LatencySummary {
    /// Summarize latency samples. An empty slice yields zeros.
    pub fn from_samples(samples: &[f64]) -> Self {
        Self {
            mean_ms: mean(samples),
            jitter_ms: population_std_dev(samples),
        }
    }
}

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population variance: mean of squared deviations, divided by N
pub fn population_variance(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let avg = mean(samples);
    let sum_sq: f64 = samples.iter().map(|s| (s - avg).powi(2)).sum();
    sum_sq / samples.len() as f64
}

/// Population standard deviation (divides by N, not N-1)
pub fn population_std_dev(samples: &[f64]) -> f64 {
    population_variance(samples).sqrt()
}

/// Duration in milliseconds, truncated to whole microseconds
pub fn duration_to_ms(duration: Duration) -> f64 {
    duration.as_micros() as f64 / 1000.0
}

/// Throughput in megabits per second (decimal megabits)
///
/// Elapsed times shorter than [`MIN_MEASURABLE_ELAPSED`] are clamped so the
/// result stays finite.
pub fn throughput_mbps(bytes: u64, elapsed: Duration) -> f64 {
    let seconds = elapsed.max(MIN_MEASURABLE_ELAPSED).as_secs_f64();
    (bytes as f64 * BITS_PER_BYTE) / (BITS_PER_MEGABIT * seconds)
}
