//! Property-based tests for the statistics helpers

use super::*;
use proptest::collection::vec;
use proptest::prelude::*;

mod generators {
    use super::*;

    /// Latency samples in a realistic millisecond range
    pub fn latency_samples() -> impl Strategy<Value = Vec<f64>> {
        vec(0.001f64..5000.0, 1..50)
    }

    pub fn elapsed() -> impl Strategy<Value = Duration> {
        (1u64..60_000_000).prop_map(Duration::from_micros)
    }
}

proptest! {
    /// Mean should always be between min and max
    #[test]
    fn mean_between_min_max(samples in generators::latency_samples()) {
        let min = samples.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = samples.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let avg = mean(&samples);

        prop_assert!(avg >= min - 1e-9);
        prop_assert!(avg <= max + 1e-9);
    }

    /// Jitter matches sqrt(sum((s - mean)^2) / N)
    #[test]
    fn jitter_is_population_std_dev(samples in generators::latency_samples()) {
        let n = samples.len() as f64;
        let avg = samples.iter().sum::<f64>() / n;
        let expected = (samples.iter().map(|s| (s - avg).powi(2)).sum::<f64>() / n).sqrt();

        let summary = LatencySummary::from_samples(&samples);
        prop_assert!((summary.jitter_ms - expected).abs() <= 1e-9 * expected.max(1.0));
        prop_assert!(summary.jitter_ms >= 0.0);
    }

    /// Population std dev never exceeds the sample (N-1) std dev
    #[test]
    fn population_not_above_sample_std_dev(samples in vec(0.001f64..5000.0, 2..50)) {
        let n = samples.len() as f64;
        let avg = mean(&samples);
        let sum_sq = samples.iter().map(|s| (s - avg).powi(2)).sum::<f64>();
        let sample_std_dev = (sum_sq / (n - 1.0)).sqrt();

        prop_assert!(population_std_dev(&samples) <= sample_std_dev + 1e-9);
    }

    /// Shifting every sample shifts the mean but leaves jitter unchanged
    #[test]
    fn jitter_is_shift_invariant(
        samples in generators::latency_samples(),
        shift in 0.0f64..1000.0,
    ) {
        let shifted: Vec<f64> = samples.iter().map(|s| s + shift).collect();
        let base = LatencySummary::from_samples(&samples);
        let moved = LatencySummary::from_samples(&shifted);

        prop_assert!((moved.mean_ms - base.mean_ms - shift).abs() < 1e-6);
        prop_assert!((moved.jitter_ms - base.jitter_ms).abs() < 1e-6);
    }

    /// Throughput is finite, positive, and inversely proportional to time
    #[test]
    fn throughput_positive_and_finite(bytes in 1u64..(1 << 34), elapsed in generators::elapsed()) {
        let mbps = throughput_mbps(bytes, elapsed);
        prop_assert!(mbps.is_finite());
        prop_assert!(mbps > 0.0);

        let doubled = throughput_mbps(bytes, elapsed * 2);
        prop_assert!((doubled * 2.0 - mbps).abs() <= 1e-9 * mbps);
    }
}
