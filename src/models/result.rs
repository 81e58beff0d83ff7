//! Aggregated outcome of a speed test run

use serde::{Deserialize, Serialize};

/// Result of one complete run. Only built once every probe succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedTestResult {
    /// Download throughput in Mbps. Computed from the requested payload
    /// size, not from the bytes actually received.
    pub download_mbps: f64,
    /// Upload throughput in Mbps, from the exact payload length sent
    pub upload_mbps: f64,
    /// Mean round-trip time in milliseconds
    pub ping_ms: f64,
    /// Population standard deviation of round-trip times in milliseconds
    pub jitter_ms: f64,
    pub isp: String,
    pub ip: String,
}

impl SpeedTestResult {
    /// True when every numeric field is finite and strictly positive
    pub fn is_plausible(&self) -> bool {
        [self.download_mbps, self.upload_mbps, self.ping_ms, self.jitter_ms]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}
