//! Speed Test Client
//!
//! Measures ping, jitter, download and upload throughput against a
//! LibreSpeed-compatible HTTP server and aggregates the probes into a
//! single report.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod probes;
pub mod speedtest;
pub mod stats;

// Re-export commonly used types
pub use client::{Clock, HttpResponse, ReqwestTransport, SystemClock, Transport};
pub use error::{AppError, NetworkErrorKind, ProbeError, Result, SpeedTestError, Stage};
pub use models::{Config, IdentityInfo, SpeedTestResult};
pub use probes::ProbeSettings;
pub use speedtest::SpeedTestClient;
pub use stats::LatencySummary;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_SERVER_URL: &str = "http://localhost:8989";
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Shared ceiling for every request the probes issue.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    pub const PING_COUNT: usize = 5;
    pub const PING_INTERVAL: Duration = Duration::from_millis(100);

    /// Sent as `ckSize` to the download endpoint. This is a count, not bytes.
    pub const DOWNLOAD_CHUNKS: u32 = 4;
    pub const CHUNK_SIZE_BYTES: usize = 1_048_576;

    pub const UPLOAD_SIZE_BYTES: usize = 1_048_576;

    pub const USER_AGENT: &str = concat!("speedtest-client/", env!("CARGO_PKG_VERSION"));
}
