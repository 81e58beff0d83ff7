//! Measurement probes
//!
//! Each probe is a single stateless operation against the server. Probes
//! never retry: the first transport or protocol failure is returned as is.

pub mod download;
pub mod identity;
pub mod latency;
pub mod upload;

use crate::{
    client::{Clock, HttpResponse, Transport},
    defaults,
    error::{AppError, ProbeError, Result},
    logging::NetworkLogger,
};
use std::time::{Duration, Instant};

/// Fixed measurement parameters
///
/// The defaults are the only values the CLI ever uses. Other values are for
/// tests and embedding code.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSettings {
    /// Number of latency round trips
    pub ping_count: usize,
    /// Pause between successive latency round trips, not measured
    pub ping_interval: Duration,
    /// Chunk count sent as `ckSize` to the download endpoint
    pub download_chunks: u32,
    /// Size of one download chunk in bytes
    pub chunk_size: usize,
    /// Size of the upload payload in bytes
    pub upload_size: usize,
    /// Ceiling for every request
    pub request_timeout: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            ping_count: defaults::PING_COUNT,
            ping_interval: defaults::PING_INTERVAL,
            download_chunks: defaults::DOWNLOAD_CHUNKS,
            chunk_size: defaults::CHUNK_SIZE_BYTES,
            upload_size: defaults::UPLOAD_SIZE_BYTES,
            request_timeout: defaults::REQUEST_TIMEOUT,
        }
    }
}

impl ProbeSettings {
    /// Byte count the download throughput is computed from
    pub fn download_bytes(&self) -> u64 {
        u64::from(self.download_chunks) * self.chunk_size as u64
    }

    pub fn validate(&self) -> Result<()> {
        if self.ping_count == 0 {
            return Err(AppError::config("Ping count must be greater than 0"));
        }
        if self.download_chunks == 0 || self.chunk_size == 0 {
            return Err(AppError::config("Download size must be greater than 0"));
        }
        if self.upload_size == 0 {
            return Err(AppError::config("Upload size must be greater than 0"));
        }
        if self.request_timeout.is_zero() {
            return Err(AppError::config("Request timeout must be greater than 0"));
        }
        Ok(())
    }
}

/// Everything a probe needs for one run
pub struct ProbeContext<'a> {
    pub transport: &'a dyn Transport,
    pub clock: &'a dyn Clock,
    pub settings: &'a ProbeSettings,
    pub net_logger: &'a NetworkLogger,
    /// Server base URL without trailing slash
    pub base_url: &'a str,
    pub correlation_id: Option<&'a str>,
}

impl ProbeContext<'_> {
    pub fn identity_url(&self) -> String {
        format!("{}/getIP?isp=true", self.base_url)
    }

    pub fn empty_url(&self) -> String {
        format!("{}/empty", self.base_url)
    }

    pub fn garbage_url(&self) -> String {
        format!("{}/garbage?ckSize={}", self.base_url, self.settings.download_chunks)
    }

    /// Elapsed time since `start` on the injected clock
    pub fn elapsed_since(&self, start: Instant) -> Duration {
        self.clock.now().saturating_duration_since(start)
    }

    /// Log a finished request and turn a non-200 status into a protocol error
    pub async fn check_response(
        &self,
        method: &str,
        url: &str,
        outcome: std::result::Result<HttpResponse, ProbeError>,
        elapsed: Duration,
    ) -> std::result::Result<HttpResponse, ProbeError> {
        let status = outcome.as_ref().ok().map(|r| r.status_code);
        self.net_logger
            .log_http_request(method, url, status, elapsed, self.correlation_id)
            .await;

        let response = outcome?;
        if !response.is_ok() {
            return Err(ProbeError::protocol(response.status_code));
        }
        Ok(response)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::client::mock::{ManualClock, ScriptedTransport};
    use crate::logging::Logger;
    use std::sync::Arc;

    pub const BASE_URL: &str = "http://speed.test";

    /// Owns everything a `ProbeContext` borrows
    pub struct Harness {
        pub clock: Arc<ManualClock>,
        pub transport: ScriptedTransport,
        pub settings: ProbeSettings,
        pub net_logger: NetworkLogger,
    }

    impl Harness {
        pub fn new(build: impl FnOnce(ScriptedTransport) -> ScriptedTransport) -> Self {
            let clock = ManualClock::new();
            let transport = build(ScriptedTransport::new(clock.clone()));
            let mut logger = Logger::new("TEST");
            logger.set_level(crate::logging::LogLevel::Fatal);
            Self {
                clock,
                transport,
                settings: ProbeSettings::default(),
                net_logger: NetworkLogger::new(logger),
            }
        }

        pub fn ctx(&self) -> ProbeContext<'_> {
            ProbeContext {
                transport: &self.transport,
                clock: self.clock.as_ref(),
                settings: &self.settings,
                net_logger: &self.net_logger,
                base_url: BASE_URL,
                correlation_id: None,
            }
        }
    }
}
