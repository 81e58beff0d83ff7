//! Speed test orchestration
//!
//! Runs the identity, latency, download and upload probes in that order
//! and aggregates them into a [`SpeedTestResult`]. Probes are sequential
//! so they never compete for bandwidth.

use crate::{
    client::{Clock, HttpUtils, ReqwestTransport, SystemClock, Transport},
    error::{Result, SpeedTestError, Stage, StageContext},
    logging::{LogLevel, Logger, NetworkLogger},
    models::{Config, SpeedTestResult},
    probes::{self, ProbeContext, ProbeSettings},
};
use std::sync::Arc;

const OPERATION: &str = "speed_test";

/// Client for a single LibreSpeed-compatible server
pub struct SpeedTestClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    settings: ProbeSettings,
    logger: Logger,
    net_logger: NetworkLogger,
}

impl SpeedTestClient {
    /// Create a client using the production transport and default settings
    pub fn new(base_url: &str) -> Result<Self> {
        let settings = ProbeSettings::default();
        let transport = ReqwestTransport::with_timeout(settings.request_timeout)?;
        Self::with_transport(base_url, Arc::new(transport), Arc::new(SystemClock), settings)
    }

    /// Create a client from loaded configuration, logging the way it asks
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(&config.server_url)?;
        Ok(client.with_logger(Logger::with_config("SPEEDTEST", config)))
    }

    /// Create a client with an injected transport, clock and settings
    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
        settings: ProbeSettings,
    ) -> Result<Self> {
        settings.validate()?;
        let base_url = HttpUtils::normalize_base_url(base_url)?;
        let logger = Logger::new("SPEEDTEST");

        Ok(Self {
            base_url,
            transport,
            clock,
            settings,
            net_logger: NetworkLogger::new(logger.named("HTTP")),
            logger,
        })
    }

    /// Replace the logger used for progress and request logging
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.net_logger = NetworkLogger::new(logger.named("HTTP"));
        self.logger = logger;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// Run every probe in order and aggregate the results
    ///
    /// The first failing probe ends the run; its error carries the stage
    /// and no later probe is attempted.
    pub async fn run_test(&self) -> std::result::Result<SpeedTestResult, SpeedTestError> {
        self.logger.add_context_field("server", &self.base_url).await;
        let correlation_id = self.logger.start_operation(OPERATION).await;
        let outcome = self.run_stages(&correlation_id).await;

        // the caller reports the failure; the run log repeats it only when asked
        match &outcome {
            Err(error) if self.logger.would_log(LogLevel::Info) => {
                self.logger
                    .error(&format!("Probe failed during {}", error.stage.name()))
                    .correlation_id(&correlation_id)
                    .field("stage", error.stage.name())
                    .probe_error_info(&error.source)
                    .log()
                    .await;
            }
            _ => {}
        }

        self.logger
            .end_operation(&correlation_id, OPERATION, outcome.is_ok())
            .await;
        outcome
    }

    async fn run_stages(
        &self,
        correlation_id: &str,
    ) -> std::result::Result<SpeedTestResult, SpeedTestError> {
        let ctx = ProbeContext {
            transport: self.transport.as_ref(),
            clock: self.clock.as_ref(),
            settings: &self.settings,
            net_logger: &self.net_logger,
            base_url: &self.base_url,
            correlation_id: Some(correlation_id),
        };

        self.stage_started(Stage::Identity, correlation_id).await;
        let identity = probes::identity::lookup(&ctx).await.stage(Stage::Identity)?;

        self.stage_started(Stage::Latency, correlation_id).await;
        let latency = probes::latency::measure(&ctx).await.stage(Stage::Latency)?;

        self.stage_started(Stage::Download, correlation_id).await;
        let download_mbps = probes::download::measure(&ctx).await.stage(Stage::Download)?;

        self.stage_started(Stage::Upload, correlation_id).await;
        let upload_mbps = probes::upload::measure(&ctx).await.stage(Stage::Upload)?;

        let result = SpeedTestResult {
            download_mbps,
            upload_mbps,
            ping_ms: latency.mean_ms,
            jitter_ms: latency.jitter_ms,
            isp: identity.isp_organization,
            ip: identity.display_ip,
        };

        self.logger
            .info("Speed test completed")
            .correlation_id(correlation_id)
            .field("result", &result)
            .log()
            .await;

        Ok(result)
    }

    async fn stage_started(&self, stage: Stage, correlation_id: &str) {
        self.logger
            .info(&format!("Running {} probe", stage.name()))
            .correlation_id(correlation_id)
            .field("stage", stage.name())
            .log()
            .await;
    }
}
