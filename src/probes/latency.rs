//! Latency probe: mean round-trip time and jitter

use super::ProbeContext;
use crate::{error::ProbeError, stats::{self, LatencySummary}};

/// Run `ping_count` timed round trips to `GET /empty`
///
/// Each sample covers request issue to body fully received. The configured
/// interval is slept between samples and is never part of a measurement.
/// The first failure aborts the probe; no summary is computed over fewer
/// samples.
pub async fn measure(ctx: &ProbeContext<'_>) -> Result<LatencySummary, ProbeError> {
    let url = ctx.empty_url();
    let count = ctx.settings.ping_count;
    let mut samples = Vec::with_capacity(count);

    for i in 0..count {
        if i > 0 {
            ctx.clock.sleep(ctx.settings.ping_interval).await;
        }

        let start = ctx.clock.now();
        let outcome = ctx.transport.get(&url).await;
        let elapsed = ctx.elapsed_since(start);
        ctx.check_response("GET", &url, outcome, elapsed).await?;

        samples.push(stats::duration_to_ms(elapsed));
    }

    let summary = LatencySummary::from_samples(&samples);
    ctx.net_logger
        .logger()
        .debug("Latency probe finished")
        .field("samples_ms", &samples)
        .field("mean_ms", summary.mean_ms)
        .field("jitter_ms", summary.jitter_ms)
        .log()
        .await;

    Ok(summary)
}
