//! Upload probe

use super::ProbeContext;
use crate::{error::ProbeError, stats};

pub const CONTENT_TYPE: &str = "application/octet-stream";

/// Deterministic upload body: byte `i` is `i % 256`
pub fn build_payload(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// POST the payload to `/empty` and return Mbps
///
/// The payload is built before the timer starts.
pub async fn measure(ctx: &ProbeContext<'_>) -> Result<f64, ProbeError> {
    let url = ctx.empty_url();
    let payload = build_payload(ctx.settings.upload_size);
    let payload_len = payload.len() as u64;

    let start = ctx.clock.now();
    let outcome = ctx.transport.post(&url, CONTENT_TYPE, payload).await;
    let elapsed = ctx.elapsed_since(start);
    ctx.check_response("POST", &url, outcome, elapsed).await?;

    let mbps = stats::throughput_mbps(payload_len, elapsed);

    ctx.net_logger
        .logger()
        .debug("Upload probe finished")
        .field("bytes_sent", payload_len)
        .field("elapsed_ms", elapsed.as_secs_f64() * 1000.0)
        .field("mbps", mbps)
        .log()
        .await;

    Ok(mbps)
}
