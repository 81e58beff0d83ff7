//! Download probe
//!
//! Throughput is computed from the requested size (`download_chunks ×
//! chunk_size`), not from the number of bytes the server actually sent.
//! This is a known approximation kept for compatibility with LibreSpeed's
//! reference client; the real byte count is only logged.

use super::ProbeContext;
use crate::{error::ProbeError, stats};

/// Stream `GET /garbage?ckSize=<chunks>` to nowhere and return Mbps
pub async fn measure(ctx: &ProbeContext<'_>) -> Result<f64, ProbeError> {
    let url = ctx.garbage_url();

    let start = ctx.clock.now();
    let outcome = ctx.transport.get_discard(&url).await;
    let elapsed = ctx.elapsed_since(start);
    let response = ctx.check_response("GET", &url, outcome, elapsed).await?;

    let assumed_bytes = ctx.settings.download_bytes();
    let mbps = stats::throughput_mbps(assumed_bytes, elapsed);

    ctx.net_logger
        .logger()
        .debug("Download probe finished")
        .field("assumed_bytes", assumed_bytes)
        .field("bytes_received", response.bytes_received)
        .field("elapsed_ms", elapsed.as_secs_f64() * 1000.0)
        .field("mbps", mbps)
        .log()
        .await;

    Ok(mbps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpResponse;
    use crate::probes::test_support::Harness;
    use std::time::Duration;

    fn expected_mbps(seconds: f64) -> f64 {
        (4.0 * 1_048_576.0 * 8.0) / (1_000_000.0 * seconds)
    }

    #[tokio::test]
    async fn test_throughput_uses_assumed_size_not_received_bytes() {
        // server only sends 10 bytes; the formula still assumes 4 MiB
        let harness = Harness::new(|t| {
            t.respond(Duration::from_millis(250), HttpResponse::discarded(200, 10))
        });

        let mbps = measure(&harness.ctx()).await.unwrap();
        assert_eq!(mbps, expected_mbps(0.25));
        assert_eq!(mbps, 134.217728);
    }

    #[tokio::test]
    async fn test_throughput_for_full_payload() {
        let harness = Harness::new(|t| {
            t.respond(Duration::from_secs(2), HttpResponse::discarded(200, 4 * 1_048_576))
        });

        let mbps = measure(&harness.ctx()).await.unwrap();
        assert_eq!(mbps, expected_mbps(2.0));
    }

    #[tokio::test]
    async fn test_requests_chunk_count_not_bytes() {
        let harness = Harness::new(|t| t.respond_status(1, 200));
        measure(&harness.ctx()).await.unwrap();

        let requests = harness.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://speed.test/garbage?ckSize=4");
    }

    #[tokio::test]
    async fn test_non_200_aborts_without_speed() {
        let harness = Harness::new(|t| t.respond_status(5, 500));

        let error = measure(&harness.ctx()).await.unwrap_err();
        assert!(matches!(error, ProbeError::Protocol { status: 500 }));
    }
}
