//! Identity lookup: public IP and ISP of the client

use super::ProbeContext;
use crate::{error::ProbeError, models::IdentityInfo};

/// Fetch and decode `GET /getIP?isp=true`
pub async fn lookup(ctx: &ProbeContext<'_>) -> Result<IdentityInfo, ProbeError> {
    let url = ctx.identity_url();
    let start = ctx.clock.now();
    let outcome = ctx.transport.get(&url).await;
    let response = ctx.check_response("GET", &url, outcome, ctx.elapsed_since(start)).await?;

    IdentityInfo::from_json(&response.body)
}
