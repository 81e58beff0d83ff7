//! Client identity as reported by the server's `getIP` endpoint

use crate::error::ProbeError;
use serde::{Deserialize, Serialize};

/// Public IP and ISP of the client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityInfo {
    /// IP string prepared by the server for display
    pub display_ip: String,
    /// Organization name of the ISP
    pub isp_organization: String,
    pub country: Option<String>,
    pub location: Option<String>,
}

/// Wire shape of `GET /getIP?isp=true`
#[derive(Debug, Deserialize)]
struct GetIpResponse {
    #[serde(rename = "processedString")]
    processed_string: String,
    #[serde(rename = "rawIspInfo")]
    raw_isp_info: RawIspInfo,
}

#[derive(Debug, Deserialize)]
struct RawIspInfo {
    organization: String,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

impl IdentityInfo {
    /// Decode the identity response body
    pub fn from_json(body: &[u8]) -> Result<Self, ProbeError> {
        let response: GetIpResponse = serde_json::from_slice(body)?;
        Ok(Self {
            display_ip: response.processed_string,
            isp_organization: response.raw_isp_info.organization,
            country: response.raw_isp_info.country,
            location: response.raw_isp_info.location,
        })
    }
}
