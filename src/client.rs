//! HTTP transport and clock abstractions used by the probes

#[cfg(test)]
pub(crate) mod mock;

use crate::{
    defaults,
    error::{AppError, ProbeError, Result},
};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{header::CONTENT_TYPE, Client, Url};
use std::time::{Duration, Instant};

/// Response as seen by a probe
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status_code: u16,
    /// Buffered body. Empty when the body was streamed and discarded.
    pub body: Vec<u8>,
    /// Number of body bytes read off the wire
    pub bytes_received: u64,
}

impl HttpResponse {
    /// Response carrying a status and a buffered body
    pub fn with_body(status_code: u16, body: Vec<u8>) -> Self {
        let bytes_received = body.len() as u64;
        Self {
            status_code,
            body,
            bytes_received,
        }
    }

    /// Response whose body was not kept
    pub fn discarded(status_code: u16, bytes_received: u64) -> Self {
        Self {
            status_code,
            body: Vec::new(),
            bytes_received,
        }
    }

    /// Only 200 counts as success for the speed test endpoints
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

/// HTTP access for the probes. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET and buffer the whole body
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, ProbeError>;

    /// GET and stream the body to nowhere. A non-200 response returns
    /// immediately without draining.
    async fn get_discard(&self, url: &str) -> std::result::Result<HttpResponse, ProbeError>;

    /// POST `payload` with the given content type
    async fn post(
        &self,
        url: &str,
        content_type: &str,
        payload: Vec<u8>,
    ) -> std::result::Result<HttpResponse, ProbeError>;
}

/// Source of time for probe measurements and pauses
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by tokio timers
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Production transport over a single pooled reqwest client
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport with the shared default request timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(defaults::REQUEST_TIMEOUT)
    }

    /// Create a transport with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(defaults::USER_AGENT)
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, ProbeError> {
        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(HttpResponse::with_body(status_code, body.to_vec()))
    }

    async fn get_discard(&self, url: &str) -> std::result::Result<HttpResponse, ProbeError> {
        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();
        if status_code != 200 {
            return Ok(HttpResponse::discarded(status_code, 0));
        }

        let mut stream = response.bytes_stream();
        let mut bytes_received = 0u64;
        while let Some(chunk) = stream.next().await {
            bytes_received += chunk?.len() as u64;
        }

        Ok(HttpResponse::discarded(status_code, bytes_received))
    }

    async fn post(
        &self,
        url: &str,
        content_type: &str,
        payload: Vec<u8>,
    ) -> std::result::Result<HttpResponse, ProbeError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(payload)
            .send()
            .await?;
        let status_code = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(HttpResponse::with_body(status_code, body.to_vec()))
    }
}

/// URL helpers
pub struct HttpUtils;

impl HttpUtils {
    /// Validate URL format: http(s) with a host
    pub fn validate_url(url: &str) -> Result<()> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::config(format!("Invalid server URL '{}': {}", url, e)))?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => return Err(AppError::config(format!("Unsupported URL scheme: {}", scheme))),
        }

        if parsed.host().is_none() {
            return Err(AppError::config("Server URL must have a host"));
        }

        Ok(())
    }

    /// Validate a server base URL and strip trailing slashes so endpoint
    /// paths can be appended directly
    pub fn normalize_base_url(url: &str) -> Result<String> {
        let trimmed = url.trim().trim_end_matches('/');
        Self::validate_url(trimmed)?;
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_constructors() {
        let buffered = HttpResponse::with_body(200, b"hello".to_vec());
        assert!(buffered.is_ok());
        assert_eq!(buffered.bytes_received, 5);

        let discarded = HttpResponse::discarded(200, 4096);
        assert!(discarded.body.is_empty());
        assert_eq!(discarded.bytes_received, 4096);

        assert!(!HttpResponse::with_body(204, Vec::new()).is_ok());
    }

    #[test]
    fn test_reqwest_transport_creation() {
        let transport = ReqwestTransport::new().unwrap();
        assert_eq!(transport.timeout(), Duration::from_secs(10));

        let transport = ReqwestTransport::with_timeout(Duration::from_secs(3)).unwrap();
        assert_eq!(transport.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_http_utils_validate_url() {
        assert!(HttpUtils::validate_url("http://localhost:8989").is_ok());
        assert!(HttpUtils::validate_url("https://speed.example.com/backend").is_ok());

        assert!(HttpUtils::validate_url("ftp://example.com").is_err());
        assert!(HttpUtils::validate_url("not-a-url").is_err());
        assert!(HttpUtils::validate_url("").is_err());
    }

    #[test]
    fn test_normalize_base_url_trims_trailing_slashes() {
        assert_eq!(
            HttpUtils::normalize_base_url("http://localhost:8989/").unwrap(),
            "http://localhost:8989"
        );
        assert_eq!(
            HttpUtils::normalize_base_url("https://speed.example.com/backend//").unwrap(),
            "https://speed.example.com/backend"
        );
        assert!(HttpUtils::normalize_base_url("///").is_err());
    }

    #[test]
    fn test_refused_connection_is_network_error() {
        let transport = ReqwestTransport::with_timeout(Duration::from_secs(2)).unwrap();
        let error = tokio_test::block_on(transport.get("http://127.0.0.1:9/empty")).unwrap_err();
        assert!(matches!(error, ProbeError::Network { .. }));
    }

    #[tokio::test]
    async fn test_system_clock_sleep_advances_time() {
        let clock = SystemClock;
        let start = clock.now();
        clock.sleep(Duration::from_millis(5)).await;
        assert!(clock.now().duration_since(start) >= Duration::from_millis(5));
    }
}
