//! Error handling for the speed test client
//!
//! Errors come in two layers. Probes fail with a [`ProbeError`], which the
//! orchestrator tags with the [`Stage`] that produced it to form a
//! [`SpeedTestError`]. The binary works with [`AppError`], which also covers
//! configuration and I/O problems outside the measurement itself.

use std::fmt;
use thiserror::Error;

/// Transport failure subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    /// The shared request timeout elapsed
    Timeout,
    /// The connection could not be established
    Connect,
    /// Any other transport-level failure (reset, body read, ...)
    Other,
}

impl fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Other => "transport",
        };
        f.write_str(name)
    }
}

/// Failure of a single probe
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Connection or timeout failure
    #[error("network error ({kind}): {message}")]
    Network {
        kind: NetworkErrorKind,
        message: String,
    },

    /// The server answered with something other than 200
    #[error("unexpected HTTP status: {status}")]
    Protocol { status: u16 },

    /// The response body could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ProbeError {
    /// Create a new network error
    pub fn network<S: Into<String>>(kind: NetworkErrorKind, message: S) -> Self {
        Self::Network {
            kind,
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::network(NetworkErrorKind::Timeout, message)
    }

    /// Create a new protocol error for an unexpected status code
    pub fn protocol(status: u16) -> Self {
        Self::Protocol { status }
    }

    /// Create a new decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode(message.into())
    }

    /// Short name for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Network { .. } => "NETWORK",
            Self::Protocol { .. } => "PROTOCOL",
            Self::Decode(_) => "DECODE",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Network {
                kind: NetworkErrorKind::Timeout,
                ..
            }
        )
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            NetworkErrorKind::Timeout
        } else if error.is_connect() {
            NetworkErrorKind::Connect
        } else {
            NetworkErrorKind::Other
        };
        if error.is_decode() {
            return Self::decode(error.to_string());
        }
        Self::network(kind, error.to_string())
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(error: serde_json::Error) -> Self {
        Self::decode(error.to_string())
    }
}

/// Stage of a speed test run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Identity,
    Latency,
    Download,
    Upload,
}

impl Stage {
    /// Short lowercase name used in log fields
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Latency => "ping",
            Self::Download => "download",
            Self::Upload => "upload",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Identity => "failed to get IP info",
            Self::Latency => "ping test failed",
            Self::Download => "download test failed",
            Self::Upload => "upload test failed",
        };
        f.write_str(text)
    }
}

/// A probe failure tagged with the stage that produced it
#[derive(Error, Debug)]
#[error("{stage}: {source}")]
pub struct SpeedTestError {
    pub stage: Stage,
    pub source: ProbeError,
}

impl SpeedTestError {
    pub fn new(stage: Stage, source: ProbeError) -> Self {
        Self { stage, source }
    }

    /// The underlying probe failure
    pub fn probe_error(&self) -> &ProbeError {
        &self.source
    }
}

/// Attach a stage to a probe result
pub trait StageContext<T> {
    fn stage(self, stage: Stage) -> std::result::Result<T, SpeedTestError>;
}

impl<T> StageContext<T> for std::result::Result<T, ProbeError> {
    fn stage(self, stage: Stage) -> std::result::Result<T, SpeedTestError> {
        self.map_err(|source| SpeedTestError::new(stage, source))
    }
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network setup errors (building the HTTP client, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing errors (URLs, JSON, etc.)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// A measurement run failed
    #[error(transparent)]
    SpeedTest(#[from] SpeedTestError),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Network(_) => "NETWORK",
            Self::Parse(_) => "PARSE",
            Self::Io(_) => "IO",
            Self::SpeedTest(_) => "SPEEDTEST",
        }
    }

    /// The failed stage, if this error came from a measurement run
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::SpeedTest(e) => Some(e.stage),
            _ => None,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Config(msg) => format!(
                "Configuration problem: {}\n\nSuggestion: {}",
                msg, "Check your .env file or the SPEEDTEST_SERVER_URL variable."
            ),
            Self::Network(msg) => format!(
                "Network setup failed: {}\n\nSuggestion: Check your TLS and proxy settings.",
                msg
            ),
            Self::Parse(msg) => format!(
                "Failed to parse data: {}\n\nSuggestion: {}",
                msg, "Check the format of your configuration values."
            ),
            Self::Io(msg) => format!(
                "File operation failed: {}\n\nSuggestion: Check file permissions.",
                msg
            ),
            Self::SpeedTest(e) => {
                let suggestion = match &e.source {
                    ProbeError::Network {
                        kind: NetworkErrorKind::Timeout,
                        ..
                    } => concat!(
                        "The server did not answer within the request timeout. ",
                        "Check your connection or try a closer server."
                    ),
                    ProbeError::Network { .. } => {
                        "Check that the speed test server is running and reachable."
                    }
                    ProbeError::Protocol { .. } => concat!(
                        "The server rejected the request. ",
                        "Make sure it exposes the LibreSpeed endpoints."
                    ),
                    ProbeError::Decode(_) => concat!(
                        "The server response was not understood. ",
                        "Make sure the server is LibreSpeed-compatible."
                    ),
                };
                format!(
                    "Speed test failed during {} stage: {}\n\nSuggestion: {}",
                    e.stage.name(),
                    e,
                    suggestion
                )
            }
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Network(_) | Self::SpeedTest(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::parse(format!("URL parse error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        Self::network(error.to_string())
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error reporter for user feedback
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Render the report for an error without printing it
    pub fn render(&self, error: &AppError) -> String {
        let mut out = format!("Speed test failed: {}", error.format_for_console(self.use_color));
        if self.verbose {
            out.push_str("\n\n");
            out.push_str(&error.user_friendly_message());
        }
        out
    }

    /// Report an error to the user
    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", self.render(error));
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}
