//! Configuration data model and validation

use crate::client::HttpUtils;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming the speed test server
pub const SERVER_URL_VAR: &str = "SPEEDTEST_SERVER_URL";
/// Environment variable toggling colored output
pub const ENABLE_COLOR_VAR: &str = "ENABLE_COLOR";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the speed test server, without trailing slash
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Validate the configuration and normalize the server URL
    pub fn validate(&mut self) -> Result<()> {
        if self.server_url.trim().is_empty() {
            return Err(AppError::config("Server URL cannot be empty"));
        }
        self.server_url = HttpUtils::normalize_base_url(&self.server_url)?;
        Ok(())
    }

    /// Merge environment variables from an arbitrary lookup
    pub fn merge_from_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server_url) = lookup(SERVER_URL_VAR) {
            let server_url = server_url.trim();
            if !server_url.is_empty() {
                self.server_url = server_url.to_string();
            }
        }

        if let Some(enable_color) = lookup(ENABLE_COLOR_VAR) {
            self.enable_color = enable_color.trim().parse().map_err(|e| {
                AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e))
            })?;
        }

        Ok(())
    }
}

fn default_server_url() -> String {
    crate::defaults::DEFAULT_SERVER_URL.to_string()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
