//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::{supports_color, Cli},
    config::env::EnvManager,
    error::Result,
    models::{config::ENABLE_COLOR_VAR, Config},
};
use std::io::{self, IsTerminal};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
    stdout_is_terminal: bool,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            stdout_is_terminal: io::stdout().is_terminal(),
        }
    }

    /// Override terminal detection for stdout
    pub fn with_terminal(mut self, stdout_is_terminal: bool) -> Self {
        self.stdout_is_terminal = stdout_is_terminal;
        self
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        EnvManager::load_env_file(self.cli.debug)?;
        self.parse_with(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an explicit variable lookup, skipping
    /// the `.env` file
    pub fn parse_with<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        config.merge_from_vars(&lookup)?;

        // no ENABLE_COLOR: colors follow the terminal and NO_COLOR
        if lookup(ENABLE_COLOR_VAR).is_none() {
            config.enable_color = supports_color(&lookup, self.stdout_is_terminal);
        }

        self.apply_cli_overrides(&mut config);
        config.validate()?;

        if config.debug {
            eprintln!(
                "Final config: server_url={}, enable_color={}",
                config.server_url, config.enable_color
            );
        }

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(color) = self.cli.color_override() {
            config.enable_color = color;
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let summary = [
        format!("Server URL: {}", config.server_url),
        format!("Color Output: {}", config.enable_color),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ];
    summary.join("\n")
}
