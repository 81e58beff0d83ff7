//! Command-line interface
//!
//! The measurement itself is fixed; the CLI only controls presentation.

use clap::Parser;

/// Speed test client for LibreSpeed-compatible servers
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "speedtest")]
#[command(version, about, long_about = None)]
#[command(after_help = "The server is read from SPEEDTEST_SERVER_URL (or a .env file).\n\
Default: http://localhost:8989")]
pub struct Cli {
    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }
        Ok(())
    }

    /// Explicit color choice from the flags, if any
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }

    /// Check if colors should be enabled for a stream, consulting the
    /// process environment when no flag was given
    pub fn use_colors_for(&self, is_terminal: bool) -> bool {
        self.color_override()
            .unwrap_or_else(|| supports_color(|key| std::env::var(key).ok(), is_terminal))
    }
}

/// Check if a stream should get ANSI colors when the user made no explicit
/// choice. `NO_COLOR` and `TERM=dumb` disable, `FORCE_COLOR` enables,
/// otherwise colors follow whether the stream is a terminal.
pub fn supports_color<F>(lookup: F, is_terminal: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("TERM").as_deref() == Some("dumb") {
        return false;
    }

    if lookup("NO_COLOR").is_some() {
        return false;
    }

    if lookup("FORCE_COLOR").is_some() {
        return true;
    }

    is_terminal
}
