//! Report formatting
//!
//! Renders a [`SpeedTestResult`] for the terminal, either as plain text or
//! with ANSI colors. Formatters only build strings; printing is left to the
//! caller so the report can go to stdout while logs go to stderr.

mod colored;
mod formatter;

pub use colored::{ColoredFormatter, ThroughputLevel};
pub use formatter::PlainFormatter;

use crate::models::{Config, SpeedTestResult};

/// Renders the pieces of a speed test report
pub trait ReportFormatter: Send + Sync {
    /// Banner printed before the test starts
    fn format_header(&self, server_url: &str) -> String;

    /// The result block
    fn format_result(&self, result: &SpeedTestResult) -> String;
}

/// Selects a formatter from the color preference
pub struct ReportFormatterFactory;

impl ReportFormatterFactory {
    pub fn create(enable_color: bool) -> Box<dyn ReportFormatter> {
        if enable_color {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter::new())
        }
    }

    pub fn from_config(config: &Config) -> Box<dyn ReportFormatter> {
        Self::create(config.enable_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SpeedTestResult {
        SpeedTestResult {
            download_mbps: 93.456,
            upload_mbps: 8.388608,
            ping_ms: 30.0,
            jitter_ms: 14.142135,
            isp: "Example Net".to_string(),
            ip: "203.0.113.9 - Example Net".to_string(),
        }
    }

    #[test]
    fn test_factory_plain_output_has_no_escape_codes() {
        let formatter = ReportFormatterFactory::create(false);
        let text = formatter.format_result(&sample());
        assert!(!text.contains('\u{1b}'));
        assert!(text.contains("Download: 93.46 Mbps"));
    }

    #[test]
    fn test_factory_colored_output_carries_same_values() {
        ::colored::control::set_override(true);
        let formatter = ReportFormatterFactory::create(true);
        let text = formatter.format_result(&sample());
        assert!(text.contains("93.46"));
        assert!(text.contains("Example Net"));
    }

    #[test]
    fn test_factory_from_config() {
        let config = Config { enable_color: false, ..Config::default() };
        let formatter = ReportFormatterFactory::from_config(&config);
        let header = formatter.format_header("http://speed.test");
        assert!(header.contains("http://speed.test"));
    }
}
