//! Plain text formatter

use super::ReportFormatter;
use crate::models::SpeedTestResult;
use std::fmt::Write as _;

/// Formatter for terminals without color and for piped output
#[derive(Debug, Clone, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for PlainFormatter {
    fn format_header(&self, server_url: &str) -> String {
        format!("Speed Test v{}\nServer: {}\n", crate::VERSION, server_url)
    }

    fn format_result(&self, result: &SpeedTestResult) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Speed Test Results:");
        let _ = writeln!(out, "IP: {}", result.ip);
        let _ = writeln!(out, "ISP: {}", result.isp);
        let _ = writeln!(out, "Download: {:.2} Mbps", result.download_mbps);
        let _ = writeln!(out, "Upload: {:.2} Mbps", result.upload_mbps);
        let _ = writeln!(out, "Ping: {:.2} ms", result.ping_ms);
        let _ = writeln!(out, "Jitter: {:.2} ms", result.jitter_ms);
        out
    }
}
