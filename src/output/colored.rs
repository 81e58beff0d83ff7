//! Colored formatter using ANSI escape codes

use super::ReportFormatter;
use crate::models::SpeedTestResult;
use colored::*;
use std::fmt::Write as _;

/// Throughput classification for color coding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThroughputLevel {
    Fast,     // >= 100 Mbps
    Moderate, // 10-100 Mbps
    Slow,     // < 10 Mbps
}

impl ThroughputLevel {
    pub fn from_mbps(mbps: f64) -> Self {
        if mbps >= 100.0 {
            Self::Fast
        } else if mbps >= 10.0 {
            Self::Moderate
        } else {
            Self::Slow
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Fast => Color::Green,
            Self::Moderate => Color::Yellow,
            Self::Slow => Color::Red,
        }
    }
}

fn latency_color(ms: f64) -> Color {
    if ms < 50.0 {
        Color::Green
    } else if ms < 150.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColoredFormatter;

impl ColoredFormatter {
    pub fn new() -> Self {
        Self
    }

    fn speed(&self, mbps: f64) -> ColoredString {
        format!("{:.2} Mbps", mbps).color(ThroughputLevel::from_mbps(mbps).color()).bold()
    }

    fn latency(&self, ms: f64) -> ColoredString {
        format!("{:.2} ms", ms).color(latency_color(ms))
    }
}

impl ReportFormatter for ColoredFormatter {
    fn format_header(&self, server_url: &str) -> String {
        format!(
            "{}\n{} {}\n",
            format!("Speed Test v{}", crate::VERSION).blue().bold(),
            "Server:".bright_black(),
            server_url.cyan()
        )
    }

    fn format_result(&self, result: &SpeedTestResult) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "Speed Test Results:".blue().bold());
        let _ = writeln!(out, "{} {}", "IP:".bright_black(), result.ip);
        let _ = writeln!(out, "{} {}", "ISP:".bright_black(), result.isp);
        let download = self.speed(result.download_mbps);
        let _ = writeln!(out, "{} {}", "Download:".bright_black(), download);
        let _ = writeln!(out, "{} {}", "Upload:".bright_black(), self.speed(result.upload_mbps));
        let _ = writeln!(out, "{} {}", "Ping:".bright_black(), self.latency(result.ping_ms));
        let _ = writeln!(out, "{} {}", "Jitter:".bright_black(), self.latency(result.jitter_ms));
        out
    }
}
