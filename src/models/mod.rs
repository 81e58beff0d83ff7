//! Data models for the speed test client

pub mod config;
pub mod identity;
pub mod result;

// Re-export main model types
pub use config::Config;
pub use identity::IdentityInfo;
pub use result::SpeedTestResult;
