//! Data models and structures for transonic

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::Config;
pub use metrics::{LatencyStats, OrUnknown, ProbeResult, ProbeStats, UNKNOWN_FIELD};
