//! transonic
//!
//! Pings many hosts in parallel through the system `ping` utility, reads the
//! packet and round-trip summaries it prints, decides which hosts are up
//! against a reply threshold, and renders the run in one of several styles.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod probe;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use executor::{Dispatcher, ExecutionConfig, RunReport};
pub use models::{Config, LatencyStats, ProbeResult, ProbeStats};
pub use output::{OutputCoordinator, OutputFormatterFactory, ResultFormatter};
pub use probe::{parse, PingRunner, ProbeConfig, ProbeRunner, RawProbeOutput};
pub use stats::{is_up, Classifier, UpDownCounts};
pub use types::{Liveness, OutputStyle};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build metadata stamped by build.rs
pub mod build_info {
    pub const BUILD_TIME: &str = env!("BUILD_TIME");
    pub const GIT_COMMIT: &str = env!("GIT_COMMIT");
    pub const TARGET_TRIPLE: &str = env!("TARGET_TRIPLE");

    /// One-line banner for debug output
    pub fn banner() -> String {
        format!(
            "{} v{} ({} {}, built {})",
            super::PKG_NAME,
            super::VERSION,
            TARGET_TRIPLE,
            GIT_COMMIT,
            BUILD_TIME
        )
    }
}

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_COUNT: u32 = 5;
    pub const DEFAULT_CONCURRENCY: usize = 100;
    pub const DEFAULT_PING_PROGRAM: &str = "ping";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    pub const MAX_COUNT: u32 = 100;
    pub const MAX_TIMEOUT_SECS: u64 = 300;
}
