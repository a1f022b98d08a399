//! Probing a single host: run the echo utility, then parse its report

pub mod parser;
pub mod runner;

pub use parser::{parse, parse_packet_summary, parse_rtt_line, PacketSummary, SummaryFormat};
pub use runner::{PingRunner, ProbeRunner, RawProbeOutput};

use crate::{error::Result, models::ProbeResult};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Read-only settings handed to every probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Echo requests per host
    pub count: u32,
    /// Per-reply timeout passed through to the utility
    pub timeout: Option<Duration>,
}

impl ProbeConfig {
    pub fn new(count: u32, timeout: Option<Duration>) -> Self {
        Self { count, timeout }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new(crate::defaults::DEFAULT_COUNT, None)
    }
}

impl From<&crate::models::Config> for ProbeConfig {
    fn from(config: &crate::models::Config) -> Self {
        Self::new(config.count, config.timeout())
    }
}

/// Probe `host` once and turn the report into a [`ProbeResult`].
///
/// Only a failure to run the utility is an error; unparseable output
/// produces a result with unknown fields.
pub async fn probe_host(runner: &dyn ProbeRunner, host: &str, config: &ProbeConfig) -> Result<ProbeResult> {
    let started = Instant::now();
    let raw = runner.probe(host, config).await?;
    let (stats, latency) = parse(&raw.stdout);
    Ok(ProbeResult::new(host, stats, latency, raw.exit_status, started.elapsed()))
}
