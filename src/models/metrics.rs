//! Probe statistics and per-host result data models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Literal rendered in reports for a field the probe did not report
pub const UNKNOWN_FIELD: &str = "?";

/// Packet accounting from the probe's summary line
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProbeStats {
    /// Echo requests sent
    pub transmitted: Option<u32>,
    /// Echo replies received
    pub received: Option<u32>,
    /// Packet loss percentage as printed by the probe utility
    pub loss_percent: Option<f64>,
    /// Total probe time in milliseconds
    pub total_time_ms: Option<u64>,
}

impl ProbeStats {
    /// All fields unknown
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Build stats from known values.
    ///
    /// Returns `None` when `received` exceeds `transmitted`, which no
    /// well-formed summary line can produce.
    pub fn new(transmitted: u32, received: u32, loss_percent: f64, total_time_ms: u64) -> Option<Self> {
        if received > transmitted {
            return None;
        }
        Some(Self {
            transmitted: Some(transmitted),
            received: Some(received),
            loss_percent: Some(loss_percent),
            total_time_ms: Some(total_time_ms),
        })
    }

    /// True when nothing could be parsed
    pub fn is_unknown(&self) -> bool {
        self.transmitted.is_none()
            && self.received.is_none()
            && self.loss_percent.is_none()
            && self.total_time_ms.is_none()
    }

    /// The received <= transmitted invariant, vacuously true when either is unknown
    pub fn is_consistent(&self) -> bool {
        match (self.transmitted, self.received) {
            (Some(tx), Some(rx)) => rx <= tx,
            _ => true,
        }
    }
}

/// Round-trip time summary in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatencyStats {
    pub min_ms: Option<f64>,
    pub avg_ms: Option<f64>,
    pub max_ms: Option<f64>,
    pub mdev_ms: Option<f64>,
    /// Decimal places ping printed the values with, kept for text reports
    #[serde(skip)]
    pub decimals: Option<usize>,
}

impl LatencyStats {
    /// All fields unknown
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn new(min_ms: f64, avg_ms: f64, max_ms: f64, mdev_ms: f64) -> Self {
        Self {
            min_ms: Some(min_ms),
            avg_ms: Some(avg_ms),
            max_ms: Some(max_ms),
            mdev_ms: Some(mdev_ms),
            decimals: None,
        }
    }

    /// Render values with `decimals` places instead of the shortest form
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// `min/avg/max/mdev` as ping printed them, `?` for unknown values
    pub fn summary(&self) -> String {
        [self.min_ms, self.avg_ms, self.max_ms, self.mdev_ms]
            .iter()
            .map(|value| Millis(value, self.decimals).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn is_unknown(&self) -> bool {
        self.min_ms.is_none() && self.avg_ms.is_none() && self.max_ms.is_none() && self.mdev_ms.is_none()
    }
}

/// Everything known about one probed host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Host exactly as supplied by the caller
    pub host: String,
    pub stats: ProbeStats,
    pub latency: LatencyStats,
    /// Exit code of the probe utility; `None` if it was killed by a signal
    pub exit_status: Option<i32>,
    /// Wall-clock time spent on this host
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
}

impl ProbeResult {
    pub fn new(
        host: impl Into<String>,
        stats: ProbeStats,
        latency: LatencyStats,
        exit_status: Option<i32>,
        elapsed: Duration,
    ) -> Self {
        Self {
            host: host.into(),
            stats,
            latency,
            exit_status,
            elapsed,
        }
    }

    /// A result for a host the probe produced nothing usable for
    pub fn unknown(host: impl Into<String>, exit_status: Option<i32>) -> Self {
        Self::new(host, ProbeStats::unknown(), LatencyStats::unknown(), exit_status, Duration::ZERO)
    }
}

/// Renders an optional value, falling back to [`UNKNOWN_FIELD`]
pub struct OrUnknown<'a, T>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrUnknown<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str(UNKNOWN_FIELD),
        }
    }
}

/// A latency with a fixed number of decimals when known
struct Millis<'a>(&'a Option<f64>, Option<usize>);

impl fmt::Display for Millis<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0, self.1) {
            (Some(value), Some(decimals)) => write!(f, "{:.*}", decimals, value),
            (Some(value), None) => value.fmt(f),
            (None, _) => f.write_str(UNKNOWN_FIELD),
        }
    }
}

pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64() * 1000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(ms.max(0.0) / 1000.0))
    }
}
