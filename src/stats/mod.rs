//! Reachability classification and run-level tallies

use crate::{models::ProbeResult, types::Liveness};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decide whether a host is up.
///
/// Up means the received count is known and reaches `reply_threshold`.
/// An unknown received count is always down.
pub fn is_up(result: &ProbeResult, reply_threshold: u32) -> bool {
    matches!(result.stats.received, Some(received) if received >= reply_threshold)
}

/// Applies one reply threshold to many results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    reply_threshold: u32,
}

impl Classifier {
    pub fn new(reply_threshold: u32) -> Self {
        Self { reply_threshold }
    }

    pub fn reply_threshold(&self) -> u32 {
        self.reply_threshold
    }

    pub fn classify(&self, result: &ProbeResult) -> Liveness {
        if is_up(result, self.reply_threshold) {
            Liveness::Up
        } else {
            Liveness::Down
        }
    }

    /// Split results into (up, down), each keeping input order
    pub fn partition<'a>(&self, results: &'a [ProbeResult]) -> (Vec<&'a ProbeResult>, Vec<&'a ProbeResult>) {
        results.iter().partition(|r| self.classify(r).is_up())
    }

    pub fn tally(&self, results: &[ProbeResult]) -> UpDownCounts {
        let up = results.iter().filter(|r| self.classify(r).is_up()).count();
        UpDownCounts {
            up,
            down: results.len() - up,
        }
    }
}

/// Number of hosts on each side of the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpDownCounts {
    pub up: usize,
    pub down: usize,
}

impl UpDownCounts {
    pub fn total(&self) -> usize {
        self.up + self.down
    }
}

impl fmt::Display for UpDownCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} up, {} down", self.up, self.down)
    }
}
